//! GPL operands and the two shared operand decoders.
//!
//! Most GPL instructions address memory through a "general address source" (GAS) field:
//!
//! ```text
//! 0AAAAAAA                       @>8300+A       one byte, scratchpad direct
//! 1XVIAAAA AAAAAAAA              12-bit offset  X=indexed, V=VDP, I=indirect
//! 1XVI1111 HHHHHHHH LLLLLLLL     extended       full 16-bit address >HHLL
//! ... followed by one index byte when X is set
//! ```
//!
//! CPU addresses are relative to the scratchpad window at >8300. VDP direct addresses are
//! absolute VDP addresses, while a VDP indirect operand names its pointer in scratchpad.
use super::*;
use memory::Cursor;

/// Base of the scratchpad RAM window that CPU operands are relative to.
pub const SCRATCHPAD: u16 = 0x8300;

const GAS_LONG: u8 = 0x80;
const GAS_INDEXED: u16 = 0x4000;
const GAS_VDP: u16 = 0x2000;
const GAS_INDIRECT: u16 = 0x1000;
const GAS_OFFSET: u16 = 0x0fff;
const GAS_EXTENDED: u16 = 0x0f00;

/// A decoded operand. Operands are rendered immediately after decoding;
/// `Display` produces the canonical listing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// CPU or VDP memory (`@>HHHH`, `*>HHHH`, `V@>HHHH`, `V*>HHHH`), optionally indexed
    Memory {
        vdp: bool,
        indirect: bool,
        addr: u16,
        /// scratchpad offset of the index byte
        index: Option<u8>,
    },
    /// GROM address (`G@>HHHH`), optionally indexed
    Grom { addr: u16, index: Option<u8> },
    /// literal value (`>HH` or `>HHHH`)
    Immediate(u8u16),
    /// VDP register number (`#n`)
    VdpRegister(u8),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = match self {
            Operand::Memory {
                vdp,
                indirect,
                addr,
                index,
            } => {
                write!(
                    f,
                    "{}{}>{:04X}",
                    if *vdp { "V" } else { "" },
                    if *indirect { '*' } else { '@' },
                    addr
                )?;
                index
            }
            Operand::Grom { addr, index } => {
                write!(f, "G@>{:04X}", addr)?;
                index
            }
            Operand::Immediate(val) => return write!(f, ">{}", val),
            Operand::VdpRegister(reg) => return write!(f, "#{}", reg),
        };
        if let Some(x) = index {
            write!(f, "(@>{:04X})", SCRATCHPAD + *x as u16)?;
        }
        Ok(())
    }
}

/// Decodes a CPU/VDP source or destination operand (a GAS field).
/// Consumes 1 byte for the short form, otherwise 2 to 4 bytes.
pub fn decode_gas(c: &mut Cursor) -> Result<Operand, Error> {
    let first = c.read_u8()?;
    if first & GAS_LONG == 0 {
        return Ok(Operand::Memory {
            vdp: false,
            indirect: false,
            addr: SCRATCHPAD + first as u16,
            index: None,
        });
    }
    let w = (first as u16) << 8 | c.read_u8()? as u16;
    let vdp = w & GAS_VDP != 0;
    let indirect = w & GAS_INDIRECT != 0;
    let mut addr = w & GAS_OFFSET;
    if addr >= GAS_EXTENDED {
        // the offset byte is the high half of a full address; no window applies
        addr = (addr & 0xff) << 8 | c.read_u8()? as u16;
    } else if !vdp || indirect {
        // CPU addresses and VDP pointers live in the scratchpad window
        addr += SCRATCHPAD;
    }
    let index = if w & GAS_INDEXED != 0 { Some(c.read_u8()?) } else { None };
    Ok(Operand::Memory {
        vdp,
        indirect,
        addr,
        index,
    })
}

/// Decodes one operand slot of MOVE. When `cpu` is set the slot holds a GAS field,
/// otherwise a two byte GROM address followed by an index byte if `indexed` is set.
pub fn decode_grom(c: &mut Cursor, cpu: bool, indexed: bool) -> Result<Operand, Error> {
    if cpu {
        return decode_gas(c);
    }
    let addr = c.read_u16()?;
    let index = if indexed { Some(c.read_u8()?) } else { None };
    Ok(Operand::Grom { addr, index })
}

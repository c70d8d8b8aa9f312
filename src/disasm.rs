//! Turns the bytes at a GROM address into one line of GPL assembly.
use super::*;
use formats::DecodeContext;
use memory::Cursor;
use opcodes::Descriptor;
use operand::Operand;

/// Longest possible GPL instruction: a MOVE with three extended, indexed operands.
pub const MAX_INSTRUCTION: usize = 13;
/// Width of the marker plus mnemonic column.
const MNEMONIC_WIDTH: usize = 6;

/// A decoded instruction. Holds everything needed to print it, but nothing that
/// outlives the call that produced it.
#[derive(Debug)]
pub struct Instruction {
    /// GROM address of the opcode byte
    pub addr: u16,
    /// the table row that matched the opcode
    pub desc: &'static Descriptor,
    /// true if the instruction operates on words (listed with a 'D' prefix)
    pub word: bool,
    /// operands in listing order
    pub operands: Vec<Operand>,
    /// the instruction's bytes, opcode first
    pub bytes: Vec<u8>,
}

impl Instruction {
    /// Number of bytes the instruction occupies.
    pub fn size(&self) -> usize { self.bytes.len() }
    /// The instruction without its address: width marker, padded mnemonic and operands.
    pub fn body(&self) -> String {
        let mnemonic = format!("{}{}", if self.word { "D" } else { "" }, self.desc.name);
        let operands = self.operands.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(",");
        format!("{:width$} {}", mnemonic, operands, width = MNEMONIC_WIDTH)
    }
}
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:04X}  {}", self.addr, self.body()) }
}

/// Decodes the instruction whose opcode is `bytes[0]`, located at GROM address `addr`.
/// Fails with ErrorKind::Truncated if the instruction runs past the end of `bytes`.
pub fn disassemble(addr: u16, bytes: &[u8]) -> Result<Instruction, Error> {
    let mut c = Cursor::new(addr, bytes);
    let desc = opcodes::lookup(c.peek_u8()?);
    let mut ctx = DecodeContext::new(addr);
    formats::decode(desc.format, &mut ctx, &mut c)?;
    Ok(Instruction {
        addr: ctx.addr,
        desc,
        word: ctx.word,
        operands: ctx.operands,
        bytes: c.taken().to_vec(),
    })
}

/// Decodes one instruction and returns its listing line and length in bytes.
pub fn disassemble_line(addr: u16, bytes: &[u8]) -> Result<(String, usize), Error> {
    let inst = disassemble(addr, bytes)?;
    Ok((inst.to_string(), inst.size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcodes::Format;
    use std::thread;

    #[test]
    fn inherent_and_literal_opcodes() -> Result<(), Error> {
        assert_eq!(disassemble_line(0x6000, &[0x00])?, ("6000  RTN    ".to_string(), 1));
        assert_eq!(disassemble_line(0x6000, &[0x04, 0x2a])?, ("6000  BACK   >2A".to_string(), 2));
        assert_eq!(disassemble_line(0x6000, &[0x05, 0x12, 0x34])?, ("6000  B      >1234".to_string(), 3));
        assert_eq!(disassemble_line(0x6000, &[0x14])?, ("6000  XGPL   ".to_string(), 1));
        assert_eq!(disassemble_line(0x0010, &[0x0f, 0x17])?, ("0010  XML    >17".to_string(), 2));
        Ok(())
    }
    #[test]
    fn branch_uses_page_of_instruction() -> Result<(), Error> {
        assert_eq!(disassemble_line(0x6000, &[0x40, 0x34])?, ("6000  BR     >6034".to_string(), 2));
        assert_eq!(disassemble_line(0x0000, &[0x40, 0x34])?, ("0000  BR     >0034".to_string(), 2));
        assert_eq!(disassemble_line(0x7ff0, &[0x61, 0x00])?, ("7FF0  BS     >6100".to_string(), 2));
        Ok(())
    }
    #[test]
    fn word_marker_prefixes_mnemonic() -> Result<(), Error> {
        assert_eq!(disassemble_line(0x6000, &[0x86, 0x00])?.0, "6000  CLR    @>8300");
        assert_eq!(disassemble_line(0x6000, &[0x87, 0x00])?.0, "6000  DCLR   @>8300");
        assert_eq!(
            disassemble_line(0x6000, &[0xbd, 0x7f, 0x80, 0x00])?,
            ("6000  DST    @>8300,@>837F".to_string(), 4)
        );
        // six characters fill the column; the separating space remains
        assert_eq!(
            disassemble_line(0x6000, &[0xed, 0x00, 0x02])?.0,
            "6000  DCOINC @>8302,@>8300"
        );
        Ok(())
    }
    #[test]
    fn move_line() -> Result<(), Error> {
        assert_eq!(
            disassemble_line(0x6100, &[0x31, 0x00, 0x20, 0xa3, 0x00, 0x61, 0x80])?,
            ("6100  MOVE   >0020,V@>0300,G@>6180".to_string(), 7)
        );
        Ok(())
    }
    #[test]
    fn length_stops_at_instruction_end() -> Result<(), Error> {
        let inst = disassemble(0x6000, &[0x05, 0x12, 0x34, 0x00, 0x00])?;
        assert_eq!(inst.size(), 3);
        assert_eq!(inst.bytes, vec![0x05, 0x12, 0x34]);
        assert_eq!(inst.desc.name, "B");
        assert_ne!(inst.desc.format, Format::Unknown);
        Ok(())
    }
    #[test]
    fn every_truncated_prefix_fails_cleanly() {
        let samples: &[&[u8]] = &[
            &[0x05, 0x12, 0x34],
            &[0x40, 0x34],
            &[0xbf, 0xa4, 0x00, 0x12, 0x34],
            &[0x35, 0x00, 0x02, 0x10, 0x60, 0x20, 0x4c],
            &[0x97, 0xcf, 0x12, 0x34, 0x56],
        ];
        for bytes in samples {
            for len in 0..bytes.len() {
                let e = disassemble(0x6000, &bytes[..len]).unwrap_err();
                assert_eq!(e.kind, ErrorKind::Truncated, "{:02X?} cut to {}", bytes, len);
            }
            assert!(disassemble(0x6000, bytes).is_ok());
        }
    }
    #[test]
    fn scratchpad_boundary() -> Result<(), Error> {
        assert_eq!(disassemble_line(0x6000, &[0x90, 0x7f])?, ("6000  INC    @>837F".to_string(), 2));
        assert_eq!(disassemble_line(0x6000, &[0x90, 0x80, 0x7f])?, ("6000  INC    @>837F".to_string(), 3));
        Ok(())
    }
    #[test]
    fn unknown_opcode_line() {
        let inst = Instruction {
            addr: 0x6000,
            desc: opcodes::UNKNOWN,
            word: false,
            operands: vec![Operand::Immediate(u8u16::u8(0xfe))],
            bytes: vec![0xfe],
        };
        assert_eq!(inst.to_string(), "6000  ????   >FE");
        assert_eq!(inst.size(), 1);
    }
    #[test]
    fn every_opcode_decodes() -> Result<(), Error> {
        // any opcode followed by zeros is a complete instruction
        let mut bytes = [0u8; MAX_INSTRUCTION];
        for op in 0..=0xffu8 {
            bytes[0] = op;
            let inst = disassemble(0x6000, &bytes)?;
            assert_ne!(inst.desc.format, Format::Unknown);
            assert!((1..=9).contains(&inst.size()), "{:02X} took {} bytes", op, inst.size());
        }
        Ok(())
    }
    #[test]
    fn repeated_and_concurrent_calls_agree() -> Result<(), Error> {
        let bytes: &[u8] = &[0x35, 0x00, 0x02, 0x10, 0x60, 0x20, 0x4c];
        let first = disassemble_line(0x6000, bytes)?;
        assert_eq!(disassemble_line(0x6000, bytes)?, first);
        thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(move || disassemble_line(0x6000, bytes))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap().unwrap(), first);
            }
        });
        Ok(())
    }
}

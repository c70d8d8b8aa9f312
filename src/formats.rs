//! Decode routines for the GPL instruction formats.
//!
//! Every routine starts with the cursor on the opcode byte, consumes the opcode and all of
//! its operand bytes, and records what it found in the DecodeContext. Several formats keep
//! flag bits in the low bits of the opcode itself.
use super::*;
use memory::Cursor;
use opcodes::Format;
use operand::{decode_gas, decode_grom, Operand};

// Dual and Single: 1xxxxxIW
const WORD: u8 = 0x01;
const IMMEDIATE_SOURCE: u8 = 0x02;
// Move: 001GRVCN
const MOVE_IMMEDIATE_COUNT: u8 = 0x01;
const MOVE_CPU_SOURCE: u8 = 0x02;
const MOVE_INDEXED_SOURCE: u8 = 0x04;
const MOVE_VDP_REGISTER: u8 = 0x08;
const MOVE_CPU_DESTINATION: u8 = 0x10;
// Branch: 01Sddddd dddddddd
const PAGE_MASK: u16 = 0xe000;
const DISPLACEMENT_MASK: u16 = 0x1fff;

/// State for decoding one instruction. Created fresh for each call to disassemble.
#[derive(Debug)]
pub struct DecodeContext {
    /// GROM address of the opcode byte
    pub addr: u16,
    /// base of the 8K GROM page holding the instruction
    pub page_base: u16,
    /// set by formats that operate on words rather than bytes
    pub word: bool,
    /// operands in the order they are rendered
    pub operands: Vec<Operand>,
}
impl DecodeContext {
    pub fn new(addr: u16) -> DecodeContext {
        DecodeContext {
            addr,
            page_base: addr & PAGE_MASK,
            word: false,
            operands: Vec::new(),
        }
    }
}

/// Format decoders have this signature.
type DecodeFn = fn(&mut DecodeContext, &mut Cursor) -> Result<(), Error>;

/// Selects the decode routine for a format.
fn routine(format: Format) -> DecodeFn {
    use Format::*;
    match format {
        Reserved | Inherent | Fmt => opcode_only,
        Dual => dual,
        ImmByte => imm_byte,
        ImmWord => imm_word,
        Branch => branch,
        Single => single,
        Move => move_,
        Unknown => unknown,
    }
}

/// Decodes one instruction of the given format into `ctx`.
pub fn decode(format: Format, ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    (routine(format))(ctx, c)
}

fn opcode_only(_: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    c.read_u8()?;
    Ok(())
}
fn unknown(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    // the raw byte is the only thing worth showing
    let op = c.read_u8()?;
    ctx.operands.push(Operand::Immediate(u8u16::u8(op)));
    Ok(())
}
fn imm_byte(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    c.read_u8()?;
    let val = c.read_u8u16(1)?;
    ctx.operands.push(Operand::Immediate(val));
    Ok(())
}
fn imm_word(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    c.read_u8()?;
    let val = c.read_u8u16(2)?;
    ctx.operands.push(Operand::Immediate(val));
    Ok(())
}
fn branch(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    let displacement = c.read_u16()? & DISPLACEMENT_MASK;
    ctx.operands
        .push(Operand::Immediate(u8u16::u16(ctx.page_base + displacement)));
    Ok(())
}
fn single(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    let op = c.read_u8()?;
    ctx.word = op & WORD != 0;
    ctx.operands.push(decode_gas(c)?);
    Ok(())
}
fn dual(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    let op = c.read_u8()?;
    ctx.word = op & WORD != 0;
    // destination comes first in the byte stream but is listed last
    let dst = decode_gas(c)?;
    let src = if op & IMMEDIATE_SOURCE != 0 {
        Operand::Immediate(c.read_u8u16(if ctx.word { 2 } else { 1 })?)
    } else {
        decode_gas(c)?
    };
    ctx.operands.push(src);
    ctx.operands.push(dst);
    Ok(())
}
fn move_(ctx: &mut DecodeContext, c: &mut Cursor) -> Result<(), Error> {
    let op = c.read_u8()?;
    let count = if op & MOVE_IMMEDIATE_COUNT != 0 {
        Operand::Immediate(u8u16::u16(c.read_u16()?))
    } else {
        decode_gas(c)?
    };
    let dst = if op & MOVE_VDP_REGISTER != 0 {
        Operand::VdpRegister(c.read_u8()? & 0x07)
    } else {
        decode_grom(c, op & MOVE_CPU_DESTINATION != 0, false)?
    };
    let src = decode_grom(c, op & MOVE_CPU_SOURCE != 0, op & MOVE_INDEXED_SOURCE != 0)?;
    ctx.operands.extend([count, dst, src]);
    Ok(())
}

use super::*;

/// A bounds-checked read cursor over the bytes of a single instruction.
/// Every read either succeeds or fails with ErrorKind::Truncated; nothing past the
/// end of the supplied slice is ever touched.
pub struct Cursor<'a> {
    /// address of the first byte of `bytes` (the opcode)
    base: u16,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(base: u16, bytes: &'a [u8]) -> Cursor<'a> { Cursor { base, bytes, pos: 0 } }
    /// The bytes consumed so far, opcode first.
    pub fn taken(&self) -> &'a [u8] { &self.bytes[..self.pos] }
    /// Looks at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8, Error> {
        if let Some(&byte) = self.bytes.get(self.pos) {
            Ok(byte)
        } else {
            Err(truncated_err!(
                self.base,
                "byte {} needed but only {} supplied",
                self.pos + 1,
                self.bytes.len()
            ))
        }
    }
    // reads one byte
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }
    // reads two bytes as a u16 (high order byte first)
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let hi = self.read_u8()?;
        let lo = self.read_u8()?;
        Ok((hi as u16) << 8 | (lo as u16))
    }
    // reads a one or two byte literal
    pub fn read_u8u16(&mut self, size: u16) -> Result<u8u16, Error> {
        let first = self.read_u8()?;
        match size {
            1 => Ok(u8u16::new(first, None)),
            _ => Ok(u8u16::new(self.read_u8()?, Some(first))),
        }
    }
}

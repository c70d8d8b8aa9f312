use std::fmt;

/// u8u16 is a helper enum for GPL literals that may be either one or two bytes wide.
/// The width matters for rendering: a byte literal prints as two hex digits,
/// a word literal as four, regardless of the value.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum u8u16 {
    u8(u8),
    u16(u16),
}
impl fmt::Display for u8u16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            u8u16::u8(val) => format!("{:02X}", val),
            u8u16::u16(val) => format!("{:04X}", val),
        };
        write!(f, "{:width$}", s, width = f.width().unwrap_or(0))
    }
}

impl u8u16 {
    /// Builds a literal from big-endian bytes; `lsb` alone gives a byte literal.
    pub fn new(lsb: u8, msb: Option<u8>) -> Self {
        if let Some(hi) = msb {
            u8u16::u16(((hi as u16) << 8) | (lsb as u16))
        } else {
            u8u16::u8(lsb)
        }
    }
}

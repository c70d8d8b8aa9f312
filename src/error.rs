use std::{convert::From, fmt};

/// Simple custom Error for the GPL disassembler
pub struct Error {
    pub kind: ErrorKind,
    /// GROM address of the instruction being decoded, if any
    pub addr: Option<u16>,
    pub msg: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// an instruction needs more bytes than were supplied
    Truncated,
    /// underlying io error
    IO,
    /// malformed Intel HEX input
    HexFormat,
    /// catch-all for other errors
    General,
}

impl Error {
    pub fn new(kind: ErrorKind, addr: Option<u16>, message: &str) -> Error {
        Error {
            kind,
            addr,
            msg: String::from(message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::new(ErrorKind::IO, None, e.to_string().as_str()) }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}: {}", red!("gpl::Error"), self.msg) }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(addr) = self.addr {
            write!(f, " (instruction at >{:04X})", addr)?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {}

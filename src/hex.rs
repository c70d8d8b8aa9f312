#![allow(non_snake_case, non_upper_case_globals)]

//! GROM dumps are often passed around as Intel Hex, so images can be loaded in that
//! format as well as raw binary.
//!
//! This implementation reads the I8HEX subset described in
//! [this wikipedia article](https://en.wikipedia.org/wiki/Intel_HEX):
//! data records and a single end of file record.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::ops::Deref;
use std::path::Path;

use super::*;

pub mod HexRecordType {
    pub const Data: u8 = 0;
    pub const EndOfFile: u8 = 1;
}
lazy_static! {
    static ref RE_RECORD: Regex =
        Regex::new(r"(?i)^.*:([0-9a-f]{2})([0-9a-f]{4})([0-9a-f]{2})((?:[0-9a-f]{2})*)([0-9a-f]{2})").unwrap();
}
pub struct HexRecord {
    pub data_size: u8,
    pub address: u16,
    pub record_type: u8,
    pub data: Option<Vec<u8>>,
    pub checksum: u8,
}
impl HexRecord {
    /// Parses one line. Lines without a record are Ok(None); malformed records are Err.
    pub fn from_str<S: AsRef<str>>(s: S) -> Result<Option<Self>, ()> {
        if let Some(c) = RE_RECORD.captures(s.as_ref()) {
            Ok(Some(Self::from_captures(&c).ok_or(())?))
        } else {
            Ok(None)
        }
    }
    pub fn from_captures(c: &regex::Captures) -> Option<Self> {
        let data_size = u8::from_str_radix(c.get(1)?.as_str(), 16).ok()?;
        let h = HexRecord {
            data_size,
            address: u16::from_str_radix(c.get(2)?.as_str(), 16).ok()?,
            record_type: u8::from_str_radix(c.get(3)?.as_str(), 16).ok()?,
            data: HexRecord::data_from_str(c.get(4)?.as_str(), data_size),
            checksum: u8::from_str_radix(c.get(5)?.as_str(), 16).ok()?,
        };
        h.calc_checksum().filter(|&c| c == h.checksum).map(|_| h)
    }
    fn data_from_str(s: &str, byte_count: u8) -> Option<Vec<u8>> {
        if byte_count == 0 || s.len() != (2 * byte_count as usize) {
            return None;
        }
        (0..byte_count as usize)
            .map(|i| u8::from_str_radix(&s[i * 2..(i + 1) * 2], 16).ok())
            .collect()
    }
    fn calc_checksum(&self) -> Option<u8> {
        let mut sum = 0u16;
        sum += self.data_size as u16;
        sum += self.address >> 8;
        sum += self.address & 0xff;
        sum += self.record_type as u16;
        if let Some(data) = self.data.as_ref() {
            data.iter().for_each(|&b| sum += b as u16);
            if data.len() != self.data_size as usize {
                return None;
            }
        } else if self.data_size != 0 {
            return None;
        }
        Some((sum as u8).wrapping_neg())
    }
    /// Address one past the last data byte of this record.
    pub fn end(&self) -> u32 { self.address as u32 + self.data_size as u32 }
}

pub struct HexRecordCollection {
    records: Vec<HexRecord>,
    eof: bool,
}

impl HexRecordCollection {
    pub fn from_str_iter<I, T>(iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut hf = HexRecordCollection {
            records: Vec::new(),
            eof: false,
        };
        for (i, s) in iter.into_iter().enumerate() {
            let line = i + 1;
            let hr = HexRecord::from_str(s.into()).map_err(|_| hex_err!(line, "bad record or checksum"))?;
            if let Some(hr) = hr {
                hf.add_record(hr).map_err(|e| hex_err!(line, e.msg))?
            }
        }
        if hf.eof {
            Ok(hf)
        } else {
            Err(general_err!("EOF record not found in hex file"))
        }
    }
    pub fn add_record(&mut self, h: HexRecord) -> Result<(), Error> {
        if self.eof {
            return Err(general_err!("records after EOF in hex file"));
        }
        match h.record_type {
            HexRecordType::EndOfFile => self.eof = true,
            HexRecordType::Data => {
                if h.end() > 0x10000 {
                    return Err(general_err!(format!("record at {:04X} runs past FFFF", h.address)));
                }
            }
            t => return Err(general_err!(format!("unsupported record type {:02X}", t))),
        }
        self.records.push(h);
        Ok(())
    }
    pub fn read_from_file(path: &Path) -> Result<Self, Error> {
        let file = BufReader::new(File::open(path)?)
            .lines()
            .collect::<Result<Vec<String>, io::Error>>()?;
        HexRecordCollection::from_str_iter(file)
    }
    /// The data records, in file order.
    pub fn data(&self) -> impl Iterator<Item = &HexRecord> {
        self.records.iter().filter(|r| r.record_type == HexRecordType::Data)
    }
}

impl Deref for HexRecordCollection {
    type Target = Vec<HexRecord>;
    fn deref(&self) -> &Self::Target { &self.records }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parses_data_and_eof() -> Result<(), Error> {
        let hf = HexRecordCollection::from_str_iter([":0360000000042A6F", "", ":00000001FF"])?;
        assert_eq!(hf.len(), 2);
        let r = hf.data().next().unwrap();
        assert_eq!(r.address, 0x6000);
        assert_eq!(r.data.as_deref(), Some(&[0x00, 0x04, 0x2a][..]));
        assert_eq!(r.end(), 0x6003);
        Ok(())
    }
    #[test]
    fn rejects_bad_checksum() {
        let e = HexRecordCollection::from_str_iter([":0360000000042A6E", ":00000001FF"])
            .err()
            .unwrap();
        assert_eq!(e.kind, ErrorKind::HexFormat);
        assert!(e.msg.contains("line 1"));
    }
    #[test]
    fn requires_eof_record() {
        let e = HexRecordCollection::from_str_iter([":0360000000042A6F"]).err().unwrap();
        assert_eq!(e.kind, ErrorKind::General);
    }
    #[test]
    fn rejects_extended_address_records() {
        let e = HexRecordCollection::from_str_iter([":020000021000EC", ":00000001FF"])
            .err()
            .unwrap();
        assert_eq!(e.kind, ErrorKind::HexFormat);
    }
}

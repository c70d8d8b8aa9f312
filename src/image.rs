use super::*;
use crate::hex::HexRecordCollection;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// A contiguous run of GROM bytes starting at `origin`.
#[derive(Debug, PartialEq, Eq)]
pub struct Image {
    pub origin: u16,
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn new(origin: u16, bytes: Vec<u8>) -> Result<Image, Error> {
        let img = Image { origin, bytes };
        if img.end() > 0x10000 {
            return Err(general_err!(format!(
                "{} byte image at {:04X} runs past FFFF",
                img.bytes.len(),
                origin
            )));
        }
        Ok(img)
    }
    /// Address one past the last byte of the image.
    pub fn end(&self) -> u32 { self.origin as u32 + self.bytes.len() as u32 }
    pub fn contains(&self, addr: u32) -> bool { (self.origin as u32..self.end()).contains(&addr) }
    /// The bytes from `addr` up to (not including) `end`.
    pub fn slice(&self, addr: u16, end: u32) -> &[u8] {
        let from = (addr as usize).saturating_sub(self.origin as usize).min(self.bytes.len());
        let to = (end as usize).saturating_sub(self.origin as usize).min(self.bytes.len());
        &self.bytes[from..to.max(from)]
    }
    /// Builds an image from the data records of a hex file.
    /// Gaps between records are filled with zeros, and a record that lands on bytes an
    /// earlier record already wrote replaces them; both are reported.
    pub fn from_hex(hex: &HexRecordCollection) -> Result<Image, Error> {
        let lo = hex.data().map(|r| r.address).min();
        let hi = hex.data().map(|r| r.end()).max();
        let (lo, hi) = match (lo, hi) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return Err(general_err!("hex file contains no data")),
        };
        let fill = place_records(hex, lo, (hi - lo as u32) as usize);
        if fill.overwritten > 0 {
            warn!(
                "hex records overlap; {} bytes were written more than once (last record wins)",
                fill.overwritten
            );
        }
        if fill.unset > 0 {
            warn!(
                "hex file leaves {} bytes between {:04X} and {:04X} unset; treating them as 00",
                fill.unset,
                lo,
                hi - 1
            );
        }
        Image::new(lo, fill.bytes)
    }
    /// Loads a raw binary image at `origin`, or a hex file at the addresses it names.
    pub fn load(path: &Path, origin: u16) -> Result<Image, Error> {
        let ext = path.extension().and_then(OsStr::to_str).unwrap_or("");
        if ext.eq_ignore_ascii_case("hex") {
            let hex = HexRecordCollection::read_from_file(path)?;
            verbose_println!("Read {} hex records from {}", hex.len(), path.display());
            Image::from_hex(&hex)
        } else {
            Image::new(origin, fs::read(path)?)
        }
    }
}

/// The result of laying hex records out over a zeroed buffer.
struct HexFill {
    bytes: Vec<u8>,
    /// bytes no record wrote
    unset: usize,
    /// bytes written by more than one record
    overwritten: usize,
}

fn place_records(hex: &HexRecordCollection, lo: u16, len: usize) -> HexFill {
    let mut bytes = vec![0u8; len];
    let mut written = vec![false; len];
    let mut overwritten = 0;
    for r in hex.data() {
        if let Some(data) = r.data.as_ref() {
            let at = (r.address - lo) as usize;
            bytes[at..at + data.len()].copy_from_slice(data);
            for seen in &mut written[at..at + data.len()] {
                if *seen {
                    overwritten += 1;
                }
                *seen = true;
            }
        }
    }
    let unset = written.iter().filter(|w| !**w).count();
    HexFill {
        bytes,
        unset,
        overwritten,
    }
}

//! Linear sweep disassembly of an image: decode an instruction, step over it, repeat.
use super::*;
use disasm::{disassemble_line, MAX_INSTRUCTION};
use image::Image;
use opcodes::Format;

/// Width of the optional raw bytes column (room for eight bytes).
const BYTES_WIDTH: usize = 23;
/// Width of the address that starts every line.
const ADDR_WIDTH: usize = 4;

/// One line of a listing: a decoded instruction or a single data byte.
#[derive(Debug, PartialEq, Eq)]
pub struct ListingLine {
    pub bytes: Vec<u8>,
    /// the line as printed without the bytes column
    pub text: String,
    /// true for a byte listed as data rather than decoded
    pub data: bool,
}
impl ListingLine {
    fn data_byte(addr: u16, byte: u8) -> ListingLine {
        ListingLine {
            bytes: vec![byte],
            text: format!("{:04X}  {:6} >{:02X}", addr, "BYTE", byte),
            data: true,
        }
    }
    pub fn render(&self, show_bytes: bool) -> String {
        if show_bytes {
            let raw = self.bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ");
            let (addr, rest) = self.text.split_at(ADDR_WIDTH);
            format!("{}  {:width$}{}", addr, raw, rest, width = BYTES_WIDTH)
        } else {
            self.text.clone()
        }
    }
}

/// Iterates over the instructions of an image from `start` up to `end`.
/// An instruction that would run past `end` ends the sweep: its bytes and any
/// that follow are listed as data.
pub struct Listing<'a> {
    image: &'a Image,
    addr: u32,
    end: u32,
    in_tail: bool,
}

impl<'a> Listing<'a> {
    pub fn new(image: &'a Image, start: u16, end: u32) -> Listing<'a> {
        Listing {
            image,
            addr: (start as u32).max(image.origin as u32),
            end: end.min(image.end()),
            in_tail: false,
        }
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = ListingLine;
    fn next(&mut self) -> Option<ListingLine> {
        if self.addr >= self.end {
            return None;
        }
        let addr = self.addr as u16;
        let bytes = self.image.slice(addr, self.end.min(self.addr + MAX_INSTRUCTION as u32));
        if !self.in_tail {
            match disassemble_line(addr, bytes) {
                Ok((text, size)) => {
                    if opcodes::lookup(bytes[0]).format == Format::Unknown {
                        verbose_println!("Unknown opcode {:02X} at {:04X}; resuming at next byte", bytes[0], addr);
                    }
                    self.addr += size as u32;
                    return Some(ListingLine {
                        bytes: bytes[..size].to_vec(),
                        text,
                        data: false,
                    });
                }
                Err(e) => {
                    warn!("{}; listing remaining {} bytes as data", e, self.end - self.addr);
                    self.in_tail = true;
                }
            }
        }
        self.addr += 1;
        Some(ListingLine::data_byte(addr, bytes[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(image: &Image, start: u16, end: u32) -> Vec<String> {
        Listing::new(image, start, end).map(|l| l.render(false)).collect()
    }

    #[test]
    fn sweeps_instruction_by_instruction() -> Result<(), Error> {
        let img = Image::new(0x6000, vec![0x05, 0x60, 0x05, 0x04, 0x2a, 0x86, 0x10, 0x00])?;
        assert_eq!(
            lines(&img, 0x6000, 0x10000),
            vec![
                "6000  B      >6005",
                "6003  BACK   >2A",
                "6005  CLR    @>8310",
                "6007  RTN    ",
            ]
        );
        Ok(())
    }
    #[test]
    fn truncated_tail_becomes_data() -> Result<(), Error> {
        let img = Image::new(0x6000, vec![0x00, 0xbf, 0xa4, 0x00, 0x12])?;
        assert_eq!(
            lines(&img, 0x6000, 0x10000),
            vec![
                "6000  RTN    ",
                "6001  BYTE   >BF",
                "6002  BYTE   >A4",
                "6003  BYTE   >00",
                "6004  BYTE   >12",
            ]
        );
        Ok(())
    }
    #[test]
    fn data_lines_show_bytes_column() -> Result<(), Error> {
        let img = Image::new(0x6000, vec![0x05])?;
        let line = Listing::new(&img, 0x6000, 0x10000).next().unwrap();
        assert!(line.data);
        assert_eq!(line.render(true), "6000  05                       BYTE   >05");
        Ok(())
    }
    #[test]
    fn end_bounds_decoding() -> Result<(), Error> {
        // B needs three bytes but only two are inside the range
        let img = Image::new(0x6000, vec![0x00, 0x05, 0x12, 0x34])?;
        assert_eq!(
            lines(&img, 0x6000, 0x6003),
            vec!["6000  RTN    ", "6001  BYTE   >05", "6002  BYTE   >12"]
        );
        Ok(())
    }
    #[test]
    fn start_inside_image() -> Result<(), Error> {
        let img = Image::new(0x6000, vec![0x00, 0x01, 0x03])?;
        assert_eq!(lines(&img, 0x6001, 0x10000), vec!["6001  RTNC   ", "6002  SCAN   "]);
        // a start before the image is clamped to the origin
        assert_eq!(lines(&img, 0x0000, 0x10000).len(), 3);
        Ok(())
    }
    #[test]
    fn bytes_column() -> Result<(), Error> {
        let img = Image::new(0x6000, vec![0xbe, 0x00, 0x05])?;
        let line = Listing::new(&img, 0x6000, 0x10000).next().unwrap();
        assert_eq!(line.bytes, vec![0xbe, 0x00, 0x05]);
        assert!(!line.data);
        assert_eq!(line.render(true), "6000  BE 00 05                 ST     >05,@>8300");
        Ok(())
    }
    #[test]
    fn concurrent_listings_match() -> Result<(), Error> {
        let img = Image::new(0x6000, (0..=255u8).cycle().take(2048).collect())?;
        let img = &img;
        let expected = lines(img, 0x6000, 0x10000);
        std::thread::scope(|s| {
            let workers: Vec<_> = (0..4).map(|_| s.spawn(move || lines(img, 0x6000, 0x10000))).collect();
            for w in workers {
                assert_eq!(w.join().unwrap(), expected);
            }
        });
        Ok(())
    }
}

//! # A disassembler for GPL, the bytecode language of the TI-99/4A console GROMs.
//!
//! ## Getting Started
//! To list a cartridge GROM image loaded at >6000:
//! ```
//! cargo run -- /path/to/phm3000g.bin
//! ```
//! ...or if you've already built the binary then just...
//! ```
//! gpldis --origin 0x6000 --start 0x6010 -n 40 /path/to/phm3000g.bin
//! ```
//! ## Options
//! Help for command line options is available using -h or --help.
#[macro_use]
mod macros;
mod config;
mod disasm;
mod error;
mod formats;
mod hex;
mod image;
mod listing;
mod memory;
mod opcodes;
mod operand;
mod u8oru16;
use crate::image::Image;
use listing::Listing;
use std::fmt;
use std::path::Path;
use std::result::Result;
pub(crate) use u8oru16::u8u16;
pub(crate) use crate::error::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init();
    // process_file does all the work
    if let Err(e) = process_file(config::ARGS.file.as_str()) {
        println!("{}", e);
        return Err(Box::new(e));
    }
    Ok(())
}
/// process_file drives the top level functionality (load, sweep, print) of the app
fn process_file(filename: &str) -> Result<(), Error> {
    let image = Image::load(Path::new(filename), config::ARGS.origin)?;
    verbose_println!(
        "Loaded {} bytes from {} at {:04X}-{:04X}",
        image.bytes.len(),
        filename,
        image.origin,
        image.end().saturating_sub(1)
    );
    let lines = list_image(&image, config::ARGS.start, config::ARGS.end, config::ARGS.count)?;
    for line in &lines {
        println!("{}", line.render(config::show_bytes()));
    }
    info!("Listed {} lines from {}", lines.len(), filename);
    Ok(())
}
/// Lists `image` between `start` and `end`, stopping after `count` decoded instructions.
/// Bytes listed as data do not count.
fn list_image(
    image: &Image, start: Option<u16>, end: Option<u32>, count: Option<usize>,
) -> Result<Vec<listing::ListingLine>, Error> {
    let start = start.unwrap_or(image.origin);
    if !image.contains(start as u32) {
        return Err(general_err!(format!(
            "start address {:04X} is outside the image ({:04X}-{:04X})",
            start,
            image.origin,
            image.end().saturating_sub(1)
        )));
    }
    let end = end.unwrap_or_else(|| image.end());
    let mut left = count.unwrap_or(usize::MAX);
    Ok(Listing::new(image, start, end)
        .take_while(|line| {
            let more = left > 0;
            if !line.data {
                left = left.saturating_sub(1);
            }
            more
        })
        .collect())
}

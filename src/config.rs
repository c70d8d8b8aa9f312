use clap::Parser;
use clap_num::maybe_hex;
use lazy_static::lazy_static;

#[derive(Parser, Debug)]
#[command(author,version,about,long_about=None)]
pub struct Args {
    /// GROM image to disassemble: raw binary (.bin, .grm, ...) or Intel Hex (.hex)
    pub file: String,

    /// Address at which a raw image is loaded (hex ok with '0x'); ignored for hex files
    #[arg(long,value_parser=maybe_hex::<u16>, default_value_t=0x6000_u16)]
    pub origin: u16,

    /// First address to disassemble (defaults to the start of the image)
    #[arg(short, long,value_parser=maybe_hex::<u16>)]
    pub start: Option<u16>,

    /// Stop disassembling before this address (defaults to the end of the image)
    #[arg(short, long,value_parser=maybe_hex::<u32>)]
    pub end: Option<u32>,

    /// Maximum number of instructions to list
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Show the raw bytes of each instruction
    #[arg(short, long)]
    pub bytes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

lazy_static! {
    pub static ref ARGS: Args = if cfg!(test) {
        // manually set parameters for running tests
        Args::parse_from(["test", "test"])
    } else {
        Args::parse()
    };
}

pub fn init() {}
pub fn show_bytes() -> bool { ARGS.bytes }

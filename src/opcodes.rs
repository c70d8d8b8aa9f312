use lazy_static::lazy_static;
use std::fmt;

/// The instruction layouts of GPL. Each one has a decode routine in formats.rs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Format {
    /// reserved (XGPL) opcode; one byte, no operands
    Reserved,
    /// two-operand arithmetic/logic: opcode 1xxxxxIW, destination then source
    Dual,
    /// opcode followed by a one byte literal
    ImmByte,
    /// opcode followed by a two byte literal
    ImmWord,
    /// opcode only
    Inherent,
    /// page relative branch: opcode 01Sxxxxx plus one byte
    Branch,
    /// single operand: opcode 100xxxxW plus a source/destination operand
    Single,
    /// MOVE: opcode 001GRVCN plus up to three operands
    Move,
    /// FMT: the operands form a sub-language that isn't decoded here
    Fmt,
    /// no decode routine; rendered as a diagnostic
    Unknown,
}
impl Format {
    /// The numeric format id used in listings and golden files.
    pub fn id(&self) -> i8 {
        use Format::*;
        match self {
            Reserved => 0,
            Dual => 1,
            ImmByte | ImmWord => 2,
            Inherent => 3,
            Branch => 4,
            Single => 5,
            Move => 6,
            Fmt => 7,
            Unknown => -1,
        }
    }
}

/// One row of the opcode table: every byte in `low..=high` decodes as `name` using `format`.
#[derive(Debug)]
pub struct Descriptor {
    pub name: &'static str,
    pub low: u8,
    pub high: u8,
    pub format: Format,
}
impl Descriptor {
    pub fn contains(&self, op: u8) -> bool { (self.low..=self.high).contains(&op) }
}
impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:width$}",
            format!("{:02X}-{:02X} {} ({})", self.low, self.high, self.name, self.format.id()),
            width = f.width().unwrap_or(0)
        )
    }
}

macro_rules! op {
    ($name:literal, $low:literal, $high:literal, $format:ident) => {
        Descriptor {
            name: $name,
            low: $low,
            high: $high,
            format: Format::$format,
        }
    };
}

/// The GPL opcode table, in match order. Specific opcodes come first; the XGPL rows at the
/// end of each group catch the reserved bytes left over in that part of the opcode space.
pub static OPCODES: &[Descriptor] = &[
    op!("RTN", 0x00, 0x00, Inherent),
    op!("RTNC", 0x01, 0x01, Inherent),
    op!("RAND", 0x02, 0x02, ImmByte),
    op!("SCAN", 0x03, 0x03, Inherent),
    op!("BACK", 0x04, 0x04, ImmByte),
    op!("B", 0x05, 0x05, ImmWord),
    op!("CALL", 0x06, 0x06, ImmWord),
    op!("ALL", 0x07, 0x07, ImmByte),
    op!("FMT", 0x08, 0x08, Fmt),
    op!("H", 0x09, 0x09, Inherent),
    op!("GT", 0x0a, 0x0a, Inherent),
    op!("EXIT", 0x0b, 0x0b, Inherent),
    op!("CARRY", 0x0c, 0x0c, Inherent),
    op!("OVF", 0x0d, 0x0d, Inherent),
    op!("PARSE", 0x0e, 0x0e, ImmByte),
    op!("XML", 0x0f, 0x0f, ImmByte),
    op!("CONT", 0x10, 0x10, Inherent),
    op!("EXEC", 0x11, 0x11, Inherent),
    op!("RTNB", 0x12, 0x12, Inherent),
    op!("XGPL", 0x00, 0x1f, Reserved),
    op!("MOVE", 0x20, 0x3f, Move),
    op!("BR", 0x40, 0x5f, Branch),
    op!("BS", 0x60, 0x7f, Branch),
    op!("ABS", 0x80, 0x81, Single),
    op!("NEG", 0x82, 0x83, Single),
    op!("INV", 0x84, 0x85, Single),
    op!("CLR", 0x86, 0x87, Single),
    op!("FETCH", 0x88, 0x89, Single),
    op!("CASE", 0x8a, 0x8b, Single),
    op!("PUSH", 0x8c, 0x8d, Single),
    op!("CZ", 0x8e, 0x8f, Single),
    op!("INC", 0x90, 0x91, Single),
    op!("DEC", 0x92, 0x93, Single),
    op!("INCT", 0x94, 0x95, Single),
    op!("DECT", 0x96, 0x97, Single),
    op!("XGPL", 0x80, 0x9f, Reserved),
    op!("ADD", 0xa0, 0xa3, Dual),
    op!("SUB", 0xa4, 0xa7, Dual),
    op!("MUL", 0xa8, 0xab, Dual),
    op!("DIV", 0xac, 0xaf, Dual),
    op!("AND", 0xb0, 0xb3, Dual),
    op!("OR", 0xb4, 0xb7, Dual),
    op!("XOR", 0xb8, 0xbb, Dual),
    op!("ST", 0xbc, 0xbf, Dual),
    op!("EX", 0xc0, 0xc3, Dual),
    op!("CH", 0xc4, 0xc7, Dual),
    op!("CHE", 0xc8, 0xcb, Dual),
    op!("CGT", 0xcc, 0xcf, Dual),
    op!("CGE", 0xd0, 0xd3, Dual),
    op!("CEQ", 0xd4, 0xd7, Dual),
    op!("CLOG", 0xd8, 0xdb, Dual),
    op!("SRA", 0xdc, 0xdf, Dual),
    op!("SLL", 0xe0, 0xe3, Dual),
    op!("SRL", 0xe4, 0xe7, Dual),
    op!("SRC", 0xe8, 0xeb, Dual),
    op!("COINC", 0xec, 0xef, Dual),
    op!("IO", 0xf4, 0xf7, Dual),
    op!("SWGR", 0xf8, 0xfb, Dual),
    op!("XGPL", 0xa0, 0xff, Reserved),
];

/// Returned for a byte that no table row claims.
pub const UNKNOWN: &Descriptor = &op!("????", 0x00, 0xff, Unknown);

/// Finds the first table row containing `op`, scanning `table` in order.
pub fn scan(table: &'static [Descriptor], op: u8) -> &'static Descriptor {
    table.iter().find(|d| d.contains(op)).unwrap_or(UNKNOWN)
}

lazy_static! {
    // first-match results for every byte, computed once from OPCODES
    static ref BY_OPCODE: Vec<&'static Descriptor> = (0..=0xffu8).map(|op| scan(OPCODES, op)).collect();
}

/// Returns the descriptor for an opcode byte.
pub fn lookup(op: u8) -> &'static Descriptor { BY_OPCODE[op as usize] }

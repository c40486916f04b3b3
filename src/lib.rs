//! Two-pass RV64 assembler.
//!
//! Pass 1 walks the source and binds every label to a segment-relative
//! address; pass 2 re-walks it and packs one 32-bit word per `.text`
//! line, resolving branch/jump targets through the symbol table built in
//! pass 1. Data directives expand into addressed byte entries, and the
//! renderer turns both streams into the hexadecimal listing.
//!
//! Per-line failures (unknown mnemonic, missing operands, undefined
//! label) never abort assembly: they become zero-word placeholder lines
//! and the address cursor advances exactly as on success.

pub mod data;
pub mod encoder;
pub mod error;
pub mod listing;
pub mod opcodes;
pub mod parser;
pub mod symbols;

use data::build_data;
use encoder::encode_program;
use parser::parse_line;
use symbols::build_symbol_table;

/// Base address of the code segment.
pub const TEXT_BASE: u32 = 0x0000_0000;
/// Base address of the data segment.
pub const DATA_BASE: u32 = 0x1000_0000;

/// Assemble a complete source file into its machine-code listing.
///
/// Infallible by design: every failure this stage can see is a per-line
/// condition that renders as an annotated placeholder. Only the driver's
/// file I/O can fail fatally.
pub fn assemble(source: &str) -> String {
    let lines: Vec<parser::SourceLine> = source.lines().map(parse_line).collect();

    let symbol_table = build_symbol_table(&lines);
    let text_records = encode_program(&lines, &symbol_table);
    let data_entries = build_data(&lines);

    listing::render(&text_records, &data_entries)
}

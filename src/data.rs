//! Data segment builder.
//!
//! An independent traversal restricted to `.data` lines. Each scalar
//! directive operand becomes one little-endian byte-sequence entry;
//! `.asciz` becomes a single NUL-terminated entry. The cursor advance here
//! must agree byte-for-byte with pass 1's `directive_size`, otherwise
//! labels bound in pass 1 would drift from the rendered addresses.

use crate::parser::{Segment, SourceLine, parse_imm, segment_directive, unquote};
use crate::DATA_BASE;

/// One rendered unit of the data segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub addr: u32,
    pub bytes: Vec<u8>,
    /// Original literal text, echoed as a trailing comment in the listing.
    pub literal: String,
}

/// Reassemble an `.asciz` operand: tokens rejoined on single spaces, one
/// surrounding quote pair stripped.
fn asciz_literal(operands: &[&str]) -> String {
    unquote(&operands.join(" ")).to_string()
}

/// Byte size a data directive occupies, from its name and operand count.
/// Unrecognized directives occupy nothing. Shared with pass 1 so both
/// passes advance the data cursor identically.
pub fn directive_size(tokens: &[&str]) -> u32 {
    let Some((&directive, operands)) = tokens.split_first() else {
        return 0;
    };
    let count = operands.len() as u32;
    match directive.to_ascii_lowercase().as_str() {
        ".byte" => count,
        ".half" => 2 * count,
        ".word" => 4 * count,
        ".dword" => 8 * count,
        ".asciz" => asciz_literal(operands).len() as u32 + 1,
        _ => 0,
    }
}

fn scalar_entries(operands: &[&str], width: usize, offset: &mut u32, out: &mut Vec<DataEntry>) {
    for &literal in operands {
        let value = i64::from(parse_imm(literal));
        let bytes = value.to_le_bytes()[..width].to_vec();
        out.push(DataEntry {
            addr: DATA_BASE + *offset,
            bytes,
            literal: literal.to_string(),
        });
        *offset += width as u32;
    }
}

/// Expand every `.data`-segment directive into addressed byte entries.
pub fn build_data(lines: &[SourceLine]) -> Vec<DataEntry> {
    let mut entries = Vec::new();
    let mut segment: Option<Segment> = None;
    let mut data_ptr = 0u32;

    for line in lines {
        let Some((&first, operands)) = line.tokens.split_first() else {
            continue;
        };

        if let Some(next) = segment_directive(first) {
            segment = Some(next);
            continue;
        }

        if segment != Some(Segment::Data) {
            continue;
        }

        match first.to_ascii_lowercase().as_str() {
            ".byte" => scalar_entries(operands, 1, &mut data_ptr, &mut entries),
            ".half" => scalar_entries(operands, 2, &mut data_ptr, &mut entries),
            ".word" => scalar_entries(operands, 4, &mut data_ptr, &mut entries),
            ".dword" => scalar_entries(operands, 8, &mut data_ptr, &mut entries),
            ".asciz" => {
                let literal = asciz_literal(operands);
                let mut bytes: Vec<u8> = literal.bytes().collect();
                bytes.push(0);
                let len = bytes.len() as u32;
                entries.push(DataEntry {
                    addr: DATA_BASE + data_ptr,
                    bytes,
                    literal,
                });
                data_ptr += len;
            }
            // Unrecognized directives occupy no space.
            _ => {}
        }
    }

    entries
}

//! Listing renderer.
//!
//! Text records render as
//! `0x<addr> 0x<word> , <canonical text> # <opcode>-<funct3>-<funct7>`
//! with the selector fields in binary; failed lines keep the address, a
//! zero word, and the error text. Data entries render their bytes as a
//! little-endian hex integer when they fit in eight bytes, otherwise as a
//! quoted, NUL-escaped character run.

use std::fmt::Write;

use crate::data::DataEntry;
use crate::encoder::TextRecord;

fn render_text_record(out: &mut String, record: &TextRecord) {
    match &record.encoding {
        Ok(enc) => {
            let _ = writeln!(
                out,
                "0x{:X} 0x{:08X} , {} # {:07b}-{:03b}-{:07b}",
                record.addr, enc.word, enc.text, enc.opcode, enc.funct3, enc.funct7
            );
        }
        Err(err) => {
            let _ = writeln!(out, "0x{:X} 0x00000000 , {}", record.addr, err);
        }
    }
}

fn render_data_entry(out: &mut String, entry: &DataEntry) {
    let _ = write!(out, "0x{:X} ", entry.addr);
    if entry.bytes.len() <= 8 {
        let mut value = 0u64;
        for (i, &b) in entry.bytes.iter().enumerate() {
            value |= u64::from(b) << (8 * i);
        }
        let _ = write!(out, "0x{:0width$X}", value, width = entry.bytes.len() * 2);
    } else {
        // NUL renders as \0; everything else passes through byte-exact,
        // so multi-byte UTF-8 from the source literal survives intact.
        out.push('"');
        for (i, run) in entry.bytes.split(|&b| b == 0).enumerate() {
            if i > 0 {
                out.push_str("\\0");
            }
            out.push_str(&String::from_utf8_lossy(run));
        }
        out.push('"');
    }
    let _ = writeln!(out, " , {}", entry.literal);
}

/// Render the complete listing: all text records, then all data entries.
pub fn render(records: &[TextRecord], data: &[DataEntry]) -> String {
    // ~48 chars per listing line is a comfortable overestimate.
    let mut out = String::with_capacity((records.len() + data.len()) * 48);
    for record in records {
        render_text_record(&mut out, record);
    }
    for entry in data {
        render_data_entry(&mut out, entry);
    }
    out
}

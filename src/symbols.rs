//! Symbol table and the pass-1 address resolver.
//!
//! Pass 1 replays every source line, tracking the active segment and two
//! independent address cursors, and binds each label definition to the
//! current cursor of the active segment. Pass 2 and the data builder only
//! ever read the finished table.

use std::collections::HashMap;

use crate::data::directive_size;
use crate::parser::{Segment, SourceLine, segment_directive};
use crate::{DATA_BASE, TEXT_BASE};

/// Label name to absolute address. Redefining a label overwrites the prior
/// binding (last write wins); the original toolchain tolerates this and so
/// do we.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::with_capacity(64),
        }
    }

    pub fn define(&mut self, label: &str, address: u32) {
        self.symbols.insert(label.to_string(), address);
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.symbols.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Pass 1: bind every label and return the completed table.
///
/// Cursor rules must match pass 2 exactly: every non-directive line in
/// `.text` advances the code cursor by 4 whether or not it will encode,
/// and data lines advance by the directive's computed size. A label on
/// the same line as a segment directive binds under the segment that was
/// active before the switch. Labels seen before any segment directive
/// are silently skipped.
pub fn build_symbol_table(lines: &[SourceLine]) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut segment: Option<Segment> = None;
    let mut pc = TEXT_BASE;
    let mut data_ptr = 0u32;

    for line in lines {
        if let Some(label) = line.label {
            match segment {
                Some(Segment::Text) => table.define(label, pc),
                Some(Segment::Data) => table.define(label, DATA_BASE + data_ptr),
                None => {}
            }
        }

        let Some(&first) = line.tokens.first() else {
            continue;
        };

        if let Some(next) = segment_directive(first) {
            segment = Some(next);
            continue;
        }

        match segment {
            Some(Segment::Text) => pc += 4,
            Some(Segment::Data) => data_ptr += directive_size(&line.tokens),
            None => {}
        }
    }

    table
}

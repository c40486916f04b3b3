//! Static mnemonic table (compile-time perfect hash map).
//!
//! Covers the RV64IM subset this assembler accepts: base register-register
//! ops, M-extension multiply/divide, their 32-bit `*w` variants, immediate
//! arithmetic, loads, `jalr`, stores, conditional branches, and the two
//! upper-immediate forms.

use phf::phf_map;

/// Bit-layout family of an instruction, determining operand syntax and
/// field packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    Sb,
    U,
    Uj,
}

/// Immutable descriptor for one mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub opcode: u8,
    pub funct3: u8,
    pub funct7: u8,
    pub format: Format,
}

const fn op(opcode: u8, funct3: u8, funct7: u8, format: Format) -> OpInfo {
    OpInfo {
        opcode,
        funct3,
        funct7,
        format,
    }
}

static OPCODES: phf::Map<&'static str, OpInfo> = phf_map! {
    // R-format base integer ops
    "add" => op(0x33, 0x0, 0x00, Format::R),
    "sub" => op(0x33, 0x0, 0x20, Format::R),
    "and" => op(0x33, 0x7, 0x00, Format::R),
    "or"  => op(0x33, 0x6, 0x00, Format::R),
    "xor" => op(0x33, 0x4, 0x00, Format::R),
    "sll" => op(0x33, 0x1, 0x00, Format::R),
    "srl" => op(0x33, 0x5, 0x00, Format::R),
    "sra" => op(0x33, 0x5, 0x20, Format::R),
    "slt" => op(0x33, 0x2, 0x00, Format::R),
    // M extension
    "mul" => op(0x33, 0x0, 0x01, Format::R),
    "div" => op(0x33, 0x4, 0x01, Format::R),
    "rem" => op(0x33, 0x6, 0x01, Format::R),
    // 32-bit width variants
    "addw" => op(0x3B, 0x0, 0x00, Format::R),
    "subw" => op(0x3B, 0x0, 0x20, Format::R),
    "sllw" => op(0x3B, 0x1, 0x00, Format::R),
    "srlw" => op(0x3B, 0x5, 0x00, Format::R),
    "sraw" => op(0x3B, 0x5, 0x20, Format::R),
    "mulw" => op(0x3B, 0x0, 0x01, Format::R),
    "divw" => op(0x3B, 0x4, 0x01, Format::R),
    "remw" => op(0x3B, 0x6, 0x01, Format::R),
    // I-format arithmetic
    "addi"  => op(0x13, 0x0, 0x00, Format::I),
    "addiw" => op(0x1B, 0x0, 0x00, Format::I),
    "andi"  => op(0x13, 0x7, 0x00, Format::I),
    "ori"   => op(0x13, 0x6, 0x00, Format::I),
    // Loads
    "lb" => op(0x03, 0x0, 0x00, Format::I),
    "lh" => op(0x03, 0x1, 0x00, Format::I),
    "lw" => op(0x03, 0x2, 0x00, Format::I),
    "ld" => op(0x03, 0x3, 0x00, Format::I),
    // Indirect jump
    "jalr" => op(0x67, 0x0, 0x00, Format::I),
    // Stores
    "sb" => op(0x23, 0x0, 0x00, Format::S),
    "sh" => op(0x23, 0x1, 0x00, Format::S),
    "sw" => op(0x23, 0x2, 0x00, Format::S),
    "sd" => op(0x23, 0x3, 0x00, Format::S),
    // Conditional branches
    "beq" => op(0x63, 0x0, 0x00, Format::Sb),
    "bne" => op(0x63, 0x1, 0x00, Format::Sb),
    "blt" => op(0x63, 0x4, 0x00, Format::Sb),
    "bge" => op(0x63, 0x5, 0x00, Format::Sb),
    // Upper immediates
    "lui"   => op(0x37, 0x0, 0x00, Format::U),
    "auipc" => op(0x17, 0x0, 0x00, Format::U),
    // Jump and link
    "jal" => op(0x6F, 0x0, 0x00, Format::Uj),
};

/// Case-folded exact-match lookup. `None` means "unknown mnemonic" and is
/// reported by the caller, not raised here.
pub fn lookup(mnemonic: &str) -> Option<&'static OpInfo> {
    OPCODES.get(mnemonic.to_ascii_lowercase().as_str())
}

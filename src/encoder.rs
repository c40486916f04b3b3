//! Pass-2 instruction encoder.
//!
//! Walks `.text` lines, resolves operands (branch/jump targets via the
//! symbol table) and packs one 32-bit word per line using the six RISC-V
//! bit layouts. Failures are per-line and recoverable: the record keeps
//! its address, the word is zero, and the cursor advances by 4 exactly as
//! on success so later labels stay in agreement with pass 1.

use crate::error::EncodeError;
use crate::opcodes::{self, Format, OpInfo};
use crate::parser::{
    Segment, SourceLine, parse_imm, parse_register, segment_directive, split_offset,
};
use crate::symbols::SymbolTable;
use crate::TEXT_BASE;

/// A successfully encoded instruction: the packed word, the canonical
/// operand text, and the raw selector fields for diagnostic rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub word: u32,
    pub text: String,
    pub opcode: u8,
    pub funct3: u8,
    pub funct7: u8,
}

/// One listing record per `.text` source line, failures included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub addr: u32,
    pub encoding: Result<Encoding, EncodeError>,
}

// Field packers. Registers are masked to 5 bits and immediates to their
// field width; no range validation beyond masking.

fn pack_r(funct7: u8, rs2: u8, rs1: u8, funct3: u8, rd: u8, opcode: u8) -> u32 {
    ((funct7 as u32 & 0x7F) << 25)
        | ((rs2 as u32 & 0x1F) << 20)
        | ((rs1 as u32 & 0x1F) << 15)
        | ((funct3 as u32 & 0x7) << 12)
        | ((rd as u32 & 0x1F) << 7)
        | (opcode as u32 & 0x7F)
}

fn pack_i(imm: i32, rs1: u8, funct3: u8, rd: u8, opcode: u8) -> u32 {
    ((imm as u32 & 0xFFF) << 20)
        | ((rs1 as u32 & 0x1F) << 15)
        | ((funct3 as u32 & 0x7) << 12)
        | ((rd as u32 & 0x1F) << 7)
        | (opcode as u32 & 0x7F)
}

fn pack_s(imm: i32, rs2: u8, rs1: u8, funct3: u8, opcode: u8) -> u32 {
    let imm12 = imm as u32 & 0xFFF;
    (((imm12 >> 5) & 0x7F) << 25)
        | ((rs2 as u32 & 0x1F) << 20)
        | ((rs1 as u32 & 0x1F) << 15)
        | ((funct3 as u32 & 0x7) << 12)
        | ((imm12 & 0x1F) << 7)
        | (opcode as u32 & 0x7F)
}

fn pack_sb(imm: i32, rs2: u8, rs1: u8, funct3: u8, opcode: u8) -> u32 {
    let imm13 = imm as u32 & 0x1FFF;
    (((imm13 >> 12) & 0x1) << 31)
        | (((imm13 >> 5) & 0x3F) << 25)
        | ((rs2 as u32 & 0x1F) << 20)
        | ((rs1 as u32 & 0x1F) << 15)
        | ((funct3 as u32 & 0x7) << 12)
        | (((imm13 >> 1) & 0xF) << 8)
        | (((imm13 >> 11) & 0x1) << 7)
        | (opcode as u32 & 0x7F)
}

fn pack_u(imm: i32, rd: u8, opcode: u8) -> u32 {
    (imm as u32 & 0xFFFF_F000) | ((rd as u32 & 0x1F) << 7) | (opcode as u32 & 0x7F)
}

fn pack_uj(imm: i32, rd: u8, opcode: u8) -> u32 {
    let imm21 = imm as u32 & 0x1F_FFFF;
    (((imm21 >> 20) & 0x1) << 31)
        | (((imm21 >> 1) & 0x3FF) << 21)
        | (((imm21 >> 11) & 0x1) << 20)
        | (((imm21 >> 12) & 0xFF) << 12)
        | ((rd as u32 & 0x1F) << 7)
        | (opcode as u32 & 0x7F)
}

fn canonical(mnemonic: &str, operands: &[&str]) -> String {
    format!("{} {}", mnemonic, operands.join(","))
}

fn resolve_label(symbols: &SymbolTable, label: &str, pc: u32) -> Result<i32, EncodeError> {
    let target = symbols.get(label).ok_or_else(|| EncodeError::UndefinedLabel {
        label: label.to_string(),
    })?;
    Ok(target.wrapping_sub(pc) as i32)
}

fn encode_r(mnemonic: &str, operands: &[&str], info: &OpInfo) -> Result<Encoding, EncodeError> {
    let [rd, rs1, rs2] = operands.first_chunk().ok_or(EncodeError::MissingOperands {
        usage: "R-format requires rd, rs1, rs2",
    })?;
    let word = pack_r(
        info.funct7,
        parse_register(rs2),
        parse_register(rs1),
        info.funct3,
        parse_register(rd),
        info.opcode,
    );
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..3]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

fn encode_i(mnemonic: &str, operands: &[&str], info: &OpInfo) -> Result<Encoding, EncodeError> {
    let is_load_or_jalr = info.opcode == 0x03 || info.opcode == 0x67;

    // Loads and jalr accept the offset-in-parens form `rd, imm(rs1)`.
    if is_load_or_jalr
        && operands.len() >= 2
        && let Some((imm_str, rs1_str)) = split_offset(operands[1])
    {
        let word = pack_i(
            parse_imm(imm_str),
            parse_register(rs1_str),
            info.funct3,
            parse_register(operands[0]),
            info.opcode,
        );
        return Ok(Encoding {
            word,
            text: canonical(mnemonic, &operands[..2]),
            opcode: info.opcode,
            funct3: info.funct3,
            funct7: info.funct7,
        });
    }

    let usage = if is_load_or_jalr {
        "I-format requires rd, rs1, imm or rd, imm(rs1)"
    } else {
        "I-format requires rd, rs1, imm"
    };
    let [rd, rs1, imm] = operands
        .first_chunk()
        .ok_or(EncodeError::MissingOperands { usage })?;
    let word = pack_i(
        parse_imm(imm),
        parse_register(rs1),
        info.funct3,
        parse_register(rd),
        info.opcode,
    );
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..3]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

fn encode_s(mnemonic: &str, operands: &[&str], info: &OpInfo) -> Result<Encoding, EncodeError> {
    let [rs2, offset] = operands.first_chunk().ok_or(EncodeError::MissingOperands {
        usage: "S-format requires rs2, imm(rs1)",
    })?;
    let (imm_str, rs1_str) = split_offset(offset).ok_or_else(|| EncodeError::MalformedOffset {
        operand: offset.to_string(),
    })?;
    let word = pack_s(
        parse_imm(imm_str),
        parse_register(rs2),
        parse_register(rs1_str),
        info.funct3,
        info.opcode,
    );
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..2]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

fn encode_sb(
    mnemonic: &str,
    operands: &[&str],
    info: &OpInfo,
    pc: u32,
    symbols: &SymbolTable,
) -> Result<Encoding, EncodeError> {
    let [rs1, rs2, label] = operands.first_chunk().ok_or(EncodeError::MissingOperands {
        usage: "SB-format requires rs1, rs2, label",
    })?;
    let offset = resolve_label(symbols, label, pc)?;
    let word = pack_sb(
        offset,
        parse_register(rs2),
        parse_register(rs1),
        info.funct3,
        info.opcode,
    );
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..3]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

fn encode_u(mnemonic: &str, operands: &[&str], info: &OpInfo) -> Result<Encoding, EncodeError> {
    let [rd, imm] = operands.first_chunk().ok_or(EncodeError::MissingOperands {
        usage: "U-format requires rd, imm20",
    })?;
    // The 20-bit operand occupies imm[31:12].
    let word = pack_u(parse_imm(imm) << 12, parse_register(rd), info.opcode);
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..2]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

fn encode_uj(
    mnemonic: &str,
    operands: &[&str],
    info: &OpInfo,
    pc: u32,
    symbols: &SymbolTable,
) -> Result<Encoding, EncodeError> {
    let [rd, label] = operands.first_chunk().ok_or(EncodeError::MissingOperands {
        usage: "UJ-format requires rd, label",
    })?;
    let offset = resolve_label(symbols, label, pc)?;
    let word = pack_uj(offset, parse_register(rd), info.opcode);
    Ok(Encoding {
        word,
        text: canonical(mnemonic, &operands[..2]),
        opcode: info.opcode,
        funct3: info.funct3,
        funct7: info.funct7,
    })
}

/// Encode a single instruction line at address `pc`.
pub fn encode_line(
    tokens: &[&str],
    pc: u32,
    symbols: &SymbolTable,
) -> Result<Encoding, EncodeError> {
    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Err(EncodeError::MissingOperands {
            usage: "instruction expected",
        });
    };
    let info = opcodes::lookup(mnemonic).ok_or_else(|| EncodeError::UnknownMnemonic {
        mnemonic: mnemonic.to_string(),
    })?;

    match info.format {
        Format::R => encode_r(mnemonic, operands, info),
        Format::I => encode_i(mnemonic, operands, info),
        Format::S => encode_s(mnemonic, operands, info),
        Format::Sb => encode_sb(mnemonic, operands, info, pc, symbols),
        Format::U => encode_u(mnemonic, operands, info),
        Format::Uj => encode_uj(mnemonic, operands, info, pc, symbols),
    }
}

/// Pass 2: encode every `.text` line against the finished symbol table.
///
/// Every instruction line yields exactly one record and advances the pc
/// by 4, success or failure.
pub fn encode_program(lines: &[SourceLine], symbols: &SymbolTable) -> Vec<TextRecord> {
    let mut records = Vec::new();
    let mut segment: Option<Segment> = None;
    let mut pc = TEXT_BASE;

    for line in lines {
        let Some(&first) = line.tokens.first() else {
            continue;
        };

        if let Some(next) = segment_directive(first) {
            segment = Some(next);
            continue;
        }

        if segment == Some(Segment::Text) {
            let encoding = encode_line(&line.tokens, pc, symbols);
            records.push(TextRecord { addr: pc, encoding });
            pc += 4;
        }
    }

    records
}

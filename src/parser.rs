//! Source line tokenizer and operand parsing.
//!
//! A line is reduced to an optional label definition plus a token list:
//! comments (`#` or `//`) are stripped, tokens are split on whitespace,
//! trailing commas are removed per token, and empty tokens are dropped.

/// The two address regions of an assembly program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Text,
    Data,
}

/// One tokenized source line.
///
/// `label` holds a leading `name:` definition with the marker removed;
/// `tokens` holds the remaining mnemonic/operand tokens. Blank and
/// comment-only lines produce an empty token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub label: Option<&'a str>,
    pub tokens: Vec<&'a str>,
}

/// Remove everything from the first comment marker onward.
fn strip_comment(line: &str) -> &str {
    let end = line.len();
    let hash = line.find('#').unwrap_or(end);
    let slash = line.find("//").unwrap_or(end);
    &line[..hash.min(slash)]
}

/// Tokenize a raw source line.
///
/// Only the first token may be a label definition (a token ending in `:`).
/// A token ending in `:` anywhere else is treated as an ordinary operand.
pub fn parse_line(raw: &str) -> SourceLine<'_> {
    let mut tokens: Vec<&str> = strip_comment(raw)
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .filter(|t| !t.is_empty())
        .collect();

    let label = if tokens.first().is_some_and(|t| t.ends_with(':')) {
        let first = tokens.remove(0);
        Some(&first[..first.len() - 1])
    } else {
        None
    };

    SourceLine { label, tokens }
}

/// Recognize a segment directive, case-insensitively.
pub fn segment_directive(token: &str) -> Option<Segment> {
    if token.eq_ignore_ascii_case(".text") {
        Some(Segment::Text)
    } else if token.eq_ignore_ascii_case(".data") {
        Some(Segment::Data)
    } else {
        None
    }
}

/// Parse a register operand (`x5`, `X5`, `r5`, `R5`, or bare `5`).
///
/// Anything unparseable falls back to register 0; width masking happens
/// at encode time.
pub fn parse_register(token: &str) -> u8 {
    let digits = match token.chars().next() {
        Some('x' | 'X' | 'r' | 'R') => &token[1..],
        _ => token,
    };
    digits.parse::<u8>().unwrap_or(0)
}

/// Parse an immediate operand: decimal or `0x`-prefixed hexadecimal.
///
/// Unparseable text falls back to 0; masking to the instruction field
/// width happens at encode time.
pub fn parse_imm(token: &str) -> i32 {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).map(|v| v as i32).unwrap_or(0)
    } else {
        token.parse::<i32>().unwrap_or(0)
    }
}

/// Split an `imm(rs1)` operand into its immediate and register parts.
///
/// Returns `None` when no `(` is present. A missing `)` is tolerated:
/// the register part runs to the end of the token.
pub fn split_offset(token: &str) -> Option<(&str, &str)> {
    let open = token.find('(')?;
    let imm = &token[..open];
    let rest = &token[open + 1..];
    let reg = match rest.find(')') {
        Some(close) => &rest[..close],
        None => rest,
    };
    Some((imm, reg))
}

/// Strip one surrounding pair of double quotes, if present.
pub fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

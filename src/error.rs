//! Error types for the assembler.
//!
//! Per-line encode failures are recoverable: the listing gets a zero-word
//! placeholder annotated with the error text and assembly continues. Only
//! file-open failures in the driver are fatal.

use thiserror::Error;

/// A recoverable, single-line encoding failure.
///
/// The `Display` text is what appears after the placeholder word in the
/// listing, so the messages are part of the output format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown: {mnemonic}")]
    UnknownMnemonic { mnemonic: String },

    #[error("error: {usage}")]
    MissingOperands { usage: &'static str },

    #[error("error: store expects imm(rs1), got {operand}")]
    MalformedOffset { operand: String },

    #[error("error: undefined label: {label}")]
    UndefinedLabel { label: String },
}

/// Fatal driver-level errors. These terminate the process with exit code 1.
#[derive(Error, Debug)]
pub enum AsmError {
    #[error("cannot open {path}: {source}")]
    InputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {path} for writing: {source}")]
    OutputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

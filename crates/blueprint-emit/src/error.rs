//! Emitter and reader errors.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

use blueprint_core::{NameError, OpCode};

/// Errors that occur while writing IR text to a sink.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The underlying sink failed.
    #[error("failed to write IR: {0}")]
    Io(#[from] io::Error),

    /// The sink was already released.
    #[error("emitter sink is closed")]
    Closed,

    /// An in-memory buffer did not hold valid UTF-8.
    #[error("emitted IR is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Errors that occur while reading compact IR text back into instructions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    #[error("expected opcode number at offset {offset}")]
    ExpectedOpCode { offset: usize },

    #[error("unknown opcode {code} at offset {offset}")]
    UnknownOpCode { code: u32, offset: usize },

    #[error("expected operand after opcode at offset {offset}")]
    ExpectedOperand { offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("expected ', ' separator at offset {offset}")]
    ExpectedSeparator { offset: usize },

    #[error("invalid operand '{text}' for {opcode:?}")]
    InvalidOperand { opcode: OpCode, text: String },

    #[error(transparent)]
    Name(#[from] NameError),
}

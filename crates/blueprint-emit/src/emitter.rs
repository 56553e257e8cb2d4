//! IR text emitter.
//!
//! The [`IrEmitter`] renders a finished instruction sequence as text, either
//! one annotated line per instruction or as a single compact stream.
//!
//! # Example
//!
//! ```
//! use blueprint_core::{ActionName, Instruction};
//! use blueprint_emit::{EmitMode, IrEmitter};
//!
//! let program = [
//!     Instruction::construct(ActionName::constructor("Vector")),
//!     Instruction::push_double(1.5),
//!     Instruction::set(ActionName::setter("Vector", "X")),
//! ];
//!
//! let mut emitter = IrEmitter::in_memory();
//! emitter.emit(Some(&program[..]), EmitMode::Compact).unwrap();
//! let text = String::from_utf8(emitter.finish().unwrap()).unwrap();
//!
//! assert!(text.ends_with("15 Vector, 10 1.5, 4 Vector::X "));
//! ```
//!
//! # Sink Ownership
//!
//! An emitter owns its sink for the whole session. The sink is flushed and
//! released by [`IrEmitter::close`], by [`IrEmitter::finish`], or when the
//! emitter is dropped, whichever comes first. Later releases are no-ops.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, error, info};

use blueprint_core::Instruction;

use crate::EmitError;
use crate::text::{comment_text, parameter_text};

/// First header line written before every emission.
pub const HEADER_GENERATED: &str =
    "// This file is generated from compiled bytecode. Do not edit it by hand.";

/// Second header line written before every emission.
pub const HEADER_OVERWRITE: &str =
    "// Any changes will be overwritten the next time the bytecode is regenerated.";

/// Width of the parameter column in annotated mode.
pub const PARAMETER_WIDTH: usize = 50;

/// Width of the comment column in annotated mode.
pub const COMMENT_WIDTH: usize = 10;

/// How instructions are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// One line per instruction with an explanatory comment.
    #[default]
    Annotated,
    /// A single comma-joined stream without comments.
    Compact,
}

impl EmitMode {
    pub fn from_line_comments(with_line_comments: bool) -> Self {
        if with_line_comments {
            EmitMode::Annotated
        } else {
            EmitMode::Compact
        }
    }

    pub fn has_line_comments(&self) -> bool {
        matches!(self, EmitMode::Annotated)
    }
}

/// How an existing target file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace any existing contents.
    #[default]
    Truncate,
    /// Keep existing contents and write after them.
    Append,
}

/// Options for a one-shot emission to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitOptions {
    pub mode: EmitMode,
    pub write_mode: WriteMode,
}

impl EmitOptions {
    pub fn new(mode: EmitMode, write_mode: WriteMode) -> Self {
        Self { mode, write_mode }
    }
}

/// Writes instruction sequences as IR text to an owned sink.
pub struct IrEmitter<W: Write> {
    /// `None` once released.
    sink: Option<W>,
}

impl IrEmitter<BufWriter<File>> {
    /// Open `path` for writing, creating it if it does not exist.
    pub fn create(path: impl AsRef<Path>, write_mode: WriteMode) -> Result<Self, EmitError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true);
        match write_mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let file = options.open(path)?;
        debug!(path = %path.display(), ?write_mode, "opened IR target");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl IrEmitter<Vec<u8>> {
    /// An emitter writing into an in-memory buffer.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> IrEmitter<W> {
    /// Wrap an arbitrary sink.
    pub fn new(sink: W) -> Self {
        Self { sink: Some(sink) }
    }

    /// Whether the sink has been released.
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Write the header followed by every instruction.
    ///
    /// `None` writes the header only.
    pub fn emit(
        &mut self,
        instructions: Option<&[Instruction]>,
        mode: EmitMode,
    ) -> Result<(), EmitError> {
        let sink = self.sink.as_mut().ok_or(EmitError::Closed)?;

        writeln!(sink, "{}", HEADER_GENERATED)?;
        writeln!(sink, "{}", HEADER_OVERWRITE)?;

        let Some(instructions) = instructions else {
            info!(count = 0, ?mode, "emitted bytecode IR (header only)");
            return Ok(());
        };

        let last = instructions.len().saturating_sub(1);
        for (index, instruction) in instructions.iter().enumerate() {
            match mode {
                EmitMode::Annotated => write_annotated(sink, instruction)?,
                EmitMode::Compact => write_compact(sink, instruction, index == last)?,
            }
        }

        info!(count = instructions.len(), ?mode, "emitted bytecode IR");
        Ok(())
    }

    /// Flush and release the sink. Calling this again does nothing.
    pub fn close(&mut self) -> Result<(), EmitError> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> Result<W, EmitError> {
        let mut sink = self.sink.take().ok_or(EmitError::Closed)?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> Drop for IrEmitter<W> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!(%err, "failed to flush IR sink on drop");
        }
    }
}

fn write_annotated<W: Write>(sink: &mut W, instruction: &Instruction) -> Result<(), EmitError> {
    writeln!(
        sink,
        "{:02};{:<pw$};{:>cw$}",
        instruction.opcode().code(),
        parameter_text(instruction),
        comment_text(instruction),
        pw = PARAMETER_WIDTH,
        cw = COMMENT_WIDTH,
    )?;
    Ok(())
}

fn write_compact<W: Write>(
    sink: &mut W,
    instruction: &Instruction,
    is_last: bool,
) -> Result<(), EmitError> {
    write!(
        sink,
        "{} {}",
        instruction.opcode().code(),
        parameter_text(instruction)
    )?;
    let separator = if is_last { " " } else { ", " };
    sink.write_all(separator.as_bytes())?;
    Ok(())
}

/// Render a whole emission into a string.
pub fn emit_to_string(
    instructions: Option<&[Instruction]>,
    mode: EmitMode,
) -> Result<String, EmitError> {
    let mut emitter = IrEmitter::in_memory();
    emitter.emit(instructions, mode)?;
    Ok(String::from_utf8(emitter.finish()?)?)
}

/// Run a whole emission session against a file.
///
/// The file is released before this returns, including on error.
pub fn emit_to_path(
    path: impl AsRef<Path>,
    instructions: Option<&[Instruction]>,
    options: EmitOptions,
) -> Result<(), EmitError> {
    let mut emitter = IrEmitter::create(path, options.write_mode)?;
    emitter.emit(instructions, options.mode)?;
    emitter.close()
}

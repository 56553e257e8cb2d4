//! Blueprint IR Emitter
//!
//! Renders bytecode instruction sequences as human-readable text and reads the
//! compact form back.
//!
//! ## Formats
//!
//! Every emission starts with a two-line `//` header marking the text as a
//! regenerable artifact. After it comes either:
//!
//! - **Annotated** (`EmitMode::Annotated`): one line per instruction,
//!   `NN;<parameter, width 50>;<comment, right-aligned width 10>`.
//! - **Compact** (`EmitMode::Compact`): `N <parameter>` units joined by `", "`,
//!   with a single trailing space after the last one and no newline.
//!
//! ## Modules
//!
//! - [`emitter`]: The sink-owning [`IrEmitter`] and one-shot helpers
//! - [`reader`]: Compact-form reader
//! - [`text`]: Parameter and comment text per opcode

pub mod emitter;
mod error;
pub mod reader;
pub mod text;

pub use emitter::{
    COMMENT_WIDTH, EmitMode, EmitOptions, HEADER_GENERATED, HEADER_OVERWRITE, IrEmitter,
    PARAMETER_WIDTH, WriteMode, emit_to_path, emit_to_string,
};
pub use error::{EmitError, ReadError};
pub use reader::read_compact;
pub use text::{comment_text, parameter_text};

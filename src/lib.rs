//! Blueprint
//!
//! Host-side tooling for the Blueprint bytecode VM, which drives a declarative
//! object-construction language.
//!
//! - [`registry`]: the [`ActionRegistry`](registry::ActionRegistry) through
//!   which host code exposes getters, setters and constructors, keyed by
//!   canonical names such as `get Vector::X`, together with their stack arities.
//! - [`emit`]: the IR emitter that renders instruction sequences as annotated
//!   or compact text, and the reader for the compact form.
//! - [`core`]: names, opcodes and instructions shared by both.
//!
//! The registry and the emitter never call each other; they agree only on
//! [`ActionName`](core::ActionName) and on which opcodes carry one.

pub use blueprint_core as core;
pub use blueprint_emit as emit;
pub use blueprint_registry as registry;

pub mod prelude {
    pub use blueprint_core::{ActionName, ActionVerb, Instruction, OpCode, Operand, OperandKind};
    pub use blueprint_emit::{
        EmitError, EmitMode, EmitOptions, IrEmitter, ReadError, WriteMode, emit_to_path,
        emit_to_string, read_compact,
    };
    pub use blueprint_registry::{ActionError, ActionRegistry, NativeAction};
}

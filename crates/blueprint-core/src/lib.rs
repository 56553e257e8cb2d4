//! Blueprint Core
//!
//! Types shared by every Blueprint crate: canonical action names, the opcode
//! set and the instruction representation consumed by the IR emitter.
//!
//! ## Modules
//!
//! - [`bytecode`]: Opcodes, operands and instructions
//! - [`error`]: Error types
//! - [`name`]: Canonical action names (`get T::m`, `set T::m`, `new T`)

pub mod bytecode;
pub mod error;
pub mod name;

pub use bytecode::{Instruction, OpCode, Operand, OperandKind};
pub use error::NameError;
pub use name::{ActionName, ActionVerb};

// Re-exported so callers can build float operands without a direct dependency.
pub use ordered_float::OrderedFloat;

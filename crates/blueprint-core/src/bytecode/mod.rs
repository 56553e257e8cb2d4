//! Bytecode types shared by the registry and the IR emitter.
//!
//! - [`OpCode`] - The instruction set for the VM
//! - [`Operand`] and [`OperandKind`] - Instruction parameters
//! - [`Instruction`] - An opcode paired with its operand

mod instruction;
mod opcode;
mod operand;

pub use instruction::Instruction;
pub use opcode::OpCode;
pub use operand::{Operand, OperandKind};

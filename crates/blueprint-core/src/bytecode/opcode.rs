//! Bytecode operation codes.
//!
//! This module defines the instruction set of the Blueprint VM. Opcodes are
//! rendered as their numeric value in the textual IR, so the discriminants
//! below are part of the text format and must not be reordered.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::OperandKind;
use crate::ActionVerb;

/// Bytecode operation codes.
///
/// The VM is a stack-based machine with an auxiliary register file for
/// objects that must outlive their stack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum OpCode {
    /// Does nothing.
    Nop = 0,
    /// Carries a user comment through to the IR.
    /// Operand: string
    Comment,

    // =========================================================================
    // Allocation
    // =========================================================================
    /// Reserve N stack slots.
    /// Operand: integer count
    ReserveStack,
    /// Reserve N register slots.
    /// Operand: integer count
    ReserveRegister,

    // =========================================================================
    // Host Actions
    // =========================================================================
    /// Pop the setter's arguments and run it.
    /// Operand: setter name
    Set,

    // =========================================================================
    // Stack Operations
    // =========================================================================
    /// Copy the top value N times.
    /// Operand: integer count
    Dup,

    // =========================================================================
    // Registers
    // =========================================================================
    /// Pop the top object into a register slot.
    /// Operand: integer register index
    Register,
    /// Release a register slot.
    /// Operand: integer register index
    Unregister,
    /// Push the object held in a register slot.
    /// Operand: integer register index
    PushRegister,

    // =========================================================================
    // Literals
    // =========================================================================
    /// Operand: 64-bit integer
    PushLong,
    /// Operand: 64-bit float
    PushDouble,
    /// Operand: string
    PushString,
    /// Operand: boolean
    PushBool,
    /// Push the operand without checking its type.
    /// Operand: any
    PushUnchecked,

    // =========================================================================
    // Host Actions (continued)
    // =========================================================================
    /// Run a getter and push its results.
    /// Operand: getter name
    Call,
    /// Run a constructor and push the new object.
    /// Operand: constructor name
    New,

    /// Pop the top value N times.
    /// Operand: integer count
    Pop,
}

impl OpCode {
    /// Every opcode, in discriminant order.
    pub const ALL: [OpCode; 17] = [
        OpCode::Nop,
        OpCode::Comment,
        OpCode::ReserveStack,
        OpCode::ReserveRegister,
        OpCode::Set,
        OpCode::Dup,
        OpCode::Register,
        OpCode::Unregister,
        OpCode::PushRegister,
        OpCode::PushLong,
        OpCode::PushDouble,
        OpCode::PushString,
        OpCode::PushBool,
        OpCode::PushUnchecked,
        OpCode::Call,
        OpCode::New,
        OpCode::Pop,
    ];

    /// Convert from u8, returning None for unknown opcodes.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// The numeric value written to the IR.
    pub fn code(self) -> u8 {
        self.into()
    }

    /// The verb of the action name this opcode carries, if any.
    ///
    /// These are the only opcodes whose operand is an [`ActionName`](crate::ActionName).
    pub fn verb(&self) -> Option<ActionVerb> {
        match self {
            OpCode::Set => Some(ActionVerb::Set),
            OpCode::Call => Some(ActionVerb::Get),
            OpCode::New => Some(ActionVerb::New),
            _ => None,
        }
    }

    /// The kind of operand this opcode expects.
    pub fn operand_kind(&self) -> OperandKind {
        match self {
            OpCode::Nop => OperandKind::None,
            OpCode::Comment | OpCode::PushString => OperandKind::Str,
            OpCode::ReserveStack
            | OpCode::ReserveRegister
            | OpCode::Dup
            | OpCode::Register
            | OpCode::Unregister
            | OpCode::PushRegister
            | OpCode::PushLong
            | OpCode::Pop => OperandKind::Int,
            OpCode::PushDouble => OperandKind::Float,
            OpCode::PushBool => OperandKind::Bool,
            OpCode::PushUnchecked => OperandKind::Any,
            OpCode::Set | OpCode::Call | OpCode::New => OperandKind::Name,
        }
    }

    /// Get the name of this opcode for debugging.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Nop => "NOP",
            OpCode::Comment => "COMMENT",
            OpCode::ReserveStack => "RESERVE_STACK",
            OpCode::ReserveRegister => "RESERVE_REGISTER",
            OpCode::Set => "SET",
            OpCode::Dup => "DUP",
            OpCode::Register => "REGISTER",
            OpCode::Unregister => "UNREGISTER",
            OpCode::PushRegister => "PUSH_REGISTER",
            OpCode::PushLong => "PUSH_LONG",
            OpCode::PushDouble => "PUSH_DOUBLE",
            OpCode::PushString => "PUSH_STRING",
            OpCode::PushBool => "PUSH_BOOL",
            OpCode::PushUnchecked => "PUSH_UNCHECKED",
            OpCode::Call => "CALL",
            OpCode::New => "NEW",
            OpCode::Pop => "POP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_repr() {
        assert_eq!(OpCode::Nop as u8, 0);
        assert_eq!(OpCode::Comment as u8, 1);
        assert_eq!(OpCode::Pop as u8, 16);
    }

    #[test]
    fn opcode_from_u8() {
        assert_eq!(OpCode::from_u8(0), Some(OpCode::Nop));
        assert_eq!(OpCode::from_u8(14), Some(OpCode::Call));
        assert_eq!(OpCode::from_u8(17), None);
        assert_eq!(OpCode::from_u8(255), None);
    }

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, op) in OpCode::ALL.iter().enumerate() {
            assert_eq!(op.code() as usize, i);
            assert_eq!(OpCode::from_u8(i as u8), Some(*op));
        }
    }

    #[test]
    fn name_bearing_opcodes() {
        let named: Vec<_> = OpCode::ALL.iter().filter(|op| op.verb().is_some()).collect();
        assert_eq!(named, [&OpCode::Set, &OpCode::Call, &OpCode::New]);
        assert_eq!(OpCode::Call.verb(), Some(ActionVerb::Get));

        for op in OpCode::ALL {
            assert_eq!(op.verb().is_some(), op.operand_kind() == OperandKind::Name);
        }
    }

    #[test]
    fn opcode_name() {
        assert_eq!(OpCode::ReserveStack.name(), "RESERVE_STACK");
        assert_eq!(OpCode::PushUnchecked.name(), "PUSH_UNCHECKED");
    }
}

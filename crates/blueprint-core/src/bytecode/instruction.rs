//! A single bytecode instruction.

use super::{OpCode, Operand};
use crate::ActionName;

/// An opcode plus its optional operand.
///
/// Instructions are immutable once built. The typed constructors pair each
/// opcode with the operand shape it expects; [`Instruction::new`] accepts any
/// combination and leaves checking to whoever consumes the stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    opcode: OpCode,
    operand: Option<Operand>,
}

impl Instruction {
    /// Pair any opcode with any operand.
    pub fn new(opcode: OpCode, operand: Option<Operand>) -> Self {
        Self { opcode, operand }
    }

    /// An instruction with no operand.
    pub fn bare(opcode: OpCode) -> Self {
        Self::new(opcode, None)
    }

    /// An instruction carrying `operand`.
    pub fn with_operand(opcode: OpCode, operand: impl Into<Operand>) -> Self {
        Self::new(opcode, Some(operand.into()))
    }

    /// Get the opcode.
    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    /// Get the operand, if any.
    pub fn operand(&self) -> Option<&Operand> {
        self.operand.as_ref()
    }

    // ==========================================================================
    // Typed constructors
    // ==========================================================================

    /// Do nothing.
    pub fn nop() -> Self {
        Self::bare(OpCode::Nop)
    }

    /// A user comment carried through to the IR.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(OpCode::Comment, Some(Operand::Str(text.into())))
    }

    /// Reserve `count` stack slots.
    pub fn reserve_stack(count: i64) -> Self {
        Self::with_operand(OpCode::ReserveStack, count)
    }

    /// Reserve `count` register slots.
    pub fn reserve_register(count: i64) -> Self {
        Self::with_operand(OpCode::ReserveRegister, count)
    }

    /// Run a setter.
    pub fn set(name: ActionName) -> Self {
        Self::with_operand(OpCode::Set, name)
    }

    /// Copy the top value `count` times.
    pub fn dup(count: i64) -> Self {
        Self::with_operand(OpCode::Dup, count)
    }

    /// Pop the top object into register `index`.
    pub fn register(index: i64) -> Self {
        Self::with_operand(OpCode::Register, index)
    }

    /// Release the object in register `index`.
    pub fn unregister(index: i64) -> Self {
        Self::with_operand(OpCode::Unregister, index)
    }

    /// Push the object in register `index`.
    pub fn push_register(index: i64) -> Self {
        Self::with_operand(OpCode::PushRegister, index)
    }

    /// Push an integer literal.
    pub fn push_long(value: i64) -> Self {
        Self::with_operand(OpCode::PushLong, value)
    }

    /// Push a floating-point literal.
    pub fn push_double(value: f64) -> Self {
        Self::with_operand(OpCode::PushDouble, value)
    }

    /// Push a string literal.
    pub fn push_string(value: impl Into<String>) -> Self {
        Self::new(OpCode::PushString, Some(Operand::Str(value.into())))
    }

    /// Push a boolean literal.
    pub fn push_bool(value: bool) -> Self {
        Self::with_operand(OpCode::PushBool, value)
    }

    /// Push a value of any type without checking it.
    pub fn push_unchecked(value: impl Into<Operand>) -> Self {
        Self::with_operand(OpCode::PushUnchecked, value)
    }

    /// Run a getter.
    pub fn call(name: ActionName) -> Self {
        Self::with_operand(OpCode::Call, name)
    }

    /// Run a constructor.
    pub fn construct(name: ActionName) -> Self {
        Self::with_operand(OpCode::New, name)
    }

    /// Discard `count` values from the stack.
    pub fn pop(count: i64) -> Self {
        Self::with_operand(OpCode::Pop, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperandKind;

    #[test]
    fn typed_constructors_match_operand_kind() {
        let instructions = [
            Instruction::comment("note"),
            Instruction::reserve_stack(2),
            Instruction::reserve_register(1),
            Instruction::set(ActionName::setter("Vector", "X")),
            Instruction::dup(1),
            Instruction::register(0),
            Instruction::unregister(0),
            Instruction::push_register(0),
            Instruction::push_long(10),
            Instruction::push_double(1.5),
            Instruction::push_string("hi"),
            Instruction::push_bool(false),
            Instruction::call(ActionName::getter("Vector", "X")),
            Instruction::construct(ActionName::constructor("Vector")),
            Instruction::pop(1),
        ];

        for instruction in &instructions {
            let expected = instruction.opcode().operand_kind();
            let actual = instruction.operand().map(Operand::kind);
            assert_eq!(actual, Some(expected), "{:?}", instruction.opcode());
        }
    }

    #[test]
    fn nop_has_no_operand() {
        let nop = Instruction::nop();
        assert_eq!(nop.opcode(), OpCode::Nop);
        assert_eq!(nop.opcode().operand_kind(), OperandKind::None);
        assert!(nop.operand().is_none());
    }
}

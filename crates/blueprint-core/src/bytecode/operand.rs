use std::fmt;

use ordered_float::OrderedFloat;

use crate::ActionName;

/// The parameter carried by an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    Bool(bool),
    /// Canonical name of a registered host action.
    Name(ActionName),
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Int(_) => OperandKind::Int,
            Operand::Float(_) => OperandKind::Float,
            Operand::Str(_) => OperandKind::Str,
            Operand::Bool(_) => OperandKind::Bool,
            Operand::Name(_) => OperandKind::Name,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Operand::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&ActionName> {
        match self {
            Operand::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// Plain text of the operand. Names render in their full canonical form.
///
/// Floats always keep a fractional part (`3.0`, not `3`), so their text never
/// reads as an integer.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(value) => write!(f, "{}", value),
            Operand::Float(value) => write!(f, "{:?}", value.0),
            Operand::Str(value) => f.write_str(value),
            Operand::Bool(value) => write!(f, "{}", value),
            Operand::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(OrderedFloat(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Bool(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Str(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Str(value)
    }
}

impl From<ActionName> for Operand {
    fn from(name: ActionName) -> Self {
        Operand::Name(name)
    }
}

/// The operand shape an opcode expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// The opcode takes no operand.
    None,
    Int,
    Float,
    Str,
    Bool,
    Name,
    /// Any operand is accepted.
    Any,
}

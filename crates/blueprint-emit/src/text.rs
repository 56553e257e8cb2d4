//! Per-instruction text: the parameter column and the explanatory comment.
//!
//! Both functions match exhaustively on [`OpCode`], so a new opcode cannot be
//! added without deciding how it renders.

use blueprint_core::{Instruction, OpCode, Operand};

/// Text of an instruction's parameter as it appears in the IR.
///
/// - `PushString` and `Comment` operands are wrapped in double quotes.
/// - `Set`, `Call` and `New` render the action name without its verb
///   (`set Vector::X` becomes `Vector::X`).
/// - Everything else renders its plain value.
///
/// An instruction without an operand renders the unquoted placeholder `0`.
pub fn parameter_text(instruction: &Instruction) -> String {
    let operand = instruction.operand();
    match instruction.opcode() {
        OpCode::PushString | OpCode::Comment => match operand {
            Some(Operand::Str(text)) => quote(text),
            Some(other) => quote(&other.to_string()),
            None => "0".to_string(),
        },
        OpCode::Set | OpCode::Call | OpCode::New => match operand {
            Some(Operand::Name(name)) => name.target(),
            Some(other) => strip_verb(&other.to_string()).to_string(),
            None => "0".to_string(),
        },
        OpCode::Nop
        | OpCode::ReserveStack
        | OpCode::ReserveRegister
        | OpCode::Dup
        | OpCode::Register
        | OpCode::Unregister
        | OpCode::PushRegister
        | OpCode::PushLong
        | OpCode::PushDouble
        | OpCode::PushBool
        | OpCode::PushUnchecked
        | OpCode::Pop => operand.map_or_else(|| "0".to_string(), Operand::to_string),
    }
}

/// Explanatory comment for an instruction in annotated mode.
///
/// Count-style comments pluralize their noun unless the count is exactly 1.
pub fn comment_text(instruction: &Instruction) -> String {
    let n = parameter_text(instruction);
    let singular = instruction.operand().and_then(Operand::as_int) == Some(1);
    let plural = |noun: &str| {
        if singular {
            noun.to_string()
        } else {
            format!("{noun}s")
        }
    };

    match instruction.opcode() {
        OpCode::Nop => "Deliberate void instruction".to_string(),
        OpCode::Comment => "USER COMMENT".to_string(),
        OpCode::ReserveStack => format!("Reserves {n} {} on the stack.", plural("space")),
        OpCode::ReserveRegister => format!("Reserves {n} {} on the register.", plural("space")),
        OpCode::Set => format!("Runs the {n} function"),
        OpCode::Dup => format!("Copies top value {n} {}, aka a peek and push", plural("time")),
        OpCode::Register => {
            format!("Registers top object to index {n} after popping it off the stack")
        }
        OpCode::Unregister => format!("Unregisters object at index {n}"),
        OpCode::PushRegister => format!("Pushes object in register ID: {n} onto the stack"),
        OpCode::PushLong => format!("Pushes long integer {n} onto the stack"),
        OpCode::PushDouble => format!("Pushes double {n} onto the stack"),
        OpCode::PushString => format!("Pushes string {n} onto the stack"),
        OpCode::PushBool => format!("Pushes boolean {n} onto the stack"),
        OpCode::PushUnchecked => format!(
            "Performs an unsafe push, pushing {n} onto the stack regardless of its type"
        ),
        OpCode::Call => {
            format!("Performs a getter call on {n} and pushes the values onto the stack")
        }
        OpCode::New => {
            format!("Performs a constructor call on {n} and pushes the new object onto the stack")
        }
        OpCode::Pop => format!("Pops top object off the stack {n} {}", plural("time")),
    }
}

/// Wrap text in double quotes, escaping quotes, backslashes and line breaks.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Drop everything up to and including the first space.
fn strip_verb(text: &str) -> &str {
    text.split_once(' ').map_or(text, |(_, rest)| rest)
}

//! Reader for the compact IR form.
//!
//! Parses text written in [`EmitMode::Compact`](crate::EmitMode::Compact)
//! back into instructions. `//` comments (the emission header) are skipped
//! wherever they start a token, so files built up in append mode read back
//! as one sequence.
//!
//! A missing operand renders as the unquoted placeholder `0`. Where that text
//! cannot be a real operand (string, float, boolean and name opcodes) it reads
//! back as no operand. A few operands still do not survive the trip unchanged:
//!
//! - On count, index and long opcodes the placeholder is indistinguishable
//!   from the value, so a missing operand reads back as `Int(0)`.
//! - `PushUnchecked` renders its operand unquoted, so it reads back as an
//!   integer, float or boolean when the text parses as one and as a string
//!   otherwise. A missing operand reads back as `Int(0)` and an empty token as
//!   an empty string. Text containing spaces or commas cannot be recovered.

use tracing::error;

use blueprint_core::{ActionName, Instruction, OpCode, Operand, OperandKind};

use crate::ReadError;

/// Parse a compact IR stream into instructions.
///
/// # Example
///
/// ```
/// use blueprint_core::{ActionName, Instruction};
/// use blueprint_emit::read_compact;
///
/// let program = read_compact("15 Vector, 9 3, 4 Vector::X ").unwrap();
/// assert_eq!(
///     program,
///     [
///         Instruction::construct(ActionName::constructor("Vector")),
///         Instruction::push_long(3),
///         Instruction::set(ActionName::setter("Vector", "X")),
///     ]
/// );
/// ```
pub fn read_compact(text: &str) -> Result<Vec<Instruction>, ReadError> {
    let mut cursor = Cursor::new(text);
    let mut instructions = Vec::new();

    loop {
        cursor.skip_trivia();
        if cursor.is_eof() {
            break;
        }
        instructions.push(cursor.instruction()?);
    }

    Ok(instructions)
}

/// A parameter as written: quoted text, or a bare token.
enum Param<'a> {
    Quoted(String),
    Plain(&'a str),
}

impl Param<'_> {
    fn text(&self) -> &str {
        match self {
            Param::Quoted(text) => text.as_str(),
            Param::Plain(text) => *text,
        }
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.rest().starts_with("//") => {
                    self.pos = match self.rest().find('\n') {
                        Some(newline) => self.pos + newline + 1,
                        None => self.src.len(),
                    };
                }
                _ => break,
            }
        }
    }

    /// Consume bytes while `pred` holds. Stops only on ASCII bytes, so the
    /// returned slice always falls on char boundaries.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn instruction(&mut self) -> Result<Instruction, ReadError> {
        let opcode = self.opcode()?;

        if self.peek() != Some(b' ') {
            return Err(ReadError::ExpectedOperand { offset: self.pos });
        }
        self.pos += 1;

        let param = self.param(opcode)?;
        self.separator()?;

        Ok(Instruction::new(opcode, operand_for(opcode, param)?))
    }

    fn opcode(&mut self) -> Result<OpCode, ReadError> {
        let offset = self.pos;
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(ReadError::ExpectedOpCode { offset });
        }

        let code = digits.parse::<u32>().unwrap_or(u32::MAX);
        u8::try_from(code)
            .ok()
            .and_then(OpCode::from_u8)
            .ok_or_else(|| {
                error!(code, offset, "unknown opcode in IR");
                ReadError::UnknownOpCode { code, offset }
            })
    }

    fn param(&mut self, opcode: OpCode) -> Result<Param<'a>, ReadError> {
        if self.peek() == Some(b'"') {
            return self.quoted().map(Param::Quoted);
        }

        let offset = self.pos;
        let token = self.take_while(|b| b != b',' && !b.is_ascii_whitespace());
        // An unchecked empty string renders as nothing at all.
        if token.is_empty() && opcode.operand_kind() != OperandKind::Any {
            return Err(ReadError::ExpectedOperand { offset });
        }
        Ok(Param::Plain(token))
    }

    fn quoted(&mut self) -> Result<String, ReadError> {
        let start = self.pos;
        self.pos += 1;

        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, other)) => out.push(other),
                    None => break,
                },
                c => out.push(c),
            }
        }

        Err(ReadError::UnterminatedString { offset: start })
    }

    /// Accept `,` (the space after it is trivia), whitespace or the end of input.
    fn separator(&mut self) -> Result<(), ReadError> {
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                Ok(())
            }
            Some(b) if b.is_ascii_whitespace() => Ok(()),
            None => Ok(()),
            Some(_) => Err(ReadError::ExpectedSeparator { offset: self.pos }),
        }
    }
}

fn operand_for(opcode: OpCode, param: Param<'_>) -> Result<Option<Operand>, ReadError> {
    let invalid = |param: &Param<'_>| ReadError::InvalidOperand {
        opcode,
        text: param.text().to_string(),
    };

    let operand = match (opcode.operand_kind(), &param) {
        (OperandKind::None, _) => return Ok(None),
        (
            OperandKind::Str | OperandKind::Float | OperandKind::Bool | OperandKind::Name,
            Param::Plain("0"),
        ) => return Ok(None),
        (OperandKind::Str, Param::Quoted(text)) => Operand::Str(text.clone()),
        (OperandKind::Int, Param::Plain(text)) => {
            Operand::Int(text.parse().map_err(|_| invalid(&param))?)
        }
        (OperandKind::Float, Param::Plain(text)) => {
            Operand::from(text.parse::<f64>().map_err(|_| invalid(&param))?)
        }
        (OperandKind::Bool, Param::Plain(text)) => {
            Operand::Bool(text.parse().map_err(|_| invalid(&param))?)
        }
        (OperandKind::Name, Param::Plain(text)) => {
            let verb = opcode.verb().ok_or_else(|| invalid(&param))?;
            Operand::Name(ActionName::from_target(verb, text)?)
        }
        (OperandKind::Any, Param::Quoted(text)) => Operand::Str(text.clone()),
        (OperandKind::Any, Param::Plain(text)) => untyped(text),
        _ => return Err(invalid(&param)),
    };

    Ok(Some(operand))
}

fn untyped(text: &str) -> Operand {
    if let Ok(value) = text.parse::<i64>() {
        Operand::Int(value)
    } else if let Ok(value) = text.parse::<f64>() {
        Operand::from(value)
    } else if let Ok(value) = text.parse::<bool>() {
        Operand::Bool(value)
    } else {
        Operand::Str(text.to_string())
    }
}

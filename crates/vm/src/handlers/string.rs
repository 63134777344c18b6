//! CONCAT, STRLEN, GETCHAR, SETCHAR, TYPE.
//!
//! Lengths and indices count Unicode codepoints.

use ippcode_common::{Instruction, Opcode, Value, ValueType};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_string(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        let target = self.arg(instr, 0)?;

        let result = match instr.opcode {
            Opcode::Concat => {
                let mut lhs = self.resolve_string(self.arg(instr, 1)?)?;
                let rhs = self.resolve_string(self.arg(instr, 2)?)?;
                lhs.push_str(&rhs);
                Value::String(lhs)
            }
            Opcode::Strlen => {
                let text = self.resolve_string(self.arg(instr, 1)?)?;
                Value::Int(codepoint_len(&text))
            }
            Opcode::GetChar => {
                let text = self.resolve_string(self.arg(instr, 1)?)?;
                let index = self.resolve_int(self.arg(instr, 2)?)?;
                Value::String(self.char_at(&text, index)?.to_string())
            }
            Opcode::SetChar => Value::String(self.set_char(instr)?),
            Opcode::Type => {
                let name = self
                    .resolve_maybe(self.arg(instr, 1)?)?
                    .map_or("", |value| value.value_type().name());
                Value::String(name.to_string())
            }
            _ => return Err(self.unhandled(instr)),
        };

        self.assign(target, result)?;
        Ok(Flow::Continue)
    }

    /// Compute SETCHAR's new string without touching the target.
    fn set_char(&self, instr: &'a Instruction) -> Result<String, RuntimeError> {
        let current = match self.resolve_any(self.arg(instr, 0)?)? {
            Value::String(s) => s,
            other => return Err(self.mismatch(ValueType::String, &other)),
        };
        let index = self.resolve_int(self.arg(instr, 1)?)?;
        let replacement = self.resolve_string(self.arg(instr, 2)?)?;

        let Some(new_char) = replacement.chars().next() else {
            return Err(RuntimeError::EmptyReplacement { at: self.at });
        };
        // Validates the index against the current length.
        self.char_at(&current, index)?;

        let position = usize::try_from(index).unwrap_or_default();
        Ok(current
            .chars()
            .enumerate()
            .map(|(i, c)| if i == position { new_char } else { c })
            .collect())
    }
}

fn codepoint_len(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}

//! LT, GT, EQ, AND, OR, NOT, INT2CHAR, STRI2INT.

use std::cmp::Ordering;

use ippcode_common::{Instruction, Opcode, Value};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

/// Highest codepoint INT2CHAR accepts.
pub const MAX_CODEPOINT: i64 = 0x10FFFF;

impl<'a> Machine<'a> {
    pub(crate) fn exec_rel_bool_convert(
        &mut self,
        instr: &'a Instruction,
    ) -> Result<Flow, RuntimeError> {
        let target = self.arg(instr, 0)?;

        let result = match instr.opcode {
            Opcode::Lt | Opcode::Gt => {
                let lhs = self.resolve_any(self.arg(instr, 1)?)?;
                let rhs = self.resolve_any(self.arg(instr, 2)?)?;
                let ordering = self.order_operands(&lhs, &rhs)?;
                let wanted = if instr.opcode == Opcode::Lt {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                Value::Bool(ordering == wanted)
            }
            Opcode::Eq => {
                let lhs = self.resolve_any(self.arg(instr, 1)?)?;
                let rhs = self.resolve_any(self.arg(instr, 2)?)?;
                Value::Bool(self.nil_aware_eq(&lhs, &rhs)?)
            }
            Opcode::And => {
                let lhs = self.resolve_bool(self.arg(instr, 1)?)?;
                let rhs = self.resolve_bool(self.arg(instr, 2)?)?;
                Value::Bool(lhs && rhs)
            }
            Opcode::Or => {
                let lhs = self.resolve_bool(self.arg(instr, 1)?)?;
                let rhs = self.resolve_bool(self.arg(instr, 2)?)?;
                Value::Bool(lhs || rhs)
            }
            Opcode::Not => Value::Bool(!self.resolve_bool(self.arg(instr, 1)?)?),
            Opcode::Int2Char => {
                let code = self.resolve_int(self.arg(instr, 1)?)?;
                let c = u32::try_from(code)
                    .ok()
                    .filter(|_| code <= MAX_CODEPOINT)
                    // Surrogates are rejected: they are not Unicode scalar values.
                    .and_then(char::from_u32)
                    .ok_or(RuntimeError::CodepointOutOfRange { at: self.at, code })?;
                Value::String(c.to_string())
            }
            Opcode::Stri2Int => {
                let text = self.resolve_string(self.arg(instr, 1)?)?;
                let index = self.resolve_int(self.arg(instr, 2)?)?;
                let c = self.char_at(&text, index)?;
                Value::Int(i64::from(u32::from(c)))
            }
            _ => return Err(self.unhandled(instr)),
        };

        self.assign(target, result)?;
        Ok(Flow::Continue)
    }

    /// Order two operands of the same non-nil type.
    fn order_operands(&self, lhs: &Value, rhs: &Value) -> Result<Ordering, RuntimeError> {
        lhs.partial_cmp(rhs)
            .ok_or(RuntimeError::IncompatibleTypes {
                at: self.at,
                left: lhs.value_type(),
                right: rhs.value_type(),
            })
    }

    /// Equality where nil equals only nil and is comparable with anything.
    ///
    /// Two non-nil operands must share a type.
    pub(crate) fn nil_aware_eq(&self, lhs: &Value, rhs: &Value) -> Result<bool, RuntimeError> {
        if lhs.is_nil() || rhs.is_nil() {
            return Ok(lhs.is_nil() && rhs.is_nil());
        }
        if lhs.value_type() != rhs.value_type() {
            return Err(RuntimeError::IncompatibleTypes {
                at: self.at,
                left: lhs.value_type(),
                right: rhs.value_type(),
            });
        }
        Ok(lhs == rhs)
    }

    /// The character at a codepoint index, or a string-operation error.
    pub(crate) fn char_at(&self, text: &str, index: i64) -> Result<char, RuntimeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| text.chars().nth(i))
            .ok_or_else(|| RuntimeError::IndexOutOfRange {
                at: self.at,
                index,
                length: text.chars().count(),
            })
    }
}

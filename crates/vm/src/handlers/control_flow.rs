//! LABEL, JUMP, JUMPIFEQ, JUMPIFNEQ, EXIT.

use ippcode_common::{Instruction, Opcode, Value, ValueType};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

/// Highest status EXIT accepts.
pub const MAX_EXIT_CODE: i64 = 9;

impl<'a> Machine<'a> {
    pub(crate) fn exec_control_flow(
        &mut self,
        instr: &'a Instruction,
    ) -> Result<Flow, RuntimeError> {
        match instr.opcode {
            // Resolved by the pre-scan.
            Opcode::Label => {}
            Opcode::Jump => {
                self.ip = self.label_position(&self.arg(instr, 0)?.text)?;
            }
            Opcode::JumpIfEq | Opcode::JumpIfNeq => {
                let target = self.label_position(&self.arg(instr, 0)?.text)?;
                let lhs = self.resolve_any(self.arg(instr, 1)?)?;
                let rhs = self.resolve_any(self.arg(instr, 2)?)?;
                let equal = self.nil_aware_eq(&lhs, &rhs)?;
                if equal == (instr.opcode == Opcode::JumpIfEq) {
                    self.ip = target;
                }
            }
            Opcode::Exit => {
                let code = match self.resolve_any(self.arg(instr, 0)?)? {
                    Value::Int(code) => code,
                    other => return Err(self.mismatch(ValueType::Int, &other)),
                };
                return match u8::try_from(code) {
                    Ok(status) if code <= MAX_EXIT_CODE => Ok(Flow::Exit(status)),
                    _ => Err(RuntimeError::ExitCodeOutOfRange { at: self.at, code }),
                };
            }
            _ => return Err(self.unhandled(instr)),
        }
        Ok(Flow::Continue)
    }
}

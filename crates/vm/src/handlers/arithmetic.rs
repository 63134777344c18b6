//! ADD, SUB, MUL, IDIV.

use ippcode_common::{Instruction, Opcode, Value};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_arithmetic(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        let target = self.arg(instr, 0)?;
        let lhs = self.resolve_int(self.arg(instr, 1)?)?;
        let rhs = self.resolve_int(self.arg(instr, 2)?)?;

        let result = match instr.opcode {
            Opcode::Add => lhs.wrapping_add(rhs),
            Opcode::Sub => lhs.wrapping_sub(rhs),
            Opcode::Mul => lhs.wrapping_mul(rhs),
            Opcode::Idiv => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero { at: self.at });
                }
                // Truncates toward zero; MIN / -1 wraps to MIN.
                lhs.wrapping_div(rhs)
            }
            _ => return Err(self.unhandled(instr)),
        };

        self.assign(target, Value::Int(result))?;
        Ok(Flow::Continue)
    }
}

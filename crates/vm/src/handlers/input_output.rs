//! READ, WRITE.

use ippcode_common::{Instruction, Opcode, Value, ValueType};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_io(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        match instr.opcode {
            Opcode::Read => {
                let target = self.arg(instr, 0)?;
                let token = &self.arg(instr, 1)?.text;
                let value = match ValueType::from_name(token) {
                    Ok(ValueType::Int) => self.input.read_int().map(Value::Int),
                    Ok(ValueType::Bool) => self.input.read_bool().map(Value::Bool),
                    Ok(ValueType::String) => self.input.read_string().map(Value::String),
                    Ok(ValueType::Nil) | Err(_) => {
                        return Err(RuntimeError::UnsupportedReadType {
                            at: self.at,
                            token: token.clone(),
                        })
                    }
                };
                // End of input and unparsable lines store a typed nil.
                self.assign(target, value.unwrap_or(Value::Nil))?;
            }
            Opcode::Write => {
                let value = self.resolve_any(self.arg(instr, 0)?)?;
                let at = self.at;
                self.output
                    .write_str(&value.to_string())
                    .map_err(|e| RuntimeError::Output {
                        at,
                        message: e.to_string(),
                    })?;
            }
            _ => return Err(self.unhandled(instr)),
        }
        Ok(Flow::Continue)
    }
}

//! PUSHS, POPS.

use ippcode_common::{Instruction, Opcode};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_data_stack(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        match instr.opcode {
            Opcode::Pushs => {
                // `resolve_any` clones, so the stack holds a snapshot.
                let value = self.resolve_any(self.arg(instr, 0)?)?;
                self.data_stack.push(value);
            }
            Opcode::Pops => {
                let target = self.arg(instr, 0)?;
                // Check the target before consuming the top of the stack.
                self.slot_mut(target)?;
                let value = self
                    .data_stack
                    .pop()
                    .ok_or(RuntimeError::DataStackEmpty { at: self.at })?;
                self.assign(target, value)?;
            }
            _ => return Err(self.unhandled(instr)),
        }
        Ok(Flow::Continue)
    }
}

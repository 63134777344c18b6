//! MOVE, CREATEFRAME, PUSHFRAME, POPFRAME, DEFVAR, CALL, RETURN.

use ippcode_common::{Instruction, Opcode};

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::frame_logic::MissingFrame;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_memory(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        let at = self.at;
        let frame_error =
            |MissingFrame(frame): MissingFrame| RuntimeError::MissingFrame { at, frame };

        match instr.opcode {
            Opcode::Move => {
                let value = self.resolve_any(self.arg(instr, 1)?)?;
                self.assign(self.arg(instr, 0)?, value)?;
            }
            Opcode::CreateFrame => self.frames.create_frame(),
            Opcode::PushFrame => self.frames.push_temp_frame().map_err(frame_error)?,
            Opcode::PopFrame => self.frames.pop_frame().map_err(frame_error)?,
            Opcode::DefVar => self.exec_defvar(instr)?,
            Opcode::Call => {
                let target = self.label_position(&self.arg(instr, 0)?.text)?;
                // `ip` already points past the CALL.
                self.call_stack.push(self.ip);
                self.ip = target;
            }
            Opcode::Return => {
                self.ip = self
                    .call_stack
                    .pop()
                    .ok_or(RuntimeError::ReturnWithoutCall { at })?;
            }
            _ => return Err(self.unhandled(instr)),
        }
        Ok(Flow::Continue)
    }

    fn exec_defvar(&mut self, instr: &'a Instruction) -> Result<(), RuntimeError> {
        let at = self.at;
        let arg = self.arg(instr, 0)?;
        let var = arg
            .var_ref()
            .map_err(|source| RuntimeError::MalformedArgument { at, source })?;
        let frame = self
            .frames
            .frame_mut(var.frame)
            .map_err(|MissingFrame(frame)| RuntimeError::MissingFrame { at, frame })?;
        if !frame.declare(var.name) {
            return Err(RuntimeError::Redeclaration {
                at,
                var: var.to_string(),
            });
        }
        Ok(())
    }
}

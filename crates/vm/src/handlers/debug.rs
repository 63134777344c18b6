//! DPRINT, BREAK. Neither changes program state; both only emit log events.

use ippcode_common::{FrameRole, Instruction, Opcode};
use tracing::debug;

use crate::error::RuntimeError;
use crate::execute::Flow;
use crate::machine::Machine;

impl<'a> Machine<'a> {
    pub(crate) fn exec_debug(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        match instr.opcode {
            Opcode::Dprint => {
                let arg = self.arg(instr, 0)?;
                debug!(order = self.at, %arg, "DPRINT");
            }
            Opcode::Break => {
                let globals = self
                    .frames
                    .frame(FrameRole::Global)
                    .map_or(0, |frame| frame.len());
                debug!(
                    order = self.at,
                    ip = self.ip,
                    globals,
                    frame_depth = self.frames.depth(),
                    temporary = self.frames.has_temporary(),
                    data_stack = self.data_stack.len(),
                    call_stack = self.call_stack.len(),
                    "BREAK"
                );
            }
            _ => return Err(self.unhandled(instr)),
        }
        Ok(Flow::Continue)
    }
}

//! Main execution loop and opcode dispatch.

use ippcode_common::{Instruction, Opcode};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::{Machine, Termination};

/// The handler family an opcode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Arithmetic,
    RelBoolConvert,
    ControlFlow,
    MemoryAndFrames,
    DataStack,
    String,
    Io,
    Debug,
}

impl Family {
    /// Every opcode maps to exactly one family.
    pub fn of(opcode: Opcode) -> Self {
        match opcode {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Idiv => Family::Arithmetic,

            Opcode::Lt
            | Opcode::Gt
            | Opcode::Eq
            | Opcode::And
            | Opcode::Or
            | Opcode::Not
            | Opcode::Int2Char
            | Opcode::Stri2Int => Family::RelBoolConvert,

            Opcode::Label
            | Opcode::Jump
            | Opcode::JumpIfEq
            | Opcode::JumpIfNeq
            | Opcode::Exit => Family::ControlFlow,

            Opcode::Move
            | Opcode::CreateFrame
            | Opcode::PushFrame
            | Opcode::PopFrame
            | Opcode::DefVar
            | Opcode::Call
            | Opcode::Return => Family::MemoryAndFrames,

            Opcode::Pushs | Opcode::Pops => Family::DataStack,

            Opcode::Concat | Opcode::Strlen | Opcode::GetChar | Opcode::SetChar | Opcode::Type => {
                Family::String
            }

            Opcode::Read | Opcode::Write => Family::Io,

            Opcode::Dprint | Opcode::Break => Family::Debug,
        }
    }
}

/// What the loop does after an instruction completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit(u8),
}

impl<'a> Machine<'a> {
    /// Execute the program until it runs off the end, exits, or fails.
    pub fn execute(&mut self) -> Result<Termination, RuntimeError> {
        let termination = loop {
            let Some(instr) = self.fetch() else {
                break Termination::Completed;
            };
            self.at = instr.order;
            self.ip += 1;

            trace!(order = instr.order, %instr, "execute");

            match self.step(instr) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(code)) => break Termination::Exit(code),
                Err(err) => {
                    debug!(order = instr.order, error = %err, "run failed");
                    return Err(err);
                }
            }
        };

        debug!(status = termination.status(), "run finished");
        Ok(termination)
    }

    /// Dispatch one instruction to its family handler.
    pub(crate) fn step(&mut self, instr: &'a Instruction) -> Result<Flow, RuntimeError> {
        match Family::of(instr.opcode) {
            Family::Arithmetic => self.exec_arithmetic(instr),
            Family::RelBoolConvert => self.exec_rel_bool_convert(instr),
            Family::ControlFlow => self.exec_control_flow(instr),
            Family::MemoryAndFrames => self.exec_memory(instr),
            Family::DataStack => self.exec_data_stack(instr),
            Family::String => self.exec_string(instr),
            Family::Io => self.exec_io(instr),
            Family::Debug => self.exec_debug(instr),
        }
    }

    /// Error for an opcode that reached a family handler it does not belong to.
    pub(crate) fn unhandled(&self, instr: &Instruction) -> RuntimeError {
        RuntimeError::UnhandledOpcode {
            at: self.at,
            opcode: instr.opcode,
        }
    }
}

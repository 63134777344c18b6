//! Engine state: instructions, label table, frames, stacks, instruction pointer.

use std::collections::HashSet;

use ippcode_common::{Instruction, Program};
use tracing::debug;

use crate::error::RuntimeError;
use crate::frame_logic::FrameLogic;
use crate::io::{Input, Output};
use crate::labels::LabelTable;
use crate::stack::{CallStack, DataStack};

/// How a run ended, when it did not end in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The instruction pointer ran past the last instruction.
    Completed,
    /// EXIT ran with this status (0-9).
    Exit(u8),
}

impl Termination {
    /// The process exit status for this outcome.
    pub fn status(&self) -> i32 {
        match self {
            Termination::Completed => 0,
            Termination::Exit(code) => i32::from(*code),
        }
    }
}

/// The IPPcode24 execution engine.
///
/// One `Machine` owns all state of one run. Handlers are methods on the
/// machine, so every one of them sees the same frames, stacks, label table
/// and instruction pointer.
pub struct Machine<'a> {
    /// Instructions sorted by ascending `order`.
    pub(crate) instructions: Vec<&'a Instruction>,
    /// Label positions, fixed before the first instruction runs.
    pub(crate) labels: LabelTable,
    /// Global, local and temporary frames.
    pub(crate) frames: FrameLogic,
    /// Value snapshots for PUSHS/POPS.
    pub(crate) data_stack: DataStack,
    /// Return positions for CALL/RETURN.
    pub(crate) call_stack: CallStack,
    /// 1-based position of the next instruction to fetch.
    pub(crate) ip: usize,
    /// `order` of the instruction being executed, for error reports.
    pub(crate) at: u32,
    pub(crate) input: &'a mut dyn Input,
    pub(crate) output: &'a mut dyn Output,
}

impl<'a> Machine<'a> {
    /// Load a program: order the instructions and build the label table.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::InvalidOrder`] for a zero or repeated `order`,
    /// [`RuntimeError::MalformedInstruction`] for arguments that do not fit
    /// their opcode, and [`RuntimeError::DuplicateLabel`].
    pub fn new(
        program: &'a Program,
        input: &'a mut dyn Input,
        output: &'a mut dyn Output,
    ) -> Result<Self, RuntimeError> {
        let mut instructions: Vec<&'a Instruction> = program.instructions.iter().collect();
        instructions.sort_by_key(|instr| instr.order);

        let mut seen = HashSet::with_capacity(instructions.len());
        for instr in &instructions {
            if instr.order == 0 || !seen.insert(instr.order) {
                return Err(RuntimeError::InvalidOrder { at: instr.order });
            }
            if !instr.is_well_formed() {
                return Err(RuntimeError::MalformedInstruction {
                    at: instr.order,
                    opcode: instr.opcode,
                });
            }
        }

        let labels = LabelTable::build(&instructions)?;
        debug!(
            instructions = instructions.len(),
            labels = labels.len(),
            "program loaded"
        );

        Ok(Self {
            instructions,
            labels,
            frames: FrameLogic::new(),
            data_stack: DataStack::new(),
            call_stack: CallStack::new(),
            ip: 1,
            at: 0,
            input,
            output,
        })
    }

    /// The instruction at the current pointer, or `None` past the end.
    pub(crate) fn fetch(&self) -> Option<&'a Instruction> {
        self.ip
            .checked_sub(1)
            .and_then(|index| self.instructions.get(index))
            .copied()
    }

    /// Resolve a label to its position.
    pub(crate) fn label_position(&self, name: &str) -> Result<usize, RuntimeError> {
        self.labels
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedLabel {
                at: self.at,
                label: name.to_string(),
            })
    }

    /// Number of distinct labels in the program.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Read-only view of the frames, for inspection after a run.
    pub fn frames(&self) -> &FrameLogic {
        &self.frames
    }

    /// Number of snapshots on the data stack.
    pub fn data_stack_depth(&self) -> usize {
        self.data_stack.len()
    }

    /// Number of pending return positions.
    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }
}

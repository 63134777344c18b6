//! Program representation: an ordered list of instruction records.

use crate::instruction::Instruction;

/// An IPPcode24 program: a sequence of decoded instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction records, in the order the decoder produced them.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Build a program from opcode/argument pairs, numbering them 1, 2, 3, ….
    pub fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (crate::Opcode, Vec<crate::Argument>)>,
    {
        let instructions = items
            .into_iter()
            .zip(1u32..)
            .map(|((opcode, args), order)| Instruction::new(order, opcode, args))
            .collect();
        Self { instructions }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

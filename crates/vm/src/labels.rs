//! Label table: built once, before execution, from the ordered instructions.

use std::collections::HashMap;

use ippcode_common::{Instruction, Opcode};

use crate::error::RuntimeError;

/// Immutable label → instruction-position map.
///
/// Positions are 1-based indices into the execution-ordered instruction
/// sequence, the same unit the instruction pointer uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    positions: HashMap<String, usize>,
}

impl LabelTable {
    /// Pre-scan `instructions` (already in execution order) for LABEL.
    ///
    /// A label defined twice is a [`RuntimeError::DuplicateLabel`] reported
    /// at the second definition.
    pub fn build(instructions: &[&Instruction]) -> Result<Self, RuntimeError> {
        let mut positions = HashMap::new();

        for (index, instr) in instructions.iter().enumerate() {
            if instr.opcode != Opcode::Label {
                continue;
            }
            let name = instr
                .arg(0)
                .ok_or(RuntimeError::MalformedInstruction {
                    at: instr.order,
                    opcode: instr.opcode,
                })?
                .text
                .clone();
            if positions.contains_key(&name) {
                return Err(RuntimeError::DuplicateLabel {
                    at: instr.order,
                    label: name,
                });
            }
            positions.insert(name, index + 1);
        }

        Ok(Self { positions })
    }

    /// Position of the LABEL instruction named `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

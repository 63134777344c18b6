//! Decoded instruction records.

use std::fmt;

use crate::argument::Argument;
use crate::opcode::Opcode;

/// A single decoded instruction.
///
/// `order` fixes the execution sequence: instructions run in ascending
/// order regardless of their position in the containing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Position in the execution sequence. At least 1, unique per program.
    pub order: u32,
    /// The operation to perform.
    pub opcode: Opcode,
    /// Positional arguments. The count matches `opcode.arity()`.
    pub args: Vec<Argument>,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(order: u32, opcode: Opcode, args: Vec<Argument>) -> Self {
        Self {
            order,
            opcode,
            args,
        }
    }

    /// The argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    /// Returns true if the argument kinds fit the opcode's operand shapes.
    pub fn is_well_formed(&self) -> bool {
        let shapes = self.opcode.operands();
        shapes.len() == self.args.len()
            && shapes
                .iter()
                .zip(&self.args)
                .all(|(shape, arg)| shape.accepts(arg.kind))
    }
}

/// Renders the instruction as one line of source text.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn display_instruction() {
        let instr = Instruction::new(
            3,
            Opcode::Add,
            vec![Argument::var("GF@x"), Argument::int(1), Argument::var("LF@y")],
        );
        assert_eq!(instr.to_string(), "ADD GF@x int@1 LF@y");
    }

    #[test]
    fn display_nullary() {
        assert_eq!(
            Instruction::new(1, Opcode::CreateFrame, vec![]).to_string(),
            "CREATEFRAME"
        );
    }

    #[test]
    fn well_formed_checks_count_and_shapes() {
        let good = Instruction::new(
            1,
            Opcode::Read,
            vec![Argument::var("GF@x"), Argument::type_name(ValueType::Int)],
        );
        assert!(good.is_well_formed());

        let wrong_kind = Instruction::new(1, Opcode::DefVar, vec![Argument::int(1)]);
        assert!(!wrong_kind.is_well_formed());

        let wrong_count = Instruction::new(1, Opcode::Return, vec![Argument::label("x")]);
        assert!(!wrong_count.is_well_formed());
    }

    #[test]
    fn arg_access() {
        let instr = Instruction::new(1, Opcode::Write, vec![Argument::nil()]);
        assert_eq!(instr.arg(0), Some(&Argument::nil()));
        assert_eq!(instr.arg(1), None);
    }
}

//! Opcode definitions for the IPPcode24 instruction set.

use crate::argument::ArgKind;

/// The shape an operand position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A variable reference (written to).
    Var,
    /// A variable reference or a literal (read from).
    Symb,
    /// A label name.
    Label,
    /// A type name.
    Type,
}

impl Operand {
    /// Returns true if an argument of `kind` may fill this position.
    pub fn accepts(&self, kind: ArgKind) -> bool {
        match self {
            Operand::Var => kind == ArgKind::Var,
            Operand::Symb => kind == ArgKind::Var || kind.is_literal(),
            Operand::Label => kind == ArgKind::Label,
            Operand::Type => kind == ArgKind::Type,
        }
    }
}

/// Identifies the operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Frames, calls
    /// Copy a value into a variable.
    Move,
    /// Replace the temporary frame with a new empty one.
    CreateFrame,
    /// Move the temporary frame onto the frame stack.
    PushFrame,
    /// Move the top of the frame stack into the temporary frame.
    PopFrame,
    /// Declare a variable.
    DefVar,
    /// Save the return position and jump to a label.
    Call,
    /// Jump to the most recently saved return position.
    Return,

    // Data stack
    /// Push a value snapshot.
    Pushs,
    /// Pop a value into a variable.
    Pops,

    // Arithmetic
    Add,
    Sub,
    Mul,
    /// Truncating integer division.
    Idiv,

    // Relational, boolean, conversion
    Lt,
    Gt,
    Eq,
    And,
    Or,
    Not,
    /// Codepoint to one-character string.
    Int2Char,
    /// Codepoint of the character at an index.
    Stri2Int,

    // Input/output
    Read,
    Write,

    // Strings
    Concat,
    Strlen,
    GetChar,
    SetChar,
    /// Name of an operand's runtime type.
    Type,

    // Control flow
    Label,
    Jump,
    JumpIfEq,
    JumpIfNeq,
    Exit,

    // Debugging
    Dprint,
    Break,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 35] = [
    Opcode::Move,
    Opcode::CreateFrame,
    Opcode::PushFrame,
    Opcode::PopFrame,
    Opcode::DefVar,
    Opcode::Call,
    Opcode::Return,
    Opcode::Pushs,
    Opcode::Pops,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Idiv,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Eq,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Int2Char,
    Opcode::Stri2Int,
    Opcode::Read,
    Opcode::Write,
    Opcode::Concat,
    Opcode::Strlen,
    Opcode::GetChar,
    Opcode::SetChar,
    Opcode::Type,
    Opcode::Label,
    Opcode::Jump,
    Opcode::JumpIfEq,
    Opcode::JumpIfNeq,
    Opcode::Exit,
    Opcode::Dprint,
    Opcode::Break,
];

const NONE: &[Operand] = &[];
const VAR: &[Operand] = &[Operand::Var];
const SYMB: &[Operand] = &[Operand::Symb];
const LABEL: &[Operand] = &[Operand::Label];
const VAR_SYMB: &[Operand] = &[Operand::Var, Operand::Symb];
const VAR_TYPE: &[Operand] = &[Operand::Var, Operand::Type];
const VAR_SYMB_SYMB: &[Operand] = &[Operand::Var, Operand::Symb, Operand::Symb];
const LABEL_SYMB_SYMB: &[Operand] = &[Operand::Label, Operand::Symb, Operand::Symb];

impl Opcode {
    /// Returns the source mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Move => "MOVE",
            Opcode::CreateFrame => "CREATEFRAME",
            Opcode::PushFrame => "PUSHFRAME",
            Opcode::PopFrame => "POPFRAME",
            Opcode::DefVar => "DEFVAR",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::Pushs => "PUSHS",
            Opcode::Pops => "POPS",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Idiv => "IDIV",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Eq => "EQ",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Not => "NOT",
            Opcode::Int2Char => "INT2CHAR",
            Opcode::Stri2Int => "STRI2INT",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Concat => "CONCAT",
            Opcode::Strlen => "STRLEN",
            Opcode::GetChar => "GETCHAR",
            Opcode::SetChar => "SETCHAR",
            Opcode::Type => "TYPE",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfEq => "JUMPIFEQ",
            Opcode::JumpIfNeq => "JUMPIFNEQ",
            Opcode::Exit => "EXIT",
            Opcode::Dprint => "DPRINT",
            Opcode::Break => "BREAK",
        }
    }

    /// Look up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
            .copied()
    }

    /// The operand shapes this opcode takes, in order.
    pub fn operands(&self) -> &'static [Operand] {
        match self {
            Opcode::CreateFrame
            | Opcode::PushFrame
            | Opcode::PopFrame
            | Opcode::Return
            | Opcode::Break => NONE,

            Opcode::DefVar | Opcode::Pops => VAR,
            Opcode::Pushs | Opcode::Write | Opcode::Exit | Opcode::Dprint => SYMB,
            Opcode::Call | Opcode::Label | Opcode::Jump => LABEL,

            Opcode::Move
            | Opcode::Not
            | Opcode::Int2Char
            | Opcode::Strlen
            | Opcode::Type => VAR_SYMB,

            Opcode::Read => VAR_TYPE,

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Idiv
            | Opcode::Lt
            | Opcode::Gt
            | Opcode::Eq
            | Opcode::And
            | Opcode::Or
            | Opcode::Stri2Int
            | Opcode::Concat
            | Opcode::GetChar
            | Opcode::SetChar => VAR_SYMB_SYMB,

            Opcode::JumpIfEq | Opcode::JumpIfNeq => LABEL_SYMB_SYMB,
        }
    }

    /// Number of arguments this opcode takes.
    pub fn arity(&self) -> usize {
        self.operands().len()
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

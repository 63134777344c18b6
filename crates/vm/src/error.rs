//! Runtime errors for the IPPcode24 engine.
//!
//! Every error that arises while a program is loaded or executed carries the
//! `order` of the instruction that raised it (`at`). Errors are grouped into
//! categories by [`ErrorKind`]; each category maps to one process exit code.

use ippcode_common::{DecodeError, FrameRole, Opcode, ValueType};
use thiserror::Error;

/// Error category. Each category has a distinct exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed frame role, literal or READ type; unmatched opcode.
    InvalidSourceStructure,
    /// Undefined or duplicate label; duplicate variable declaration.
    Semantic,
    /// An operand has the wrong runtime type.
    OperandType,
    /// An undeclared variable in an existing frame.
    VariableAccess,
    /// An absent local or temporary frame.
    FrameAccess,
    /// A read of an unassigned variable; RETURN or POPS on an empty stack.
    Value,
    /// Division by zero; EXIT or INT2CHAR operand out of range.
    OperandValue,
    /// String index out of range; empty SETCHAR replacement.
    StringOperation,
    /// Failure of the output collaborator.
    Internal,
}

impl ErrorKind {
    /// The process exit status for this category.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::InvalidSourceStructure => 32,
            ErrorKind::Semantic => 52,
            ErrorKind::OperandType => 53,
            ErrorKind::VariableAccess => 54,
            ErrorKind::FrameAccess => 55,
            ErrorKind::Value => 56,
            ErrorKind::OperandValue => 57,
            ErrorKind::StringOperation => 58,
            ErrorKind::Internal => 99,
        }
    }
}

/// Errors that occur while loading or executing a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Argument text that does not fit its kind.
    #[error("malformed argument at instruction {at}: {source}")]
    MalformedArgument { at: u32, source: DecodeError },

    /// Argument count or kinds that do not fit the opcode.
    #[error("{opcode} at instruction {at} has malformed arguments")]
    MalformedInstruction { at: u32, opcode: Opcode },

    /// Two instructions share one `order`, or an `order` is zero.
    #[error("invalid instruction order {at}")]
    InvalidOrder { at: u32 },

    /// READ with a type other than int, bool or string.
    #[error("unsupported READ type '{token}' at instruction {at}")]
    UnsupportedReadType { at: u32, token: String },

    /// An opcode that no handler family accepted.
    #[error("unhandled opcode {opcode} at instruction {at}")]
    UnhandledOpcode { at: u32, opcode: Opcode },

    /// A label defined more than once.
    #[error("label '{label}' redefined at instruction {at}")]
    DuplicateLabel { at: u32, label: String },

    /// A jump or call to a label that does not exist.
    #[error("undefined label '{label}' at instruction {at}")]
    UndefinedLabel { at: u32, label: String },

    /// DEFVAR of a name already present in the frame.
    #[error("variable {var} redeclared at instruction {at}")]
    Redeclaration { at: u32, var: String },

    /// An operand whose type does not match the required one.
    #[error("expected {expected}, found {found} at instruction {at}")]
    TypeMismatch {
        at: u32,
        expected: ValueType,
        found: ValueType,
    },

    /// Two operands whose types cannot be compared.
    #[error("cannot compare {left} with {right} at instruction {at}")]
    IncompatibleTypes {
        at: u32,
        left: ValueType,
        right: ValueType,
    },

    /// A variable not declared in its frame.
    #[error("undefined variable {var} at instruction {at}")]
    UndefinedVariable { at: u32, var: String },

    /// A reference to a frame that does not exist.
    #[error("frame {frame} does not exist at instruction {at}")]
    MissingFrame { at: u32, frame: FrameRole },

    /// A read of a declared variable that has no value yet.
    #[error("variable {var} read before assignment at instruction {at}")]
    UnassignedVariable { at: u32, var: String },

    /// RETURN with an empty call stack.
    #[error("RETURN without CALL at instruction {at}")]
    ReturnWithoutCall { at: u32 },

    /// POPS with an empty data stack.
    #[error("POPS on empty data stack at instruction {at}")]
    DataStackEmpty { at: u32 },

    /// IDIV by zero.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: u32 },

    /// EXIT with a status outside 0-9.
    #[error("exit status {code} out of range 0-9 at instruction {at}")]
    ExitCodeOutOfRange { at: u32, code: i64 },

    /// INT2CHAR with a value that is not a Unicode scalar value.
    #[error("codepoint {code} out of range at instruction {at}")]
    CodepointOutOfRange { at: u32, code: i64 },

    /// A string index outside `0..length`.
    #[error("index {index} out of range (length {length}) at instruction {at}")]
    IndexOutOfRange { at: u32, index: i64, length: usize },

    /// SETCHAR with an empty replacement string.
    #[error("empty replacement string at instruction {at}")]
    EmptyReplacement { at: u32 },

    /// The output collaborator failed.
    #[error("output failed at instruction {at}: {message}")]
    Output { at: u32, message: String },
}

impl RuntimeError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::MalformedArgument { .. }
            | RuntimeError::MalformedInstruction { .. }
            | RuntimeError::InvalidOrder { .. }
            | RuntimeError::UnsupportedReadType { .. }
            | RuntimeError::UnhandledOpcode { .. } => ErrorKind::InvalidSourceStructure,

            RuntimeError::DuplicateLabel { .. }
            | RuntimeError::UndefinedLabel { .. }
            | RuntimeError::Redeclaration { .. } => ErrorKind::Semantic,

            RuntimeError::TypeMismatch { .. } | RuntimeError::IncompatibleTypes { .. } => {
                ErrorKind::OperandType
            }

            RuntimeError::UndefinedVariable { .. } => ErrorKind::VariableAccess,

            RuntimeError::MissingFrame { .. } => ErrorKind::FrameAccess,

            RuntimeError::UnassignedVariable { .. }
            | RuntimeError::ReturnWithoutCall { .. }
            | RuntimeError::DataStackEmpty { .. } => ErrorKind::Value,

            RuntimeError::DivisionByZero { .. }
            | RuntimeError::ExitCodeOutOfRange { .. }
            | RuntimeError::CodepointOutOfRange { .. } => ErrorKind::OperandValue,

            RuntimeError::IndexOutOfRange { .. } | RuntimeError::EmptyReplacement { .. } => {
                ErrorKind::StringOperation
            }

            RuntimeError::Output { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for `self.kind().exit_code()`.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

//! Error types for the IPPcode24 assembler.

use thiserror::Error;

/// Errors produced while translating source text into instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first meaningful line is not the `.IPPcode24` header.
    #[error("line {line}: missing or malformed .IPPcode24 header")]
    MissingHeader { line: usize },

    /// The header appeared again after the first line.
    #[error("line {line}: unexpected .IPPcode24 header")]
    MisplacedHeader { line: usize },

    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode received the wrong number of arguments.
    #[error("line {line}: {opcode} expects {expected} argument(s), found {found}")]
    WrongArgumentCount {
        line: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// An argument does not fit the operand position it occupies.
    #[error("line {line}: expected {expected}, found '{token}'")]
    InvalidArgument {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// The XML input is not well-formed.
    #[error("line {line}: malformed XML: {message}")]
    MalformedXml { line: usize, message: String },

    /// The XML input is well-formed but does not describe a program.
    #[error("line {line}: {message}")]
    InvalidStructure { line: usize, message: String },
}

impl AsmError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AsmError::MissingHeader { .. } => 21,
            AsmError::UnknownOpcode { .. } => 22,
            AsmError::MisplacedHeader { .. }
            | AsmError::WrongArgumentCount { .. }
            | AsmError::InvalidArgument { .. } => 23,
            AsmError::MalformedXml { .. } => 31,
            AsmError::InvalidStructure { .. } => 32,
        }
    }

    /// The 1-based source or document line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            AsmError::MissingHeader { line }
            | AsmError::MisplacedHeader { line }
            | AsmError::UnknownOpcode { line, .. }
            | AsmError::WrongArgumentCount { line, .. }
            | AsmError::InvalidArgument { line, .. }
            | AsmError::MalformedXml { line, .. }
            | AsmError::InvalidStructure { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_header() {
        let e = AsmError::MissingHeader { line: 1 };
        assert_eq!(e.to_string(), "line 1: missing or malformed .IPPcode24 header");
    }

    #[test]
    fn error_display_unknown_opcode() {
        let e = AsmError::UnknownOpcode {
            line: 3,
            token: "FOO".to_string(),
        };
        assert_eq!(e.to_string(), "line 3: unknown opcode 'FOO'");
    }

    #[test]
    fn error_display_wrong_argument_count() {
        let e = AsmError::WrongArgumentCount {
            line: 7,
            opcode: "MOVE",
            expected: 2,
            found: 1,
        };
        assert_eq!(
            e.to_string(),
            "line 7: MOVE expects 2 argument(s), found 1"
        );
    }

    #[test]
    fn error_display_invalid_argument() {
        let e = AsmError::InvalidArgument {
            line: 2,
            token: "int@x".to_string(),
            expected: "symbol",
        };
        assert_eq!(e.to_string(), "line 2: expected symbol, found 'int@x'");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(AsmError::MissingHeader { line: 1 }.exit_code(), 21);
        assert_eq!(
            AsmError::UnknownOpcode {
                line: 1,
                token: "X".into()
            }
            .exit_code(),
            22
        );
        assert_eq!(AsmError::MisplacedHeader { line: 5 }.exit_code(), 23);
        assert_eq!(
            AsmError::InvalidArgument {
                line: 4,
                token: "X".into(),
                expected: "label"
            }
            .exit_code(),
            23
        );
    }

    #[test]
    fn xml_exit_codes() {
        let malformed = AsmError::MalformedXml {
            line: 2,
            message: "unexpected end of stream".into(),
        };
        assert_eq!(malformed.exit_code(), 31);
        assert_eq!(
            malformed.to_string(),
            "line 2: malformed XML: unexpected end of stream"
        );
        let structure = AsmError::InvalidStructure {
            line: 1,
            message: "root element must be 'program'".into(),
        };
        assert_eq!(structure.exit_code(), 32);
    }

    #[test]
    fn line_accessor() {
        let e = AsmError::WrongArgumentCount {
            line: 9,
            opcode: "ADD",
            expected: 3,
            found: 0,
        };
        assert_eq!(e.line(), 9);
    }
}

//! Errors from interpreting raw argument text.

use thiserror::Error;

/// Errors that occur when an argument's raw text does not fit its kind.
///
/// The engine reports every variant as a malformed-source condition; the
/// assembler reports them as syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A variable reference without a `GF`, `LF` or `TF` prefix.
    #[error("invalid frame role '{0}'")]
    InvalidFrameRole(String),

    /// A variable reference that is not `FRAME@name`.
    #[error("invalid variable reference '{0}'")]
    InvalidVariable(String),

    /// An integer literal that is not decimal, hex or octal, or overflows i64.
    #[error("invalid integer literal '{0}'")]
    InvalidInteger(String),

    /// A bool literal other than `true` or `false`.
    #[error("invalid bool literal '{0}'")]
    InvalidBool(String),

    /// A nil literal other than `nil`.
    #[error("invalid nil literal '{0}'")]
    InvalidNil(String),

    /// A backslash not followed by three decimal digits naming a character.
    #[error("invalid escape sequence in '{0}'")]
    InvalidEscape(String),

    /// A type name other than `int`, `bool`, `string` or `nil`.
    #[error("invalid type name '{0}'")]
    InvalidType(String),

    /// An argument kind name outside the closed vocabulary.
    #[error("invalid argument kind '{0}'")]
    InvalidKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_frame_role() {
        assert_eq!(
            DecodeError::InvalidFrameRole("XF@a".to_string()).to_string(),
            "invalid frame role 'XF@a'"
        );
    }

    #[test]
    fn display_invalid_integer() {
        assert_eq!(
            DecodeError::InvalidInteger("12a".to_string()).to_string(),
            "invalid integer literal '12a'"
        );
    }

    #[test]
    fn display_invalid_escape() {
        assert_eq!(
            DecodeError::InvalidEscape("a\\1".to_string()).to_string(),
            "invalid escape sequence in 'a\\1'"
        );
    }
}

//! Instruction arguments.
//!
//! An argument is a kind tag plus the raw text of its value, exactly as the
//! decoder delivered it. Interpretation of the text (variable reference
//! splitting, literal parsing, escape decoding) is deferred to the consumer.

use std::fmt;

use crate::error::DecodeError;
use crate::escape;
use crate::value::{Value, ValueType};

/// The kind tag of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Integer literal.
    Int,
    /// Bool literal.
    Bool,
    /// String literal, possibly with `\ddd` escapes.
    String,
    /// The nil literal.
    Nil,
    /// Variable reference, `FRAME@name`.
    Var,
    /// Label name.
    Label,
    /// Type name (READ's second operand).
    Type,
}

/// All argument kinds, in definition order.
pub const ALL_ARG_KINDS: [ArgKind; 7] = [
    ArgKind::Int,
    ArgKind::Bool,
    ArgKind::String,
    ArgKind::Nil,
    ArgKind::Var,
    ArgKind::Label,
    ArgKind::Type,
];

impl ArgKind {
    /// The kind's name in the interchange format.
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Int => "int",
            ArgKind::Bool => "bool",
            ArgKind::String => "string",
            ArgKind::Nil => "nil",
            ArgKind::Var => "var",
            ArgKind::Label => "label",
            ArgKind::Type => "type",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DecodeError> {
        ALL_ARG_KINDS
            .iter()
            .find(|k| k.name() == name)
            .copied()
            .ok_or_else(|| DecodeError::InvalidKind(name.to_string()))
    }

    /// Returns true for the four literal kinds.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ArgKind::Int | ArgKind::Bool | ArgKind::String | ArgKind::Nil
        )
    }
}

/// The frame a variable reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRole {
    Global,
    Local,
    Temporary,
}

impl FrameRole {
    /// The two-letter prefix used in variable references.
    pub fn prefix(&self) -> &'static str {
        match self {
            FrameRole::Global => "GF",
            FrameRole::Local => "LF",
            FrameRole::Temporary => "TF",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "GF" => Some(FrameRole::Global),
            "LF" => Some(FrameRole::Local),
            "TF" => Some(FrameRole::Temporary),
            _ => None,
        }
    }
}

impl fmt::Display for FrameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A parsed variable reference borrowing its name from the argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRef<'a> {
    pub frame: FrameRole,
    pub name: &'a str,
}

impl<'a> VarRef<'a> {
    /// Split `FRAME@name` into its role and name.
    pub fn parse(text: &'a str) -> Result<Self, DecodeError> {
        let (prefix, name) = text
            .split_once('@')
            .ok_or_else(|| DecodeError::InvalidVariable(text.to_string()))?;
        let frame = FrameRole::from_prefix(prefix)
            .ok_or_else(|| DecodeError::InvalidFrameRole(text.to_string()))?;
        if name.is_empty() {
            return Err(DecodeError::InvalidVariable(text.to_string()));
        }
        Ok(Self { frame, name })
    }
}

impl fmt::Display for VarRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.frame, self.name)
    }
}

/// A single instruction argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// What the text denotes.
    pub kind: ArgKind,
    /// The raw text. For literals this excludes the `kind@` prefix; for
    /// variables it is the whole `FRAME@name`.
    pub text: String,
}

impl Argument {
    pub fn new(kind: ArgKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Shorthand for a variable reference argument.
    pub fn var(text: impl Into<String>) -> Self {
        Self::new(ArgKind::Var, text)
    }

    /// Shorthand for a label argument.
    pub fn label(name: impl Into<String>) -> Self {
        Self::new(ArgKind::Label, name)
    }

    /// Shorthand for an integer literal.
    pub fn int(value: i64) -> Self {
        Self::new(ArgKind::Int, value.to_string())
    }

    /// Shorthand for a bool literal.
    pub fn bool(value: bool) -> Self {
        Self::new(ArgKind::Bool, if value { "true" } else { "false" })
    }

    /// Shorthand for a string literal (text is used verbatim, escapes included).
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ArgKind::String, text)
    }

    /// Shorthand for the nil literal.
    pub fn nil() -> Self {
        Self::new(ArgKind::Nil, "nil")
    }

    /// Shorthand for a type-name argument.
    pub fn type_name(ty: ValueType) -> Self {
        Self::new(ArgKind::Type, ty.name())
    }

    /// Parse this argument as a variable reference.
    pub fn var_ref(&self) -> Result<VarRef<'_>, DecodeError> {
        VarRef::parse(&self.text)
    }

    /// Decode a literal argument into a value.
    ///
    /// Returns `Ok(None)` for non-literal kinds.
    pub fn literal(&self) -> Result<Option<Value>, DecodeError> {
        let value = match self.kind {
            ArgKind::Int => Value::Int(parse_int(&self.text)?),
            ArgKind::Bool => match self.text.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(DecodeError::InvalidBool(self.text.clone())),
            },
            ArgKind::String => Value::String(escape::decode(&self.text)?),
            ArgKind::Nil => {
                if self.text != "nil" {
                    return Err(DecodeError::InvalidNil(self.text.clone()));
                }
                Value::Nil
            }
            ArgKind::Var | ArgKind::Label | ArgKind::Type => return Ok(None),
        };
        Ok(Some(value))
    }
}

/// Renders the argument the way it is spelled in source text.
impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgKind::Var | ArgKind::Label | ArgKind::Type => f.write_str(&self.text),
            kind => write!(f, "{}@{}", kind.name(), self.text),
        }
    }
}

/// Parse an integer literal: optional sign, then decimal, `0x` hex or `0o` octal.
pub fn parse_int(text: &str) -> Result<i64, DecodeError> {
    let invalid = || DecodeError::InvalidInteger(text.to_string());

    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or(body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(oct) = body.strip_prefix("0o").or(body.strip_prefix("0O")) {
        (8, oct)
    } else {
        (10, body)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    // Parse the magnitude as u64 so that i64::MIN is representable.
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    if negative {
        0i64.checked_sub_unsigned(magnitude).ok_or_else(invalid)
    } else {
        i64::try_from(magnitude).map_err(|_| invalid())
    }
}

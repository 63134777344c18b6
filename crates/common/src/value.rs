//! Runtime value representation for IPPcode24.
//!
//! Values are what variables hold and what the data stack stores.

use std::cmp::Ordering;
use std::fmt;

use crate::error::DecodeError;

/// The runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Bool,
    String,
    Nil,
}

/// All value types, in definition order.
pub const ALL_VALUE_TYPES: [ValueType; 4] = [
    ValueType::Int,
    ValueType::Bool,
    ValueType::String,
    ValueType::Nil,
];

impl ValueType {
    /// The name used in source text and produced by TYPE.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Nil => "nil",
        }
    }

    /// Look up a type by its source name.
    pub fn from_name(name: &str) -> Result<Self, DecodeError> {
        ALL_VALUE_TYPES
            .iter()
            .find(|t| t.name() == name)
            .copied()
            .ok_or_else(|| DecodeError::InvalidType(name.to_string()))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value: a closed tagged union.
///
/// Equality is structural. Ordering is defined only between two values of
/// the same non-nil type; every other pair is unordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Boolean. `false` orders before `true`.
    Bool(bool),
    /// Unicode text. Lengths and indices count codepoints.
    String(String),
    /// The nil value.
    Nil,
}

impl Value {
    /// Returns the runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Nil => ValueType::Nil,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            // UTF-8 byte order coincides with codepoint order.
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Formats the value the way WRITE prints it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::String(s) => f.write_str(s),
            Value::Nil => Ok(()),
        }
    }
}

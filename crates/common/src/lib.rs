//! IPPcode24 common types.
//!
//! This crate provides the data structures shared by the assembler, the
//! execution engine and the CLI:
//!
//! - [`Opcode`]: the closed instruction vocabulary and operand shapes
//! - [`Argument`]: a typed-kind, raw-text instruction argument
//! - [`Value`] / [`ValueType`]: runtime values
//! - [`Instruction`] / [`Program`]: decoded instruction records
//! - [`DecodeError`]: errors from interpreting argument text
//!
//! # Dependencies
//!
//! This crate uses `thiserror` and has no other dependencies.

pub mod argument;
pub mod error;
pub mod escape;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use argument::{ArgKind, Argument, FrameRole, VarRef};
pub use error::DecodeError;
pub use instruction::Instruction;
pub use opcode::{Opcode, Operand};
pub use program::Program;
pub use value::{Value, ValueType};

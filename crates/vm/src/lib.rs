//! IPPcode24 execution engine.
//!
//! The engine is a small stack machine with:
//! - A global frame, an optional temporary frame and a frame stack whose
//!   top is the current local frame
//! - A data stack of value snapshots
//! - A call stack of return positions
//! - A label table built once before execution
//!
//! # Usage
//!
//! ```
//! use ippcode_common::{Argument, Opcode, Program};
//! use ippcode_vm::{run, LineInput, Termination};
//!
//! let program = Program::from_sequence([
//!     (Opcode::DefVar, vec![Argument::var("GF@x")]),
//!     (Opcode::Add, vec![Argument::var("GF@x"), Argument::int(40), Argument::int(2)]),
//!     (Opcode::Write, vec![Argument::var("GF@x")]),
//! ]);
//!
//! let mut input = LineInput::new(std::io::empty());
//! let mut output = Vec::new();
//! let result = run(&program, &mut input, &mut output).unwrap();
//! assert_eq!(result, Termination::Completed);
//! assert_eq!(output, b"42");
//! ```

pub mod error;
pub mod execute;
pub mod frame;
pub mod frame_logic;
pub mod io;
pub mod labels;
pub mod machine;
pub mod stack;

mod handlers;
mod operand;

pub use error::{ErrorKind, RuntimeError};
pub use execute::Family;
pub use io::{Input, LineInput, NoInput, Output};
pub use machine::{Machine, Termination};

use ippcode_common::Program;

/// Execute a program to completion.
///
/// This is the primary entry point for the engine. It:
/// 1. Orders the instructions and builds the label table
/// 2. Executes from the lowest `order` until the pointer runs past the end
///    or EXIT runs
/// 3. Returns how the run terminated
///
/// Output written before a failure stays written.
///
/// # Errors
///
/// Returns the first [`RuntimeError`] raised while loading or executing.
pub fn run(
    program: &Program,
    input: &mut dyn Input,
    output: &mut dyn Output,
) -> Result<Termination, RuntimeError> {
    let mut machine = Machine::new(program, input, output)?;
    machine.execute()
}

//! Opcode-family handlers. Each family is one `impl Machine` block.

mod arithmetic;
mod control_flow;
mod data_stack;
mod debug;
mod input_output;
mod memory;
mod rel_bool_convert;
mod string;

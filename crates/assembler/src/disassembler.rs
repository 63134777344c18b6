//! Disassembler: instruction records → canonical IPPcode24 source.
//!
//! Output is the header line followed by one instruction per line in
//! ascending `order`. No indentation, no comments, no blank lines.

use crate::lexer::HEADER;
use ippcode_common::Program;

/// Disassemble a program into canonical source text.
///
/// When the program's orders are `1..=n` the output reassembles to an
/// identical program (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let mut instrs: Vec<_> = program.instructions.iter().collect();
    instrs.sort_by_key(|instr| instr.order);

    let mut out = String::from(HEADER);
    out.push('\n');
    for instr in instrs {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}

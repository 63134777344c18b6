//! IPPcode24 assembler: source text ↔ instruction records.
//!
//! The assembler checks the header, the opcode vocabulary and the operand
//! shapes, and numbers instructions `1, 2, 3, …` in source order. Literal
//! text is validated but kept raw; the engine decodes it at run time.
//!
//! # Usage
//!
//! ```
//! use ippcode_assembler::{assemble, disassemble};
//!
//! let text = ".IPPcode24\nDEFVAR GF@x\nMOVE GF@x int@42\nWRITE GF@x\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 3);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! [`assemble_with_stats`] additionally returns source [`Stats`]: comment
//! and instruction line counts, labels, jump classification and opcode
//! frequency. [`from_xml`] reads the XML interchange form back.
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for programs whose
//! orders are `1..=n`. The disassembler outputs canonical text; the
//! assembler also accepts comments, blank lines, any whitespace and
//! lower-case mnemonics.

pub mod error;

mod disassembler;
mod lexer;
mod parser;
mod stats;
mod xml;

pub use disassembler::disassemble;
pub use error::AsmError;
pub use stats::{Stat, Stats};
pub use xml::{from_xml, to_xml};

use ippcode_common::Program;
use lexer::{is_header, tokenize_line};
use parser::parse_line;

/// Assemble source text into a program.
///
/// Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    assemble_with_stats(text).map(|(program, _)| program)
}

/// Assemble source text, collecting [`Stats`] along the way.
pub fn assemble_with_stats(text: &str) -> Result<(Program, Stats), AsmError> {
    let mut instructions = Vec::new();
    let mut stats = Stats::default();
    let mut seen_header = false;
    let mut last_line = 1;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        last_line = line_num;
        if line.contains('#') {
            stats.record_comment();
        }
        let tokens = tokenize_line(line);
        if tokens.is_empty() {
            continue;
        }

        if !seen_header {
            if !is_header(&tokens) {
                return Err(AsmError::MissingHeader { line: line_num });
            }
            seen_header = true;
            continue;
        }
        if tokens[0].eq_ignore_ascii_case(lexer::HEADER) {
            return Err(AsmError::MisplacedHeader { line: line_num });
        }

        let order = instructions.len() as u32 + 1;
        if let Some(instr) = parse_line(&tokens, line_num, order)? {
            stats.record(&instr);
            instructions.push(instr);
        }
    }

    if !seen_header {
        return Err(AsmError::MissingHeader { line: last_line });
    }
    Ok((Program::new(instructions), stats))
}

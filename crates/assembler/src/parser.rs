//! Parser for IPPcode24 source tokens → instructions.
//!
//! Each argument token is checked against the operand shape its position
//! requires (see [`Opcode::operands`]) and stored as an [`Argument`] with
//! its raw text. Literal text is validated here but decoded by the engine.

use crate::error::AsmError;
use crate::lexer::is_identifier;
use ippcode_common::argument::parse_int;
use ippcode_common::escape;
use ippcode_common::{ArgKind, Argument, FrameRole, Instruction, Opcode, Operand, ValueType};

/// Parse the tokens of one line into an instruction numbered `order`.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(
    tokens: &[&str],
    line_num: usize,
    order: u32,
) -> Result<Option<Instruction>, AsmError> {
    let Some((mnemonic, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    let shapes = opcode.operands();
    if args.len() != shapes.len() {
        return Err(AsmError::WrongArgumentCount {
            line: line_num,
            opcode: opcode.mnemonic(),
            expected: shapes.len(),
            found: args.len(),
        });
    }

    let args = shapes
        .iter()
        .zip(args)
        .map(|(shape, token)| parse_operand(*shape, token, line_num))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Instruction::new(order, opcode, args)))
}

fn parse_operand(shape: Operand, token: &str, line_num: usize) -> Result<Argument, AsmError> {
    match shape {
        Operand::Var => expect_var(token, line_num),
        Operand::Symb => expect_symb(token, line_num),
        Operand::Label => expect_label(token, line_num),
        Operand::Type => expect_type(token, line_num),
    }
}

fn invalid(token: &str, line_num: usize, expected: &'static str) -> AsmError {
    AsmError::InvalidArgument {
        line: line_num,
        token: token.to_string(),
        expected,
    }
}

fn is_var(token: &str) -> bool {
    match token.split_once('@') {
        Some((prefix, name)) => FrameRole::from_prefix(prefix).is_some() && is_identifier(name),
        None => false,
    }
}

fn expect_var(token: &str, line_num: usize) -> Result<Argument, AsmError> {
    if !is_var(token) {
        return Err(invalid(token, line_num, "variable"));
    }
    Ok(Argument::var(token))
}

fn expect_symb(token: &str, line_num: usize) -> Result<Argument, AsmError> {
    if is_var(token) {
        return Ok(Argument::var(token));
    }

    let (kind, text) = token
        .split_once('@')
        .ok_or_else(|| invalid(token, line_num, "symbol"))?;
    let kind = match ArgKind::from_name(kind) {
        Ok(kind) if kind.is_literal() => kind,
        _ => return Err(invalid(token, line_num, "symbol")),
    };

    let valid = match kind {
        ArgKind::Int => parse_int(text).is_ok(),
        ArgKind::Bool => text == "true" || text == "false",
        ArgKind::Nil => text == "nil",
        ArgKind::String => escape::is_well_formed(text),
        _ => false,
    };
    if !valid {
        return Err(invalid(token, line_num, "literal"));
    }
    Ok(Argument::new(kind, text))
}

fn expect_label(token: &str, line_num: usize) -> Result<Argument, AsmError> {
    if !is_identifier(token) {
        return Err(invalid(token, line_num, "label"));
    }
    Ok(Argument::label(token))
}

fn expect_type(token: &str, line_num: usize) -> Result<Argument, AsmError> {
    let ty = ValueType::from_name(token).map_err(|_| invalid(token, line_num, "type"))?;
    Ok(Argument::type_name(ty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Result<Instruction, AsmError> {
        parse_line(tokens, 1, 1).map(|instr| instr.expect("non-blank line"))
    }

    #[test]
    fn parse_blank_line() {
        assert_eq!(parse_line(&[], 4, 1), Ok(None));
    }

    #[test]
    fn parse_no_operands() {
        let instr = parse(&["CREATEFRAME"]).unwrap();
        assert_eq!(instr.opcode, Opcode::CreateFrame);
        assert!(instr.args.is_empty());
    }

    #[test]
    fn parse_var_symb() {
        let instr = parse(&["move", "LF@x", "string@a\\032b"]).unwrap();
        assert_eq!(instr.opcode, Opcode::Move);
        assert_eq!(
            instr.args,
            vec![Argument::var("LF@x"), Argument::string("a\\032b")]
        );
    }

    #[test]
    fn parse_empty_string_literal() {
        let instr = parse(&["WRITE", "string@"]).unwrap();
        assert_eq!(instr.args, vec![Argument::string("")]);
    }

    #[test]
    fn parse_string_literal_keeps_at_signs() {
        let instr = parse(&["WRITE", "string@a@b"]).unwrap();
        assert_eq!(instr.args, vec![Argument::string("a@b")]);
    }

    #[test]
    fn parse_label_symb_symb() {
        let instr = parse(&["JUMPIFEQ", "end", "GF@a", "nil@nil"]).unwrap();
        assert_eq!(
            instr.args,
            vec![Argument::label("end"), Argument::var("GF@a"), Argument::nil()]
        );
    }

    #[test]
    fn parse_read_type() {
        let instr = parse(&["READ", "GF@x", "int"]).unwrap();
        assert_eq!(instr.args[1], Argument::type_name(ValueType::Int));
    }

    #[test]
    fn parse_int_literals() {
        for text in ["int@0", "int@-12", "int@0x1f", "int@0o17", "int@+3"] {
            assert!(parse(&["PUSHS", text]).is_ok(), "rejected {text}");
        }
    }

    #[test]
    fn error_unknown_opcode() {
        let err = parse(&["HALT"]).unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode { token, .. } if token == "HALT"));
    }

    #[test]
    fn error_wrong_argument_count() {
        let err = parse(&["ADD", "GF@x", "int@1"]).unwrap_err();
        assert_eq!(
            err,
            AsmError::WrongArgumentCount {
                line: 1,
                opcode: "ADD",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn error_literal_where_variable_required() {
        let err = parse(&["DEFVAR", "int@1"]).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidArgument {
                line: 1,
                token: "int@1".into(),
                expected: "variable"
            }
        );
    }

    #[test]
    fn error_bad_frame_role() {
        assert!(parse(&["DEFVAR", "XF@x"]).is_err());
        assert!(parse(&["DEFVAR", "gf@x"]).is_err());
        assert!(parse(&["DEFVAR", "GF@1x"]).is_err());
    }

    #[test]
    fn error_malformed_literals() {
        for text in [
            "int@",
            "int@1.5",
            "bool@TRUE",
            "nil@null",
            "string@bad\\1",
            "float@1.0",
            "label@x",
            "justtext",
        ] {
            assert!(parse(&["WRITE", text]).is_err(), "accepted {text}");
        }
    }

    #[test]
    fn error_bad_label_and_type() {
        assert!(parse(&["JUMP", "9lives"]).is_err());
        assert!(parse(&["JUMP", "GF@x"]).is_err());
        assert!(parse(&["READ", "GF@x", "float"]).is_err());
    }
}

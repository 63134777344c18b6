//! XML interchange form of a program.
//!
//! The document has one `<program language="IPPcode24">` root holding an
//! `<instruction order=".." opcode="..">` element per instruction, whose
//! arguments are `<arg1>`, `<arg2>`, `<arg3>` elements with a `type`
//! attribute naming the argument kind.
//!
//! Reading checks the document structure only. Orders, operand shapes and
//! literal text are checked by the engine when the program is loaded.

use ippcode_common::{ArgKind, Argument, Instruction, Opcode, Program};
use roxmltree::{Document, Node};

use crate::error::AsmError;

const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const LANGUAGE: &str = "IPPcode24";
const PROGRAM_ATTRIBUTES: &[&str] = &["language", "name", "description"];
const INSTRUCTION_ATTRIBUTES: &[&str] = &["order", "opcode"];
const MAX_ARGS: usize = 3;

/// Render `program` as an XML document, instructions in ascending order.
pub fn to_xml(program: &Program) -> String {
    let mut instrs: Vec<_> = program.instructions.iter().collect();
    instrs.sort_by_key(|instr| instr.order);

    let mut out = String::new();
    out.push_str(PROLOG);
    out.push('\n');
    out.push_str("<program language=\"IPPcode24\">\n");
    for instr in instrs {
        out.push_str(&format!(
            "  <instruction order=\"{}\" opcode=\"{}\">\n",
            instr.order,
            instr.opcode.mnemonic()
        ));
        for (i, arg) in instr.args.iter().enumerate() {
            out.push_str(&format!(
                "    <arg{n} type=\"{}\">{}</arg{n}>\n",
                arg.kind.name(),
                escape_text(&arg.text),
                n = i + 1
            ));
        }
        out.push_str("  </instruction>\n");
    }
    out.push_str("</program>\n");
    out
}

/// Replace the five XML special characters with entity references.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Read a program from its XML form.
///
/// Instructions keep document order; the engine sorts them by `order`.
pub fn from_xml(text: &str) -> Result<Program, AsmError> {
    let doc = Document::parse(text).map_err(|e| AsmError::MalformedXml {
        line: e.pos().row as usize,
        message: e.to_string(),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "program" {
        return Err(invalid(root, "root element must be 'program'"));
    }
    if root.attribute("language") != Some(LANGUAGE) {
        return Err(invalid(root, "program must have language=\"IPPcode24\""));
    }
    check_attributes(root, PROGRAM_ATTRIBUTES)?;

    let mut instructions = Vec::new();
    for child in content(root)? {
        if child.tag_name().name() != "instruction" {
            return Err(invalid(
                child,
                format!("unexpected element '{}' in program", child.tag_name().name()),
            ));
        }
        instructions.push(read_instruction(child)?);
    }
    Ok(Program::new(instructions))
}

fn read_instruction(node: Node<'_, '_>) -> Result<Instruction, AsmError> {
    check_attributes(node, INSTRUCTION_ATTRIBUTES)?;

    let order = node
        .attribute("order")
        .ok_or_else(|| invalid(node, "instruction without 'order'"))?;
    let order = order
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid(node, format!("invalid order '{order}'")))?;

    let mnemonic = node
        .attribute("opcode")
        .ok_or_else(|| invalid(node, "instruction without 'opcode'"))?;
    let opcode = Opcode::from_mnemonic(mnemonic.trim())
        .ok_or_else(|| invalid(node, format!("unknown opcode '{mnemonic}'")))?;

    let mut slots: [Option<Argument>; MAX_ARGS] = Default::default();
    for child in content(node)? {
        let name = child.tag_name().name();
        let index = name
            .strip_prefix("arg")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| (1..=MAX_ARGS).contains(n))
            .ok_or_else(|| {
                invalid(child, format!("unexpected element '{name}' in instruction"))
            })?;
        let slot = &mut slots[index - 1];
        if slot.is_some() {
            return Err(invalid(child, format!("duplicate {name}")));
        }
        *slot = Some(read_argument(child)?);
    }

    let count = slots.iter().filter(|slot| slot.is_some()).count();
    let args: Vec<Argument> = slots.into_iter().take(count).flatten().collect();
    if args.len() != count {
        return Err(invalid(
            node,
            format!("arguments of {} are not numbered from arg1", opcode.mnemonic()),
        ));
    }
    if count != opcode.arity() {
        return Err(invalid(
            node,
            format!(
                "{} expects {} argument(s), found {count}",
                opcode.mnemonic(),
                opcode.arity()
            ),
        ));
    }
    Ok(Instruction::new(order, opcode, args))
}

fn read_argument(node: Node<'_, '_>) -> Result<Argument, AsmError> {
    check_attributes(node, &["type"])?;
    let kind = node
        .attribute("type")
        .ok_or_else(|| invalid(node, "argument without 'type'"))?;
    let kind = ArgKind::from_name(kind.trim())
        .map_err(|_| invalid(node, format!("unknown argument type '{kind}'")))?;
    if let Some(child) = node.children().find(|c| c.is_element()) {
        return Err(invalid(child, "argument must hold text only"));
    }
    Ok(Argument::new(kind, node.text().unwrap_or_default().trim()))
}

/// The element children of `node`, rejecting stray text.
fn content<'a, 'input>(node: Node<'a, 'input>) -> Result<Vec<Node<'a, 'input>>, AsmError> {
    let mut elements = Vec::new();
    for child in node.children() {
        if child.is_element() {
            elements.push(child);
        } else if child.is_text() && !child.text().unwrap_or_default().trim().is_empty() {
            return Err(invalid(
                child,
                format!("unexpected text in '{}'", node.tag_name().name()),
            ));
        }
    }
    Ok(elements)
}

fn check_attributes(node: Node<'_, '_>, allowed: &[&str]) -> Result<(), AsmError> {
    match node.attributes().find(|attr| !allowed.contains(&attr.name())) {
        Some(attr) => Err(invalid(
            node,
            format!("unexpected attribute '{}' on '{}'", attr.name(), node.tag_name().name()),
        )),
        None => Ok(()),
    }
}

fn invalid(node: Node<'_, '_>, message: impl Into<String>) -> AsmError {
    AsmError::InvalidStructure {
        line: node.document().text_pos_at(node.range().start).row as usize,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ippcode_common::{Argument, Instruction, Opcode, ValueType};

    #[test]
    fn empty_program() {
        assert_eq!(
            to_xml(&Program::default()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <program language=\"IPPcode24\">\n\
             </program>\n"
        );
    }

    #[test]
    fn instruction_with_arguments() {
        let program = Program::new(vec![Instruction::new(
            1,
            Opcode::Read,
            vec![Argument::var("GF@x"), Argument::type_name(ValueType::Int)],
        )]);
        let xml = to_xml(&program);
        assert!(xml.contains("  <instruction order=\"1\" opcode=\"READ\">\n"));
        assert!(xml.contains("    <arg1 type=\"var\">GF@x</arg1>\n"));
        assert!(xml.contains("    <arg2 type=\"type\">int</arg2>\n"));
        assert!(xml.contains("  </instruction>\n"));
    }

    #[test]
    fn special_characters_escaped() {
        assert_eq!(escape_text("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_text("plain\\032text"), "plain\\032text");
    }

    fn wrap(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\n<program language=\"IPPcode24\">\n{body}</program>\n"
        )
    }

    fn structure_error(text: &str) -> AsmError {
        let err = from_xml(text).unwrap_err();
        assert_eq!(err.exit_code(), 32, "{err}");
        err
    }

    #[test]
    fn read_instruction_with_arguments() {
        let text = wrap(
            "<instruction order=\"4\" opcode=\"read\">\
               <arg2 type=\"type\"> int </arg2><arg1 type=\"var\">GF@x</arg1>\
             </instruction>\n\
             <instruction order=\"2\" opcode=\"WRITE\"><arg1 type=\"string\"/></instruction>\n",
        );
        let program = from_xml(&text).unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction::new(
                    4,
                    Opcode::Read,
                    vec![Argument::var("GF@x"), Argument::type_name(ValueType::Int)],
                ),
                Instruction::new(2, Opcode::Write, vec![Argument::string("")]),
            ]
        );
    }

    #[test]
    fn read_unescapes_entities() {
        let text = wrap(
            "<instruction order=\"1\" opcode=\"WRITE\">\
               <arg1 type=\"string\">a&lt;b&amp;c\\032</arg1>\
             </instruction>\n",
        );
        let program = from_xml(&text).unwrap();
        assert_eq!(program.instructions[0].args, vec![Argument::string("a<b&c\\032")]);
    }

    #[test]
    fn malformed_xml_exits_31() {
        let err = from_xml("<program language=\"IPPcode24\">\n<instruction>").unwrap_err();
        assert!(matches!(err, AsmError::MalformedXml { .. }), "{err:?}");
        assert_eq!(err.exit_code(), 31);
    }

    #[test]
    fn root_must_be_ippcode24_program() {
        structure_error("<prog language=\"IPPcode24\"/>");
        structure_error("<program language=\"IPPcode23\"/>");
        structure_error("<program/>");
        structure_error("<program language=\"IPPcode24\" version=\"2\"/>");
        assert!(from_xml("<program language=\"IPPcode24\" name=\"demo\"/>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn program_holds_only_instructions() {
        structure_error(&wrap("<label/>\n"));
        structure_error(&wrap("stray\n"));
    }

    #[test]
    fn instruction_attributes_checked() {
        structure_error(&wrap("<instruction opcode=\"BREAK\"/>\n"));
        structure_error(&wrap("<instruction order=\"1\"/>\n"));
        structure_error(&wrap("<instruction order=\"x\" opcode=\"BREAK\"/>\n"));
        structure_error(&wrap("<instruction order=\"-1\" opcode=\"BREAK\"/>\n"));
        structure_error(&wrap("<instruction order=\"1\" opcode=\"BREAK\" x=\"1\"/>\n"));
    }

    #[test]
    fn unknown_opcode_exits_32() {
        let err = structure_error(&wrap("<instruction order=\"1\" opcode=\"FOO\"/>\n"));
        assert_eq!(err.line(), 3);
        assert!(err.to_string().contains("unknown opcode 'FOO'"));
    }

    #[test]
    fn argument_elements_checked() {
        let instr = |args: &str| {
            wrap(&format!(
                "<instruction order=\"1\" opcode=\"MOVE\">{args}</instruction>\n"
            ))
        };
        // Missing arg1.
        structure_error(&instr("<arg2 type=\"int\">1</arg2><arg3 type=\"int\">1</arg3>"));
        // Repeated arg1.
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1><arg1 type=\"int\">1</arg1>"));
        // Wrong count.
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1>"));
        // Unknown element, type, attribute and nested content.
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1><arg4 type=\"int\">1</arg4>"));
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1><arg2 type=\"float\">1</arg2>"));
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1><arg2>1</arg2>"));
        structure_error(&instr("<arg1 type=\"var\" x=\"y\">GF@a</arg1><arg2 type=\"int\">1</arg2>"));
        structure_error(&instr("<arg1 type=\"var\">GF@a</arg1><arg2 type=\"int\"><b/></arg2>"));
    }

    #[test]
    fn orders_and_shapes_left_to_engine() {
        let text = wrap(
            "<instruction order=\"0\" opcode=\"DEFVAR\"><arg1 type=\"int\">5</arg1></instruction>\n\
             <instruction order=\"0\" opcode=\"BREAK\"/>\n",
        );
        let program = from_xml(&text).unwrap();
        assert_eq!(program.len(), 2);
        assert!(!program.instructions[0].is_well_formed());
    }

    #[test]
    fn literal_text_excludes_kind_prefix() {
        let program = Program::new(vec![Instruction::new(
            1,
            Opcode::Write,
            vec![Argument::string("x<y")],
        )]);
        assert!(to_xml(&program).contains("<arg1 type=\"string\">x&lt;y</arg1>"));
    }
}

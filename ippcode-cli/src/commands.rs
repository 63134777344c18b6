//! CLI command implementations.
//!
//! Each command returns `Err(status)` when the process should exit with a
//! non-zero status; diagnostics have already been written to stderr.

use std::fs;
use std::io::{self, BufReader, BufWriter, Write};

use ippcode_assembler::{AsmError, Stat};
use ippcode_common::Program;
use ippcode_vm::{Input, LineInput, Machine, NoInput, RuntimeError, Termination};
use tracing::debug;

use crate::{EXIT_INPUT, EXIT_OUTPUT, EXIT_USAGE};

fn read_text(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        EXIT_INPUT
    })
}

fn asm_failure(path: &str, e: &AsmError) -> i32 {
    eprintln!("error: {path}: {e}");
    e.exit_code()
}

/// Returns true if `text` is an XML document rather than source text.
///
/// Source text starts with the header or a `#` comment, never with `<`.
fn is_xml(text: &str) -> bool {
    text.trim_start_matches('\u{feff}').trim_start().starts_with('<')
}

/// Read a program file, as XML or source text by its content.
fn load(path: &str) -> Result<Program, i32> {
    let text = read_text(path)?;
    let program = if is_xml(&text) {
        debug!(path, "reading XML program");
        ippcode_assembler::from_xml(&text)
    } else {
        ippcode_assembler::assemble(&text)
    };
    program.map_err(|e| asm_failure(path, &e))
}

fn runtime_failure(e: &RuntimeError) -> i32 {
    eprintln!("error: {e}");
    e.exit_code()
}

/// Take the single `<source>` argument of a command.
fn source_arg<'a>(args: &'a [String], command: &str) -> Result<&'a str, i32> {
    match args {
        [source] => Ok(source),
        [] => {
            eprintln!("error: {command} requires a source file");
            eprintln!("Usage: ippi {command} <source>");
            Err(EXIT_USAGE)
        }
        _ => {
            eprintln!("error: unexpected argument '{}'", args[1]);
            eprintln!("Usage: ippi {command} <source>");
            Err(EXIT_USAGE)
        }
    }
}

/// Parse `run`'s arguments: `<source> [--input <file>]`.
fn parse_run_args(args: &[String]) -> Result<(&str, Option<&str>), i32> {
    let usage = || {
        eprintln!("Usage: ippi run <program> [--input <file>]");
        EXIT_USAGE
    };

    let mut source = None;
    let mut input = None;
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--input" => match rest.next() {
                Some(path) if input.is_none() => input = Some(path.as_str()),
                Some(_) => {
                    eprintln!("error: --input given more than once");
                    return Err(usage());
                }
                None => {
                    eprintln!("error: --input requires a file");
                    return Err(usage());
                }
            },
            other if source.is_none() && !other.starts_with("--") => source = Some(other),
            other => {
                eprintln!("error: unexpected argument '{other}'");
                return Err(usage());
            }
        }
    }

    match source {
        Some(source) => Ok((source, input)),
        None => {
            eprintln!("error: run requires a source file");
            Err(usage())
        }
    }
}

/// Load and execute a program.
///
/// Program output goes to stdout. READ takes lines from `--input` when
/// given, else from stdin.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (source, input_path) = parse_run_args(args)?;
    let program = load(source)?;

    let mut input: Box<dyn Input> = match input_path {
        Some(path) => {
            let file = fs::File::open(path).map_err(|e| {
                eprintln!("error: cannot read '{path}': {e}");
                EXIT_INPUT
            })?;
            Box::new(LineInput::new(BufReader::new(file)))
        }
        None => Box::new(LineInput::new(io::stdin().lock())),
    };

    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let result = ippcode_vm::run(&program, input.as_mut(), &mut output);
    // Output written before a failure is still delivered.
    let flushed = output.flush();

    let termination = result.map_err(|e| runtime_failure(&e))?;
    if let Err(e) = flushed {
        eprintln!("error: cannot write output: {e}");
        return Err(ippcode_vm::ErrorKind::Internal.exit_code());
    }

    match termination {
        Termination::Completed | Termination::Exit(0) => Ok(()),
        Termination::Exit(_) => Err(termination.status()),
    }
}

/// One `--stats=<file>` group: the file and the records written to it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatsGroup<'a> {
    path: &'a str,
    records: Vec<Stat>,
}

/// Map a statistics option to its record.
fn stat_option(arg: &str) -> Option<Stat> {
    let stat = match arg {
        "--loc" => Stat::Loc,
        "--comments" => Stat::Comments,
        "--labels" => Stat::Labels,
        "--jumps" => Stat::Jumps,
        "--fwjumps" => Stat::FwJumps,
        "--backjumps" => Stat::BackJumps,
        "--badjumps" => Stat::BadJumps,
        "--frequent" => Stat::Frequent,
        "--eol" => Stat::Eol,
        other => Stat::Print(other.strip_prefix("--print=")?.to_string()),
    };
    Some(stat)
}

/// Parse `parse`'s arguments: `<source> [--stats=<file> <stat>...]...`.
///
/// Every statistics option belongs to the nearest `--stats=` before it.
fn parse_parse_args(args: &[String]) -> Result<(&str, Vec<StatsGroup<'_>>), i32> {
    let usage = || {
        eprintln!("Usage: ippi parse <source> [--stats=<file> <stat>...]...");
        EXIT_USAGE
    };

    let mut source = None;
    let mut groups: Vec<StatsGroup<'_>> = Vec::new();
    for arg in args {
        if let Some(path) = arg.strip_prefix("--stats=") {
            if path.is_empty() {
                eprintln!("error: --stats requires a file");
                return Err(usage());
            }
            if groups.iter().any(|group| group.path == path) {
                eprintln!("error: statistics file '{path}' given more than once");
                return Err(usage());
            }
            groups.push(StatsGroup {
                path,
                records: Vec::new(),
            });
        } else if let Some(stat) = stat_option(arg) {
            match groups.last_mut() {
                Some(group) => group.records.push(stat),
                None => {
                    eprintln!("error: '{arg}' must follow --stats=<file>");
                    return Err(usage());
                }
            }
        } else if source.is_none() && !arg.starts_with("--") {
            source = Some(arg.as_str());
        } else {
            eprintln!("error: unexpected argument '{arg}'");
            return Err(usage());
        }
    }

    match source {
        Some(source) => Ok((source, groups)),
        None => {
            eprintln!("error: parse requires a source file");
            Err(usage())
        }
    }
}

/// Print the program's XML rendering and write any requested statistics.
///
/// Statistics files are written before the XML is printed, so a failed
/// write leaves stdout empty.
pub fn parse(args: &[String]) -> Result<(), i32> {
    let (source, groups) = parse_parse_args(args)?;
    let text = read_text(source)?;
    let (program, stats) =
        ippcode_assembler::assemble_with_stats(&text).map_err(|e| asm_failure(source, &e))?;

    for group in &groups {
        fs::write(group.path, stats.report(&group.records)).map_err(|e| {
            eprintln!("error: cannot write '{}': {e}", group.path);
            EXIT_OUTPUT
        })?;
        debug!(path = group.path, records = group.records.len(), "statistics written");
    }

    print!("{}", ippcode_assembler::to_xml(&program));
    Ok(())
}

/// Load a program the way `run` does, without executing it.
///
/// Orders, operand shapes and labels are all checked.
pub fn check(args: &[String]) -> Result<(), i32> {
    let source = source_arg(args, "check")?;
    let program = load(source)?;

    let mut input = NoInput;
    let mut output = io::sink();
    let machine =
        Machine::new(&program, &mut input, &mut output).map_err(|e| runtime_failure(&e))?;

    println!(
        "OK: {source} ({} instructions, {} labels)",
        program.len(),
        machine.label_count()
    );
    Ok(())
}

/// Print the program as canonical source text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    let source = source_arg(args, "disassemble")?;
    let program = load(source)?;
    print!("{}", ippcode_assembler::disassemble(&program));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn run_args_source_only() {
        let args = strings(&["prog.ippc"]);
        assert_eq!(parse_run_args(&args), Ok(("prog.ippc", None)));
    }

    #[test]
    fn run_args_with_input_either_side() {
        let args = strings(&["prog.ippc", "--input", "in.txt"]);
        assert_eq!(parse_run_args(&args), Ok(("prog.ippc", Some("in.txt"))));
        let args = strings(&["--input", "in.txt", "prog.ippc"]);
        assert_eq!(parse_run_args(&args), Ok(("prog.ippc", Some("in.txt"))));
    }

    #[test]
    fn run_args_errors() {
        assert_eq!(parse_run_args(&[]), Err(EXIT_USAGE));
        assert_eq!(
            parse_run_args(&strings(&["prog.ippc", "--input"])),
            Err(EXIT_USAGE)
        );
        assert_eq!(
            parse_run_args(&strings(&["a.ippc", "b.ippc"])),
            Err(EXIT_USAGE)
        );
        assert_eq!(
            parse_run_args(&strings(&["a.ippc", "--verbose"])),
            Err(EXIT_USAGE)
        );
    }

    #[test]
    fn parse_args_groups_stats_by_file() {
        let args = strings(&[
            "prog.ippc",
            "--stats=a.txt",
            "--loc",
            "--print=x=y",
            "--eol",
            "--stats=b.txt",
            "--frequent",
            "--badjumps",
        ]);
        let (source, groups) = parse_parse_args(&args).unwrap();
        assert_eq!(source, "prog.ippc");
        assert_eq!(
            groups,
            vec![
                StatsGroup {
                    path: "a.txt",
                    records: vec![Stat::Loc, Stat::Print("x=y".to_string()), Stat::Eol],
                },
                StatsGroup {
                    path: "b.txt",
                    records: vec![Stat::Frequent, Stat::BadJumps],
                },
            ]
        );
    }

    #[test]
    fn parse_args_source_after_stats() {
        let args = strings(&["--stats=a.txt", "--jumps", "prog.ippc"]);
        let (source, groups) = parse_parse_args(&args).unwrap();
        assert_eq!(source, "prog.ippc");
        assert_eq!(groups[0].records, vec![Stat::Jumps]);
    }

    #[test]
    fn parse_args_errors() {
        let cases: [&[&str]; 7] = [
            &["prog.ippc", "--loc"],
            &["prog.ippc", "--loc", "--stats=a.txt"],
            &["prog.ippc", "--stats=a.txt", "--stats=a.txt"],
            &["prog.ippc", "--stats="],
            &["prog.ippc", "--stats=a.txt", "--lines"],
            &["--stats=a.txt", "--loc"],
            &["a.ippc", "b.ippc"],
        ];
        for args in cases {
            assert_eq!(parse_parse_args(&strings(args)), Err(EXIT_USAGE), "{args:?}");
        }
    }

    #[test]
    fn xml_detection() {
        assert!(is_xml("<?xml version=\"1.0\"?><program/>"));
        assert!(is_xml("\n  <program language=\"IPPcode24\"/>"));
        assert!(!is_xml(".IPPcode24\n"));
        assert!(!is_xml("# <comment>\n.IPPcode24\n"));
    }

    #[test]
    fn source_arg_requires_exactly_one() {
        assert_eq!(source_arg(&strings(&["x"]), "parse"), Ok("x"));
        assert_eq!(source_arg(&[], "parse"), Err(EXIT_USAGE));
        assert_eq!(source_arg(&strings(&["x", "y"]), "parse"), Err(EXIT_USAGE));
    }
}

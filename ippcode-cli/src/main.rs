//! IPPcode24 CLI: run IPPcode24 programs and inspect their assembled form.
//!
//! Exit codes:
//! - 0-9: Program status (0 when it runs off the end, else its EXIT)
//! - 10: Malformed command line
//! - 11: Unreadable input file
//! - 12: Unwritable statistics file
//! - 21-23: Assembly error (header, opcode, syntax)
//! - 31: Malformed XML program
//! - 32-58, 99: Runtime error, by category

use std::process;

use ippcode_cli::{commands, init_logging, EXIT_USAGE};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(EXIT_USAGE);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "parse" => commands::parse(&args[2..]),
        "check" => commands::check(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: ippi <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <program> [--input <file>]  Execute a source or XML program");
    eprintln!("  parse <source> [--stats=<file> <stat>...]...");
    eprintln!("                                  Print the program as XML");
    eprintln!("  check <program>                 Load a program without running it");
    eprintln!("  disassemble <program>           Print canonical source text");
    eprintln!();
    eprintln!("A program file starting with '<' is read as XML.");
    eprintln!();
    eprintln!("Statistics (each --stats=<file> group is written to its file):");
    eprintln!("  --loc --comments --labels --jumps --fwjumps --backjumps --badjumps");
    eprintln!("  --frequent --print=<text> --eol");
    eprintln!();
    eprintln!("Set IPPI_LOG (e.g. IPPI_LOG=debug) to enable engine logging.");
}

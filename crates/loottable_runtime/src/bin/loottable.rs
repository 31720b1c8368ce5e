//! Loottable CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use loottable_engine::QueryConfig;
use loottable_foundation::{Error, Result};
use loottable_runtime::{Repl, Session, init_logging};

/// CLI configuration parsed from arguments.
#[derive(Debug, Default)]
struct CliConfig {
    table_files: Vec<PathBuf>,
    entity_files: Vec<PathBuf>,
    batch_mode: bool,
    verbose: bool,
    limit: Option<usize>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-v" | "--verbose" => config.verbose = true,
            "-t" | "--tables" => {
                let path = args
                    .next()
                    .ok_or_else(|| Error::usage("--tables requires a file"))?;
                config.table_files.push(PathBuf::from(path));
            }
            "--limit" => {
                let value = args
                    .next()
                    .ok_or_else(|| Error::usage("--limit requires a value"))?;
                let limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::usage(format!("invalid --limit value: {value}")))?;
                config.limit = Some(limit);
            }
            flag if flag.starts_with('-') => {
                return Err(Error::usage(format!("unknown option: {flag}")));
            }
            path => config.entity_files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("loottable {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbose)?;

    let mut session = Session::new();
    for path in config.table_files {
        session.add_table_file(path);
    }
    for path in config.entity_files {
        session.add_entity_file(path);
    }
    let summary = session.reload();

    if config.batch_mode {
        println!(
            "Loaded {} monsters and {} tables with {} warnings.",
            summary.entities, summary.tables, summary.diagnostics
        );
        for path in &summary.skipped {
            println!("  skipped {}", path.display());
        }
        for diagnostic in session.snapshot().diagnostics() {
            println!("  {diagnostic}");
        }
        return Ok(());
    }

    let mut query_config = QueryConfig::default();
    if let Some(limit) = config.limit {
        query_config = query_config.with_limit(limit);
    }

    let mut repl = Repl::new(session)?.with_query_config(query_config);
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mLoottable\x1b[0m - Loot drop tables compiled from game scripts

\x1b[1mUSAGE:\x1b[0m
    loottable [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Monster scripts; each file's name up to the first `.` names the monster

\x1b[1mOPTIONS:\x1b[0m
    -t, --tables FILE   Shared drop tables file (repeatable)
    -b, --batch         Load, report warnings, and exit (no REPL)
    -v, --verbose       Debug logging (RUST_LOG overrides)
        --limit N       Fuzzy matches to consider per query (default 5)
    -h, --help          Print help information
    -V, --version       Print version information

\x1b[1mEXAMPLES:\x1b[0m
    loottable -t shared.rs2 npc/*.rs2        Load tables and monsters, then start REPL
    loottable -b -t shared.rs2 goblin.rs2    Check scripts and exit

\x1b[1mREPL COMMANDS:\x1b[0m
    monster <name>   (1)  Drops of a monster, nested tables expanded
    item <name>      (2)  Monsters that drop an item
    table <name>          Contents of a shared table
    reload                Re-read every file
    warnings              Diagnostics from the last load
    quit             (3)  Exit (or Ctrl+D)"
    );
}

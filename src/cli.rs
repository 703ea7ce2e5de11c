//! CLI argument parsing for Meridian
//!
//! Defines the Command enum and parse_args() for all CLI commands.

use anyhow::Result;
use meridian::{Ecosystem, OutputFormat, ScanConfig};
use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("Meridian - Structural inspector for .NET and Maven source trees");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  meridian <command> [arguments]");
    eprintln!("  meridian [scan arguments]");
    eprintln!("  meridian --help");
    eprintln!("  meridian --version");
    eprintln!();
    eprintln!("  meridian scan [--dir <DIR>] [--out <PATH>] [--ecosystem dotnet|maven|all] [--exclude <GLOB>]... [--compact] [--sequential] [--output human|json]");
    eprintln!("  meridian inspect --file <PATH> [--output human|json]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  scan      Scan a tree and write a JSON report (default)");
    eprintln!("  inspect   Print the declarations extracted from one source file");
    eprintln!();
    eprintln!("Scan arguments:");
    eprintln!("  --dir, --root <DIR>   Application root directory (default: current directory)");
    eprintln!("  --out <PATH>          Report path (default: appinfo_YYYYMMDDHHMMSS.json)");
    eprintln!("  --ecosystem <NAME>    dotnet, maven or all (default: all)");
    eprintln!("  --exclude <GLOB>      Skip sources matching GLOB, relative to each project (repeatable)");
    eprintln!("  --compact             Write compact JSON instead of pretty-printed");
    eprintln!("  --sequential          Extract files on one thread");
    eprintln!("  --output <FORMAT>     human (default) or json (also print the report on stdout)");
    eprintln!();
    eprintln!("Inspect arguments:");
    eprintln!("  --file <PATH>         .cs or .java file to extract");
    eprintln!("  --output <FORMAT>     human (default) or json");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  MERIDIAN_LOG / RUST_LOG   tracing filter, e.g. MERIDIAN_LOG=debug (default: warn)");
}

pub enum Command {
    Scan {
        config: ScanConfig,
        out: Option<PathBuf>,
        compact: bool,
        output_format: OutputFormat,
    },
    Inspect {
        file: PathBuf,
        output_format: OutputFormat,
    },
    Help,
    Version,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("{} requires an argument", flag))
}

fn parse_output_format(raw: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(raw)
        .ok_or_else(|| anyhow::anyhow!("Invalid output format: {}. Must be human or json", raw))
}

fn parse_ecosystems(raw: &str) -> Result<Vec<Ecosystem>> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(Ecosystem::ALL.to_vec());
    }
    Ecosystem::from_str(raw)
        .map(|eco| vec![eco])
        .ok_or_else(|| anyhow::anyhow!("Invalid ecosystem: {}. Must be dotnet, maven or all", raw))
}

fn parse_scan(args: &[String]) -> Result<Command> {
    let mut config = ScanConfig::default();
    let mut out: Option<PathBuf> = None;
    let mut compact = false;
    let mut output_format = OutputFormat::Human;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "--root" => {
                config.root = PathBuf::from(value(args, i, &args[i])?);
                i += 2;
            }
            "--out" => {
                out = Some(PathBuf::from(value(args, i, "--out")?));
                i += 2;
            }
            "--ecosystem" => {
                config.ecosystems = parse_ecosystems(value(args, i, "--ecosystem")?)?;
                i += 2;
            }
            "--exclude" => {
                config
                    .exclude_patterns
                    .push(value(args, i, "--exclude")?.to_string());
                i += 2;
            }
            "--compact" => {
                compact = true;
                i += 1;
            }
            "--sequential" => {
                config.parallel = false;
                i += 1;
            }
            "--output" => {
                output_format = parse_output_format(value(args, i, "--output")?)?;
                i += 2;
            }
            _ => {
                return Err(anyhow::anyhow!("Unknown argument: {}", args[i]));
            }
        }
    }

    Ok(Command::Scan {
        config,
        out,
        compact,
        output_format,
    })
}

fn parse_inspect(args: &[String]) -> Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut output_format = OutputFormat::Human;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--file" => {
                file = Some(PathBuf::from(value(args, i, "--file")?));
                i += 2;
            }
            "--output" => {
                output_format = parse_output_format(value(args, i, "--output")?)?;
                i += 2;
            }
            _ => {
                return Err(anyhow::anyhow!("Unknown argument: {}", args[i]));
            }
        }
    }

    let file = file.ok_or_else(|| anyhow::anyhow!("--file is required"))?;
    Ok(Command::Inspect {
        file,
        output_format,
    })
}

/// Parse arguments, `args[0]` being the program name.
///
/// No arguments at all, or flags without a command, mean `scan`.
pub fn parse_args_from(args: &[String]) -> Result<Command> {
    let Some(command) = args.get(1) else {
        return parse_scan(&[]);
    };

    match command.as_str() {
        "--version" | "-V" => Ok(Command::Version),
        "--help" | "-h" | "help" => Ok(Command::Help),
        "scan" => parse_scan(&args[2..]),
        "inspect" => parse_inspect(&args[2..]),
        flag if flag.starts_with("--") => parse_scan(&args[1..]),
        _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
    }
}

pub fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

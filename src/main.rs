//! Meridian CLI - structural inspector for multi-project source trees
//!
//! Usage: meridian <command> [arguments]

mod cli;
mod inspect_cmd;
mod scan_cmd;

use cli::{parse_args, print_usage, Command};
use meridian::ScanError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `MERIDIAN_LOG`, then `RUST_LOG`, default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("MERIDIAN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Exit code for a failed command: 2 when the root is missing, else 1.
fn failure_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ScanError>() {
        Some(ScanError::RootNotFound(_)) => ExitCode::from(2),
        _ => ExitCode::from(1),
    }
}

fn main() -> ExitCode {
    init_logging();

    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::from(1);
        }
    };

    let result = match command {
        Command::Help => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("{}", meridian::version::version());
            return ExitCode::SUCCESS;
        }
        Command::Scan {
            config,
            out,
            compact,
            output_format,
        } => scan_cmd::run_scan_cmd(config, out, compact, output_format),
        Command::Inspect {
            file,
            output_format,
        } => inspect_cmd::run_inspect(file, output_format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            failure_code(&e)
        }
    }
}

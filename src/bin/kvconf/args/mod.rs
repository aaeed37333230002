//! HexView-style command line for inspecting and editing configuration files.
//!
//! Options take a `/` or `-` prefix and a `:` or `=` value separator and
//! are matched case-insensitively.
//!
//! Processing order:
//! 1. Read input file with the /D, /C and /EOF tokens
//! 2. Remove keys (/R)
//! 3. Add entries (/A)
//! 4. Key check (/K)
//! 5. Value lookup (/G, /T)
//! 6. Export (-o, or stdout when nothing else was requested)

mod error;
mod execute;
mod io;
mod parse;
mod parse_util;
mod types;

use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use error::CliError;
pub use types::Args;

pub fn run() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match args.execute() {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.stdout.as_bytes()) {
                if !args.silent {
                    eprintln!("Error: {e}");
                }
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "execution failed");
            if !args.silent {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the level picked by /V.
fn init_logging(verbose: bool) -> Result<(), CliError> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| CliError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Logger(format!("failed to set subscriber: {e}")))
}

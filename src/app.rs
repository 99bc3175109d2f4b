// src/app.rs
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use newline_compact_core::{ReplaceReport, compact_file};

use crate::cli::Args;
use crate::config::Config;
use crate::logging;

/// Exit status for any failure other than bad usage.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for a wrong number of arguments.
pub const EXIT_USAGE: u8 = 2;

/// Compacts the configured target in place.
///
/// # Errors
///
/// Any failure of the durable replace.
pub fn run(config: &Config) -> Result<ReplaceReport> {
    let report = compact_file(&config.target)?;
    if !report.backup_removed {
        tracing::warn!(
            backup = %report.paths.backup().display(),
            "compaction succeeded but the backup could not be deleted"
        );
    }
    Ok(report)
}

/// Entry point used by `main`: parses arguments, sets up logging, runs, and
/// maps the outcome to an exit status.
pub fn main_with_args<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::from(EXIT_USAGE) } else { ExitCode::SUCCESS };
        }
    };
    let config = Config::from_args(args);

    if let Err(err) = logging::init(&config.log) {
        eprintln!("newline_compact: {err}");
    }

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("newline_compact: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

// src/config.rs
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::cli::Args;

pub const LOG_ENV: &str = "NEWLINE_COMPACT_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for one run, derived from CLI arguments and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: PathBuf,
    pub log: LogSettings,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Self { target: args.path, log: LogSettings::from_env() }
    }
}

/// How diagnostics are logged to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), ansi: false }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
            std::io::stderr().is_terminal(),
        )
    }

    /// The tool's own variable wins over `RUST_LOG`; blank values are
    /// ignored.
    pub fn from_vars(own: Option<String>, rust_log: Option<String>, ansi: bool) -> Self {
        let filter = [own, rust_log]
            .into_iter()
            .flatten()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { filter, ansi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_warn() {
        assert_eq!(LogSettings::from_vars(None, None, false).filter, "warn");
        assert_eq!(LogSettings::default().filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn own_variable_takes_precedence() {
        let settings =
            LogSettings::from_vars(Some("debug".into()), Some("error".into()), true);
        assert_eq!(settings.filter, "debug");
        assert!(settings.ansi);
    }

    #[test]
    fn blank_values_fall_through() {
        let settings = LogSettings::from_vars(Some("  ".into()), Some("info".into()), false);
        assert_eq!(settings.filter, "info");
    }

    #[test]
    fn config_takes_target_from_args() {
        let config = Config::from_args(Args { path: PathBuf::from("a.txt") });
        assert_eq!(config.target, PathBuf::from("a.txt"));
    }
}

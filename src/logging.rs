// src/logging.rs
use newline_compact_core::error::PresentationError;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, LogSettings};

/// Installs the global stderr subscriber.
///
/// An unparsable filter falls back to the default and is reported once the
/// subscriber is up.
///
/// # Errors
///
/// [`PresentationError::LoggingInit`] if a global subscriber is already set.
pub fn init(settings: &LogSettings) -> Result<(), PresentationError> {
    let (filter, rejected) = match EnvFilter::try_new(&settings.filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(settings.ansi)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| PresentationError::LoggingInit(e.to_string()))?;

    if let Some(err) = rejected {
        tracing::warn!(filter = %settings.filter, error = %err, "ignoring invalid log filter");
    }
    Ok(())
}

// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NewlineCompactError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<NewlineCompactError>,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

pub type Result<T> = std::result::Result<T, NewlineCompactError>;

impl NewlineCompactError {
    /// The replace failure at the bottom of any context chain, if there is one.
    pub fn application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Context { source, .. } => source.application(),
            Self::Application(err) => Some(err),
            _ => None,
        }
    }
}

/// Domain-layer specific errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("out of memory while building {what}")]
    ResourceExhausted {
        what: &'static str,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("invalid replace transition: step {step} is not allowed from state {from}")]
    InvalidTransition { from: &'static str, step: u8 },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Failures of the durable replace sequence.
///
/// Every variant except the finalize pair guarantees the original file is
/// still present and unmodified at its own path.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("cannot open input file '{path}': {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create temporary file '{path}': {source}")]
    CreateTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while writing temporary file '{path}': {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot back up original file to '{backup}': {source}")]
    Backup {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot move temporary file over '{path}': {source} (original restored)")]
    FinalizeRolledBack {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The original content is no longer reachable under its own name.
    #[error(
        "cannot move temporary file over '{path}': {source}; restoring the original also failed: {rollback}; original content is kept at '{backup}'"
    )]
    FinalizeRollbackFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
        rollback: std::io::Error,
    },
}

impl ApplicationError {
    /// Whether the original file still sits, unmodified, at its own path.
    pub const fn original_intact(&self) -> bool {
        !matches!(self, Self::FinalizeRollbackFailed { .. })
    }
}

/// Presentation-layer errors.
#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("Logging initialisation failed: {0}")]
    LoggingInit(String),
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<NewlineCompactError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| NewlineCompactError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| NewlineCompactError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}

//! Re-export error types from the shared kernel crate.

pub use newline_compact_shared_kernel::{
    ApplicationError, DomainError, DomainResult, ErrorContext, NewlineCompactError,
    PresentationError, Result,
};

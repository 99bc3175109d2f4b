use std::path::Path;

use newline_compact_infra::StdFileSystem;
use newline_compact_ports::ReplaceFileSystem;
use newline_compact_usecase::{DurableReplace, ReplaceReport, ReplaceRun};
use tracing::instrument;

use crate::error::{ErrorContext, Result};

/// Compacts the file at `path` in place, using the local filesystem.
///
/// # Errors
///
/// See [`compact_file_with`].
pub fn compact_file(path: &Path) -> Result<ReplaceReport> {
    compact_file_with(&StdFileSystem, path)
}

/// Compacts the file at `path` in place through `fs`.
///
/// # Errors
///
/// Any failure of the durable replace, wrapped with the target path. The
/// original file is intact unless the error's application part reports
/// otherwise (see [`crate::error::ApplicationError::original_intact`]).
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn compact_file_with(fs: &dyn ReplaceFileSystem, path: &Path) -> Result<ReplaceReport> {
    DurableReplace::new(fs)
        .run(path)
        .with_context(|| format!("cannot compact '{}'", path.display()))
}

/// Runs the replace through `fs` and returns the state trace alongside the
/// result, without adding context.
pub fn trace_compact_file(fs: &dyn ReplaceFileSystem, path: &Path) -> ReplaceRun {
    DurableReplace::new(fs).execute(path)
}

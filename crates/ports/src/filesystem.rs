// crates/ports/src/filesystem.rs
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Buffered, binary read handle on the source file.
pub type SourceReader = Box<dyn BufRead>;

/// Write handle on the temporary file.
///
/// Implementations buffer writes. Dropping a sink without calling
/// [`TempSink::finish`] closes it without any durability guarantee.
pub trait TempSink: Write {
    /// Flushes buffered bytes and makes them durable, surfacing any error
    /// that a plain close would swallow. Consumes the sink; the handle is
    /// closed when this returns.
    ///
    /// # Errors
    ///
    /// Returns the flush or sync error.
    fn finish(self: Box<Self>) -> io::Result<()>;
}

/// Port for the filesystem side effects of a durable replace.
///
/// All operations are binary: no newline translation is applied.
pub trait ReplaceFileSystem {
    /// Opens an existing file for reading.
    fn open_source(&self, path: &Path) -> io::Result<SourceReader>;

    /// Creates `path` for writing, truncating it if it exists.
    fn create_temp(&self, path: &Path) -> io::Result<Box<dyn TempSink>>;

    /// Removes a file. `NotFound` is reported like any other error; callers
    /// decide whether it matters.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Renames `from` to `to`, replacing `to` if the platform allows it.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

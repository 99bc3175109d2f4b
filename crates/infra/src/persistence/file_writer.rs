use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use newline_compact_ports::TempSink;

/// Helper utilities for writing files.
pub struct FileWriter;

impl FileWriter {
    /// Create (or truncate) `path` and wrap it in a buffered writer.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())
            .map(BufWriter::new)
    }

    /// Best-effort fsync of the directory holding `path`, so a rename inside
    /// it survives a crash. A no-op off Unix.
    pub fn sync_parent_dir(path: &Path) {
        #[cfg(unix)]
        {
            let parent = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        #[cfg(not(unix))]
        let _ = path;
    }
}

/// Buffered file whose contents are flushed and synced before it counts as
/// written.
#[derive(Debug)]
pub struct DurableFile {
    inner: BufWriter<File>,
}

impl DurableFile {
    pub fn create(path: &Path) -> io::Result<Self> {
        FileWriter::create(path).map(|inner| Self { inner })
    }
}

impl Write for DurableFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl TempSink for DurableFile {
    fn finish(self: Box<Self>) -> io::Result<()> {
        let file = self.inner.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()
    }
}

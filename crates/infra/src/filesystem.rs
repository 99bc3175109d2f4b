// crates/infra/src/filesystem.rs
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use newline_compact_ports::{ReplaceFileSystem, SourceReader, TempSink};
use tracing::trace;

use crate::persistence::{DurableFile, FileWriter};

/// [`ReplaceFileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl StdFileSystem {
    pub const fn new() -> Self {
        Self
    }
}

impl ReplaceFileSystem for StdFileSystem {
    fn open_source(&self, path: &Path) -> io::Result<SourceReader> {
        trace!(path = %path.display(), "open");
        let file = File::open(path)?;
        // Directories open fine on Unix and only fail on first read.
        if file.metadata()?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"));
        }
        Ok(Box::new(BufReader::new(file)))
    }

    fn create_temp(&self, path: &Path) -> io::Result<Box<dyn TempSink>> {
        trace!(path = %path.display(), "create");
        Ok(Box::new(DurableFile::create(path)?))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        trace!(path = %path.display(), "remove");
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        trace!(from = %from.display(), to = %to.display(), "rename");
        fs::rename(from, to)?;
        FileWriter::sync_parent_dir(to);
        Ok(())
    }
}

// crates/shared-kernel/src/value_objects/artifact_paths.rs
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{DomainError, DomainResult};

pub const TEMP_SUFFIX: &str = ".tmp";
pub const BACKUP_SUFFIX: &str = ".bak";

/// The three paths a durable replace touches.
///
/// Sibling paths are the target path with a literal suffix appended, so
/// `notes.txt` yields `notes.txt.tmp` and `notes.txt.bak`. They always live
/// in the target's directory, which keeps the final rename on one filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    target: PathBuf,
    temp: PathBuf,
    backup: PathBuf,
}

impl ArtifactPaths {
    /// Derive the temporary and backup siblings of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ResourceExhausted`] when the path buffers
    /// cannot be allocated.
    pub fn for_target(target: &Path) -> DomainResult<Self> {
        Ok(Self {
            target: copy_path(target)?,
            temp: with_suffix(target, TEMP_SUFFIX)?,
            backup: with_suffix(target, BACKUP_SUFFIX)?,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn temp(&self) -> &Path {
        &self.temp
    }

    pub fn backup(&self) -> &Path {
        &self.backup
    }
}

fn copy_path(path: &Path) -> DomainResult<PathBuf> {
    let mut buf = OsString::new();
    buf.try_reserve_exact(path.as_os_str().len())
        .map_err(|source| DomainError::ResourceExhausted { what: "target path", source })?;
    buf.push(path.as_os_str());
    Ok(PathBuf::from(buf))
}

fn with_suffix(path: &Path, suffix: &'static str) -> DomainResult<PathBuf> {
    let base = path.as_os_str();
    let suffix = OsStr::new(suffix);
    let mut buf = OsString::new();
    buf.try_reserve_exact(base.len() + suffix.len())
        .map_err(|source| DomainError::ResourceExhausted { what: "sibling path", source })?;
    buf.push(base);
    buf.push(suffix);
    Ok(PathBuf::from(buf))
}

//! Filesystem adapter that fails on demand.
//!
//! Wraps another [`ReplaceFileSystem`] and injects errors at the operations
//! named in a [`FaultPlan`], recording every call so tests can check the
//! order of side effects.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use newline_compact_ports::{ReplaceFileSystem, SourceReader, TempSink};

use crate::filesystem::StdFileSystem;

/// Which operations fail.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    open_source: bool,
    create_temp: bool,
    write_budget: Option<u64>,
    finish: bool,
    rename_from: Vec<PathBuf>,
    remove: Vec<PathBuf>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fail_open_source(mut self) -> Self {
        self.open_source = true;
        self
    }

    #[must_use]
    pub fn fail_create_temp(mut self) -> Self {
        self.create_temp = true;
        self
    }

    /// The temp file accepts `bytes` bytes, then reports a full disk.
    #[must_use]
    pub fn fail_write_after(mut self, bytes: u64) -> Self {
        self.write_budget = Some(bytes);
        self
    }

    #[must_use]
    pub fn fail_finish(mut self) -> Self {
        self.finish = true;
        self
    }

    #[must_use]
    pub fn fail_rename_from(mut self, path: impl Into<PathBuf>) -> Self {
        self.rename_from.push(path.into());
        self
    }

    #[must_use]
    pub fn fail_remove(mut self, path: impl Into<PathBuf>) -> Self {
        self.remove.push(path.into());
        self
    }
}

/// One call made through a [`FaultyFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    OpenSource(PathBuf),
    CreateTemp(PathBuf),
    Remove(PathBuf),
    Rename(PathBuf, PathBuf),
}

#[derive(Debug, Default)]
pub struct FaultyFileSystem<F = StdFileSystem> {
    inner: F,
    plan: FaultPlan,
    calls: RefCell<Vec<FsCall>>,
}

impl FaultyFileSystem<StdFileSystem> {
    pub fn new(plan: FaultPlan) -> Self {
        Self::wrap(StdFileSystem, plan)
    }
}

impl<F: ReplaceFileSystem> FaultyFileSystem<F> {
    pub fn wrap(inner: F, plan: FaultPlan) -> Self {
        Self { inner, plan, calls: RefCell::new(Vec::new()) }
    }

    /// Calls made so far, failed ones included.
    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: FsCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("injected failure: {what}"))
}

impl<F: ReplaceFileSystem> ReplaceFileSystem for FaultyFileSystem<F> {
    fn open_source(&self, path: &Path) -> io::Result<SourceReader> {
        self.log(FsCall::OpenSource(path.to_path_buf()));
        if self.plan.open_source {
            return Err(injected("open source"));
        }
        self.inner.open_source(path)
    }

    fn create_temp(&self, path: &Path) -> io::Result<Box<dyn TempSink>> {
        self.log(FsCall::CreateTemp(path.to_path_buf()));
        if self.plan.create_temp {
            return Err(injected("create temp"));
        }
        let inner = self.inner.create_temp(path)?;
        Ok(Box::new(FaultySink {
            inner,
            budget: self.plan.write_budget,
            fail_finish: self.plan.finish,
        }))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.log(FsCall::Remove(path.to_path_buf()));
        if self.plan.remove.iter().any(|p| p == path) {
            return Err(injected("remove"));
        }
        self.inner.remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.log(FsCall::Rename(from.to_path_buf(), to.to_path_buf()));
        if self.plan.rename_from.iter().any(|p| p == from) {
            return Err(injected("rename"));
        }
        self.inner.rename(from, to)
    }
}

struct FaultySink {
    inner: Box<dyn TempSink>,
    budget: Option<u64>,
    fail_finish: bool,
}

impl Write for FaultySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let allowed = match self.budget {
            Some(0) => {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "injected failure: disk full"));
            }
            Some(left) => buf.len().min(usize::try_from(left).unwrap_or(usize::MAX)),
            None => buf.len(),
        };
        let written = self.inner.write(&buf[..allowed])?;
        if let Some(left) = self.budget.as_mut() {
            *left -= written as u64;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl TempSink for FaultySink {
    fn finish(self: Box<Self>) -> io::Result<()> {
        if self.fail_finish {
            return Err(io::Error::other("injected failure: sync"));
        }
        self.inner.finish()
    }
}

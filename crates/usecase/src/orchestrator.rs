use std::io;
use std::path::Path;

use newline_compact_domain::{ReplaceMachine, ReplaceStep, StepOutcome, compact_stream};
use newline_compact_ports::{ReplaceFileSystem, SourceReader, TempSink};
use newline_compact_shared_kernel::{ApplicationError, ArtifactPaths, CompactStats, Result};
use tracing::{debug, info, warn};

use crate::dto::{ReplaceReport, ReplaceRun};

/// Replaces a file with its compacted form without ever exposing a partial
/// write under the file's name.
///
/// The original is never modified in place. The compacted bytes go to
/// `<path>.tmp`; the original is renamed to `<path>.bak`; the temporary file
/// is renamed to `<path>`; the backup is deleted. A failure before the last
/// rename leaves the original untouched, and a failure of the last rename
/// moves the backup back.
///
/// Exclusive access to `<path>` and its siblings is assumed. There is no
/// locking; concurrent runs on the same path race.
pub struct DurableReplace<'a> {
    fs: &'a dyn ReplaceFileSystem,
}

impl<'a> DurableReplace<'a> {
    pub fn new(fs: &'a dyn ReplaceFileSystem) -> Self {
        Self { fs }
    }

    /// # Errors
    ///
    /// Returns the first fatal step failure as an [`ApplicationError`], or a
    /// domain error if the sibling paths cannot be built.
    pub fn run(&self, target: &Path) -> Result<ReplaceReport> {
        self.execute(target).result
    }

    /// Like [`run`](Self::run) but also returns the states entered.
    pub fn execute(&self, target: &Path) -> ReplaceRun {
        let mut machine = ReplaceMachine::new();
        let result = match ArtifactPaths::for_target(target) {
            Ok(paths) => Attempt { fs: self.fs, paths: &paths, machine: &mut machine }.run(),
            Err(err) => Err(err.into()),
        };
        match &result {
            Ok(report) if report.stats.is_unchanged() => {
                debug!(path = %target.display(), "nothing to collapse; content rewritten as is");
            }
            Ok(report) => info!(
                path = %target.display(),
                bytes_read = report.stats.bytes_read.value(),
                bytes_written = report.stats.bytes_written.value(),
                bytes_removed = report.stats.bytes_removed(),
                runs_collapsed = report.stats.runs_collapsed.value(),
                "compacted"
            ),
            Err(err) => debug!(
                path = %target.display(),
                state = %machine.state(),
                error = %err,
                "replace failed"
            ),
        }
        ReplaceRun { result, trace: machine.trace().to_vec() }
    }
}

/// One pass through the step table for a single target.
struct Attempt<'r> {
    fs: &'r dyn ReplaceFileSystem,
    paths: &'r ArtifactPaths,
    machine: &'r mut ReplaceMachine,
}

impl Attempt<'_> {
    fn run(mut self) -> Result<ReplaceReport> {
        let paths = self.paths;
        let reader = self.open_source()?;
        let removed_stale_temp = self.remove_stale(ReplaceStep::RemoveStaleTemp, paths.temp())?;
        let staged = self.create_temp(reader)?;
        let (staged, stats) = self.write_temp(staged)?;
        self.close_handles(staged)?;
        let removed_stale_backup =
            self.remove_stale(ReplaceStep::RemoveStaleBackup, paths.backup())?;
        self.backup_source()?;
        self.finalize()?;
        let backup_removed = self.remove_backup()?;

        Ok(ReplaceReport {
            paths: paths.clone(),
            stats,
            removed_stale_temp,
            removed_stale_backup,
            backup_removed,
        })
    }

    fn record(&mut self, step: ReplaceStep, outcome: StepOutcome) -> Result<()> {
        let state = self.machine.record(step, outcome)?;
        debug!(step = step.number(), action = step.description(), ?outcome, %state, "replace step");
        Ok(())
    }

    fn succeeded(&mut self, step: ReplaceStep) -> Result<()> {
        self.record(step, StepOutcome::Succeeded)
    }

    /// Applies the failure policy of `step` and records its outcome. Open
    /// handles must already be closed. Returns the result of moving the
    /// backup back when the policy asks for it.
    fn recover(&mut self, step: ReplaceStep) -> Result<Option<io::Result<()>>> {
        let policy = step.failure_policy();
        let rollback = policy
            .restores_backup()
            .then(|| self.fs.rename(self.paths.backup(), self.paths.target()));
        if policy.removes_temp() {
            self.discard_temp();
        }
        let outcome = match rollback {
            Some(Ok(())) => StepOutcome::RolledBack,
            _ => StepOutcome::Failed,
        };
        self.record(step, outcome)?;
        Ok(rollback)
    }

    // Step 1.
    fn open_source(&mut self) -> Result<SourceReader> {
        match self.fs.open_source(self.paths.target()) {
            Ok(reader) => {
                self.succeeded(ReplaceStep::OpenSource)?;
                Ok(reader)
            }
            Err(source) => {
                self.recover(ReplaceStep::OpenSource)?;
                Err(ApplicationError::OpenSource { path: self.paths.target().to_path_buf(), source }
                    .into())
            }
        }
    }

    // Steps 2 and 6. Returns whether a leftover file was deleted.
    fn remove_stale(&mut self, step: ReplaceStep, path: &Path) -> Result<bool> {
        match self.fs.remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "removed leftover from an earlier run");
                self.succeeded(step)?;
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.succeeded(step)?;
                Ok(false)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "could not delete leftover; continuing"
                );
                self.recover(step)?;
                Ok(false)
            }
        }
    }

    // Step 3.
    fn create_temp(&mut self, reader: SourceReader) -> Result<Staged> {
        match self.fs.create_temp(self.paths.temp()) {
            Ok(sink) => {
                self.succeeded(ReplaceStep::CreateTemp)?;
                Ok(Staged { reader, sink })
            }
            Err(source) => {
                drop(reader);
                self.recover(ReplaceStep::CreateTemp)?;
                Err(ApplicationError::CreateTemp { path: self.paths.temp().to_path_buf(), source }
                    .into())
            }
        }
    }

    // Step 4.
    fn write_temp(&mut self, staged: Staged) -> Result<(Staged, CompactStats)> {
        let Staged { mut reader, mut sink } = staged;
        match compact_stream(&mut reader, &mut sink) {
            Ok(stats) => {
                self.succeeded(ReplaceStep::Transform)?;
                Ok((Staged { reader, sink }, stats))
            }
            Err(source) => {
                drop(reader);
                drop(sink);
                self.recover(ReplaceStep::Transform)?;
                Err(ApplicationError::Transform { path: self.paths.temp().to_path_buf(), source }
                    .into())
            }
        }
    }

    // Step 5. Both handles are closed before any rename.
    fn close_handles(&mut self, staged: Staged) -> Result<()> {
        let Staged { reader, sink } = staged;
        drop(reader);
        match sink.finish() {
            Ok(()) => self.succeeded(ReplaceStep::CloseHandles),
            Err(source) => {
                self.recover(ReplaceStep::CloseHandles)?;
                Err(ApplicationError::Transform { path: self.paths.temp().to_path_buf(), source }
                    .into())
            }
        }
    }

    // Step 7.
    fn backup_source(&mut self) -> Result<()> {
        match self.fs.rename(self.paths.target(), self.paths.backup()) {
            Ok(()) => self.succeeded(ReplaceStep::BackupSource),
            Err(source) => {
                self.recover(ReplaceStep::BackupSource)?;
                Err(ApplicationError::Backup { backup: self.paths.backup().to_path_buf(), source }
                    .into())
            }
        }
    }

    // Step 8.
    fn finalize(&mut self) -> Result<()> {
        let Err(source) = self.fs.rename(self.paths.temp(), self.paths.target()) else {
            return self.succeeded(ReplaceStep::Finalize);
        };
        warn!(
            path = %self.paths.target().display(),
            error = %source,
            "final rename failed; restoring original from backup"
        );
        let path = self.paths.target().to_path_buf();
        let rollback = match self.recover(ReplaceStep::Finalize)? {
            Some(Ok(())) => {
                return Err(ApplicationError::FinalizeRolledBack { path, source }.into());
            }
            Some(Err(rollback)) => rollback,
            None => io::Error::other("backup was not moved back"),
        };
        Err(ApplicationError::FinalizeRollbackFailed {
            path,
            backup: self.paths.backup().to_path_buf(),
            source,
            rollback,
        }
        .into())
    }

    // Step 9. Failure only leaves a stray `.bak`.
    fn remove_backup(&mut self) -> Result<bool> {
        match self.fs.remove_file(self.paths.backup()) {
            Ok(()) => {
                self.succeeded(ReplaceStep::RemoveBackup)?;
                Ok(true)
            }
            Err(err) => {
                let path = self.paths.backup().display();
                warn!(path = %path, error = %err, "could not delete backup");
                self.recover(ReplaceStep::RemoveBackup)?;
                Ok(false)
            }
        }
    }

    fn discard_temp(&self) {
        if let Err(err) = self.fs.remove_file(self.paths.temp()) {
            if err.kind() != io::ErrorKind::NotFound {
                let path = self.paths.temp().display();
                warn!(path = %path, error = %err, "could not delete temporary file");
            }
        }
    }
}

struct Staged {
    reader: SourceReader,
    sink: Box<dyn TempSink>,
}

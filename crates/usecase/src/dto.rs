use newline_compact_domain::ReplaceState;
use newline_compact_shared_kernel::{ArtifactPaths, CompactStats, Result};

/// Outcome of a successful durable replace.
#[derive(Debug, Clone)]
pub struct ReplaceReport {
    pub paths: ArtifactPaths,
    pub stats: CompactStats,
    /// A `.tmp` left by an earlier run was deleted.
    pub removed_stale_temp: bool,
    /// A `.bak` left by an earlier run was deleted.
    pub removed_stale_backup: bool,
    /// The backup from this run was deleted. When false the replace still
    /// succeeded and the `.bak` sibling is left on disk.
    pub backup_removed: bool,
}

/// Result of a replace together with the states it went through.
#[derive(Debug)]
pub struct ReplaceRun {
    pub result: Result<ReplaceReport>,
    pub trace: Vec<ReplaceState>,
}

impl ReplaceRun {
    pub fn final_state(&self) -> Option<ReplaceState> {
        self.trace.last().copied()
    }
}

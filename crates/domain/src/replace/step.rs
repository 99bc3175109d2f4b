use super::state::ReplaceState;

/// The nine steps of a durable replace, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceStep {
    OpenSource = 1,
    RemoveStaleTemp = 2,
    CreateTemp = 3,
    Transform = 4,
    CloseHandles = 5,
    RemoveStaleBackup = 6,
    BackupSource = 7,
    Finalize = 8,
    RemoveBackup = 9,
}

/// What the orchestrator does when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and carry on.
    Ignore,
    /// Stop; nothing was created yet.
    Abort,
    /// Delete the temporary file, then stop.
    DiscardTemp,
    /// Move the backup back over the target, delete the temporary file,
    /// then stop.
    RollbackAndDiscardTemp,
}

impl FailurePolicy {
    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Ignore)
    }

    pub const fn removes_temp(self) -> bool {
        matches!(self, Self::DiscardTemp | Self::RollbackAndDiscardTemp)
    }

    pub const fn restores_backup(self) -> bool {
        matches!(self, Self::RollbackAndDiscardTemp)
    }
}

impl ReplaceStep {
    pub const ALL: [Self; 9] = [
        Self::OpenSource,
        Self::RemoveStaleTemp,
        Self::CreateTemp,
        Self::Transform,
        Self::CloseHandles,
        Self::RemoveStaleBackup,
        Self::BackupSource,
        Self::Finalize,
        Self::RemoveBackup,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::OpenSource => Some(Self::RemoveStaleTemp),
            Self::RemoveStaleTemp => Some(Self::CreateTemp),
            Self::CreateTemp => Some(Self::Transform),
            Self::Transform => Some(Self::CloseHandles),
            Self::CloseHandles => Some(Self::RemoveStaleBackup),
            Self::RemoveStaleBackup => Some(Self::BackupSource),
            Self::BackupSource => Some(Self::Finalize),
            Self::Finalize => Some(Self::RemoveBackup),
            Self::RemoveBackup => None,
        }
    }

    /// The state the replace is in while this step runs.
    pub const fn state(self) -> ReplaceState {
        match self {
            Self::OpenSource => ReplaceState::Reading,
            Self::RemoveStaleTemp | Self::CreateTemp | Self::Transform | Self::CloseHandles => {
                ReplaceState::WritingTemp
            }
            Self::RemoveStaleBackup | Self::BackupSource => ReplaceState::BackingUp,
            Self::Finalize => ReplaceState::Finalizing,
            Self::RemoveBackup => ReplaceState::CleaningUp,
        }
    }

    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::RemoveStaleTemp | Self::RemoveStaleBackup | Self::RemoveBackup => {
                FailurePolicy::Ignore
            }
            Self::OpenSource | Self::CreateTemp => FailurePolicy::Abort,
            Self::Transform | Self::CloseHandles | Self::BackupSource => FailurePolicy::DiscardTemp,
            Self::Finalize => FailurePolicy::RollbackAndDiscardTemp,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::OpenSource => "open source for reading",
            Self::RemoveStaleTemp => "delete stale temporary file",
            Self::CreateTemp => "create temporary file",
            Self::Transform => "compact source into temporary file",
            Self::CloseHandles => "flush and close handles",
            Self::RemoveStaleBackup => "delete stale backup",
            Self::BackupSource => "rename source to backup",
            Self::Finalize => "rename temporary file to source",
            Self::RemoveBackup => "delete backup",
        }
    }
}

impl std::fmt::Display for ReplaceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {} ({})", self.number(), self.description())
    }
}

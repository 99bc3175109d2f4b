use std::fmt;

use newline_compact_shared_kernel::{DomainError, DomainResult};

use super::step::ReplaceStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplaceState {
    Reading,
    WritingTemp,
    BackingUp,
    Finalizing,
    CleaningUp,
    /// Finalize failed and the original was moved back into place.
    RolledBack,
    Failed,
    Done,
}

impl ReplaceState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::RolledBack | Self::Failed | Self::Done)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::WritingTemp => "WritingTemp",
            Self::BackingUp => "BackingUp",
            Self::Finalizing => "Finalizing",
            Self::CleaningUp => "CleaningUp",
            Self::RolledBack => "RolledBack",
            Self::Failed => "Failed",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ReplaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
    /// Only for [`ReplaceStep::Finalize`]: it failed, and moving the backup
    /// back succeeded.
    RolledBack,
}

impl ReplaceStep {
    /// The transition table: state after `self` finished with `outcome`.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidTransition`] when `outcome` is `RolledBack` for
    /// any step other than finalize.
    pub fn transition(self, outcome: StepOutcome) -> DomainResult<ReplaceState> {
        let after_success = match self.next() {
            Some(next) => next.state(),
            None => ReplaceState::Done,
        };
        let policy = self.failure_policy();
        match outcome {
            StepOutcome::Succeeded => Ok(after_success),
            StepOutcome::Failed if !policy.is_fatal() => Ok(after_success),
            StepOutcome::Failed => Ok(ReplaceState::Failed),
            StepOutcome::RolledBack if policy.restores_backup() => Ok(ReplaceState::RolledBack),
            StepOutcome::RolledBack => Err(DomainError::InvalidTransition {
                from: self.state().name(),
                step: self.number(),
            }),
        }
    }
}

/// Walks the step table in order and records every state entered.
#[derive(Debug, Clone)]
pub struct ReplaceMachine {
    state: ReplaceState,
    expected: Option<ReplaceStep>,
    trace: Vec<ReplaceState>,
}

impl Default for ReplaceMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplaceMachine {
    pub fn new() -> Self {
        Self {
            state: ReplaceState::Reading,
            expected: Some(ReplaceStep::OpenSource),
            trace: vec![ReplaceState::Reading],
        }
    }

    pub const fn state(&self) -> ReplaceState {
        self.state
    }

    /// The step that must be recorded next, if the replace is still running.
    pub const fn expected_step(&self) -> Option<ReplaceStep> {
        if self.state.is_terminal() { None } else { self.expected }
    }

    /// States entered so far, starting with `Reading`. Consecutive steps in
    /// the same state appear once.
    pub fn trace(&self) -> &[ReplaceState] {
        &self.trace
    }

    /// Records the outcome of `step` and moves to the next state.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidTransition`] if `step` is out of order, the
    /// machine is already terminal, or the outcome is not allowed for `step`.
    pub fn record(
        &mut self,
        step: ReplaceStep,
        outcome: StepOutcome,
    ) -> DomainResult<ReplaceState> {
        if self.expected_step() != Some(step) {
            return Err(DomainError::InvalidTransition {
                from: self.state.name(),
                step: step.number(),
            });
        }
        let next = step.transition(outcome)?;
        self.expected = step.next();
        if next != self.state {
            self.trace.push(next);
        }
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(fail_at: Option<(ReplaceStep, StepOutcome)>) -> ReplaceMachine {
        let mut machine = ReplaceMachine::new();
        for step in ReplaceStep::ALL {
            let outcome = match fail_at {
                Some((at, outcome)) if at == step => outcome,
                _ => StepOutcome::Succeeded,
            };
            machine.record(step, outcome).unwrap();
            if machine.state().is_terminal() {
                break;
            }
        }
        machine
    }

    #[test]
    fn happy_path_visits_every_state() {
        let machine = run_until(None);
        assert_eq!(machine.state(), ReplaceState::Done);
        assert_eq!(
            machine.trace(),
            &[
                ReplaceState::Reading,
                ReplaceState::WritingTemp,
                ReplaceState::BackingUp,
                ReplaceState::Finalizing,
                ReplaceState::CleaningUp,
                ReplaceState::Done,
            ]
        );
        assert_eq!(machine.expected_step(), None);
    }

    #[test]
    fn fatal_failures_end_in_failed() {
        for step in [
            ReplaceStep::OpenSource,
            ReplaceStep::CreateTemp,
            ReplaceStep::Transform,
            ReplaceStep::CloseHandles,
            ReplaceStep::BackupSource,
            ReplaceStep::Finalize,
        ] {
            let machine = run_until(Some((step, StepOutcome::Failed)));
            assert_eq!(machine.state(), ReplaceState::Failed, "{step}");
            assert_eq!(machine.trace().last(), Some(&ReplaceState::Failed));
        }
    }

    #[test]
    fn ignored_failures_do_not_stop_the_replace() {
        for step in [
            ReplaceStep::RemoveStaleTemp,
            ReplaceStep::RemoveStaleBackup,
            ReplaceStep::RemoveBackup,
        ] {
            let machine = run_until(Some((step, StepOutcome::Failed)));
            assert_eq!(machine.state(), ReplaceState::Done, "{step}");
        }
    }

    #[test]
    fn finalize_rollback_is_its_own_terminal_state() {
        let machine = run_until(Some((ReplaceStep::Finalize, StepOutcome::RolledBack)));
        assert_eq!(machine.state(), ReplaceState::RolledBack);
        assert_eq!(
            machine.trace(),
            &[
                ReplaceState::Reading,
                ReplaceState::WritingTemp,
                ReplaceState::BackingUp,
                ReplaceState::Finalizing,
                ReplaceState::RolledBack,
            ]
        );
    }

    #[test]
    fn rollback_outcome_is_rejected_outside_finalize() {
        let err = ReplaceStep::BackupSource.transition(StepOutcome::RolledBack).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { step: 7, .. }));
    }

    #[test]
    fn out_of_order_steps_are_rejected() {
        let mut machine = ReplaceMachine::new();
        let err = machine.record(ReplaceStep::Finalize, StepOutcome::Succeeded).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { from: "Reading", step: 8 }));

        machine.record(ReplaceStep::OpenSource, StepOutcome::Failed).unwrap();
        assert!(machine.record(ReplaceStep::RemoveStaleTemp, StepOutcome::Succeeded).is_err());
    }
}

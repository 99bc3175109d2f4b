pub mod state;
pub mod step;

pub use state::{ReplaceMachine, ReplaceState, StepOutcome};
pub use step::{FailurePolicy, ReplaceStep};

//! # Domain
//!
//! Pure logic with no filesystem knowledge:
//!
//! - [`transform`]: the newline-run compaction engine
//! - [`replace`]: steps, states and failure policies of the durable replace
#![allow(clippy::multiple_crate_versions)]

pub mod replace;
pub mod transform;

pub use replace::{FailurePolicy, ReplaceMachine, ReplaceState, ReplaceStep, StepOutcome};
pub use transform::{
    BreakKind, ByteClass, NewlineRun, PushbackReader, Token, Tokenizer, compact_bytes,
    compact_bytes_with_stats, compact_stream,
};

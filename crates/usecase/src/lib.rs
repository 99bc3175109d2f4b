//! # Use Cases
//!
//! Application-level orchestration logic.
//!
//! - [`orchestrator`]: the durable replace of one file
//! - [`dto`]: data returned across the use case boundary
//!
//! Use cases depend on both domain and ports, but not on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod dto;
pub mod orchestrator;

pub use dto::{ReplaceReport, ReplaceRun};
pub use orchestrator::DurableReplace;

// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

#[cfg(feature = "fault-injection")]
pub mod fault;
pub mod filesystem;
pub mod persistence;

#[cfg(feature = "fault-injection")]
pub use fault::{FaultPlan, FaultyFileSystem, FsCall};
pub use filesystem::StdFileSystem;

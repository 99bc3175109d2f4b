//! # Ports
//!
//! Interface definitions for external dependencies.
//!
//! - [`filesystem`]: the file operations a durable replace needs
//!
//! The use case drives these traits only, so tests can swap in adapters
//! that fail at a chosen operation.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod filesystem;

pub use filesystem::{ReplaceFileSystem, SourceReader, TempSink};

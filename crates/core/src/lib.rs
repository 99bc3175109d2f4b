//! Library facade for the `newline_compact` binary.
//!
//! Compaction itself lives in `newline_compact_domain`; the durable replace
//! in `newline_compact_usecase`. This crate wires them to the local
//! filesystem.
#![allow(clippy::multiple_crate_versions)]

pub mod bootstrap;
pub mod error;

pub use bootstrap::{compact_file, compact_file_with, trace_compact_file};
pub use newline_compact_domain::{
    ReplaceState, ReplaceStep, compact_bytes, compact_bytes_with_stats, compact_stream,
};
pub use newline_compact_infra::StdFileSystem;
pub use newline_compact_ports::ReplaceFileSystem;
pub use newline_compact_shared_kernel::{ArtifactPaths, CompactStats};
pub use newline_compact_usecase::{ReplaceReport, ReplaceRun};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

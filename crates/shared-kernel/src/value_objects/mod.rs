// crates/shared-kernel/src/value_objects/mod.rs
pub mod artifact_paths;
pub mod compact_stats;
pub mod counts;

pub use artifact_paths::ArtifactPaths;
pub use compact_stats::CompactStats;
pub use counts::{BreakCount, ByteCount};

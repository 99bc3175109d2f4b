pub mod classify;
pub mod engine;
pub mod pushback;
pub mod run;

pub use classify::{BreakKind, ByteClass, Token, Tokenizer};
pub use engine::{compact_bytes, compact_bytes_with_stats, compact_stream};
pub use pushback::PushbackReader;
pub use run::NewlineRun;

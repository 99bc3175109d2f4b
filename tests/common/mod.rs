// tests/common/mod.rs
//! Shared helpers for the binary tests.

use assert_cmd::Command;

/// The built binary, with logging variables cleared so stderr is quiet by
/// default.
pub fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_newline_compact"));
    cmd.env_remove("RUST_LOG").env_remove("NEWLINE_COMPACT_LOG");
    cmd
}

// src/main.rs
#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

fn main() -> ExitCode {
    newline_compact::app::main_with_args(std::env::args_os())
}

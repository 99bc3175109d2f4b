// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "newline_compact",
    version = crate::VERSION,
    about = "空行の連続を1つずつ詰める (CRLF/LF 混在可、.tmp/.bak 経由で安全に上書き)",
    after_help = "ログ出力は環境変数 NEWLINE_COMPACT_LOG (なければ RUST_LOG) で制御します。"
)]
pub struct Args {
    /// 対象ファイル (その場で書き換える)
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

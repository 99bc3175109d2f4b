use std::fs;

use predicates::prelude::*;

use crate::common::bin;

#[test]
fn shows_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("newline_compact"))
        .stdout(predicate::str::contains("NEWLINE_COMPACT_LOG"));
}

#[test]
fn shows_version() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn compacts_file_in_place_silently() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("notes.txt");
    fs::write(&target, b"a\r\n\r\nb\n\n\nc\rd").unwrap();

    bin()
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(fs::read(&target).unwrap(), b"a\nb\n\nc\rd");
    assert!(!dir.path().join("notes.txt.tmp").exists());
    assert!(!dir.path().join("notes.txt.bak").exists());
}

#[test]
fn documented_examples() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&[u8], &[u8]); 5] = [
        (b"a\n\n\nb", b"a\n\nb"),
        (b"a\r\n\r\nb", b"a\nb"),
        (b"a\n\r\n\nb", b"a\n\nb"),
        (b"a\rb", b"a\rb"),
        (b"", b""),
    ];
    for (i, (input, expected)) in cases.iter().enumerate() {
        let target = dir.path().join(format!("case{i}.txt"));
        fs::write(&target, input).unwrap();
        bin().arg(&target).assert().success();
        assert_eq!(fs::read(&target).unwrap(), *expected, "case {i}");
    }
}

#[test]
fn info_logging_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("log.txt");
    fs::write(&target, b"x\n\ny").unwrap();

    bin()
        .env("NEWLINE_COMPACT_LOG", "info")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("compacted"));
}

#[test]
fn invalid_log_filter_is_reported_and_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("f.txt");
    fs::write(&target, b"x\n\n\ny").unwrap();

    bin()
        .env("NEWLINE_COMPACT_LOG", "newline_compact=notalevel")
        .arg(&target)
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring invalid log filter"));
    assert_eq!(fs::read(&target).unwrap(), b"x\n\ny");
}

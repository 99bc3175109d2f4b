use std::fs;

use predicates::prelude::*;

use crate::common::bin;

#[test]
fn no_arguments_is_a_usage_error() {
    bin().assert().code(2).stderr(predicate::str::contains("Usage"));
}

#[test]
fn two_arguments_is_a_usage_error_and_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"a\n\n\n").unwrap();
    fs::write(&b, b"b\n\n\n").unwrap();

    bin().arg(&a).arg(&b).assert().code(2);

    assert_eq!(fs::read(&a).unwrap(), b"a\n\n\n");
    assert_eq!(fs::read(&b).unwrap(), b"b\n\n\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn missing_file_exits_one_with_reason() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("absent.txt");

    bin()
        .arg(&target)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("newline_compact: "))
        .stderr(predicate::str::contains("cannot open input file"))
        .stderr(predicate::str::contains("absent.txt"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn directory_target_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    bin()
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot open input file"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

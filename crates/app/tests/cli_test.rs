//! End-to-end tests of the huffpack binary: exit codes and files on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn huffpack(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_huffpack"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run huffpack")
}

#[test]
fn test_encode_then_decode_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let original = b"a:1,b:2\n--END HEADER--\nand some ordinary text".to_vec();
    fs::write(dir.path().join("input.txt"), &original).unwrap();

    let out = huffpack(
        dir.path(),
        &["encode", "input.txt", "-o", "compressed_output.huff"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = huffpack(dir.path(), &["decode"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let restored = fs::read(dir.path().join("decompressed_output.txt")).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_report_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"abb").unwrap();

    let out = huffpack(
        dir.path(),
        &["encode", "in.txt", "-o", "in.huff", "--print-codes", "--stats"],
    );
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("'a' : 0"));
    assert!(stdout.contains("'b' : 1"));
    assert!(stdout.contains("=== encode summary ==="));
}

#[test]
fn test_empty_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.txt"), b"").unwrap();

    let out = huffpack(dir.path(), &["encode", "empty.txt", "-o", "empty.huff"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("input is empty"));
    assert!(!dir.path().join("empty.huff").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    let out = huffpack(dir.path(), &["decode", "nope.huff", "-o", "nope.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("input not found"));
}

#[test]
fn test_corrupt_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"some text to damage").unwrap();

    let out = huffpack(dir.path(), &["encode", "in.txt", "-o", "in.huff"]);
    assert!(out.status.success());

    let mut bytes = fs::read(dir.path().join("in.huff")).unwrap();
    bytes.pop();
    fs::write(dir.path().join("in.huff"), &bytes).unwrap();

    let out = huffpack(dir.path(), &["decode", "in.huff", "-o", "out.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("corrupt payload"));
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn test_usage_errors_exit_with_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"abc").unwrap();

    let out = huffpack(dir.path(), &["encode", "in.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("--output"));

    let out = huffpack(dir.path(), &["compress", "in.txt"]);
    assert_eq!(out.status.code(), Some(1));

    let out = huffpack(dir.path(), &["encode", "in.txt", "-o", "in.txt"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_with_zero() {
    let dir = tempfile::tempdir().unwrap();

    let out = huffpack(dir.path(), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("encode"));
}

#[test]
fn test_key_value_stats() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), b"abb").unwrap();

    let out = huffpack(dir.path(), &["encode", "in.txt", "-o", "in.huff", "--stats=kv"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("operation=encode"));
    assert!(stdout.contains("input_bytes=3"));
    assert!(stdout.contains("distinct_symbols=2"));
    assert!(!stdout.contains("=== encode summary ==="));
}

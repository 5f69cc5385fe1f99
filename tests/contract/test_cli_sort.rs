use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Contract tests for `fadesort sort`

fn fadesort(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fadesort").unwrap();
    cmd.current_dir(temp_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sort_stdin_to_stdout() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .arg("sort")
        .write_stdin("cherry\napple\nbanana\n")
        .assert()
        .success()
        .stdout("apple\nbanana\ncherry\n");
}

#[test]
fn test_sort_file_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("in.txt"), "3\n1\n2\n").unwrap();

    fadesort(&temp_dir)
        .args(["sort", "in.txt", "-o", "out.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted 3 lines into out.txt"));

    let sorted = fs::read_to_string(temp_dir.path().join("out.txt")).unwrap();
    assert_eq!(sorted, "1\n2\n3\n");
}

#[test]
fn test_sort_in_place() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.txt"), "b\nc\na\n").unwrap();

    fadesort(&temp_dir)
        .args(["sort", "data.txt", "--output", "data.txt"])
        .assert()
        .success();

    let sorted = fs::read_to_string(temp_dir.path().join("data.txt")).unwrap();
    assert_eq!(sorted, "a\nb\nc\n");
}

#[test]
fn test_sort_numeric_reverse_is_stable() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["sort", "--numeric", "--reverse", "--key", r"^(\S+)"])
        .write_stdin("2 first\n10 x\n2 second\n-1 y\n")
        .assert()
        .success()
        .stdout("10 x\n2 first\n2 second\n-1 y\n");
}

#[test]
fn test_sort_key_unmatched_lines_first() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["sort", "--key", r"id=(\w+)"])
        .write_stdin("id=b one\nno id\nid=a two\nalso none\n")
        .assert()
        .success()
        .stdout("no id\nalso none\nid=a two\nid=b one\n");
}

#[test]
fn test_sort_numeric_rejects_text() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["sort", "--numeric"])
        .write_stdin("1\ntwo\n3\n")
        .assert()
        .failure()
        .code(65)
        .stderr(predicate::str::contains("<stdin> at line 2"));
}

#[test]
fn test_sort_json_output() {
    let temp_dir = TempDir::new().unwrap();

    let output = fadesort(&temp_dir)
        .args(["sort", "--json", "--buffer-size", "1"])
        .write_stdin("b\na\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["line_count"], 2);
    assert_eq!(json["buffer_size"], 1);
    assert_eq!(json["lines"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_sort_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["sort", "missing.txt"])
        .assert()
        .failure()
        .code(74)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_sort_invalid_key_pattern() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["sort", "--key", "(a)(b)"])
        .write_stdin("ab\n")
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("capture groups"));
}

#[test]
fn test_sort_uses_configured_buffer_size() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fadesort.toml"), "[sort]\nbuffer_size = 3\n").unwrap();

    let output = fadesort(&temp_dir)
        .args(["sort", "--json"])
        .write_stdin("z\ny\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["buffer_size"], 3);
}

#[test]
fn test_sort_rejects_non_utf8_input() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("latin1.txt"), [0x63, 0x61, 0x66, 0xe9, 0x0a]).unwrap();

    fadesort(&temp_dir)
        .args(["sort", "latin1.txt"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("not valid UTF-8"));
}

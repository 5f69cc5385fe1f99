use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Contract tests for `fadesort bench`

fn fadesort(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fadesort").unwrap();
    cmd.current_dir(temp_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_bench_table_output() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["bench", "--length", "5000", "--trials", "2", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchmark: 5000 elements"))
        .stdout(predicate::str::contains("seed 11"))
        .stdout(predicate::str::contains("presorted"))
        .stdout(predicate::str::contains("Mean:"));
}

#[test]
fn test_bench_json_report() {
    let temp_dir = TempDir::new().unwrap();

    let output = fadesort(&temp_dir)
        .args(["bench", "--length", "3000", "--trials", "3", "--buffer-size", "24", "--seed", "5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["length"], 3000);
    assert_eq!(json["buffer_size"], 24);
    assert_eq!(json["seed"], 5);
    assert!(json["generated_at"].is_string());

    let trials = json["trials"].as_array().unwrap();
    assert_eq!(trials.len(), 3);
    assert!(trials.iter().all(|t| t["verified"] == true));
}

#[test]
fn test_bench_rejects_zero_trials() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["bench", "--trials", "0"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("At least one trial"));
}

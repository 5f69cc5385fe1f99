use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Contract tests for `fadesort stability`

fn fadesort(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fadesort").unwrap();
    cmd.current_dir(temp_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_stability_default_length() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .arg("stability")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stability: 9000 elements"))
        .stdout(predicate::str::contains("UNSTABLE").not());
}

#[test]
fn test_stability_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = fadesort(&temp_dir)
        .args(["stability", "--length", "1000", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = json["checks"].as_array().unwrap();

    // 1000, 500, 250, 125, 62, 31
    assert_eq!(checks.len(), 6);
    assert!(checks.iter().all(|c| c["stable"] == true));
}

#[test]
fn test_stability_short_input() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["stability", "--length", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to check"));
}

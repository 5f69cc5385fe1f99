use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Contract tests for `fadesort config`

fn fadesort(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fadesort").unwrap();
    cmd.current_dir(temp_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created fadesort.toml"));

    let content = fs::read_to_string(temp_dir.path().join("fadesort.toml")).unwrap();
    assert!(content.contains("buffer_size = 256"));
    assert!(content.contains("level = \"warn\""));
}

#[test]
fn test_config_init_requires_force() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fadesort.toml"), "[sort]\nbuffer_size = 8\n").unwrap();

    fadesort(&temp_dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("--force"));

    fadesort(&temp_dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_defaults() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in defaults"))
        .stdout(predicate::str::contains("[sort]"));
}

#[test]
fn test_config_show_explicit_file_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "[bench]\ntrials = 4\nseed = 9\n").unwrap();

    let output = fadesort(&temp_dir)
        .args(["--config", "custom.toml", "config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "custom.toml");
    assert_eq!(json["config"]["bench"]["trials"], 4);
    assert_eq!(json["config"]["bench"]["seed"], 9);
    assert_eq!(json["config"]["sort"]["buffer_size"], 256);
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fadesort.toml"), "[sort]\nbuffer_size = 0\n").unwrap();

    fadesort(&temp_dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("buffer_size must be at least 1"));
}

#[test]
fn test_config_init_force_repairs_broken_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fadesort.toml");
    fs::write(&path, "[sort").unwrap();

    fadesort(&temp_dir)
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created fadesort.toml"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("buffer_size = 256"));

    fadesort(&temp_dir).args(["config", "show"]).assert().success();
}

#[test]
fn test_config_init_force_replaces_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("fadesort.toml"), "[sort]\nbuffer_size = 0\n").unwrap();

    fadesort(&temp_dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    fadesort(&temp_dir).args(["config", "show"]).assert().success();
}

#[test]
fn test_config_init_writes_explicit_path() {
    let temp_dir = TempDir::new().unwrap();

    fadesort(&temp_dir)
        .args(["--config", "new.toml", "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created new.toml"));

    assert!(temp_dir.path().join("new.toml").is_file());
    assert!(!temp_dir.path().join("fadesort.toml").exists());
}

fn reported_buffer_size(temp_dir: &TempDir) -> serde_json::Value {
    let output = fadesort(temp_dir)
        .args(["sort", "--json"])
        .write_stdin("b\na\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["buffer_size"].clone()
}

#[test]
fn test_user_config_then_local_config() {
    let temp_dir = TempDir::new().unwrap();
    let user_dir = temp_dir.path().join("fadesort");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join("config.toml"), "[sort]\nbuffer_size = 7\n").unwrap();

    assert_eq!(reported_buffer_size(&temp_dir), 7);

    fs::write(temp_dir.path().join("fadesort.toml"), "[sort]\nbuffer_size = 9\n").unwrap();

    assert_eq!(reported_buffer_size(&temp_dir), 9);
}

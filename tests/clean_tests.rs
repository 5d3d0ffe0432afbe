use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let config_path = dir.join("dotsling.json");
    fs::write(&config_path, contents).unwrap();
    config_path
}

#[test]
fn test_clean_undoes_a_full_run() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bashrc"), "x").unwrap();
    fs::write(temp_dir.path().join("vimrc"), "y").unwrap();

    let config_path = write_config(
        temp_dir.path(),
        r#"{
            "directories": ["target/.dir1"],
            "link": {"bashrc": "target/.bashrc"},
            "copy": {"vimrc": "target/.vimrc"}
        }"#,
    );

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path).assert().success();

    assert!(temp_dir.path().join("target/.dir1").is_dir());
    assert!(temp_dir.path().join("target/.bashrc").is_symlink());
    assert!(temp_dir.path().join("target/.vimrc").is_file());

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path)
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed all files!"));

    // Created targets are gone, declared sources untouched
    assert!(!temp_dir.path().join("target/.dir1").exists());
    assert!(!temp_dir.path().join("target/.bashrc").is_symlink());
    assert!(!temp_dir.path().join("target/.vimrc").exists());
    assert!(temp_dir.path().join("bashrc").exists());
    assert!(temp_dir.path().join("vimrc").exists());
}

#[test]
fn test_clean_handles_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), r#"{"directories": ["a", "a/b"]}"#);

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path).assert().success();
    assert!(temp_dir.path().join("a/b").is_dir());

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path).arg("--clean").assert().success();
    assert!(!temp_dir.path().join("a").exists());
}

#[test]
fn test_clean_covers_system_sections() {
    let temp_dir = TempDir::new().unwrap();
    let section = if std::env::consts::OS == "macos" {
        "Darwin"
    } else {
        "Linux"
    };
    let config_path = write_config(
        temp_dir.path(),
        &format!(
            r#"{{
                "directories": ["common"],
                "system": {{"{}": {{"directories": ["conditional"]}}}}
            }}"#,
            section
        ),
    );

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path).assert().success();
    assert!(temp_dir.path().join("conditional").is_dir());

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path).arg("--clean").assert().success();

    assert!(!temp_dir.path().join("common").exists());
    assert!(!temp_dir.path().join("conditional").exists());
}

#[test]
fn test_clean_fails_on_missing_targets() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), r#"{"directories": ["never-created"]}"#);

    let mut cmd = Command::cargo_bin("dotsling").unwrap();
    cmd.arg(&config_path)
        .arg("--clean")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be removed"));
}

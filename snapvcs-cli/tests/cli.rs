use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn snapvcs(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snapvcs").unwrap();
    cmd.current_dir(root);
    cmd
}

#[test]
fn test_full_workflow() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    snapvcs(root)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty repository"));

    fs::write(root.join("a.txt"), "v1").unwrap();
    snapvcs(root)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files:"))
        .stdout(predicate::str::contains("a.txt"));

    snapvcs(root).args(["add", "a.txt"]).assert().success();
    snapvcs(root)
        .args(["commit", "-m", "first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("committed successfully"));

    fs::write(root.join("a.txt"), "v2").unwrap();
    snapvcs(root)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes not staged for commit:"));

    snapvcs(root).args(["add", "."]).assert().success();
    snapvcs(root)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed:"));
    snapvcs(root).args(["commit", "-m", "second"]).assert().success();

    snapvcs(root)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second"));

    snapvcs(root)
        .args(["revert", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revert of"));
}

#[test]
fn test_commit_with_nothing_staged() {
    let dir = TempDir::new().unwrap();
    snapvcs(dir.path()).arg("init").assert().success();

    snapvcs(dir.path())
        .args(["commit", "-m", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to commit"));
}

#[test]
fn test_add_missing_file_warns() {
    let dir = TempDir::new().unwrap();
    snapvcs(dir.path()).arg("init").assert().success();
    fs::write(dir.path().join("real.txt"), "x").unwrap();

    snapvcs(dir.path())
        .args(["add", "ghost.txt", "real.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghost.txt does not exist"))
        .stdout(predicate::str::contains("Staged"));
}

#[test]
fn test_revert_invalid_reference_fails() {
    let dir = TempDir::new().unwrap();
    snapvcs(dir.path()).arg("init").assert().success();

    snapvcs(dir.path())
        .args(["revert", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commits exist yet"));

    snapvcs(dir.path())
        .args(["revert", "notacommit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid commit hash"));
}

#[test]
fn test_requires_init() {
    let dir = TempDir::new().unwrap();

    snapvcs(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapvcs init"));
}

#[test]
fn test_root_flag() {
    let dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();

    snapvcs(elsewhere.path())
        .arg("-C")
        .arg(dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(dir.path().join(".snapvcs/HEAD").is_file());
    assert!(!elsewhere.path().join(".snapvcs").exists());
}

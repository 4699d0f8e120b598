#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kickstack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("create-kickstack").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("KICKSTACK_CONFIG")
        .env("KICKSTACK_DIR", dir.path());
    cmd
}

// ---------------------------------------------------------------------------
// argument handling
// ---------------------------------------------------------------------------

#[test]
fn help_lists_non_interactive_flags() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--variant"))
        .stdout(predicate::str::contains("--no-router"))
        .stdout(predicate::str::contains("--no-dev"));
}

#[test]
fn unknown_variant_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .args(["demo-app", "--variant", "vue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant"));
    assert!(!dir.path().join("demo-app").exists());
}

#[test]
fn router_flags_conflict() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .args(["demo-app", "--router", "--no-router"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// name and folder checks
// ---------------------------------------------------------------------------

#[test]
fn missing_name_exits_with_code_one() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("please provide a project name"));
}

#[test]
fn unusable_name_exits_with_code_one() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .args(["!!!", "--variant", "react", "--no-router", "--no-dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn existing_folder_aborts_before_anything_runs() {
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("demo-app");
    std::fs::create_dir(&existing).unwrap();
    std::fs::write(existing.join("keep.txt"), "mine").unwrap();

    kickstack(&dir)
        .args(["demo-app", "--variant", "react-ts", "--no-router", "--no-dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("folder already exists"));

    let entries: Vec<_> = std::fs::read_dir(&existing).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        std::fs::read_to_string(existing.join("keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn sanitized_name_is_checked_against_existing_folder() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("my-app")).unwrap();

    kickstack(&dir)
        .args(["My App", "--variant", "react", "--no-router", "--no-dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("folder already exists"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    kickstack(&dir)
        .args(["demo-app", "--variant", "react", "--no-router", "--no-dev"])
        .args(["--config", "does-not-exist.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load"));
    assert!(!dir.path().join("demo-app").exists());
}

#[test]
fn invalid_config_value_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("kickstack.yaml");
    std::fs::write(&config, "vite_version: ''\n").unwrap();

    kickstack(&dir)
        .args(["demo-app", "--variant", "react", "--no-router", "--no-dev"])
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
    assert!(!dir.path().join("demo-app").exists());
}

#[test]
fn config_with_unknown_package_manager_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("kickstack.yaml");
    std::fs::write(&config, "package_manager: bower\n").unwrap();

    kickstack(&dir)
        .args(["demo-app", "--variant", "react", "--no-router", "--no-dev"])
        .env("KICKSTACK_CONFIG", &config)
        .assert()
        .code(1);
}

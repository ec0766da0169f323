//! Integration tests for the `clean` command.

use predicates::prelude::*;

mod common;
use common::TestProject;

/// Clean removes an existing stale metadata directory
#[test]
fn test_clean_removes_stale_directory() {
    let project = TestProject::with_sample_manifest().unwrap();
    let stale = project.create_stale_metadata("open-r1").unwrap();

    project
        .distforge_command()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    assert!(!stale.exists());
}

/// Clean is a reported no-op when there is nothing to remove
#[test]
fn test_clean_nothing_to_remove() {
    let project = TestProject::with_sample_manifest().unwrap();

    project
        .distforge_command()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to remove"));
}

/// --dry-run reports the target without removing it
#[test]
fn test_clean_dry_run() {
    let project = TestProject::with_sample_manifest().unwrap();
    let stale = project.create_stale_metadata("open-r1").unwrap();

    project
        .distforge_command()
        .args(["clean", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would remove"));

    assert!(stale.exists());
}

/// Clean works even when the manifest would fail full validation
#[test]
fn test_clean_tolerates_invalid_dependencies() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
[package]
name = "demo"
version = "0.1.0"

dependencies = ["torch"]
install = ["nonexistent-package"]
"#,
        )
        .unwrap();
    let stale = project.create_stale_metadata("demo").unwrap();

    project.distforge_command().arg("clean").assert().success();
    assert!(!stale.exists());
}

/// The metadata directory name swaps dashes for underscores
#[test]
fn test_clean_underscore_directory_name() {
    let project = TestProject::with_sample_manifest().unwrap();
    // wrong name: dashed directory is not the generated artifact
    let dashed = project.path().join("open-r1.egg-info");
    std::fs::create_dir(&dashed).unwrap();

    project
        .distforge_command()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to remove"));

    assert!(dashed.exists());
}

//! Integration tests for the `init` command.

use predicates::prelude::*;
use std::fs;

mod common;
use common::TestProject;

/// Init scaffolds a manifest in the current directory
#[test]
fn test_init_creates_manifest() {
    let project = TestProject::new().unwrap();

    project
        .distforge_command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created manifest"));

    let content = fs::read_to_string(project.manifest_path()).unwrap();
    assert!(content.contains("name = \"open-r1\""));
    assert!(content.contains("version = \"0.1.0.dev0\""));
    assert!(content.contains("requires-python = \">=3.10.9\""));
    assert!(content.contains("dev = { include = [\"quality\", \"tests\", \"eval\", \"code\"] }"));
}

/// Init writes a stub readme when none exists
#[test]
fn test_init_creates_stub_readme() {
    let project = TestProject::new().unwrap();

    project.distforge_command().arg("init").assert().success();
    assert!(project.path().join("README.md").exists());
}

/// Init leaves an existing readme alone
#[test]
fn test_init_preserves_existing_readme() {
    let project = TestProject::new().unwrap();
    project.write_readme("existing contents\n").unwrap();

    project.distforge_command().arg("init").assert().success();
    assert_eq!(fs::read_to_string(project.path().join("README.md")).unwrap(), "existing contents\n");
}

/// Init refuses to overwrite an existing manifest without --force
#[test]
fn test_init_refuses_overwrite() {
    let project = TestProject::new().unwrap();
    project.write_manifest("# custom manifest\n[package]\nname = \"x\"\nversion = \"1.0\"\n").unwrap();

    project
        .distforge_command()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(project.manifest_path()).unwrap();
    assert!(content.contains("# custom manifest"));
}

/// --force overwrites an existing manifest
#[test]
fn test_init_force_overwrites() {
    let project = TestProject::new().unwrap();
    project.write_manifest("# custom manifest\n").unwrap();

    project.distforge_command().args(["init", "--force"]).assert().success();

    let content = fs::read_to_string(project.manifest_path()).unwrap();
    assert!(content.contains("name = \"open-r1\""));
}

/// --path targets another directory, creating it if needed
#[test]
fn test_init_with_path() {
    let project = TestProject::new().unwrap();

    project
        .distforge_command()
        .args(["init", "--path", "subproject"])
        .assert()
        .success();

    assert!(project.path().join("subproject").join("distforge.toml").exists());
}

/// The scaffold passes its own validation end to end
#[test]
fn test_init_scaffold_validates() {
    let project = TestProject::new().unwrap();

    project.distforge_command().arg("init").assert().success();
    project
        .distforge_command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest is valid"));
}

//! Integration tests for gocanon-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn gocanon_cmd() -> Command {
    cargo_bin_cmd!("gocanon")
}

/// Writes a template archive with the given entries into `dir`.
///
/// Names ending in `/` become directory entries.
fn write_template(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let file = fs::File::create(&path).expect("failed to create template");
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap();
    path
}

fn canonical_template(dir: &Path) -> PathBuf {
    write_template(
        dir,
        "go-canonical.zip",
        &[
            ("go-canonical/", ""),
            ("go-canonical/go.mod", "module go-canonical\n"),
            (
                "go-canonical/main.go",
                "package main\n\nimport _ \"go-canonical/internal\"\n",
            ),
            ("go-canonical/README.md", "# go-canonical\n"),
        ],
    )
}

#[test]
fn test_version_flag() {
    gocanon_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gocanon"));
}

#[test]
fn test_new_help() {
    gocanon_cmd()
        .arg("new")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create a new Go project"));
}

#[test]
fn test_new_creates_project() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("new")
        .arg("widget")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project initialized successfully."));

    let root = temp.path().join("widget");
    assert_eq!(
        fs::read_to_string(root.join("go.mod")).unwrap(),
        "module widget\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("main.go")).unwrap(),
        "package main\n\nimport _ \"widget/internal\"\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("README.md")).unwrap(),
        "# go-canonical\n"
    );
}

#[test]
fn test_new_prompts_for_name() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("new")
        .write_stdin("widget\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Enter the name of the new Go project: ",
        ));

    assert_eq!(
        fs::read_to_string(temp.path().join("widget/go.mod")).unwrap(),
        "module widget\n"
    );
}

#[test]
fn test_new_with_template_and_output_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let template = canonical_template(temp.path());
    let out = temp.path().join("projects");
    fs::create_dir(&out).unwrap();

    gocanon_cmd()
        .arg("new")
        .arg("widget")
        .arg("--template")
        .arg(&template)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("widget/go.mod").is_file());
}

#[test]
fn test_missing_template_exit_code() {
    let temp = TempDir::new().expect("failed to create temp dir");

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("new")
        .arg("widget")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("go-canonical.zip"));

    assert!(!temp.path().join("widget").exists());
}

#[test]
fn test_empty_name_exit_code() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("new")
        .write_stdin("   \n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_traversal_exit_code() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    let template = write_template(
        temp.path(),
        "evil.zip",
        &[
            ("go-canonical/main.go", "package main"),
            ("go-canonical/../../pwned.go", "package pwned"),
        ],
    );

    gocanon_cmd()
        .arg("new")
        .arg("widget")
        .arg("--template")
        .arg(&template)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("pwned.go").exists());
}

#[test]
fn test_skip_unsafe_warns() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    let template = write_template(
        temp.path(),
        "evil.zip",
        &[
            ("go-canonical/main.go", "package main"),
            ("go-canonical/../../pwned.go", "package pwned"),
        ],
    );

    gocanon_cmd()
        .arg("new")
        .arg("widget")
        .arg("--template")
        .arg(&template)
        .arg("--output-dir")
        .arg(&out)
        .arg("--skip-unsafe")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped entry"));

    assert!(out.join("widget/main.go").is_file());
    assert!(!temp.path().join("pwned.go").exists());
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    let output = gocanon_cmd()
        .current_dir(temp.path())
        .arg("--json")
        .arg("new")
        .arg("widget")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "new");
    assert_eq!(json["data"]["files_extracted"], 3);
    assert_eq!(json["data"]["files_rewritten"], 2);
    assert_eq!(json["data"]["replacements"], 2);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let output = gocanon_cmd()
        .current_dir(temp.path())
        .arg("--json")
        .arg("new")
        .arg("widget")
        .assert()
        .failure()
        .code(3)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], "ARCHIVE_OPEN");
}

#[test]
fn test_staged_existing_destination() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());
    fs::create_dir(temp.path().join("widget")).unwrap();

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("new")
        .arg("widget")
        .arg("--staged")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_quiet_mode() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("-q")
        .arg("new")
        .arg("widget")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_mode() {
    let temp = TempDir::new().expect("failed to create temp dir");
    canonical_template(temp.path());

    gocanon_cmd()
        .current_dir(temp.path())
        .arg("--verbose")
        .arg("new")
        .arg("widget")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replacements"))
        .stdout(predicate::str::contains("Duration"));
}

#[test]
fn test_completion_bash() {
    gocanon_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("gocanon"));
}

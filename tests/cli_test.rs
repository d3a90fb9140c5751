//! Integration tests for the nbreqs binary.
//!
//! The converter and scanner are `sh` scripts configured in `.nbreqs.yml`,
//! so these tests need a unix shell but no Python tooling.
#![cfg(unix)]
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// "Converts" a notebook by copying it to `<output_dir>/<stem>.py`.
const CONVERTER: &str = r#"converter:
  program: sh
  args:
    - -c
    - 'stem=$(basename "$1" .ipynb); cp "$1" "$2/$stem.py"'
    - sh
    - ${notebook}
    - ${output_dir}
"#;

/// "Scans" by collecting the unique lines of every converted script.
const SCAN_OK: &str = r#"cat "$1"/*.py | sort -u > "$1/requirements.txt""#;

fn setup_project(scanner_script: &str) -> TempDir {
    setup_project_with(CONVERTER, scanner_script)
}

fn setup_project_with(converter: &str, scanner_script: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config = format!(
        "{}scanner:\n  program: sh\n  args:\n    - -c\n    - '{}'\n    - sh\n    - ${{workspace}}\n",
        converter,
        scanner_script.replace('\'', "''")
    );
    fs::write(temp.path().join(".nbreqs.yml"), config).unwrap();
    fs::create_dir(temp.path().join("Code")).unwrap();
    temp
}

fn notebook(root: &Path, name: &str, body: &str) {
    fs::write(root.join("Code").join(name), body).unwrap();
}

fn nbreqs(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("nbreqs"));
    cmd.current_dir(dir)
        .env_remove("NBREQS_CONFIG")
        .env_remove("NBREQS_NOTEBOOK_DIR")
        .env_remove("NBREQS_OUTPUT")
        .env_remove("NBREQS_JOBS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    nbreqs(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("requirements file"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("doctor"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    nbreqs(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_generates_from_code_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    notebook(temp.path(), "analysis.ipynb", "pandas==2.2.2\n");
    notebook(temp.path(), "plots.ipynb", "matplotlib==3.8.0\n");

    nbreqs(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Requirements file successfully generated at:",
        ))
        .stdout(predicate::str::contains("(2 packages)"));

    let written = fs::read_to_string(temp.path().join("requirements.txt"))?;
    assert_eq!(written, "matplotlib==3.8.0\npandas==2.2.2\n");
    Ok(())
}

#[test]
fn cli_generate_with_dir_and_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    fs::create_dir(temp.path().join("notebooks"))?;
    fs::write(temp.path().join("notebooks/a.ipynb"), "requests\n")?;

    nbreqs(temp.path())
        .args(["generate", "notebooks", "-o", "deps.txt"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp.path().join("deps.txt"))?, "requests\n");
    assert!(!temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_empty_directory_reports_and_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);

    nbreqs(temp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notebook files found"));

    assert!(!temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_missing_notebook_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);

    nbreqs(temp.path())
        .args(["generate", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Notebook directory not found"));
    Ok(())
}

#[test]
fn cli_conversion_failure_stops_run() -> Result<(), Box<dyn std::error::Error>> {
    let failing = r#"converter:
  program: sh
  args:
    - -c
    - 'case "$1" in *broken*) echo "nbconvert: bad notebook" >&2; exit 1;; esac; stem=$(basename "$1" .ipynb); cp "$1" "$2/$stem.py"'
    - sh
    - ${notebook}
    - ${output_dir}
"#;
    let temp = setup_project_with(failing, SCAN_OK);
    notebook(temp.path(), "a.ipynb", "numpy\n");
    notebook(temp.path(), "broken.ipynb", "scipy\n");
    fs::write(temp.path().join("requirements.txt"), "old==1.0\n")?;

    nbreqs(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("broken.ipynb"))
        .stderr(predicate::str::contains("nbconvert: bad notebook"));

    assert_eq!(
        fs::read_to_string(temp.path().join("requirements.txt"))?,
        "old==1.0\n"
    );
    Ok(())
}

#[test]
fn cli_scan_failure_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("echo \"pipreqs: syntax error\" >&2; exit 2");
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Dependency scan failed"))
        .stderr(predicate::str::contains("pipreqs: syntax error"));

    assert!(!temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_missing_manifest_warns_but_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("true");
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to generate requirements.txt"));

    assert!(!temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_missing_tool_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".nbreqs.yml"),
        "converter:\n  program: nbreqs-test-no-such-converter\n",
    )?;
    fs::create_dir(temp.path().join("Code"))?;
    notebook(temp.path(), "a.ipynb", "{}");

    nbreqs(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Tool not found: nbreqs-test-no-such-converter",
        ));
    Ok(())
}

#[test]
fn cli_parallel_jobs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    for i in 0..6 {
        notebook(temp.path(), &format!("nb{}.ipynb", i), &format!("pkg{}\n", i));
    }

    nbreqs(temp.path())
        .args(["generate", "--jobs", "3"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("requirements.txt"))?;
    assert_eq!(written.lines().count(), 6);
    Ok(())
}

#[test]
fn cli_jobs_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .env("NBREQS_JOBS", "0")
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--jobs must be at least 1"));
    Ok(())
}

#[test]
fn cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    notebook(temp.path(), "a.ipynb", "numpy==1.26.4\n");

    let output = nbreqs(temp.path())
        .args(["generate", "--json"])
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["status"], "generated");
    assert_eq!(json["manifest"]["requirements"][0]["name"], "numpy");
    Ok(())
}

#[test]
fn cli_json_empty_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);

    let output = nbreqs(temp.path())
        .args(["generate", "--json"])
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["status"], "no_notebooks");
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join(".nbreqs.yml"), "jobs: 1\nunknown_key: true\n")?;

    nbreqs(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_explicit_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    fs::rename(
        temp.path().join(".nbreqs.yml"),
        temp.path().join("custom.yml"),
    )?;
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .args(["--config", "custom.yml", "generate"])
        .assert()
        .success();

    assert!(temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_quiet_still_reports_errors() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("exit 1");
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .args(["-q", "generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn cli_quiet_hides_progress() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SCAN_OK);
    notebook(temp.path(), "a.ipynb", "numpy\n");

    nbreqs(temp.path())
        .args(["-q", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("successfully generated"))
        .stdout(predicate::str::contains("Converting").not());
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn cli_deleted_working_dir_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let gone = temp.path().join("gone");
    fs::create_dir(&gone)?;

    Command::new("sh")
        .args(["-c", "cd \"$1\" && rmdir \"$1\" && exec \"$2\" generate", "sh"])
        .arg(&gone)
        .arg(cargo_bin("nbreqs"))
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot determine working directory"));

    assert!(!temp.path().join("requirements.txt").exists());
    Ok(())
}

#[test]
fn cli_doctor_reports_missing_tools() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".nbreqs.yml"),
        "converter:\n  program: sh\nscanner:\n  program: nbreqs-test-no-such-scanner\n",
    )?;

    nbreqs(temp.path())
        .arg("doctor")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("converter: sh"))
        .stderr(predicate::str::contains(
            "scanner: nbreqs-test-no-such-scanner not found",
        ));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    nbreqs(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_nbreqs"));
    Ok(())
}

//! Integration tests for the capcheck binary
//!
//! These tests run the built binary against suite manifests in a temp
//! directory and check its output and exit status.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const PASSING_SUITE: &str = r#"
apiVersion: capcontract/v1
kind: ContractSuite
metadata:
  name: passing
spec:
  subjects:
    - name: FullManager
      operations: [find_or_create_client, get_client, report_client]
      implements: [DBManager::Client]
"#;

const FAILING_SUITE: &str = r#"
apiVersion: capcontract/v1
kind: ContractSuite
metadata:
  name: failing
spec:
  contracts:
    - name: HostReporting
      operations: [report_host]
  subjects:
    - name: PartialManager
      operations: [find_or_create_client, get_client]
      implements: [DBManager::Client, HostReporting]
"#;

fn capcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_capcheck"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run capcheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_verify_passing_suite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("passing.yaml");
    fs::write(&path, PASSING_SUITE).unwrap();

    let output = capcheck(&["verify", path.to_str().unwrap(), "--no-color"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("FullManager"));
    assert!(out.contains("1 checked, 1 passed, 0 failed"));
}

#[test]
fn test_verify_failing_suite_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("failing.yaml");
    fs::write(&path, FAILING_SUITE).unwrap();

    let output = capcheck(&["verify", path.to_str().unwrap(), "--format", "json"]);

    assert!(!output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let results = parsed[0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["missing"], serde_json::json!(["report_client"]));
    assert_eq!(results[1]["missing"], serde_json::json!(["report_host"]));
}

#[test]
fn test_verify_directory_with_contract_filter() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a_passing.yaml"), PASSING_SUITE).unwrap();
    fs::write(temp_dir.path().join("b_failing.yml"), FAILING_SUITE).unwrap();
    fs::write(temp_dir.path().join("ci.yml"), "jobs:\n  test: {}\n").unwrap();

    let output = capcheck(&[
        "verify",
        temp_dir.path().to_str().unwrap(),
        "--contract",
        "HostReporting",
        "--format",
        "yaml",
    ]);

    // Only the failing suite defines HostReporting; the other is skipped
    assert!(!output.status.success());
    let reports: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    let reports = reports.as_sequence().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["suite"].as_str(), Some("failing"));
    let results = reports[0]["results"].as_sequence().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["subject"].as_str(), Some("PartialManager"));
}

#[test]
fn test_verify_directory_ignores_unrelated_yaml() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("passing.yaml"), PASSING_SUITE).unwrap();
    fs::write(temp_dir.path().join("ci.yml"), "jobs:\n  test:\n    runs-on: ubuntu\n").unwrap();

    let output = capcheck(&["verify", temp_dir.path().to_str().unwrap(), "--no-color"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Suite: passing"));
}

#[test]
fn test_verify_contract_filter_unknown_everywhere() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("passing.yaml");
    fs::write(&path, PASSING_SUITE).unwrap();

    let output = capcheck(&["verify", path.to_str().unwrap(), "--contract", "Nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no suite defines contract 'Nope'"));
}

#[test]
fn test_verify_rejects_unknown_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("passing.yaml");
    fs::write(&path, PASSING_SUITE).unwrap();

    let output = capcheck(&["verify", path.to_str().unwrap(), "--format", "xml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown output format"));
}

#[test]
fn test_contracts_lists_builtins() {
    let output = capcheck(&["contracts"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("DBManager::Client"));
}

#[test]
fn test_show_builtin_contract() {
    let output = capcheck(&["show", "DBManager::Client"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("- find_or_create_client"));
    assert!(out.contains("- get_client"));
    assert!(out.contains("- report_client"));
}

#[test]
fn test_show_unknown_contract_fails() {
    let output = capcheck(&["show", "Nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Contract not found: Nope"));
}

#[test]
fn test_init_writes_verifiable_suite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("starter.yaml");
    let path_str = path.to_str().unwrap();

    let output = capcheck(&["init", path_str, "--name", "starter"]);
    assert!(output.status.success());
    assert!(path.exists());

    // Refuses to overwrite without --force
    let again = capcheck(&["init", path_str]);
    assert!(!again.status.success());
    assert!(capcheck(&["init", path_str, "--force"]).status.success());

    let verify = capcheck(&["verify", path_str, "--no-color"]);
    assert!(verify.status.success());
}

#[test]
fn test_cli_version_output() {
    let output = capcheck(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("capcheck"));
}

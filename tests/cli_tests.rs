//! Exit codes and output of the confdiff binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn confdiff(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_confdiff"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(["--color", "never"])
        .args(args)
        .output()
        .unwrap()
}

fn backend_tree(temp: &TempDir) {
    write(&temp.path().join("api/Good/Client_Port_1/Port.ini"), "[S]\nx = 1\n");
    write(&temp.path().join("tde/Good/Client_Port_1/Port.ini"), "[S]\nx = 1\n");
    write(&temp.path().join("api/Bad/Client_Port_1/Port.ini"), "[S]\nx = 1\n");
    write(&temp.path().join("tde/Bad/Client_Port_1/Port.ini"), "[S]\nx = 2\n");
}

#[test]
fn test_check_exit_codes() {
    let temp = TempDir::new().unwrap();
    backend_tree(&temp);

    let good = confdiff(temp.path(), &["check", "api/Good", "tde/Good"]);
    assert_eq!(good.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&good.stdout);
    assert!(stdout.contains("Port.ini\nnothing to output\n"));

    let bad = confdiff(temp.path(), &["check", "api/Bad", "tde/Bad"]);
    assert_eq!(bad.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&bad.stdout);
    assert!(stdout.contains("| api | tde |"));
    assert!(stdout.contains("unequal"));
}

#[test]
fn test_check_label_count_mismatch() {
    let temp = TempDir::new().unwrap();
    backend_tree(&temp);

    let output = confdiff(temp.path(), &["check", "api/Bad", "tde/Bad", "--label", "only"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_batch_json_summary() {
    let temp = TempDir::new().unwrap();
    backend_tree(&temp);

    let output = confdiff(
        temp.path(),
        &["batch", "--backend", "api=api", "--backend", "tde=tde", "--json"],
    );
    assert_eq!(output.status.code(), Some(1));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["schema_id"], "confdiff/run_summary@1");
    assert_eq!(summary["project_count"], 2);
    assert_eq!(summary["projects_failed"], 1);
}

#[test]
fn test_batch_tables_and_summary_file() {
    let temp = TempDir::new().unwrap();
    backend_tree(&temp);

    let output = confdiff(
        temp.path(),
        &[
            "batch",
            "-b",
            "api=api",
            "-b",
            "tde=tde",
            "--summary-out",
            "run_summary.json",
        ],
    );
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Comparing port: Client_Port_1"));
    assert!(stdout.contains("1 of 2 project(s) differ"));
    assert!(temp.path().join("run_summary.json").exists());
}

#[test]
fn test_repo_config_is_layered() {
    let temp = TempDir::new().unwrap();
    backend_tree(&temp);
    write(&temp.path().join(".confdiff.toml"), "[policy]\ndir = \"policies\"\n");
    write(&temp.path().join("policies/Port.ini"), "[S]\nx = ignore\n");

    let output = confdiff(temp.path(), &["check", "api/Bad", "tde/Bad"]);
    assert_eq!(output.status.code(), Some(0));

    let shown = confdiff(temp.path(), &["config"]);
    let config: serde_json::Value = serde_json::from_slice(&shown.stdout).unwrap();
    assert_eq!(config["config"]["policy"]["dir"], "policies");
    assert_eq!(config["sources"][1]["origin"], "repo");
}

#[test]
fn test_invalid_config_exits_with_usage_code() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join(".confdiff.toml"), "port_pattern = \"(\"\n");

    let output = confdiff(temp.path(), &["config"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("port_pattern"));
}

#[test]
fn test_batch_without_common_projects_warns() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("api/OnlyApi")).unwrap();
    fs::create_dir_all(temp.path().join("tde/OnlyTde")).unwrap();

    let output = confdiff(
        temp.path(),
        &["batch", "--backend", "api=api", "--backend", "tde=tde"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no common projects"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No projects compared"));
}

//! Integration tests for the `bindery` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the convert and
//! check subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, converter options and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn bindery() -> Command {
    Command::cargo_bin("bindery").unwrap()
}

/// Run `bindery convert` with `args` and parse stdout as JSON.
fn convert_to_json(args: &[&str]) -> serde_json::Value {
    let output = bindery()
        .arg("convert")
        .args(args)
        .output()
        .expect("convert should run");
    assert!(output.status.success(), "convert failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Convert subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_yaml_file_to_stdout() {
    let ir = convert_to_json(&["-i", &fixture("report.yaml")]);
    assert_eq!(
        ir,
        json!({"report": [
            {"title": "Quarterly sales"},
            {"generated": null},
            {"regions": [{"name": "North"}, {"name": "South"}]},
            {"table": [["Q1", 100, 1.5], ["Q2", 120, 2.25]]}
        ]})
    );
}

#[test]
fn convert_json_file_by_extension() {
    let ir = convert_to_json(&["-i", &fixture("records.json")]);
    assert_eq!(ir, json!({"people": [{"name": "Alice"}, {"name": "Bob"}]}));
}

#[test]
fn convert_stdin_defaults_to_yaml() {
    bindery()
        .arg("convert")
        .write_stdin("title: Q3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Q3\""));
}

#[test]
fn convert_stdin_accepts_json() {
    bindery()
        .args(["convert", "--format", "json", "--compact"])
        .write_stdin(r#"{"pages":"12"}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff("{\"pages\":12}\n"));
}

#[test]
fn convert_file_to_file() {
    let output_path = "/tmp/bindery-test-convert-output.json";
    let _ = std::fs::remove_file(output_path);

    bindery()
        .args(["convert", "-i", &fixture("records.json"), "-o", output_path])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let ir: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(ir, json!({"people": [{"name": "Alice"}, {"name": "Bob"}]}));

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn convert_mixed_array_fails_with_path() {
    bindery()
        .args(["convert", "-i", &fixture("mixed.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert binding document"))
        .stderr(predicate::str::contains("$.proj"));
}

#[test]
fn convert_missing_value_fails_with_path() {
    bindery()
        .arg("convert")
        .write_stdin("title:\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pair at '$.title' has no value"));
}

#[test]
fn convert_invalid_input_fails() {
    bindery()
        .args(["convert", "--format", "json"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build binding document"));
}

#[test]
fn convert_missing_file_fails() {
    bindery()
        .args(["convert", "-i", "/nonexistent/bindings.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Empty-array options
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_array_rejected_by_default() {
    bindery()
        .args(["convert", "-i", &fixture("empty.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("$.rows"));
}

#[test]
fn empty_array_allowed_by_flag() {
    let ir = convert_to_json(&["-i", &fixture("empty.yaml"), "--allow-empty-arrays"]);
    assert_eq!(ir, json!({"rows": []}));
}

#[test]
fn empty_array_allowed_by_config() {
    let ir = convert_to_json(&[
        "-i",
        &fixture("empty.yaml"),
        "--config",
        &fixture("allow_empty.yaml"),
    ]);
    assert_eq!(ir, json!({"rows": []}));
}

#[test]
fn invalid_config_fails() {
    bindery()
        .args(["convert", "-i", &fixture("empty.yaml"), "--config", &fixture("mixed.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_document() {
    bindery()
        .args(["check", "-i", &fixture("report.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::diff("ok\n"));
}

#[test]
fn check_invalid_document() {
    bindery()
        .args(["check", "-i", &fixture("mixed.yaml")])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("must contain only text values"));
}

#[test]
fn no_subcommand_shows_usage() {
    bindery()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn verbose_logs_successful_conversion() {
    bindery()
        .env_remove("RUST_LOG")
        .args(["--verbose", "convert", "-i", &fixture("records.json")])
        .assert()
        .success()
        .stderr(predicate::str::contains("converting document"))
        .stderr(predicate::str::contains("document converted"));
}

#[test]
fn quiet_by_default() {
    bindery()
        .env_remove("RUST_LOG")
        .args(["convert", "-i", &fixture("records.json")])
        .assert()
        .success()
        .stderr(predicate::str::contains("document converted").not());
}

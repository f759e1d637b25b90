//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("toolschema").expect("binary should exist")
}

fn nested_schema() -> String {
    serde_json::json!({
        "type": "object",
        "properties": {
            "tag": { "$ref": "#/$defs/Tag" },
            "count": { "anyOf": [{ "type": "integer" }, { "type": "null" }] }
        },
        "required": ["tag"],
        "$defs": {
            "Tag": { "type": "string", "maxLength": 32 }
        }
    })
    .to_string()
}

// ── Flatten ─────────────────────────────────────────────────────────────────

#[test]
fn test_flatten_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(&input, nested_schema()).unwrap();

    let assert = cmd()
        .args(["flatten", input.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let flat: serde_json::Value = serde_json::from_str(&stdout).expect("stdout must be JSON");
    assert_eq!(flat["properties"]["tag"], serde_json::json!({ "type": "string" }));
    assert_eq!(flat["properties"]["count"], serde_json::json!({ "type": "integer" }));
    assert!(flat.get("$defs").is_none());
}

#[test]
fn test_flatten_to_file_compact() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    let output = dir.path().join("flat.json");
    fs::write(&input, nested_schema()).unwrap();

    cmd()
        .args(["flatten", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .args(["--format", "compact"])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    // Compact output is a single line plus trailing newline
    assert_eq!(written.trim_end().lines().count(), 1);
    let flat: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(flat["properties"]["tag"]["type"], serde_json::json!("string"));
}

#[test]
fn test_flatten_missing_input_fails() {
    cmd()
        .args(["flatten", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_flatten_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();

    cmd()
        .args(["flatten", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schema"));
}

#[test]
fn test_flatten_shape_violation_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scalar.json");
    fs::write(&input, "42").unwrap();

    cmd()
        .args(["flatten", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Flattening failed"));
}

// ── Check ───────────────────────────────────────────────────────────────────

#[test]
fn test_check_accepts_flattened_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    let output = dir.path().join("flat.json");
    fs::write(&input, nested_schema()).unwrap();

    cmd()
        .args(["flatten", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    cmd()
        .args(["check", output.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_check_rejects_unflattened_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("schema.json");
    fs::write(&input, nested_schema()).unwrap();

    cmd()
        .args(["check", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flat-output contract"));
}

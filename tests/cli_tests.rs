use std::{fs, path::Path};

use assert_cmd::Command;
use serde_json::json;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arrayconfig"))
}

fn write_config(dir: &Path, file: &str, value: serde_json::Value) -> String {
    let path = dir.join(file);
    fs::write(&path, value.to_string()).unwrap();
    path.to_str().unwrap().to_string()
}

fn mask_config() -> serde_json::Value {
    json!({
        "type": "constant",
        "name": "mask",
        "constant": 5,
        "source_array_config": { "type": "dummy", "name": "raw", "shape": [10, 10] }
    })
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_cli_exits_with_success_on_help() {
    bin().arg("--help").assert().success();
}

#[test]
fn test_cli_fields_for_constant() {
    let stdout = stdout_of(bin().args(["fields", "constant"]));
    assert!(stdout.contains("source_array_config (required)"));
    assert!(stdout.contains("The constant value to fill the array with."));
}

#[test]
fn test_cli_unknown_flag_exits_two() {
    bin().arg("--bogus").assert().code(2);
}

#[test]
fn test_cli_read_constant_array() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(dir.path(), "mask.json", mask_config());
    let stdout = stdout_of(bin().args(["read", &file]));
    assert!(stdout.contains("name=mask"));
    assert!(stdout.contains("shape=[10, 10]"));
    assert!(stdout.contains("dtype=int64"));
    assert!(stdout.contains("min=5 max=5"));
}

#[test]
fn test_cli_validate_and_describe() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(dir.path(), "mask.json", mask_config());
    let stdout = stdout_of(bin().args(["validate", &file]));
    assert!(stdout.contains("valid: name=mask nodes=2 depth=2"));

    let stdout = stdout_of(bin().args(["describe", &file]));
    assert!(stdout.contains("mask [constant]"));
    assert!(stdout.contains("  raw [dummy]"));
    assert!(stdout.contains("writable=false"));
}

#[test]
fn test_cli_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(
        dir.path(),
        "broken.json",
        json!({ "type": "constant", "name": "mask" }),
    );
    let output = bin().args(["validate", &file]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing required field `source_array_config`"));
}

#[test]
fn test_cli_store_list_show_delete() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(dir.path(), "mask.json", mask_config());
    let db = dir.path().join("configs.db");
    let db = db.to_str().unwrap();

    bin().args(["--db", db, "store", &file]).assert().success();
    let listed = stdout_of(bin().args(["--db", db, "list"]));
    assert_eq!(listed.trim(), "mask");

    let shown = stdout_of(bin().args(["--db", db, "show", "mask"]));
    let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(value["constant"], 5);

    bin().args(["--db", db, "delete", "mask"]).assert().success();
    bin().args(["--db", db, "show", "mask"]).assert().code(1);
}

#[test]
fn test_cli_store_requires_db() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(dir.path(), "mask.json", mask_config());
    bin().args(["store", &file]).assert().code(1);
}

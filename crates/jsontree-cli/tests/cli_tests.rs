//! Integration tests for the `jtree` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, get,
//! set and stats subcommands through the actual binary, including
//! stdin/stdout piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const CONFIG: &str = r#"{
    "key": "value",
    "port": 1703,
    "host": "127.0.0.1",
    "options": ["norepeat"],
    "object": { "color": "green" }
}"#;

fn jtree() -> Command {
    Command::cargo_bin("jtree").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout_is_compact() {
    jtree()
        .arg("fmt")
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout(
            "{\"key\":\"value\",\"port\":1703,\"host\":\"127.0.0.1\",\
             \"options\":[\"norepeat\"],\"object\":{\"color\":\"green\"}}\n",
        );
}

#[test]
fn fmt_pretty() {
    jtree()
        .args(["fmt", "--pretty"])
        .write_stdin(r#"{"a":[1]}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    1\n  ]\n}\n");
}

#[test]
fn fmt_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    std::fs::write(&input, "[ 1, 2.0, \"x\\ty\" ]").unwrap();

    jtree()
        .args(["fmt", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, r#"[1,2.0,"x\ty"]"#);
}

#[test]
fn fmt_reports_parse_error_position() {
    jtree()
        .arg("fmt")
        .write_stdin("{\"a\": [1, 2}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"))
        .stderr(predicate::str::contains("line 1, column 12"));
}

#[test]
fn fmt_respects_max_depth() {
    jtree()
        .args(["--max-depth", "2", "fmt"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting deeper than 2 levels"));
}

#[test]
fn fmt_missing_file_fails() {
    jtree()
        .args(["fmt", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// get subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_nested_object() {
    jtree()
        .args(["get", "/object"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("{\"color\":\"green\"}\n");
}

#[test]
fn get_array_element() {
    jtree()
        .args(["get", "/options/0"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("\"norepeat\"\n");
}

#[test]
fn get_missing_pointer_fails() {
    jtree()
        .args(["get", "/nope"])
        .write_stdin(CONFIG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No value at pointer"));
}

// ─────────────────────────────────────────────────────────────────────────────
// set subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn set_creates_missing_parents() {
    jtree()
        .args(["set", "/server/tls", r#"{"cert":"c.pem"}"#])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{\"server\":{\"tls\":{\"cert\":\"c.pem\"}}}\n");
}

#[test]
fn set_replaces_existing_subtree() {
    jtree()
        .args(["set", "/options", "[]"])
        .write_stdin(r#"{"options":["norepeat"],"port":1}"#)
        .assert()
        .success()
        .stdout("{\"options\":[],\"port\":1}\n");
}

#[test]
fn set_through_scalar_fails() {
    jtree()
        .args(["set", "/port/x", "1"])
        .write_stdin(CONFIG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot create pointer"))
        .stderr(predicate::str::contains("type mismatch"));
}

#[test]
fn set_rejects_unbounded_index() {
    jtree()
        .args(["set", "/list/18446744073709551615", "1"])
        .write_stdin(r#"{"list":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot create pointer"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn set_rejects_invalid_value() {
    jtree()
        .args(["set", "/a", "{oops"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse value argument"));
}

// ─────────────────────────────────────────────────────────────────────────────
// stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_counts_nodes() {
    jtree()
        .arg("stats")
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:      8"))
        .stdout(predicate::str::contains("object    2"))
        .stdout(predicate::str::contains("string    4"))
        .stdout(predicate::str::contains("Max depth:  3"));
}

#[test]
fn no_subcommand_shows_usage() {
    jtree()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn list_empty() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn add_then_list_shows_unsynced_note() {
    let ws = Workspace::new();
    let id = ws.add("Groceries", "<p>milk</p>");

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}  Groceries (not synced)", id)));
}

#[test]
fn list_json() {
    let ws = Workspace::new();
    ws.add("First", "one");
    ws.add("Second", "two");

    let output = ws.cmd().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test]
fn add_with_image() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["add", "Photo", "desc", "--image", "file:///pic.png"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let id = stdout
        .split_whitespace()
        .find(|s| s.starts_with("temp-"))
        .unwrap()
        .trim_end_matches(':');

    ws.cmd()
        .args(["show", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image: file:///pic.png"));
}

#[test]
fn add_rejects_blank_title() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["add", "  ", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn show_note() {
    let ws = Workspace::new();
    let id = ws.add("Title", "Body text");

    ws.cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}: Title", id)))
        .stdout(predicate::str::contains("Status: not synced"))
        .stdout(predicate::str::contains("  Body text"));
}

#[test]
fn show_unknown_note_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found: missing"));
}

#[test]
fn edit_note() {
    let ws = Workspace::new();
    let id = ws.add("Old", "body");

    ws.cmd()
        .args(["edit", &id, "--title", "New"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated {}", id)));

    ws.cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}: New", id)))
        .stdout(predicate::str::contains("  body"));
}

#[test]
fn edit_without_changes_fails() {
    let ws = Workspace::new();
    let id = ws.add("Title", "body");

    ws.cmd()
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid note"));
}

#[test]
fn edit_image_only_fails() {
    let ws = Workspace::new();
    let id = ws.add("Title", "body");

    ws.cmd()
        .args(["edit", &id, "--image", "file:///pic.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title or description is required"));

    ws.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 1\n"));
}

#[test]
fn edit_unknown_note_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["edit", "missing", "--title", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found: missing"));
}

#[test]
fn rm_note() {
    let ws = Workspace::new();
    let keep = ws.add("Keep", "a");
    let drop = ws.add("Drop", "b");

    ws.cmd()
        .args(["rm", &drop])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", drop)));

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(keep))
        .stdout(predicate::str::contains(drop).not());
}

#[test]
fn rm_unknown_note_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["rm", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found"));
}

#[test]
fn status_lists_pending_changes() {
    let ws = Workspace::new();
    let id = ws.add("A", "b");
    ws.cmd().args(["edit", &id, "--description", "c"]).assert().success();

    ws.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes: 1"))
        .stdout(predicate::str::contains("Pending: 2"))
        .stdout(predicate::str::contains(format!("add    {}", id)))
        .stdout(predicate::str::contains(format!("update {}", id)))
        .stdout(predicate::str::contains("State: offline"));
}

#[test]
fn status_json() {
    let ws = Workspace::new();
    ws.add("A", "b");

    let output = ws.cmd().args(["status", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["notes"], 1);
    assert_eq!(status["pending"][0]["kind"], "add");
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();
    quill()
        .arg("--config")
        .arg(ws.temp.path().join("nope.toml"))
        .arg("--data-dir")
        .arg(ws.data_dir())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

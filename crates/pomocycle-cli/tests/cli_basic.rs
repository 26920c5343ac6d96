//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs.

mod common;

use common::{assert_contains, json_lines, run_cli, run_cli_success, run_cli_with_input};
use serde_json::Value;

fn snapshots(lines: &[Value]) -> Vec<&Value> {
    lines.iter().filter(|l| l["type"] == "StateSnapshot").collect()
}

#[test]
fn test_config_defaults() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["config", "get", "schedule.work_duration"]);
    assert_eq!(out.trim(), "25");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_set_get() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "schedule.long_break_duration", "30"]);
    let out = run_cli_success(home.path(), &["config", "get", "schedule.long_break_duration"]);
    assert_eq!(out.trim(), "30");

    let list: Value =
        serde_json::from_str(&run_cli_success(home.path(), &["config", "list"])).unwrap();
    assert_eq!(list["schedule"]["long_break_duration"], 30);
}

#[test]
fn test_config_set_out_of_range_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "schedule.short_break_duration", "45"]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "error:");
    let out = run_cli_success(home.path(), &["config", "get", "schedule.short_break_duration"]);
    assert_eq!(out.trim(), "5");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "schedule.nope"]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "unknown config key");
}

#[test]
fn test_notes_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["notes", "add", "draft", "the", "intro"]);
    assert_contains(&out, "Note added:");

    let notes: Value =
        serde_json::from_str(&run_cli_success(home.path(), &["notes", "list", "--json"])).unwrap();
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["text"], "draft the intro");
    let id = notes[0]["id"].as_i64().unwrap().to_string();

    run_cli_success(home.path(), &["notes", "remove", &id]);
    let (_, stderr, code) = run_cli(home.path(), &["notes", "remove", &id]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "note not found");

    let out = run_cli_success(home.path(), &["notes", "list"]);
    assert_contains(&out, "No notes.");
}

#[test]
fn test_clear_cache() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "schedule.work_duration", "50"]);
    run_cli_success(home.path(), &["notes", "add", "one"]);
    run_cli_success(home.path(), &["notes", "add", "two"]);

    let out = run_cli_success(home.path(), &["clear-cache", "--yes"]);
    assert_contains(&out, "2 notes removed");
    let out = run_cli_success(home.path(), &["config", "get", "schedule.work_duration"]);
    assert_eq!(out.trim(), "25");
}

#[test]
fn test_run_status_and_quit() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) =
        run_cli_with_input(home.path(), &["run", "--json"], "status\nquit\n");
    assert_eq!(code, 0);

    let lines = json_lines(&stdout);
    let snaps = snapshots(&lines);
    assert_eq!(snaps.len(), 2);
    assert_eq!(snaps[0]["state"], "idle");
    assert_eq!(snaps[0]["session_type"], "work");
    assert_eq!(snaps[0]["remaining_secs"], 1500);
    assert_eq!(snaps[0]["work_sessions_completed"], 1);
}

#[test]
fn test_run_settings_change_while_idle_and_running() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli_with_input(
        home.path(),
        &["run", "--json"],
        "set work 10\nstart\nset work 20\nquit\n",
    );
    assert_eq!(code, 0);

    let lines = json_lines(&stdout);
    let snaps = snapshots(&lines);
    // initial, after idle change, after start, after running change
    assert_eq!(snaps[1]["remaining_secs"], 600);
    assert_eq!(snaps[1]["state"], "idle");
    assert_eq!(snaps[2]["state"], "running");
    let last = snaps.last().unwrap();
    assert_eq!(last["state"], "running");
    assert!(last["remaining_secs"].as_u64().unwrap() <= 600);

    let out = run_cli_success(home.path(), &["config", "get", "schedule.work_duration"]);
    assert_eq!(out.trim(), "20");
}

#[test]
fn test_run_completes_one_minute_session() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "schedule.work_duration", "1"]);
    run_cli_success(home.path(), &["config", "set", "notifications.enabled", "false"]);

    let (stdout, stderr, code) =
        run_cli_with_input(home.path(), &["run", "--json", "--tick-ms", "5"], "start\n");
    assert_eq!(code, 0, "run failed: {stderr}");

    let lines = json_lines(&stdout);
    let completed: Vec<_> = lines
        .iter()
        .filter(|l| l["type"] == "SessionCompleted")
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["completed"], "work");
    assert_eq!(completed[0]["next"], "short_break");
    assert_eq!(
        completed[0]["message"],
        "Work session completed! Time for a break."
    );

    let last = *snapshots(&lines).last().unwrap();
    assert_eq!(last["state"], "idle");
    assert_eq!(last["session_type"], "short_break");
    assert_eq!(last["remaining_secs"], 300);
    assert_eq!(last["work_sessions_completed"], 2);
    assert_eq!(last["cycle_count"], 1);
}

#[test]
fn test_run_rejects_unknown_command_but_keeps_going() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) =
        run_cli_with_input(home.path(), &["run"], "launch\nstatus\nquit\n");
    assert_eq!(code, 0);
    assert_contains(&stderr, "unknown command: launch");
    assert_contains(&stdout, "25:00");
    assert_contains(&stdout, "1 of 4 works done");
}

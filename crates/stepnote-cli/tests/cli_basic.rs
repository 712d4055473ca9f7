//! Basic CLI E2E tests.
//!
//! Each test runs the compiled binary against its own temporary home
//! directory, so tests are hermetic and safe to run in parallel.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_stepnote-cli"))
        .env("HOME", home)
        .env("STEPNOTE_ENV", "dev")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn steps_status_starts_at_zero() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["steps", "status"]);
    assert_eq!(code, 0, "steps status failed");
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["step_count"], 0);
    assert_eq!(status["availability"], "checking");
    assert_eq!(status["steps_to_next"], 10);
}

#[test]
fn feed_surfaces_each_threshold_once() {
    let home = TempDir::new().unwrap();
    // Repeated and rising readings only surface the 10-step crossing once.
    let (stdout, _, code) = run_cli(
        home.path(),
        &["steps", "feed", "0", "5", "10", "10", "500"],
    );
    assert_eq!(code, 0, "steps feed failed");
    let crossings = stdout
        .lines()
        .filter(|l| l.contains("MilestoneCrossed"))
        .count();
    assert_eq!(crossings, 1);
    assert!(stdout.contains("\"steps\":10"));

    let (stdout, _, code) = run_cli(home.path(), &["milestone", "status"]);
    assert_eq!(code, 0);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["achieved"], serde_json::json!([10]));
    assert_eq!(status["gate"], "busy");
}

#[test]
fn burst_drains_one_prompt_per_decline() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["steps", "feed", "0", "6000"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"steps\":10"));

    // Each decline releases the gate and immediately surfaces the next
    // pending crossing, with no further readings.
    let (stdout, _, _) = run_cli(home.path(), &["milestone", "decline"]);
    assert!(stdout.contains("PromptDeclined"));
    assert!(stdout.contains("\"steps\":1000"));

    let (stdout, _, _) = run_cli(home.path(), &["milestone", "decline"]);
    assert!(stdout.contains("\"steps\":5000"));

    let (stdout, _, _) = run_cli(home.path(), &["milestone", "decline"]);
    assert!(!stdout.contains("MilestoneCrossed"));

    let (stdout, _, _) = run_cli(home.path(), &["milestone", "status"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["achieved"], serde_json::json!([10, 1000, 5000]));
    assert_eq!(status["gate"], "idle");
}

#[test]
fn accept_hands_note_to_editor_exactly_once() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["steps", "feed", "0", "42"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["milestone", "accept"]);
    assert_eq!(code, 0);
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["note"]["title"], "10 Steps Milestone");
    assert_eq!(output["note"]["content"], "");

    let (stdout, _, code) = run_cli(
        home.path(),
        &["note", "edit", "--content", "Felt good to get moving."],
    );
    assert_eq!(code, 0, "note edit failed");
    let note: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(note["title"], "10 Steps Milestone");
    assert_eq!(note["content"], "Felt good to get moving.");

    // The hand-off parameter is one-shot: a second edit has nothing to
    // consume.
    let (_, stderr, code) = run_cli(home.path(), &["note", "edit"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no pending note"));

    let (stdout, _, _) = run_cli(home.path(), &["note", "list"]);
    assert!(stdout.contains("10 Steps Milestone"));
}

#[test]
fn milestone_list_marks_achievements() {
    let home = TempDir::new().unwrap();
    let (_, _, _) = run_cli(home.path(), &["steps", "feed", "15"]);
    let (stdout, _, code) = run_cli(home.path(), &["milestone", "list"]);
    assert_eq!(code, 0);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["steps"], 10);
    assert_eq!(rows[0]["achieved"], true);
    assert_eq!(rows[1]["achieved"], false);
}

#[test]
fn simulate_is_deterministic() {
    let home_a = TempDir::new().unwrap();
    let home_b = TempDir::new().unwrap();
    let args = ["steps", "simulate", "--seed", "7", "--ticks", "10"];
    let (out_a, _, code_a) = run_cli(home_a.path(), &args);
    let (out_b, _, code_b) = run_cli(home_b.path(), &args);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    // Timestamps differ; the surfaced milestones must not.
    let crossings = |out: &str| -> Vec<String> {
        out.lines()
            .filter(|l| l.contains("MilestoneCrossed"))
            .map(String::from)
            .collect()
    };
    assert_eq!(crossings(&out_a).len(), crossings(&out_b).len());
}

#[test]
fn steps_reset_starts_a_fresh_window() {
    let home = TempDir::new().unwrap();
    run_cli(home.path(), &["steps", "feed", "0", "2000"]);
    let (_, _, code) = run_cli(home.path(), &["steps", "reset"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["steps", "status"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["step_count"], 0);
    assert_eq!(status["achieved"], serde_json::json!([]));
}

#[test]
fn note_add_list_delete() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["note", "add", "Morning walk", "--content", "Cold but clear"],
    );
    assert_eq!(code, 0, "note add failed");
    let note: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = note["id"].as_str().unwrap().to_string();

    let (stdout, _, _) = run_cli(home.path(), &["note", "list", "--json"]);
    let notes: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(notes.as_array().unwrap().len(), 1);

    let (_, _, code) = run_cli(home.path(), &["note", "delete", &id]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["note", "delete", &id]);
    assert_ne!(code, 0);
}

#[test]
fn prompt_for_steps_crossing() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["prompt", "for-steps", "25", "--previous", "0", "--seed", "1"],
    );
    assert_eq!(code, 0);
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(output["prompt"].as_str().unwrap().contains("on your mind"));

    let (stdout, _, _) = run_cli(
        home.path(),
        &["prompt", "for-steps", "25", "--previous", "25"],
    );
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(output["prompt"].is_null());
}

#[test]
fn config_get_set_roundtrip() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "prompts.enabled"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "prompts.enabled", "false"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "prompts.enabled"]);
    assert_eq!(stdout.trim(), "false");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.nope"]);
    assert_ne!(code, 0);
}

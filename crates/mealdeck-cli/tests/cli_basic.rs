//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify exit codes and output shapes.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "mealdeck-cli", "--"])
        .args(args)
        .env("MEALDECK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "Help failed");
    assert!(stdout.contains("MealDeck CLI"));
}

#[test]
fn test_suggest() {
    let (stdout, _, code) = run_cli(&["suggest"]);
    assert_eq!(code, 0, "Suggest failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_food_list() {
    let (_, _, code) = run_cli(&["food", "list"]);
    assert_eq!(code, 0, "Food list failed");
}

#[test]
fn test_food_add_and_remove() {
    // Unique name so reruns against the same dev store never collide.
    let name = format!("Món thử {}", std::process::id());

    let (stdout, _, code) = run_cli(&["food", "add", &name]);
    assert_eq!(code, 0, "Food add failed");
    assert!(stdout.contains(&name));

    let (stdout, _, code) = run_cli(&["food", "remove", &name]);
    assert_eq!(code, 0, "Food remove failed");
    assert!(stdout.contains(&name));
}

#[test]
fn test_pick_unknown_food_fails() {
    let name = format!("Không tồn tại {}", std::process::id());
    let (_, stderr, code) = run_cli(&["pick", &name]);
    assert_ne!(code, 0, "Picking an unknown dish unexpectedly succeeded");
    assert!(stderr.contains("error"));
}

#[test]
fn test_stats_json() {
    let (stdout, _, code) = run_cli(&["stats"]);
    assert_eq!(code, 0, "Stats failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("stats is not JSON");
    assert!(parsed.get("streak").is_some());
    assert!(parsed.get("points").is_some());
}

#[test]
fn test_history_summary_json() {
    let (stdout, _, code) = run_cli(&["history", "summary"]);
    assert_eq!(code, 0, "History summary failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("summary is not JSON");
    assert!(parsed.get("total").is_some());
}

#[test]
fn test_achievements_list() {
    let (stdout, _, code) = run_cli(&["achievements", "list"]);
    assert_eq!(code, 0, "Achievements list failed");
    assert_eq!(stdout.lines().count(), 15);
}

#[test]
fn test_settings_show_json() {
    let (stdout, _, code) = run_cli(&["settings", "show"]);
    assert_eq!(code, 0, "Settings show failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("settings is not JSON");
    assert!(parsed.get("auto_freeze").is_some());
}

#[test]
fn test_remind_requires_credentials() {
    let output = Command::new("cargo")
        .args(["run", "-p", "mealdeck-cli", "--", "remind", "run"])
        .env("MEALDECK_ENV", "dev")
        .env_remove("MEALDECK_VAPID_PUBLIC_KEY")
        .env_remove("MEALDECK_VAPID_PRIVATE_KEY")
        .output()
        .expect("Failed to execute CLI command");

    assert_ne!(output.status.code().unwrap_or(-1), 0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MEALDECK_VAPID_PUBLIC_KEY"));
}

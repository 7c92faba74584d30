//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

/// Run a CLI command in `home` and return (exit code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_catfeeder"))
        .args(args)
        .env("CATFEEDER_HOME", home.path())
        .env_remove("CATFEEDER_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn spawn_session(home: &TempDir) -> std::process::Child {
    Command::new(env!("CARGO_BIN_EXE_catfeeder"))
        .arg("run")
        .env("CATFEEDER_HOME", home.path())
        .env_remove("CATFEEDER_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start session")
}

/// Run an interactive session fed with `input`, then close stdin.
fn run_session(home: &TempDir, input: &[u8]) -> (i32, String, String) {
    let mut child = spawn_session(home);
    child.stdin.take().unwrap().write_all(input).unwrap();
    finish(child.wait_with_output().unwrap())
}

fn finish(output: Output) -> (i32, String, String) {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

/// A pet at hunger 40 whose background steps are too long to decay
/// during a test.
fn adopted_at_40() -> TempDir {
    let home = TempDir::new().unwrap();
    for (key, value) in [
        ("hunger.initial_level", "40"),
        ("hunger.background_step_secs", "3600"),
    ] {
        let (code, _, stderr) = run_cli(&home, &["config", "set", key, value]);
        assert_eq!(code, 0, "config set {key} failed: {stderr}");
    }
    let (code, _, _) = run_cli(&home, &["adopt", "Mochi"]);
    assert_eq!(code, 0);
    home
}

fn status_json(home: &TempDir) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, &["status", "--json"]);
    assert_eq!(code, 0, "status failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

fn adopted(name: &str) -> TempDir {
    let home = TempDir::new().unwrap();
    let (code, stdout, stderr) = run_cli(&home, &["adopt", name]);
    assert_eq!(code, 0, "adopt failed: {stderr}");
    assert!(stdout.contains(name));
    home
}

fn pet_json(home: &TempDir) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, &["pet", "show", "--json"]);
    assert_eq!(code, 0, "pet show failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_adopt_welcomes_pet() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["adopt", "Mochi", "--avatar", "fox"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Welcome home, 🦊 Mochi!"));
}

#[test]
fn test_adopt_refuses_second_pet_without_replace() {
    let home = adopted("Mochi");

    let (code, _, stderr) = run_cli(&home, &["adopt", "Biscuit"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already lives here"));

    let (code, _, _) = run_cli(&home, &["adopt", "Biscuit", "--replace"]);
    assert_eq!(code, 0);
    assert_eq!(pet_json(&home)["name"], "Biscuit");
}

#[test]
fn test_adopt_rejects_unknown_avatar() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["adopt", "Mochi", "--avatar", "dragon"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("dragon"));
}

#[test]
fn test_commands_require_a_pet() {
    let home = TempDir::new().unwrap();
    for args in [&["status"][..], &["feed"], &["pet", "show"]] {
        let (code, _, stderr) = run_cli(&home, args);
        assert_ne!(code, 0, "{args:?} should fail without a pet");
        assert!(stderr.contains("adopt"), "{args:?}: {stderr}");
    }
}

#[test]
fn test_status_json_for_new_pet() {
    let home = adopted("Mochi");
    let (code, stdout, stderr) = run_cli(&home, &["status", "--json"]);
    assert_eq!(code, 0, "status failed: {stderr}");

    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["level"], 100);
    assert_eq!(status["max_level"], 100);
    assert_eq!(status["hungry"], false);
    assert!(status["backgrounded_at"].is_null());
}

#[test]
fn test_status_shows_pet_line() {
    let home = adopted("Mochi");
    let (code, stdout, _) = run_cli(&home, &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Mochi"));
    assert!(stdout.contains("100/100"));
}

#[test]
fn test_feed_at_full_is_a_no_op() {
    let home = adopted("Mochi");
    let (code, stdout, stderr) = run_cli(&home, &["feed"]);
    assert_eq!(code, 0, "feed failed: {stderr}");
    assert!(stdout.contains("Already full (100)"));
    // 100 -> 20 is eight 10-point steps of 5s each
    assert!(stdout.contains("hunger alert in 40s"));
}

#[test]
fn test_feed_adds_portions() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&home, &["config", "set", "hunger.initial_level", "50"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&home, &["adopt", "Mochi"]);
    assert_eq!(code, 0);

    let (code, stdout, stderr) = run_cli(&home, &["feed", "--times", "2"]);
    assert_eq!(code, 0, "feed failed: {stderr}");
    assert!(stdout.contains("Fed: 50 -> 60"));
    assert!(stdout.contains("Fed: 60 -> 70"));
}

#[test]
fn test_status_after_feed_reports_background_snapshot() {
    let home = adopted("Mochi");
    run_cli(&home, &["feed"]);

    let (code, stdout, _) = run_cli(&home, &["status", "--json"]);
    assert_eq!(code, 0);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(status["backgrounded_at"].is_string());
}

#[test]
fn test_pet_settings() {
    let home = adopted("Mochi");

    let (code, stdout, _) = run_cli(&home, &["pet", "rename", "Luna"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Luna"));

    let (code, _, _) = run_cli(&home, &["pet", "avatar", "tiger"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(&home, &["pet", "notifications", "off"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Alerts off"));

    let pet = pet_json(&home);
    assert_eq!(pet["name"], "Luna");
    assert_eq!(pet["avatarSymbol"], "🐯");
    assert_eq!(pet["notificationsEnabled"], false);
}

#[test]
fn test_pet_rename_rejects_blank() {
    let home = adopted("Mochi");
    let (code, _, _) = run_cli(&home, &["pet", "rename", "   "]);
    assert_ne!(code, 0);
    assert_eq!(pet_json(&home)["name"], "Mochi");
}

#[test]
fn test_pet_avatars_lists_all() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["pet", "avatars"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.contains("🐱 cat"));
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();

    let (code, stdout, _) = run_cli(&home, &["config", "get", "hunger.low_threshold"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");

    let (code, stdout, _) = run_cli(&home, &["config", "set", "hunger.low_threshold", "30"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (_, stdout, _) = run_cli(&home, &["config", "get", "hunger.low_threshold"]);
    assert_eq!(stdout.trim(), "30");
}

#[test]
fn test_config_rejects_invalid_values() {
    let home = TempDir::new().unwrap();

    let (code, _, _) = run_cli(&home, &["config", "get", "no.such.key"]);
    assert_ne!(code, 0);

    let (code, _, _) = run_cli(&home, &["config", "set", "hunger.low_threshold", "100"]);
    assert_ne!(code, 0);

    let (_, stdout, _) = run_cli(&home, &["config", "get", "hunger.low_threshold"]);
    assert_eq!(stdout.trim(), "20");
}

#[test]
fn test_config_list_and_reset() {
    let home = TempDir::new().unwrap();
    run_cli(&home, &["config", "set", "notifications.permitted", "false"]);

    let (code, stdout, _) = run_cli(&home, &["config", "list"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["notifications"]["permitted"], false);
    assert_eq!(config["hunger"]["max_level"], 100);

    let (code, _, _) = run_cli(&home, &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&home, &["config", "get", "notifications.permitted"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&home, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("catfeeder"));
}

#[test]
fn test_config_rejects_periods_longer_than_a_year() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        &home,
        &["config", "set", "hunger.background_step_secs", "100000000000000"],
    );
    assert_ne!(code, 0);
    assert!(!stdout.contains("ok"));
    let (_, stdout, _) = run_cli(&home, &["config", "get", "hunger.background_step_secs"]);
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_session_feeds_and_backgrounds() {
    let home = adopted_at_40();
    let (code, stdout, stderr) = run_session(&home, b"f\nb\nb\nq\n");
    assert_eq!(code, 0, "session failed: {stderr}");
    assert!(stdout.contains("Mochi"));
    assert!(stdout.contains("Fed: 40 -> 50"));
    assert!(stdout.contains("Left alone at 50, hunger alert in 10800s"));
    assert!(stdout.contains("already in the background"));
    // Quitting while backgrounded keeps the snapshot taken by `b`.
    assert_eq!(stdout.matches("Left alone at").count(), 1);

    let status = status_json(&home);
    assert_eq!(status["level"], 50);
    assert!(status["backgrounded_at"].is_string());
}

#[test]
fn test_session_resume_and_status() {
    let home = adopted_at_40();
    let (code, stdout, stderr) = run_session(&home, b"r\nb\nr\ns\nnap\nq\n");
    assert_eq!(code, 0, "session failed: {stderr}");
    assert!(stdout.contains("already in the foreground"));
    assert!(stdout.contains("Away for"));
    assert!(stdout.contains("Hunger 40/100"));
    assert!(stdout.contains("unknown command: nap"));
}

#[test]
fn test_session_end_of_input_persists_level() {
    let home = adopted_at_40();
    let (code, stdout, stderr) = run_session(&home, b"f\nf\n");
    assert_eq!(code, 0, "session failed: {stderr}");
    assert!(stdout.contains("Fed: 50 -> 60"));
    assert!(stdout.contains("Left alone at 60"));

    let status = status_json(&home);
    assert_eq!(status["level"], 60);
}

#[test]
fn test_session_error_keeps_stored_level() {
    let home = adopted_at_40();
    let (code, _, _) = run_cli(&home, &["feed"]);
    assert_eq!(code, 0);
    assert_eq!(status_json(&home)["level"], 50);

    let (code, _, stderr) = run_session(&home, b"\xff\xfe\n");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let status = status_json(&home);
    assert_eq!(status["level"], 50);
    assert!(status["backgrounded_at"].is_string());
}

#[test]
fn test_session_delivers_due_alerts() {
    let home = TempDir::new().unwrap();
    for (key, value) in [
        ("hunger.initial_level", "20"),
        ("hunger.tick_interval_secs", "1"),
    ] {
        let (code, _, _) = run_cli(&home, &["config", "set", key, value]);
        assert_eq!(code, 0);
    }
    run_cli(&home, &["adopt", "Mochi"]);

    let mut child = spawn_session(&home);
    let mut stdin = child.stdin.take().unwrap();
    // First tick after 1s alerts, the alert is due 1s later and the poll
    // picks it up within another second.
    thread::sleep(Duration::from_secs(5));
    stdin.write_all(b"q\n").unwrap();
    drop(stdin);

    let (code, stdout, stderr) = finish(child.wait_with_output().unwrap());
    assert_eq!(code, 0, "session failed: {stderr}");
    assert!(stdout.contains("alert sent"));
    assert!(stdout.contains("🔔 Hunger alert! 🚨 Mochi is starving! 🥺"));
}

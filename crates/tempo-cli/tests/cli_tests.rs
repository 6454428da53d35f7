use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output against a throwaway database
fn tempo_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("tempo").expect("Failed to find tempo binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .env_remove("TEMPO_PUSH_TIMEOUT_SECS")
        .env_remove("TEMPO_PUSH_TTL_SECS")
        .env_remove("TEMPO_VAPID_PRIVATE_KEY")
        .env_remove("TEMPO_VAPID_SUBJECT");
    cmd
}

#[test]
fn test_cli_log_creates_task() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args([
            "log", "u1", "t1", "-m", "30", "--title", "Write report", "-e", "60",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 30 min on Write report"))
        .stdout(predicate::str::contains("- Progress: 30 / 60 min"))
        .stdout(predicate::str::contains("no devices registered"));

    tempo_cmd(&temp_dir)
        .args(["task", "show", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report (t1)"))
        .stdout(predicate::str::contains("- Remaining: 30 min"));
}

#[test]
fn test_cli_log_clamps_to_estimate() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["log", "u1", "t1", "-m", "50", "-e", "60"])
        .assert()
        .success();

    tempo_cmd(&temp_dir)
        .args(["log", "u1", "t1", "-m", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 10 min on t1"))
        .stdout(predicate::str::contains("- Progress: 60 / 60 min"));
}

#[test]
fn test_cli_log_completes_milestone() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["log", "u1", "a", "-m", "10", "-e", "10", "--milestone", "m1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone complete!"));

    tempo_cmd(&temp_dir)
        .args(["milestone", "show", "m1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Tasks: 1/1 complete"))
        .stdout(predicate::str::contains("- Status: complete"));
}

#[test]
fn test_cli_log_rejects_non_positive_minutes() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["log", "u1", "t1", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to log time"));

    tempo_cmd(&temp_dir)
        .args(["log", "u1", "t1", "-m", "-5"])
        .assert()
        .failure();
}

#[test]
fn test_cli_show_missing_task() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["task", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task 'nope' not found"));
}

#[test]
fn test_cli_unknown_milestone() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["milestone", "show", "m-unknown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks logged against this milestone."));
}

#[test]
fn test_cli_subscribe_and_list() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["subscriptions", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No push subscriptions registered."));

    tempo_cmd(&temp_dir)
        .args([
            "subscribe",
            "u1",
            "https://push.example.com/device-1",
            "--p256dh",
            "BPk",
            "--auth",
            "secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Registered https://push.example.com/device-1 for user u1",
        ));

    tempo_cmd(&temp_dir)
        .args(["subscriptions", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://push.example.com/device-1"));

    tempo_cmd(&temp_dir)
        .args(["subscriptions", "list", "u2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No push subscriptions registered."));
}

#[test]
fn test_cli_test_push_counts_unreachable_device_as_failed() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args([
            "subscribe",
            "u1",
            "http://127.0.0.1:9/push",
            "--p256dh",
            "k",
            "--auth",
            "a",
        ])
        .assert()
        .success();

    tempo_cmd(&temp_dir)
        .args(["--push-timeout-secs", "2", "test-push", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 removed, 1 failed"));

    // Transient failures keep the subscription
    tempo_cmd(&temp_dir)
        .args(["subscriptions", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9/push"));
}

#[test]
fn test_cli_test_push_without_devices() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args(["test-push", "u1", "--title", "Hi", "--body", "there"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test notification no devices registered"));
}

#[test]
fn test_cli_rejects_invalid_vapid_key() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args([
            "--vapid-private-key",
            "not-a-key",
            "--vapid-subject",
            "mailto:ops@example.com",
            "subscriptions",
            "list",
            "u1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid VAPID private key"));
}

#[test]
fn test_cli_vapid_key_requires_subject() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .args([
            "--vapid-private-key",
            "QpxmrETzeuJ19GVCeDT_sP3MHTGBixFl8Y2dyyQz3q4",
            "subscriptions",
            "list",
            "u1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--vapid-subject"));
}

#[test]
fn test_cli_accepts_vapid_identity() {
    let temp_dir = create_cli_test_environment();

    tempo_cmd(&temp_dir)
        .env("TEMPO_VAPID_PRIVATE_KEY", "QpxmrETzeuJ19GVCeDT_sP3MHTGBixFl8Y2dyyQz3q4")
        .env("TEMPO_VAPID_SUBJECT", "mailto:ops@example.com")
        .args(["subscriptions", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No push subscriptions registered."));
}

#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn otp_input() -> Command {
    Command::new(env!("CARGO_BIN_EXE_otp-input"))
}

fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("otp.json");
    fs::write(&path, json).expect("Failed to write config file");
    path
}

#[test]
fn test_paste_fills_and_completes() {
    otp_input()
        .arg("run")
        .write_stdin("paste 0 123456789\nget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[_ _ _ _ _ _]"))
        .stdout(predicate::str::contains("change: 123456"))
        .stdout(predicate::str::contains("complete: 123456"))
        .stdout(predicate::str::contains("[1 2 3 4 5 6] focus=5"))
        .stdout(predicate::str::contains("value: 123456"));
}

#[test]
fn test_typing_backspace_and_invalid_characters() {
    otp_input()
        .arg("run")
        .write_stdin("type 0 4\ntype 1 x\ntype 1 2\nbackspace 2\nbackspace 1\nget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[4 _ _ _ _ _] focus=1"))
        .stdout(predicate::str::contains("invalid: x"))
        .stdout(predicate::str::contains("[4 2 _ _ _ _] focus=2"))
        .stdout(predicate::str::contains("value: 4\n"));
}

#[test]
fn test_focus_follows_the_latest_request() {
    otp_input()
        .arg("run")
        .write_stdin("focus 3\nblur\nshow\nfocus 1\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[_ _ _ _ _ _] focus=3\n[_ _ _ _ _ _]\n[_ _ _ _ _ _]\n\
             [_ _ _ _ _ _] focus=1\n[_ _ _ _ _ _] focus=1\n",
        ));
}

#[test]
fn test_unknown_commands_do_not_end_the_session() {
    otp_input()
        .arg("run")
        .write_stdin("# warm-up\n\ndance\ntype x 1\nset 987\nget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: unknown command 'dance'"))
        .stdout(predicate::str::contains("error: 'x' is not a valid number"))
        .stdout(predicate::str::contains("value: 987"));
}

#[test]
fn test_mask_and_json_snapshot() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), r#"{ "length": 4, "mask": "*" }"#);
    otp_input()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .write_stdin("paste 0 12\njson\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[* * _ _] focus=2"))
        .stdout(predicate::str::contains(
            r#"{"value":"12","cells":["*","*","",""],"complete":false}"#,
        ));
}

#[test]
fn test_resend_cycle_persists_attempts() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = write_config(
        temp_dir.path(),
        r#"{ "resend": { "seconds": 3, "attempts_storage_key": "login" } }"#,
    );
    let state = temp_dir.path().join("otp_state.json");

    otp_input()
        .arg("--config")
        .arg(&config)
        .arg("--state")
        .arg(&state)
        .arg("run")
        .write_stdin("resend\ntick 3\nresend\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resend: 0:03 (attempts 0)"))
        .stdout(predicate::str::contains("resend: blocked, cooling down (3s left)"))
        .stdout(predicate::str::contains("Resend: ready (attempts 0)"))
        .stdout(predicate::str::contains("code sent"))
        .stdout(predicate::str::contains("resend: sent (attempt 1)"));

    otp_input()
        .arg("--state")
        .arg(&state)
        .arg("timer")
        .arg("status")
        .arg("--key")
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains("attempts: 1"));
}

#[test]
fn test_persisted_countdown_is_restored() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = write_config(
        temp_dir.path(),
        r#"{ "resend": { "seconds": 30, "attempts_storage_key": "login" } }"#,
    );
    let state = temp_dir.path().join("otp_state.json");
    fs::write(&state, r#"{ "login:remaining": "7", "login:attempts": "2" }"#)
        .expect("Failed to write state file");

    otp_input()
        .arg("--config")
        .arg(&config)
        .arg("--state")
        .arg(&state)
        .arg("run")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resend: 0:07 (attempts 2)"));
}

#[test]
fn test_failed_delivery_keeps_timer_ready() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = write_config(
        temp_dir.path(),
        r#"{ "resend": { "seconds": 30, "auto_start": false } }"#,
    );
    otp_input()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg("--fail-resend")
        .write_stdin("resend\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("resend: failed, code delivery failed"))
        .stdout(predicate::str::contains("Resend: ready (attempts 0)"))
        .stdout(predicate::str::contains("code sent").not());
}

#[test]
fn test_timer_reset_zeroes_state() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let state = temp_dir.path().join("otp_state.json");
    fs::write(&state, r#"{ "login:remaining": "12", "login:attempts": "4" }"#)
        .expect("Failed to write state file");

    otp_input()
        .arg("--state")
        .arg(&state)
        .args(["timer", "reset", "--key", "login"])
        .assert()
        .success();

    otp_input()
        .arg("--state")
        .arg(&state)
        .args(["timer", "status", "--key", "login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining: 0"))
        .stdout(predicate::str::contains("attempts: 0"));
}

#[test]
fn test_check_reports_completeness() {
    otp_input()
        .args(["check", "123-456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1 2 3 4 5 6]"))
        .stdout(predicate::str::contains("complete"));

    otp_input()
        .args(["check", "12"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("incomplete"));
}

#[test]
fn test_zero_length_config_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = write_config(temp_dir.path(), r#"{ "length": 0 }"#);
    otp_input()
        .arg("--config")
        .arg(&config)
        .arg("run")
        .write_stdin("")
        .assert()
        .failure();
}

//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary directory,
//! so config files never touch the real user directory.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Run a CLI command with `stdin` piped in and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomocycle"))
        .args(args)
        .env("HOME", home)
        .env_remove("POMOCYCLE_ENV")
        .env_remove("POMOCYCLE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

#[test]
fn test_table() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["table"], "");
    assert_eq!(code, 0, "table failed");
    assert!(stdout.contains("work"));
    assert!(stdout.contains("25:00"));
    assert!(stdout.contains("long_break"));
    assert!(stdout.contains("60:00"));
    assert!(stdout.contains("cycles per session: 4"));
}

#[test]
fn test_status_medium() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["status", "--preset", "medium"], "");
    assert_eq!(code, 0, "status failed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["preset"], "medium");
    assert_eq!(snapshot["mode"], "work");
    assert_eq!(snapshot["cycle_index"], 1);
    assert_eq!(snapshot["remaining_secs"], 45 * 60);
    assert_eq!(snapshot["running"], false);
}

#[test]
fn test_status_rejects_unknown_preset() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["status", "--preset", "slow"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "timer.default_preset", "medium"], "");
    assert_eq!(code, 0, "config set failed");
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timer.default_preset"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "medium");

    // The default preset now drives `status`.
    let (stdout, _, _) = run_cli(home.path(), &["status"], "");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["remaining_secs"], 45 * 60);

    assert!(home.path().join(".config/pomocycle/config.toml").exists());
}

#[test]
fn test_config_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "timer.tick_interval_ms", "0"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(home.path(), &["config", "get", "timer.nope"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_run_select_preset_and_status() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["run"], "m\nstatus\nq\n");
    assert_eq!(code, 0, "run failed");
    assert!(stdout.contains("25:00 | Work Session | [#---] Cycle 1 of 4"));
    assert!(stdout.contains("45:00 | Work Session"));
    assert!(stdout.contains("\"preset\": \"medium\""));
}

#[test]
fn test_run_json_events() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["run", "--auto-start", "--json", "--interval-ms", "60000"],
        "p\nfast\nquit\n",
    );
    assert_eq!(code, 0, "run failed");
    let types: Vec<String> = json_lines(&stdout)
        .iter()
        .filter_map(|event| event["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(types, vec!["TimerStarted", "TimerPaused", "PresetSelected"]);
}

#[test]
fn test_run_unknown_input_keeps_going() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["run"], "jump\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("unknown command: jump"));
}

#[cfg(unix)]
#[test]
fn test_run_exits_on_interrupt_with_stdin_open() {
    let home = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomocycle"))
        .arg("run")
        .env("HOME", home.path())
        .env_remove("POMOCYCLE_ENV")
        .env_remove("POMOCYCLE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to execute CLI command");

    // Keep stdin open and idle for the whole test.
    let _stdin = child.stdin.take().expect("stdin is piped");

    // The initial status line is printed before the input loop starts.
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout is piped"));
    let mut first = String::new();
    stdout.read_line(&mut first).unwrap();
    assert!(first.contains("25:00 | Work Session"), "got {first:?}");
    std::thread::sleep(Duration::from_millis(300));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("Failed to run kill");
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let exit = loop {
        if let Some(exit) = child.try_wait().unwrap() {
            break exit;
        }
        if Instant::now() >= deadline {
            child.kill().unwrap();
            panic!("run did not exit after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(20));
    };
    assert!(exit.success(), "run exited with {exit:?}");
}

#[test]
fn test_run_fast_interval_reaches_short_break() {
    let home = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomocycle"))
        .args(["run", "--auto-start", "--json", "--interval-ms", "1"])
        .env("HOME", home.path())
        .env_remove("POMOCYCLE_ENV")
        .env_remove("POMOCYCLE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to execute CLI command");

    let mut stdin = child.stdin.take().expect("stdin is piped");
    let stdout = BufReader::new(child.stdout.take().expect("stdout is piped"));

    // 1500 one-millisecond ticks finish the first work period.
    let mut elapsed = None;
    for line in stdout.lines() {
        let line = line.unwrap();
        let Ok(event) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        if event["type"] == "PeriodElapsed" {
            elapsed = Some(event);
            break;
        }
    }

    stdin.write_all(b"quit\n").unwrap();
    drop(stdin);
    let exit = child.wait().unwrap();
    assert!(exit.success());

    let event = elapsed.expect("no PeriodElapsed event before stdout closed");
    assert_eq!(event["from"], "work");
    assert_eq!(event["to"], "short_break");
    assert_eq!(event["cycle_index"], 1);
    assert_eq!(event["session_completed"], false);
}

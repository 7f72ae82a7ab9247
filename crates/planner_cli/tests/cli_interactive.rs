use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_interactive(store_path: &Path, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_planner");

    let mut child = Command::new(exe)
        .env("PLANNER_STORE_PATH", store_path)
        .env("PLANNER_CONFIG_PATH", store_path.with_file_name("config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn interactive_help_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(&dir.path().join("tasks.json"), "help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn interactive_invalid_command_prints_error_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(&dir.path().join("tasks.json"), "nope\nadd \"after error\"\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(stdout.contains("Added task: after error"));
}

#[test]
fn interactive_session_adds_then_suggests() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_interactive(
        &dir.path().join("tasks.json"),
        "add \"Write report\" -p 1\nadd Laundry -p 3\ndelete 2\nnext\nquit\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task: Laundry"));
    assert!(stdout.contains("Next task to do: Write report (Priority: 1, Due: None)"));
}

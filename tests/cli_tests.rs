//! Tests for the out2html binary
//!
//! These run the built executable and check what a shell caller sees:
//! the exit status, stdout and stderr.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Command for the binary reading `charset`, with no env overrides
fn out2html(charset: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_out2html"));
    cmd.env_remove("OUT2HTML_CHARSET")
        .env_remove("OUT2HTML_TITLE")
        .env("RUST_LOG", "warn")
        .args(["-c", charset]);
    cmd
}

/// Run with `input` on stdin
fn run_stdin(mut cmd: Command, input: &[u8]) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_stdin_to_stdout() {
    let mut cmd = out2html("UTF-8");
    cmd.args(["-t", "Piped"]);
    let output = run_stdin(cmd, b"\x1b[1mbold\x1b[0m");

    assert!(output.status.success());
    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.contains("<title>Piped</title>"));
    assert!(html.contains("<span style='font-weight:bold'>bold</span>"));
    assert!(html.ends_with("</html>"));
}

#[test]
fn test_files_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.html");
    fs::write(&input, "\x1b[32mok\x1b[0m").unwrap();

    let status = out2html("UTF-8")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<span style='color:green'>ok</span>"));
}

#[test]
fn test_indexed_color_out_of_range_exits_nonzero() {
    let output = run_stdin(out2html("UTF-8"), b"kept\x1b[38;5;9mlost");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid color code element: 9"));
    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.ends_with("\nkept"));
}

#[test]
fn test_decode_error_exits_nonzero() {
    let output = run_stdin(out2html("US-ASCII"), b"caf\xe9");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("US-ASCII"));
}

#[test]
fn test_missing_input_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = out2html("UTF-8")
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
}

#[test]
fn test_unknown_charset_exits_nonzero() {
    let output = out2html("klingon").output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

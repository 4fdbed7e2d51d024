//! Exit status and argv as seen from the launcher

use crate::common::{run, stderr_of, stdout_of};

#[test]
fn no_arguments_exits_zero_silently() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn arguments_after_program_name_reach_main_in_order() {
    let output = run(&["echo", "a", "b", "c d", ""]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "a\nb\nc d\n\n");
}

#[test]
fn returned_code_becomes_exit_status() {
    for code in ["0", "3", "42", "255"] {
        let output = run(&["exit", code]);
        assert_eq!(output.status.code(), code.parse::<i32>().ok(), "exit {code}");
        assert!(output.stderr.is_empty());
    }
}

#[test]
fn error_exits_one_with_single_stderr_line() {
    let output = run(&["fail", "tenant", "not", "found"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_of(&output), "tenant not found\n");
    assert!(output.stdout.is_empty());
}

#[test]
fn bad_exit_code_is_reported_as_failure() {
    let output = run(&["exit", "soon"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_of(&output), "invalid exit code: soon\n");
}

#[test]
fn unknown_command_is_reported_as_failure() {
    let output = run(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_of(&output), "unknown command: frobnicate\n");
}

#[test]
fn panic_exits_one_with_message_only() {
    let output = run(&["panic", "index", "out", "of", "range"]);
    assert_eq!(output.status.code(), Some(1));
    // No "thread 'main' panicked at" preamble, no backtrace hint.
    assert_eq!(stderr_of(&output), "index out of range\n");
}

#[test]
fn interrupted_main_exits_130_silently() {
    let output = run(&["interrupt", "extra", "args"]);
    assert_eq!(output.status.code(), Some(130));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

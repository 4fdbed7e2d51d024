//! Shared test utilities
//!
//! Helpers for launching the probe script the way an external runner would.

#![allow(dead_code)]

use std::process::{Command, Output, Stdio};

/// Path to the probe binary built for this test run.
pub const PROBE: &str = env!("CARGO_BIN_EXE_scriptrun-probe");

/// A probe command with a clean log filter so stderr carries only the
/// script's own diagnostic line.
pub fn probe(args: &[&str]) -> Command {
    let mut cmd = Command::new(PROBE);
    cmd.args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Run the probe to completion.
pub fn run(args: &[&str]) -> Output {
    probe(args).output().expect("failed to spawn probe")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

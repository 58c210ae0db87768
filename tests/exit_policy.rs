//! `ErrorHandling::Exit` terminates the process, so each case re-runs this
//! test binary with a marker in the environment and checks the child's status.
use std::env;
use std::process::{Command, ExitStatus};

use clap::Arg;
use cmdset::{CmdSet, EXIT_USAGE, Error, ErrorHandling};

const MARKER: &str = "CMDSET_EXIT_CASE";

/// Returned by the child if the policy failed to end the process.
const NOT_EXITED: i32 = 99;

fn set() -> CmdSet<Vec<u8>> {
    let mut set = CmdSet::with_output(Vec::new()).program("X");
    set.add("does a", clap::Command::new("a").arg(Arg::new("av").long("av")), false);
    set
}

fn case_args(case: &str) -> &'static [&'static str] {
    match case {
        "EMPTY" => &[],
        "NO_MATCH" => &["foo"],
        "EXTRA_ARGS" => &["a", "b"],
        "HELP" => &["-HeLP"],
        _ => panic!("unknown case {case}"),
    }
}

fn run_child(test: &str, case: &str) -> ExitStatus {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(MARKER, case)
        .output()
        .expect("spawn test binary")
        .status
}

/// Runs the child side when the marker is set. Never returns in that case.
fn child_side() {
    if let Ok(case) = env::var(MARKER) {
        let _ = set().parse(case_args(&case).iter().copied(), ErrorHandling::Exit);
        std::process::exit(NOT_EXITED);
    }
}

#[test]
fn exit_on_input_errors() {
    child_side();
    for case in ["EMPTY", "NO_MATCH", "EXTRA_ARGS"] {
        let status = run_child("exit_on_input_errors", case);
        assert_eq!(status.code(), Some(EXIT_USAGE), "case {case}");
    }
}

#[test]
fn exit_on_help_is_success() {
    child_side();
    let status = run_child("exit_on_help_is_success", "HELP");
    assert_eq!(status.code(), Some(0));
}

#[test]
fn continue_returns_same_errors() {
    for case in ["EMPTY", "NO_MATCH", "EXTRA_ARGS"] {
        assert!(
            set()
                .parse(case_args(case).iter().copied(), ErrorHandling::Continue)
                .is_err(),
            "case {case}"
        );
    }
    let err = set()
        .parse(case_args("HELP").iter().copied(), ErrorHandling::Continue)
        .unwrap_err();
    assert!(matches!(err, Error::Help));
}

#[test]
fn option_errors_bypass_exit_policy() {
    let err = set()
        .parse(["a", "--nope"], ErrorHandling::Exit)
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(err.exit_code(), EXIT_USAGE);
}

/// Output formatting: plain text or JSON, selected by the shared `--json` flag.
use std::io::Write;

use clap::ArgMatches;
use cmdset::CmdSet;
use serde::Serialize;

use super::args::JSON;
use crate::types::{ErrorOutput, GreetingOutput, VersionOutput};

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCtx {
    pub json: bool,
}

impl OutputCtx {
    /// Construct from a command's parsed values.
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let json = matches
            .try_get_one::<bool>(JSON)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);
        Self { json }
    }
}

/// Whether the error for `subcommand` should be written as JSON.
///
/// Only a `--json` that the subcommand's parser accepted counts; a
/// `--json` swallowed as a positional name does not.
#[must_use]
pub fn json_requested<W: Write>(set: &CmdSet<W>, subcommand: Option<&str>) -> bool {
    subcommand
        .and_then(|name| set.get(name))
        .and_then(|cmd| cmd.matches())
        .is_some_and(|matches| OutputCtx::from_matches(matches).json)
}

// --- Greet ---

/// Write greetings to stdout.
pub fn write_greetings(greetings: &[GreetingOutput], ctx: OutputCtx) {
    if ctx.json {
        print_json(greetings);
        return;
    }
    for g in greetings {
        println!("{}", g.message);
    }
}

// --- Version ---

/// Write the program version to stdout.
pub fn write_version(version: &VersionOutput, ctx: OutputCtx) {
    if ctx.json {
        print_json(version);
    } else {
        println!("{} {}", version.name, version.version);
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! cmdset — demo binary routing `greet` and `version` through a `CmdSet`.

mod cli;
mod commands;
mod types;

use cmdset::{CmdSet, Error, ErrorHandling};
use tracing_subscriber::EnvFilter;

use cli::{json_requested, write_error};
use types::ErrorOutput;

fn main() {
    init_tracing();

    let mut set = CmdSet::new();
    commands::register(&mut set);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let subcommand = args.first().cloned();

    match set.dispatch(args, ErrorHandling::Exit) {
        Ok(()) => {}
        // clap has already printed its own diagnostic.
        Err(err @ Error::Parse(_)) => std::process::exit(err.exit_code()),
        Err(err) => {
            let json = json_requested(&set, subcommand.as_deref());
            write_error(&ErrorOutput::from_error(&err), json);
            std::process::exit(err.exit_code());
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

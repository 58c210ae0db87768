#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! cmdset — register named subcommands, each with its own clap parser,
//! and dispatch process arguments to them.
//!
//! ```no_run
//! use clap::{Arg, Command};
//! use cmdset::{Cmd, CmdSet, ErrorHandling};
//!
//! let mut set = CmdSet::new();
//! set.add_handler(
//!     "prints a greeting",
//!     Command::new("greet").arg(Arg::new("type").long("type")),
//!     true,
//!     |cmd: &Cmd| -> anyhow::Result<()> {
//!         println!("hello {:?}", cmd.args());
//!         Ok(())
//!     },
//! );
//! let _ = set.dispatch_env(ErrorHandling::Exit);
//! ```

pub mod cmd;

pub use cmd::{Cmd, CmdSet, EXIT_FAILURE, EXIT_USAGE, Error, ErrorHandling, Handler};

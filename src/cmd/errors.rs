/// Errors surfaced while resolving, parsing and dispatching subcommands.
use thiserror::Error;

/// Exit code used for every recoverable input error.
pub const EXIT_USAGE: i32 = 2;

/// Exit code used when a handler fails.
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can occur while routing arguments to a subcommand.
///
/// Registration faults (empty or duplicate names) are not represented here:
/// they are programming errors and panic at the call site.
#[derive(Debug, Error)]
pub enum Error {
    /// The argument list was empty.
    #[error("subcommand not specified")]
    NotSpecified,

    /// The first argument asked for help (`h`, `-h`, `--help`, `HELP`, ...).
    #[error("help requested")]
    Help,

    /// No registered subcommand matched the first argument.
    #[error("invalid subcommand \"{name}\"")]
    Unknown {
        /// The offending token.
        name: String,
    },

    /// Positional arguments were left over for a command that does not take any.
    #[error("arguments not supported - [{}]", args.join(" "))]
    UnexpectedArgs {
        /// Name of the matched subcommand.
        command: String,
        /// The leftover tokens.
        args: Vec<String>,
    },

    /// The subcommand's option parser rejected its arguments.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// The matched subcommand was registered without a handler.
    #[error("subcommand \"{command}\" has no handler")]
    NoHandler {
        /// Name of the matched subcommand.
        command: String,
    },

    /// The subcommand's handler failed.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl Error {
    /// Return the process exit code for this error.
    ///
    /// Help requests exit successfully; option-parser errors keep clap's
    /// own code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Help => 0,
            Self::Parse(err) => err.exit_code(),
            Self::Handler(_) => EXIT_FAILURE,
            Self::NotSpecified
            | Self::Unknown { .. }
            | Self::UnexpectedArgs { .. }
            | Self::NoHandler { .. } => EXIT_USAGE,
        }
    }

    /// Machine-readable identifier (`snake_case`) for structured output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotSpecified => "subcommand_not_specified",
            Self::Help => "help_requested",
            Self::Unknown { .. } => "unknown_subcommand",
            Self::UnexpectedArgs { .. } => "unexpected_arguments",
            Self::Parse(_) => "invalid_options",
            Self::NoHandler { .. } => "no_handler",
            Self::Handler(_) => "handler_failed",
        }
    }

    /// Whether this is the help-requested condition rather than a real failure.
    #[must_use]
    pub fn is_help(&self) -> bool {
        match self {
            Self::Help => true,
            Self::Parse(err) => err.exit_code() == 0,
            _ => false,
        }
    }
}

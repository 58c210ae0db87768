/// Option parsers for the demo subcommands, via clap derive.
///
/// Each struct becomes the `clap::Command` registered with the set; the
/// handler reads its values back with `FromArgMatches`.
use clap::{Arg, ArgAction, Parser, ValueEnum};

/// Id of the `--json` flag shared by every subcommand.
pub const JSON: &str = "json";

/// The shared `--json` flag, attached to every command through `CmdSet::visit`.
#[must_use]
pub fn json_flag() -> Arg {
    Arg::new(JSON)
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Write output as JSON")
}

/// Arguments for `cmdset greet [NAME]...`.
#[derive(Debug, Parser)]
#[command(name = "greet", about = "Greet everyone named on the command line")]
pub struct GreetArgs {
    /// Which greeting to use.
    #[arg(long = "type", value_enum, value_name = "TYPE", default_value_t = GreetingKind::Hello)]
    pub kind: GreetingKind,
}

/// Greeting variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum GreetingKind {
    /// "Hi, <name>!"
    Hi,
    /// "Hello, <name>!"
    #[default]
    Hello,
}

impl GreetingKind {
    /// The word used at the start of the greeting.
    #[must_use]
    pub fn word(self) -> &'static str {
        match self {
            Self::Hi => "Hi",
            Self::Hello => "Hello",
        }
    }
}

/// Arguments for `cmdset version`.
#[derive(Debug, Parser)]
#[command(name = "version", about = "Print the program version")]
pub struct VersionArgs {}

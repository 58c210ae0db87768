/// CLI layer: subcommand option parsers and output formatting.
pub mod args;
pub mod output;

pub use args::{GreetArgs, GreetingKind, VersionArgs, json_flag};
pub use output::{OutputCtx, json_requested, write_error};

/// Subcommand registry: each command owns a clap parser; the set routes
/// raw arguments to the right one.
pub mod command;
pub mod errors;
pub mod handler;
pub mod policy;
pub mod set;

pub use command::{Cmd, EXTRA_ARGS};
pub use errors::{EXIT_FAILURE, EXIT_USAGE, Error};
pub use handler::Handler;
pub use policy::ErrorHandling;
pub use set::CmdSet;

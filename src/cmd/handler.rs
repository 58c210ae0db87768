/// Handlers invoked by [`CmdSet::dispatch`](super::CmdSet::dispatch).
use super::command::Cmd;

/// Something that can run a parsed subcommand.
///
/// Implement it on a type to carry state into the handler, or pass any
/// `Fn(&Cmd) -> anyhow::Result<()>` directly.
pub trait Handler {
    /// Run the command. `cmd` carries the parsed option values.
    ///
    /// # Errors
    ///
    /// Whatever the handler reports; it is surfaced as
    /// [`Error::Handler`](super::Error::Handler).
    fn handle(&self, cmd: &Cmd) -> anyhow::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Cmd) -> anyhow::Result<()>,
{
    fn handle(&self, cmd: &Cmd) -> anyhow::Result<()> {
        self(cmd)
    }
}

/// `greet` command: print a greeting for every name given.
use anyhow::Context;
use clap::FromArgMatches;
use cmdset::Cmd;

use crate::cli::output::write_greetings;
use crate::cli::{GreetArgs, GreetingKind, OutputCtx};
use crate::types::GreetingOutput;

/// Greeted when no name is given.
const DEFAULT_NAME: &str = "world";

/// Run `cmdset greet`.
///
/// # Errors
///
/// Returns an error if the command was not parsed or its values do not
/// match `GreetArgs`.
pub fn run(cmd: &Cmd) -> anyhow::Result<()> {
    let matches = cmd.matches().context("greet was run before parsing")?;
    let args = GreetArgs::from_arg_matches(matches)?;
    let ctx = OutputCtx::from_matches(matches);

    let greetings = greetings(args.kind, &cmd.args());
    write_greetings(&greetings, ctx);
    Ok(())
}

/// Build one greeting per name, or a single one for [`DEFAULT_NAME`].
fn greetings<S: AsRef<str>>(kind: GreetingKind, names: &[S]) -> Vec<GreetingOutput> {
    if names.is_empty() {
        return vec![greeting(kind, DEFAULT_NAME)];
    }
    names
        .iter()
        .map(|name| greeting(kind, name.as_ref()))
        .collect()
}

fn greeting(kind: GreetingKind, name: &str) -> GreetingOutput {
    GreetingOutput {
        name: name.to_owned(),
        message: format!("{}, {name}!", kind.word()),
    }
}

/// `version` command: print the package name and version.
use anyhow::Context;
use cmdset::Cmd;

use crate::cli::OutputCtx;
use crate::cli::output::write_version;
use crate::types::VersionOutput;

/// Run `cmdset version`.
///
/// # Errors
///
/// Returns an error if the command was run before parsing.
pub fn run(cmd: &Cmd) -> anyhow::Result<()> {
    let matches = cmd.matches().context("version was run before parsing")?;
    let version = VersionOutput {
        name: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    };
    write_version(&version, OutputCtx::from_matches(matches));
    Ok(())
}

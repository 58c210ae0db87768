/// Demo subcommands and their registration with the set.
pub mod greet;
pub mod version;

use std::io::Write;

use clap::CommandFactory;
use cmdset::CmdSet;

use crate::cli::{GreetArgs, VersionArgs, json_flag};

/// Register every demo command and attach the shared `--json` flag.
pub fn register<W: Write>(set: &mut CmdSet<W>) {
    set.add_handler(
        "greet the given names",
        GreetArgs::command(),
        true,
        greet::run,
    );
    set.add_handler(
        "print the program version",
        VersionArgs::command(),
        false,
        version::run,
    );
    set.visit(|cmd| cmd.update_command(|command| command.arg(json_flag())));
}

#[cfg(test)]
mod tests {
    use cmdset::{Error, ErrorHandling};

    use super::*;

    fn set() -> CmdSet<Vec<u8>> {
        let mut set = CmdSet::with_output(Vec::new()).program("cmdset");
        register(&mut set);
        set
    }

    #[test]
    fn test_usage_lists_demo_commands() {
        assert_eq!(
            set().render_usage(),
            "available subcommands for cmdset:\n\
             \tgreet   - greet the given names\n\
             \tversion - print the program version\n\
             use \"<subcommand> --help\" for available options of the specific command"
        );
    }

    #[test]
    fn test_every_command_takes_json() {
        let mut set = set();
        let cmd = set.parse(["version", "--json"], ErrorHandling::Continue).unwrap();
        assert!(cmd.matches().unwrap().get_flag(crate::cli::args::JSON));

        let cmd = set
            .parse(["greet", "--json", "--type", "hi", "ann"], ErrorHandling::Continue)
            .unwrap();
        assert!(cmd.matches().unwrap().get_flag(crate::cli::args::JSON));
        assert_eq!(cmd.args(), vec!["ann"]);
    }

    #[test]
    fn test_version_rejects_arguments() {
        let mut set = set();
        let err = set.parse(["version", "now"], ErrorHandling::Continue).unwrap_err();
        assert!(matches!(err, Error::UnexpectedArgs { .. }));
    }

    #[test]
    fn test_dispatch_runs_demo_handlers() {
        let mut set = set();
        set.dispatch(["greet", "ann", "bob"], ErrorHandling::Continue)
            .unwrap();
        set.dispatch(["VERSION"], ErrorHandling::Continue).unwrap();
    }
}

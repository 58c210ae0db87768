/// A single registered subcommand: its clap parser, description and handler.
use std::fmt;

use clap::{Arg, ArgAction, ArgMatches, Command};

use super::handler::Handler;

/// Id of the trailing positional that collects leftover arguments.
pub const EXTRA_ARGS: &str = "extra-args";

/// A subcommand with its own option parser.
///
/// Created by [`CmdSet::add`](super::CmdSet::add) and owned by the set.
pub struct Cmd {
    name: String,
    info: String,
    /// The parser as registered, plus any visitor updates.
    command: Command,
    /// `command` with the leftover collector appended, used for parsing.
    parser: Command,
    /// Id of the positional whose values are the leftovers.
    leftovers: String,
    allow_args: bool,
    handler: Option<Box<dyn Handler>>,
    matches: Option<ArgMatches>,
}

impl Cmd {
    pub(crate) fn new(
        info: String,
        command: Command,
        allow_args: bool,
        handler: Option<Box<dyn Handler>>,
    ) -> Self {
        let name = command.get_name().to_owned();
        let (parser, leftovers) = build_parser(&command, allow_args);
        Self {
            name,
            info,
            command,
            parser,
            leftovers,
            allow_args,
            handler,
            matches: None,
        }
    }

    /// Subcommand name, taken from the clap command.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown in the set's usage.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Whether leftover positional arguments are accepted.
    #[must_use]
    pub fn allow_args(&self) -> bool {
        self.allow_args
    }

    /// Whether a handler was registered.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// The option parser as registered.
    #[must_use]
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Rebuild the option parser, e.g. to attach options shared by every command.
    ///
    /// The leftover collector is re-attached afterwards, so it stays the
    /// last positional.
    ///
    /// # Panics
    ///
    /// Same rules as registration: a positional taking multiple values must
    /// be the last one.
    pub fn update_command(&mut self, f: impl FnOnce(Command) -> Command) {
        let command = std::mem::take(&mut self.command);
        self.command = f(command);
        let (parser, leftovers) = build_parser(&self.command, self.allow_args);
        self.parser = parser;
        self.leftovers = leftovers;
        self.matches = None;
    }

    /// Values from the last successful parse, if any.
    #[must_use]
    pub fn matches(&self) -> Option<&ArgMatches> {
        self.matches.as_ref()
    }

    /// Positional arguments left over after option parsing.
    ///
    /// When the command ends in its own multi-valued positional, that
    /// positional's values are the leftovers.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.matches
            .as_ref()
            .and_then(|m| m.try_get_raw(&self.leftovers).ok().flatten())
            .map(|values| {
                values
                    .map(|v| v.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Full help text of the option parser.
    pub fn render_help(&mut self) -> String {
        self.parser.render_help().to_string()
    }

    pub(crate) fn handler(&self) -> Option<&dyn Handler> {
        self.handler.as_deref()
    }

    /// Parse `args` (without the subcommand token) and keep the matches.
    ///
    /// A failed parse clears the matches of the previous one.
    pub(crate) fn parse<I, T>(&mut self, args: I) -> Result<(), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.matches = None;
        let argv = std::iter::once(self.name.clone()).chain(args.into_iter().map(Into::into));
        self.matches = Some(self.parser.try_get_matches_from_mut(argv)?);
        Ok(())
    }
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmd")
            .field("name", &self.name)
            .field("info", &self.info)
            .field("allow_args", &self.allow_args)
            .field("leftovers", &self.leftovers)
            .field("has_handler", &self.has_handler())
            .finish_non_exhaustive()
    }
}

/// Whether `arg` swallows every remaining positional token.
fn takes_tail(arg: &Arg) -> bool {
    arg.is_trailing_var_arg_set()
        || arg.is_last_set()
        || matches!(arg.get_action(), ArgAction::Append)
        || arg.get_num_args().is_some_and(|range| range.max_values() > 1)
}

/// Pick where leftovers come from and build the parser that collects them.
///
/// A command ending in a multi-valued positional keeps it as the collector.
/// Otherwise a hidden-when-rejected `ARGS` positional is appended.
///
/// # Panics
///
/// Panics if a multi-valued positional is followed by another positional,
/// since no leftover collector can be placed after it.
fn build_parser(command: &Command, allow_args: bool) -> (Command, String) {
    match command.get_positionals().last() {
        Some(last) if takes_tail(last) => {
            return (command.clone(), last.get_id().as_str().to_owned());
        }
        _ => {}
    }

    if let Some(arg) = command.get_positionals().find(|arg| takes_tail(arg)) {
        panic!(
            "invalid positionals for command {:?}: {:?} takes multiple values but is not last",
            command.get_name(),
            arg.get_id().as_str()
        );
    }

    let parser = command.clone().arg(
        Arg::new(EXTRA_ARGS)
            .value_name("ARGS")
            .num_args(1..)
            .action(ArgAction::Append)
            .trailing_var_arg(true)
            .hide(!allow_args),
    );
    (parser, EXTRA_ARGS.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(allow_args: bool) -> Cmd {
        let command = Command::new("a").arg(Arg::new("av").long("av"));
        Cmd::new("does a".to_owned(), command, allow_args, None)
    }

    #[test]
    fn test_name_from_command() {
        let c = cmd(false);
        assert_eq!(c.name(), "a");
        assert_eq!(c.info(), "does a");
        assert!(!c.has_handler());
        assert!(c.matches().is_none());
    }

    #[test]
    fn test_parse_collects_leftovers() {
        let mut c = cmd(true);
        c.parse(["--av=x", "one", "--two"]).unwrap();
        let matches = c.matches().unwrap();
        assert_eq!(matches.get_one::<String>("av").map(String::as_str), Some("x"));
        assert_eq!(c.args(), vec!["one", "--two"]);
    }

    #[test]
    fn test_parse_without_leftovers() {
        let mut c = cmd(false);
        c.parse(["--av", "x"]).unwrap();
        assert!(c.args().is_empty());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut c = cmd(true);
        let err = c.parse(["--bogus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_update_command_adds_shared_flag() {
        let mut c = cmd(false);
        c.update_command(|command| {
            command.arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
        });
        c.parse(["--json"]).unwrap();
        assert!(c.matches().unwrap().get_flag("json"));
    }

    #[test]
    fn test_update_command_keeps_collector_last() {
        let mut c = cmd(true);
        c.update_command(|command| command.arg(Arg::new("file")));
        c.parse(["f", "rest", "--more"]).unwrap();
        let matches = c.matches().unwrap();
        assert_eq!(matches.get_one::<String>("file").map(String::as_str), Some("f"));
        assert_eq!(c.args(), vec!["rest", "--more"]);
    }

    #[test]
    fn test_multi_valued_positional_collects_leftovers() {
        let command = Command::new("cp").arg(Arg::new("files").num_args(1..));
        let mut c = Cmd::new("copies".to_owned(), command, true, None);
        c.parse(["x", "y"]).unwrap();
        assert_eq!(c.args(), vec!["x", "y"]);
        assert!(!c.render_help().contains("[ARGS]"));
    }

    #[test]
    #[should_panic(expected = "invalid positionals")]
    fn test_multi_valued_positional_must_be_last() {
        let command = Command::new("mv")
            .arg(Arg::new("src").num_args(1..))
            .arg(Arg::new("dst").required(true));
        let _ = Cmd::new(String::new(), command, true, None);
    }

    #[test]
    fn test_failed_parse_clears_matches() {
        let mut c = cmd(true);
        c.parse(["--av=1", "keep"]).unwrap();
        assert_eq!(c.args(), vec!["keep"]);
        assert!(c.parse(["--bogus"]).is_err());
        assert!(c.matches().is_none());
        assert!(c.args().is_empty());
    }

    #[test]
    fn test_help_hides_collector_when_disallowed() {
        assert!(!cmd(false).render_help().contains("[ARGS]"));
        assert!(cmd(true).render_help().contains("[ARGS]"));
    }
}

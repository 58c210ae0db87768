/// The subcommand registry: registration, usage, resolution, parsing, dispatch.
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Stderr, Write};
use std::path::Path;

use clap::Command;
use tracing::{debug, warn};

use super::command::Cmd;
use super::errors::Error;
use super::handler::Handler;
use super::policy::ErrorHandling;

/// A set of named subcommands, each with its own option parser.
///
/// Usage text is written to `W` (standard error unless built with
/// [`CmdSet::with_output`]).
pub struct CmdSet<W = Stderr> {
    commands: BTreeMap<String, Cmd>,
    max_name_len: usize,
    program: String,
    output: W,
}

impl CmdSet {
    /// An empty set printing usage to standard error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(io::stderr())
    }
}

impl Default for CmdSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> CmdSet<W> {
    /// An empty set printing usage to `output`.
    #[must_use]
    pub fn with_output(output: W) -> Self {
        Self {
            commands: BTreeMap::new(),
            max_name_len: 0,
            program: program_name(),
            output,
        }
    }

    /// Override the program name shown in the usage header.
    #[must_use]
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = name.into();
        self
    }

    /// Register a subcommand without a handler. Its name is `command.get_name()`.
    ///
    /// `allow_args` controls whether positional arguments may be left over
    /// after option parsing.
    ///
    /// # Panics
    ///
    /// Panics if the name is empty or already registered (compared
    /// case-insensitively).
    pub fn add(
        &mut self,
        info: impl Into<String>,
        command: Command,
        allow_args: bool,
    ) -> &mut Cmd {
        self.insert(Cmd::new(info.into(), command, allow_args, None))
    }

    /// Register a subcommand whose `handler` is run by [`CmdSet::dispatch`].
    ///
    /// # Panics
    ///
    /// Same as [`CmdSet::add`].
    pub fn add_handler(
        &mut self,
        info: impl Into<String>,
        command: Command,
        allow_args: bool,
        handler: impl Handler + 'static,
    ) -> &mut Cmd {
        let handler: Box<dyn Handler> = Box::new(handler);
        self.insert(Cmd::new(info.into(), command, allow_args, Some(handler)))
    }

    fn insert(&mut self, cmd: Cmd) -> &mut Cmd {
        let name = cmd.name().to_owned();
        assert!(
            !name.is_empty() && self.find(&name).is_none(),
            "invalid command name {name:?}"
        );

        self.max_name_len = self.max_name_len.max(name.chars().count());
        debug!(command = %name, allow_args = cmd.allow_args(), "registered subcommand");
        self.commands.entry(name).or_insert(cmd)
    }

    /// Run `f` on every registered command, e.g. to attach shared options.
    pub fn visit(&mut self, mut f: impl FnMut(&mut Cmd)) {
        for cmd in self.commands.values_mut() {
            f(cmd);
        }
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Length of the longest registered name, used to pad usage lines.
    #[must_use]
    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    /// Look up a command by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cmd> {
        self.find(name).and_then(|key| self.commands.get(key))
    }

    /// The usage sink.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the set, returning the usage sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Usage text listing every command, sorted by name. No trailing newline.
    #[must_use]
    pub fn render_usage(&self) -> String {
        let mut usage = format!("available subcommands for {}:\n", self.program);
        let width = self.max_name_len;
        for (name, cmd) in &self.commands {
            let _ = writeln!(usage, "\t{name:<width$} - {}", cmd.info());
        }
        usage.push_str("use \"<subcommand> --help\" for available options of the specific command");
        usage
    }

    /// Write [`CmdSet::render_usage`] to the sink.
    pub fn print_usage(&mut self) {
        let usage = self.render_usage();
        write_sink(&mut self.output, &usage);
    }

    /// Find the command named by `args[0]`.
    ///
    /// Usage is printed before any error is returned.
    ///
    /// # Errors
    ///
    /// [`Error::NotSpecified`] for an empty list, [`Error::Help`] when the
    /// first token is a help request, [`Error::Unknown`] when nothing matches.
    pub fn resolve<I, T>(&mut self, args: I) -> Result<&Cmd, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let first: Option<String> = args.into_iter().next().map(Into::into);
        match self.lookup(first.as_deref()) {
            Ok(key) => self.commands.get(&key).ok_or(Error::Unknown { name: key }),
            Err(err) => {
                self.print_usage();
                Err(err)
            }
        }
    }

    /// [`CmdSet::resolve`] over the process arguments, without the program name.
    ///
    /// # Errors
    ///
    /// Same as [`CmdSet::resolve`].
    pub fn resolve_env(&mut self) -> Result<&Cmd, Error> {
        self.resolve(std::env::args().skip(1))
    }

    /// Resolve the command from `args[0]` and parse its options from `args[1..]`.
    ///
    /// On success the returned command holds the parsed values, see
    /// [`Cmd::matches`] and [`Cmd::args`].
    ///
    /// # Errors
    ///
    /// Resolution errors and [`Error::UnexpectedArgs`] go through `policy`.
    /// [`Error::Parse`] is returned as is after clap prints its own diagnostic.
    ///
    /// # Panics
    ///
    /// Under [`ErrorHandling::Abort`], on any error that goes through the policy.
    pub fn parse<I, T>(&mut self, args: I, policy: ErrorHandling) -> Result<&Cmd, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut args = args.into_iter().map(Into::<String>::into);
        let first = args.next();

        let key = match self.lookup(first.as_deref()) {
            Ok(key) => key,
            Err(err) => {
                self.print_usage();
                return Err(policy.apply(err));
            }
        };

        let Self {
            commands, output, ..
        } = self;
        let cmd = commands
            .get_mut(&key)
            .ok_or_else(|| Error::Unknown { name: key.clone() })?;

        if let Err(err) = cmd.parse(args) {
            if let Err(print_err) = err.print() {
                warn!("failed to print parse error: {print_err}");
            }
            return Err(Error::Parse(err));
        }

        if !cmd.allow_args() {
            let extra = cmd.args();
            if !extra.is_empty() {
                write_sink(output, &cmd.render_help());
                let err = Error::UnexpectedArgs {
                    command: key,
                    args: extra,
                };
                return Err(policy.apply(err));
            }
        }

        debug!(command = %key, args = ?cmd.args(), "parsed subcommand");
        Ok(cmd)
    }

    /// [`CmdSet::parse`] over the process arguments, without the program name.
    ///
    /// # Errors
    ///
    /// Same as [`CmdSet::parse`].
    ///
    /// # Panics
    ///
    /// Same as [`CmdSet::parse`].
    pub fn parse_env(&mut self, policy: ErrorHandling) -> Result<&Cmd, Error> {
        self.parse(std::env::args().skip(1), policy)
    }

    /// [`CmdSet::parse`], then run the matched command's handler.
    ///
    /// # Errors
    ///
    /// The parse error if parsing failed (no handler runs),
    /// [`Error::NoHandler`] if the command has none, or the handler's own
    /// error as [`Error::Handler`].
    ///
    /// # Panics
    ///
    /// Same as [`CmdSet::parse`].
    pub fn dispatch<I, T>(&mut self, args: I, policy: ErrorHandling) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let cmd = self.parse(args, policy)?;
        let handler = cmd.handler().ok_or_else(|| Error::NoHandler {
            command: cmd.name().to_owned(),
        })?;
        debug!(command = cmd.name(), "dispatching");
        handler.handle(cmd).map_err(Error::Handler)
    }

    /// [`CmdSet::dispatch`] over the process arguments, without the program name.
    ///
    /// # Errors
    ///
    /// Same as [`CmdSet::dispatch`].
    ///
    /// # Panics
    ///
    /// Same as [`CmdSet::parse`].
    pub fn dispatch_env(&mut self, policy: ErrorHandling) -> Result<(), Error> {
        self.dispatch(std::env::args().skip(1), policy)
    }

    /// Map the first argument to a registered key.
    fn lookup(&self, first: Option<&str>) -> Result<String, Error> {
        let Some(requested) = first else {
            return Err(Error::NotSpecified);
        };
        if is_help(requested) {
            return Err(Error::Help);
        }
        let key = self.find(requested).ok_or_else(|| Error::Unknown {
            name: requested.to_owned(),
        })?;
        debug!(requested, command = key, "resolved subcommand");
        Ok(key.to_owned())
    }

    fn find(&self, name: &str) -> Option<&str> {
        self.commands
            .keys()
            .find(|key| equal_fold(key, name))
            .map(String::as_str)
    }
}

/// Write and flush `text`; failures are logged, never surfaced.
fn write_sink<W: Write>(output: &mut W, text: &str) {
    let written = output
        .write_all(text.as_bytes())
        .and_then(|()| output.flush());
    if let Err(err) = written {
        warn!("failed to write usage: {err}");
    }
}

/// `h` or `help` with any number of leading hyphens, in any case.
fn is_help(token: &str) -> bool {
    let trimmed = token.trim_start_matches('-');
    equal_fold(trimmed, "h") || equal_fold(trimmed, "help")
}

fn equal_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Basename of the running executable as invoked.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

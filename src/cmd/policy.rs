/// Per-call error policy, mirroring the three strategies of an option parser.
use super::errors::Error;

/// How a terminal resolution or argument failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Return the error to the caller.
    #[default]
    Continue,
    /// Terminate the process: code 0 for a help request, [`Error::exit_code`] otherwise.
    Exit,
    /// Escalate into a panic.
    Abort,
}

impl ErrorHandling {
    /// Apply the policy to `err`.
    ///
    /// Only returns under [`ErrorHandling::Continue`], handing the error back
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics with the error message under [`ErrorHandling::Abort`].
    pub(crate) fn apply(self, err: Error) -> Error {
        match self {
            Self::Continue => err,
            Self::Exit => {
                tracing::debug!(code = err.exit_code(), "exiting on error: {err}");
                std::process::exit(err.exit_code())
            }
            Self::Abort => panic!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_returns_error() {
        let err = ErrorHandling::Continue.apply(Error::NotSpecified);
        assert!(matches!(err, Error::NotSpecified));
    }

    #[test]
    #[should_panic(expected = "subcommand not specified")]
    fn test_abort_panics() {
        let _ = ErrorHandling::Abort.apply(Error::NotSpecified);
    }

    #[test]
    fn test_default_is_continue() {
        assert_eq!(ErrorHandling::default(), ErrorHandling::Continue);
    }
}

/// Shared serializable output types for the demo commands.
///
/// These types are what gets written to stdout when `--json` is set.
use serde::{Deserialize, Serialize};

/// One greeting produced by `greet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingOutput {
    /// Who is greeted.
    pub name: String,
    /// The full greeting line (e.g., "Hello, world!").
    pub message: String,
}

/// Program identity printed by `version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionOutput {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Offending tokens, for unknown subcommands and unexpected arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `cmdset::Error`.
    #[must_use]
    pub fn from_error(err: &cmdset::Error) -> Self {
        use cmdset::Error;
        let args = match err {
            Error::Unknown { name } => Some(vec![name.clone()]),
            Error::UnexpectedArgs { args, .. } => Some(args.clone()),
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: format!("{err:#}"),
                args,
            },
        }
    }
}

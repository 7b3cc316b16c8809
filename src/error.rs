use std::io;
use thiserror::Error;

/// Errors reported by the command pipeline.
///
/// None of these abort the interpreter: they are printed to the error stream
/// and the read loop moves on to the next line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// `alias NAME` for a name that was never defined.
    #[error("alias not found")]
    AliasNotFound(String),

    /// `export` called without exactly one `NAME=VALUE` argument.
    #[error("invalid export format")]
    InvalidExport,

    /// `unset` called without any argument.
    #[error("invalid unset format")]
    InvalidUnset,

    /// At least one of the names passed to `unset` was not set.
    #[error("environment variable not present")]
    VariableNotPresent(Vec<String>),

    /// The `>` operator is the last token of the command.
    #[error("redirection error: missing target file")]
    MissingRedirectTarget,

    /// The redirection target could not be created or truncated.
    #[error("redirection error: cannot open {path}: {source}")]
    RedirectOpen { path: String, source: io::Error },

    /// The program could not be found or is not runnable.
    #[error("command not found")]
    CommandNotFound(String),

    /// Creating the child process failed for a reason other than a missing program.
    #[error("fork failed: {0}")]
    Spawn(#[source] io::Error),

    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),

    /// Writing to the interpreter's own output streams failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = ShellError> = std::result::Result<T, E>;

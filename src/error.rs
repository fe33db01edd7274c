use std::io;
use thiserror::Error;

/// Failures of a single command. The `Display` text is the exact message
/// shown to the user.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Neither a builtin nor an executable on the search path.
    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    /// A builtin that requires arguments got none.
    #[error("{builtin}: missing operand")]
    MissingOperand { builtin: &'static str },

    /// `cd` target is missing, is not a directory, or could not be entered.
    #[error("cd: {path}: No such file or directory")]
    NoSuchDirectory { path: String },

    /// A redirection target could not be created or truncated.
    #[error("{command}: {path}: {}", io_reason(.source))]
    RedirectionOpen {
        command: String,
        path: String,
        source: io::Error,
    },

    /// The child process could not be started or waited for.
    #[error("{command}: {}", io_reason(.source))]
    Spawn { command: String, source: io::Error },
}

/// Platform error text without the ` (os error N)` suffix std appends.
pub(crate) fn io_reason(err: &io::Error) -> String {
    let text = err.to_string();
    match text.find(" (os error ") {
        Some(end) => text[..end].to_string(),
        None => text,
    }
}

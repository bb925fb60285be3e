use std::fmt::Display;
use thiserror::Error;

pub const EXIT_USAGE: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_AMBIGUOUS: i32 = 4;
pub const EXIT_IO: i32 = 5;

/// One stderr line plus the process exit code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
}

impl CliError {
    fn with_code(exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::with_code(EXIT_USAGE, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(EXIT_NOT_FOUND, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::with_code(EXIT_AMBIGUOUS, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::with_code(EXIT_IO, message)
    }

    /// History or catalog JSON that parsed but broke a shape rule.
    pub fn corrupted(what: &str, detail: impl Display) -> Self {
        Self::io(format!("{} corrupted: {}", what, detail))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io(format!("JSON output error: {}", e))
    }
}

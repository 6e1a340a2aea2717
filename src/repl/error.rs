//! # Shell Errors
//!
//! Every failure a single command can produce. None of these ends the
//! session: the shell loop prints the message and reads the next line.

use thiserror::Error;

/// Errors surfaced to the user while handling one input line
#[derive(Debug, Error)]
pub enum ShellError {
    /// Bad value in an admin command; the command is dropped
    #[error("{0}")]
    Validation(String),

    /// Malformed request command
    #[error("{0}")]
    Parse(String),

    /// Transport failed before a response stream existed
    #[error("request failed: {source}")]
    Dispatch {
        #[source]
        source: anyhow::Error,
    },

    /// Response body could not be rendered as JSON
    #[error("failed to render response: {0}")]
    Render(String),
}

impl ShellError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn render(message: impl std::fmt::Display) -> Self {
        Self::Render(message.to_string())
    }
}

impl From<anyhow::Error> for ShellError {
    fn from(source: anyhow::Error) -> Self {
        Self::Dispatch { source }
    }
}

// src/errors.rs

use std::error::Error as StdError;
use thiserror::Error;

/// Errors raised inside the course chat client.
///
/// None of these ever reach the conversation as a panic: the submission
/// handler turns transport failures into error messages in the thread, and
/// the remaining variants only surface during start-up.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Network unreachable, body read failure, or a success body that does
    /// not match the expected shape. The payload is shown to the user as-is.
    #[error("{0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    pub fn transport_error(msg: impl Into<String>) -> Self {
        ChatError::Transport(msg.into())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(describe_reqwest_error(&err))
    }
}

/// Flattens a reqwest error and its source chain into one line.
///
/// reqwest's own `Display` stops at "error sending request for url (...)",
/// which hides the part a user can act on (connection refused, dns, ...).
pub fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}

pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_displays_bare_description() {
        let err = ChatError::transport_error("timeout");
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn test_config_error_is_prefixed() {
        let err = ChatError::config_error("course_id is required");
        assert_eq!(err.to_string(), "configuration error: course_id is required");
    }
}

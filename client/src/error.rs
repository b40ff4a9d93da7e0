//! Error types for the todo API client.
//!
//! # Design
//! Every non-2xx response collapses into the single `RequestFailed` variant
//! regardless of whether it is 4xx or 5xx — callers retry by re-issuing the
//! action, so finer distinctions buy nothing. The variant still carries the
//! raw status and body so call sites can log the underlying cause; `Display`
//! renders only the operation's static message.

use std::fmt;

/// The four client operations, used to pick the static failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Toggle,
    Delete,
}

impl Operation {
    /// Static message shown when the server rejects this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch todos",
            Operation::Create => "Failed to add todo",
            Operation::Toggle => "Failed to update todo",
            Operation::Delete => "Failed to delete todo",
        }
    }
}

/// Errors returned by `TodoApi` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a status outside the 2xx range. The status
    /// and body are diagnostics only; they never reach the user.
    RequestFailed {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { operation, .. } => {
                write!(f, "{}", operation.failure_message())
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

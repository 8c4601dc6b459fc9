//! Error types for ecoroute-client
//!
//! Every failure the client can observe while talking to the routing service
//! maps onto one of these variants. Errors are handled where they are detected
//! (search flow, route controller) and turned into user-facing text there.

use std::fmt;

use serde::Deserialize;

/// Error body returned by the routing service on non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Main error type for ecoroute-client operations
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration, parameters or selection state
    InvalidInput(String),

    /// Non-success HTTP status, with the message shown to the user
    HttpError { status: u16, message: String },

    /// Network connectivity issues (connect failures, timeouts)
    NetworkError(String),

    /// A success response whose body does not have the expected shape
    MalformedResponse(String),

    /// A background request task ended without producing a result
    TaskFailed(String),
}

impl Error {
    /// Build an HTTP error from a status and the raw response body.
    ///
    /// The body's `detail` field is used verbatim when present; anything else
    /// (missing field, non-JSON body) falls back to a status-based message.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Error::HttpError { status, message }
    }

    /// Text suitable for the notification presenter
    pub fn user_message(&self) -> String {
        match self {
            Error::HttpError { message, .. } => message.clone(),
            Error::InvalidInput(msg)
            | Error::NetworkError(msg)
            | Error::MalformedResponse(msg)
            | Error::TaskFailed(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
            Error::HttpError { status, message } => {
                write!(f, "HTTP error ({status}): {message}")
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Error::MalformedResponse(msg) => {
                write!(f, "Malformed response: {msg}")
            }
            Error::TaskFailed(msg) => {
                write!(f, "Request task failed: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Error::HttpError {
                status: status.as_u16(),
                message: format!("HTTP error! status: {}", status.as_u16()),
            }
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::TaskFailed(err.to_string())
    }
}

/// Convenience result type for ecoroute-client operations
pub type Result<T> = std::result::Result<T, Error>;

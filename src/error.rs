// Error taxonomy for wordfuzz

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a run before dispatch starts.
#[derive(Debug, Error)]
pub enum FuzzError {
    #[error("Error reading wordlist {}: {source}", .path.display())]
    Wordlist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure of a single request. Counted, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }
        if err.is_connect() {
            return TransportError::Connect(err.to_string());
        }
        if err.is_body() || err.is_decode() {
            return TransportError::Malformed(err.to_string());
        }
        TransportError::Request(err.to_string())
    }
}

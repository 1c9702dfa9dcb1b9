//! Error types for the grid accumulator and the user-info client.
//!
//! # Design
//! Grid validation has a single error kind, `InvalidInputError`, with a
//! `reason` describing which precondition failed. The user-info client has a
//! single error kind too, `UserInfoError`; its variants keep the status code,
//! response body, or underlying cause around for the message.

use thiserror::Error;

/// The cost grid cannot be accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cost grid: {reason}")]
pub struct InvalidInputError {
    pub reason: InvalidInputReason,
}

impl InvalidInputError {
    pub fn new(reason: InvalidInputReason) -> Self {
        Self { reason }
    }
}

impl From<InvalidInputReason> for InvalidInputError {
    fn from(reason: InvalidInputReason) -> Self {
        Self::new(reason)
    }
}

/// Which grid precondition was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputReason {
    #[error("grid has no rows")]
    Empty,

    #[error("first row is empty")]
    EmptyFirstRow,

    /// Row `row` does not have the first row's length.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The cumulative cost at (`row`, `col`) does not fit in an `i64`.
    #[error("cumulative cost overflows at ({row}, {col})")]
    Overflow { row: usize, col: usize },
}

/// Errors returned while fetching a user record.
#[derive(Debug, Error)]
pub enum UserInfoError {
    /// The endpoint answered with something other than 200.
    #[error("API request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API request timed out for mallid: {mall_id}")]
    Timeout { mall_id: String },

    /// Connection, DNS, TLS or protocol failure below HTTP status level.
    #[error("API request failed for mallid {mall_id}: {message}")]
    Transport { mall_id: String, message: String },

    /// The 200 response body was not JSON. `snippet` holds at most
    /// [`crate::client::SNIPPET_CHARS`] characters of it.
    #[error("Failed to decode JSON response for mallid {mall_id}: {message}. Response text: {snippet}...")]
    Decode {
        mall_id: String,
        message: String,
        snippet: String,
    },
}

/// Failure below the HTTP status level, reported by [`crate::transport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// Malformed client configuration. `setting` names the environment variable
/// or command-line flag the bad value came from.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{setting} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { setting: &'static str, value: String },

    #[error("{setting} must not be empty")]
    EmptyBaseUrl { setting: &'static str },
}

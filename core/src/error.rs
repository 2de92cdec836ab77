//! Error types for the todo client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the item does not exist" from "the server returned an unexpected status."
//! All other non-2xx responses land in `Server` with the raw status code and
//! body for debugging. Validation and auth failures carry their own enums so
//! hosts can route them (inline message vs. login flow) without string
//! matching.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods, transports and `TodoApp`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed (connection refused, DNS, I/O).
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server returned 404 — the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 401, 403 or 404.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("malformed response: {0}")]
    Data(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// True for failures that happened on the wire or on the server, as
    /// opposed to locally rejected input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_)
                | ApiError::Timeout
                | ApiError::NotFound
                | ApiError::Server { .. }
                | ApiError::Data(_)
        )
    }
}

/// Input rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("unknown filter {0:?}, expected all, active or completed")]
    InvalidFilter(String),

    #[error("no item at row {0}")]
    UnknownRow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential is stored; the user has to log in first.
    #[error("login required")]
    MissingCredential,

    /// The server rejected the credential (bad login, expired token).
    #[error("credential rejected by server")]
    Rejected,
}

//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a toggle or delete racing
//! another writer is the one failure callers routinely tell apart. All other
//! non-2xx responses land in `HttpError` with the raw status code and body
//! for debugging. `Transport` covers everything the host reports before a
//! status line arrives (refused connection, DNS, timeout).

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `Transport` hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for the addressed todo.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

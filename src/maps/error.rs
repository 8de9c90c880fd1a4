//! Transport error types.

use thiserror::Error;

/// Errors surfaced by the maps API transport.
///
/// These are always reported asynchronously, after the request has been
/// dispatched; the engine turns them into the reload-error event rather
/// than returning them to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Network-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service rejected the instantiation and returned an error body.
    #[error("service errors: {}", .errors.join("; "))]
    Service {
        /// Error messages from the service's `errors` array.
        errors: Vec<String>,
    },

    /// The service replied with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// The error messages to distribute across the local models.
    pub fn messages(&self) -> Vec<String> {
        match self {
            TransportError::Service { errors } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

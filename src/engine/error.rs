//! Engine error types.

use crate::maps::SerializationError;
use thiserror::Error;

/// Errors surfaced synchronously by the engine.
///
/// Everything that happens after a request is dispatched is reported
/// through the reload-error event instead, never by returning an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Required construction parameters are missing or empty.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The current registries cannot be serialized for the configured mode.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

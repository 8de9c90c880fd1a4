//! Registry error types.

use thiserror::Error;

/// Errors raised by the layer/dataview registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A member with this id is already registered.
    #[error("duplicate id in registry: {0}")]
    DuplicateId(String),
}

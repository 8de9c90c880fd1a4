//! Serialization error types.

use thiserror::Error;

/// Errors raised while turning registry state into a wire payload.
///
/// These surface synchronously to the reload caller, before any network
/// activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// A registry member cannot be represented in the chosen wire shape.
    #[error("layer `{id}` cannot be serialized: {reason}")]
    UnsupportedLayer {
        /// Id of the offending layer.
        id: String,
        /// Why the layer cannot be represented.
        reason: String,
    },
}

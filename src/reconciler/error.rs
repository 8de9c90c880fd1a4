//! Reconciliation error types.

use thiserror::Error;

/// Per-entry failures while merging a response into the local models.
///
/// A malformed entry never aborts processing of its siblings; the
/// reconciler records the error on the affected model and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// The response carried no metadata for a registered layer.
    #[error("no metadata returned for layer `{id}` at position {index}")]
    MissingLayerMetadata {
        /// Id of the affected layer.
        id: String,
        /// Registry position the response was correlated against.
        index: usize,
    },

    /// The response carried no usable metadata for a registered dataview.
    #[error("no metadata returned for dataview `{id}`")]
    MissingDataviewMetadata {
        /// Id of the affected dataview.
        id: String,
    },
}

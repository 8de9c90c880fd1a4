//! Model reconciliation.
//!
//! The reconciler is the only component that mutates the layer/dataview
//! registries in response to a network outcome. It correlates response
//! metadata back to the registries (layers by position, dataviews by id),
//! applies derived attributes, and distributes error payloads. Application
//! of a response is idempotent: applying the same response twice leaves the
//! models in the same state as applying it once.

mod error;

pub use error::ReconciliationError;

use serde_json::json;
use tracing::{debug, trace};

use crate::maps::Response;
use crate::model::{Dataviews, LayerGroup, Layers};

/// Merges instantiation outcomes into the local models.
#[derive(Debug, Default)]
pub struct ModelReconciler;

impl ModelReconciler {
    /// Creates a reconciler.
    pub fn new() -> Self {
        Self
    }

    /// Applies a successful instantiation response to the models.
    ///
    /// Layers are updated positionally against the response's layer
    /// metadata; an entry with no metadata records a per-entry error and
    /// does not abort its siblings. Dataviews are updated by id; a dataview
    /// whose source is not `source_id` is skipped unless `force_fetch` is
    /// set, so unrelated widgets keep their last-known result.
    ///
    /// # Returns
    ///
    /// The per-entry errors encountered, empty when every model updated
    /// cleanly.
    pub fn update_models(
        &self,
        layers: &mut Layers,
        dataviews: &mut Dataviews,
        layer_group: &mut LayerGroup,
        response: &Response,
        source_id: &str,
        force_fetch: bool,
    ) -> Vec<ReconciliationError> {
        let mut errors = Vec::new();

        layer_group.apply_instantiation(
            response.layergroup_id().to_string(),
            response.tile_url_templates(),
        );

        for (index, layer) in layers.iter_mut().enumerate() {
            match response.layer_metadata(index) {
                Some(meta) => {
                    layer.apply_instantiation(
                        response.tile_url_template(index),
                        meta.meta.clone().unwrap_or_else(|| json!({})),
                    );
                }
                None => {
                    let error = ReconciliationError::MissingLayerMetadata {
                        id: layer.id().to_string(),
                        index,
                    };
                    layer.set_error(error.to_string());
                    errors.push(error);
                }
            }
        }

        for dataview in dataviews.iter_mut() {
            if !force_fetch && dataview.source() != source_id {
                trace!(
                    dataview = dataview.id(),
                    source = dataview.source(),
                    reload_source = source_id,
                    "skipping unrelated dataview"
                );
                continue;
            }

            match response.dataview_url(dataview.id()) {
                Some(url) => {
                    let result = response
                        .dataview_metadata(dataview.id())
                        .and_then(|meta| meta.result.clone());
                    dataview.apply_instantiation(url, result);
                }
                None => {
                    let error = ReconciliationError::MissingDataviewMetadata {
                        id: dataview.id().to_string(),
                    };
                    dataview.set_error(error.to_string());
                    errors.push(error);
                }
            }
        }

        debug!(
            layergroupid = response.layergroup_id(),
            layer_count = layers.len(),
            error_count = errors.len(),
            "models reconciled"
        );

        errors
    }

    /// Distributes a failed reload's error messages across the models.
    ///
    /// Marks per-entry error state without clearing successful attributes
    /// from a prior cycle.
    pub fn set_errors(
        &self,
        layers: &mut Layers,
        dataviews: &mut Dataviews,
        layer_group: &mut LayerGroup,
        messages: &[String],
    ) {
        let message = messages.join("; ");
        debug!(error = %message, "distributing reload errors across models");

        layer_group.set_error(message.clone());
        for layer in layers.iter_mut() {
            layer.set_error(message.clone());
        }
        for dataview in dataviews.iter_mut() {
            dataview.set_error(message.clone());
        }
    }
}

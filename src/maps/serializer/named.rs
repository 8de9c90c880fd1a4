//! Named-map payload shape.
//!
//! References a pre-registered server-side template by name; the body binds
//! per-layer visibility plus the dataview definitions the template expects.
//! Only data layers can be bound — a tiled base layer has no counterpart in
//! a template and fails serialization.

use super::{serialize_dataviews, SerializationError};
use crate::model::{Dataviews, LayerKind, Layers};
use serde_json::{json, Value};

/// Serializes registries into the named-map shape.
pub(super) fn serialize(
    template_name: &str,
    layers: &Layers,
    dataviews: &Dataviews,
) -> Result<Value, SerializationError> {
    let mut params = serde_json::Map::new();
    for layer in layers.iter() {
        match layer.kind() {
            LayerKind::Data { .. } => {
                params.insert(layer.id().to_string(), Value::Bool(layer.is_visible()));
            }
            LayerKind::Tiled { .. } => {
                return Err(SerializationError::UnsupportedLayer {
                    id: layer.id().to_string(),
                    reason: "tiled layers cannot be bound to a named-map template".to_string(),
                });
            }
        }
    }

    Ok(json!({
        "template": template_name,
        "params": Value::Object(params),
        "dataviews": serialize_dataviews(dataviews),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;

    #[test]
    fn test_named_payload_binds_visibility() {
        let mut layers = Layers::new();
        layers.add(Layer::data("a", "SELECT 1", "#a {}")).unwrap();
        let mut hidden = Layer::data("b", "SELECT 2", "#b {}");
        hidden.set_visible(false);
        layers.add(hidden).unwrap();

        let payload = serialize("world_borders", &layers, &Dataviews::new()).unwrap();
        assert_eq!(payload["template"], "world_borders");
        assert_eq!(payload["params"]["a"], true);
        assert_eq!(payload["params"]["b"], false);
    }

    #[test]
    fn test_tiled_layer_is_rejected() {
        let mut layers = Layers::new();
        layers.add(Layer::data("a", "SELECT 1", "#a {}")).unwrap();
        layers
            .add(Layer::tiled("base", "https://t/{z}/{x}/{y}.png"))
            .unwrap();

        let err = serialize("world_borders", &layers, &Dataviews::new()).unwrap_err();
        assert_eq!(
            err,
            SerializationError::UnsupportedLayer {
                id: "base".to_string(),
                reason: "tiled layers cannot be bound to a named-map template".to_string(),
            }
        );
    }
}

//! Anonymous-map payload shape.
//!
//! Embeds the full layer and dataview definitions; the service computes and
//! returns a layer group id.

use super::{serialize_dataviews, SerializationError};
use crate::model::{Dataviews, LayerKind, Layers};
use serde_json::{json, Value};

/// CartoCSS version stamped on every data layer's options.
const CARTOCSS_VERSION: &str = "2.1.0";

/// Serializes registries into the anonymous-map shape.
pub(super) fn serialize(
    layers: &Layers,
    dataviews: &Dataviews,
) -> Result<Value, SerializationError> {
    let layer_list: Vec<Value> = layers
        .iter()
        .map(|layer| {
            let options = match layer.kind() {
                LayerKind::Data { sql, cartocss } => json!({
                    "sql": sql,
                    "cartocss": cartocss,
                    "cartocss_version": CARTOCSS_VERSION,
                }),
                LayerKind::Tiled { url_template } => json!({
                    "urlTemplate": url_template,
                }),
            };
            json!({
                "id": layer.id(),
                "type": layer.kind().type_tag(),
                "options": options,
            })
        })
        .collect();

    Ok(json!({
        "layers": layer_list,
        "dataviews": serialize_dataviews(dataviews),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataview, Layer};

    #[test]
    fn test_layer_order_is_preserved() {
        let mut layers = Layers::new();
        layers.add(Layer::tiled("base", "https://t/{z}/{x}/{y}.png")).unwrap();
        layers.add(Layer::data("a", "SELECT 1", "#a {}")).unwrap();
        layers.add(Layer::data("b", "SELECT 2", "#b {}")).unwrap();

        let payload = serialize(&layers, &Dataviews::new()).unwrap();
        let ids: Vec<_> = payload["layers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["base", "a", "b"]);
    }

    #[test]
    fn test_data_layer_options() {
        let mut layers = Layers::new();
        layers
            .add(Layer::data("a", "SELECT * FROM cities", "#a { marker-width: 4; }"))
            .unwrap();

        let payload = serialize(&layers, &Dataviews::new()).unwrap();
        let layer = &payload["layers"][0];
        assert_eq!(layer["type"], "cartodb");
        assert_eq!(layer["options"]["sql"], "SELECT * FROM cities");
        assert_eq!(layer["options"]["cartocss_version"], "2.1.0");
    }

    #[test]
    fn test_tiled_layer_options() {
        let mut layers = Layers::new();
        layers
            .add(Layer::tiled("base", "https://t/{z}/{x}/{y}.png"))
            .unwrap();

        let payload = serialize(&layers, &Dataviews::new()).unwrap();
        let layer = &payload["layers"][0];
        assert_eq!(layer["type"], "tiled");
        assert_eq!(layer["options"]["urlTemplate"], "https://t/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_identical_registries_produce_identical_payloads() {
        let mut layers = Layers::new();
        layers.add(Layer::data("a", "SELECT 1", "#a {}")).unwrap();
        let mut dataviews = Dataviews::new();
        dataviews
            .add(Dataview::histogram("d1", "a", "price", 8))
            .unwrap();

        let first = serialize(&layers, &dataviews).unwrap();
        let second = serialize(&layers, &dataviews).unwrap();
        assert_eq!(first, second);
    }
}

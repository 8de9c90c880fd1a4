//! Payload serializers for the two map instantiation shapes.
//!
//! The serializer variant is resolved once, at engine construction, from
//! the presence of a template name in the settings. Both variants are pure
//! functions of registry state: the same registries always produce the same
//! payload, and registry order is preserved in the payload's layer list so
//! the response can be correlated back index-for-index.

mod anonymous;
mod error;
mod named;

pub use error::SerializationError;

use crate::config::EngineSettings;
use crate::model::{Dataviews, Layers};
use serde_json::Value;

/// The closed set of payload serializers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSerializer {
    /// Embeds the full layer/dataview definitions; the service assigns an id.
    Anonymous,
    /// References a pre-registered template plus parameter bindings.
    Named {
        /// Name of the server-side template.
        template_name: String,
    },
}

impl MapSerializer {
    /// Resolves the serializer variant from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        match &settings.template_name {
            Some(name) => MapSerializer::Named {
                template_name: name.clone(),
            },
            None => MapSerializer::Anonymous,
        }
    }

    /// Serializes the current registries into a wire payload.
    ///
    /// # Errors
    ///
    /// Fails with [`SerializationError::UnsupportedLayer`] when a registry
    /// member cannot be represented in this variant's wire shape. The error
    /// surfaces synchronously, before any network activity.
    pub fn serialize(
        &self,
        layers: &Layers,
        dataviews: &Dataviews,
    ) -> Result<Value, SerializationError> {
        match self {
            MapSerializer::Anonymous => anonymous::serialize(layers, dataviews),
            MapSerializer::Named { template_name } => {
                named::serialize(template_name, layers, dataviews)
            }
        }
    }
}

/// Serializes the shared dataviews section, keyed by dataview id.
fn serialize_dataviews(dataviews: &Dataviews) -> Value {
    use crate::model::DataviewKind;
    use serde_json::json;

    let mut out = serde_json::Map::new();
    for dv in dataviews.iter() {
        let options = match dv.kind() {
            DataviewKind::Formula { column, operation } => {
                json!({"column": column, "operation": operation})
            }
            DataviewKind::Category {
                column,
                aggregation,
            } => json!({"column": column, "aggregation": aggregation}),
            DataviewKind::Histogram { column, bins } => {
                json!({"column": column, "bins": bins})
            }
        };
        out.insert(
            dv.id().to_string(),
            json!({
                "type": dv.kind().type_tag(),
                "source": {"id": dv.source()},
                "options": options,
            }),
        );
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataview;

    #[test]
    fn test_variant_resolution_from_settings() {
        let anonymous = EngineSettings::new("acme", "https://acme.example.com");
        assert_eq!(
            MapSerializer::from_settings(&anonymous),
            MapSerializer::Anonymous
        );

        let named = EngineSettings::new("acme", "https://acme.example.com")
            .with_template_name("world_borders");
        assert_eq!(
            MapSerializer::from_settings(&named),
            MapSerializer::Named {
                template_name: "world_borders".to_string()
            }
        );
    }

    #[test]
    fn test_dataviews_section_is_keyed_by_id() {
        let mut dataviews = Dataviews::new();
        dataviews
            .add(Dataview::formula("d1", "l1", "pop", "sum"))
            .unwrap();

        let section = serialize_dataviews(&dataviews);
        assert_eq!(section["d1"]["type"], "formula");
        assert_eq!(section["d1"]["source"]["id"], "l1");
        assert_eq!(section["d1"]["options"]["column"], "pop");
    }
}

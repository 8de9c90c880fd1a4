//! Layer model.

use serde_json::Value;

/// What a layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// A data layer backed by a SQL query and styled with CartoCSS.
    Data {
        /// SQL query selecting the layer's rows.
        sql: String,
        /// CartoCSS stylesheet applied to the query result.
        cartocss: String,
    },
    /// A tiled base layer fetched from a fixed URL template.
    Tiled {
        /// Tile URL template with `{z}/{x}/{y}` placeholders.
        url_template: String,
    },
}

impl LayerKind {
    /// Wire type tag for this layer kind.
    pub fn type_tag(&self) -> &'static str {
        match self {
            LayerKind::Data { .. } => "cartodb",
            LayerKind::Tiled { .. } => "tiled",
        }
    }
}

/// A single renderable data/style definition shown on a map.
///
/// Created by application code and registered through the engine. The
/// `tile_url_template`, `metadata` and `error` attributes are derived state
/// written only during reconciliation of a server response.
#[derive(Debug, Clone)]
pub struct Layer {
    id: String,
    kind: LayerKind,
    visible: bool,
    tile_url_template: Option<String>,
    metadata: Option<Value>,
    error: Option<String>,
}

impl Layer {
    /// Creates a data layer from a SQL query and a CartoCSS stylesheet.
    pub fn data(id: impl Into<String>, sql: impl Into<String>, cartocss: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Data {
                sql: sql.into(),
                cartocss: cartocss.into(),
            },
            visible: true,
            tile_url_template: None,
            metadata: None,
            error: None,
        }
    }

    /// Creates a tiled base layer from a URL template.
    pub fn tiled(id: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Tiled {
                url_template: url_template.into(),
            },
            visible: true,
            tile_url_template: None,
            metadata: None,
            error: None,
        }
    }

    /// Stable identifier of this layer.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The layer's definition kind.
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Whether the layer is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the layer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Tile URL template assigned by the last successful instantiation.
    pub fn tile_url_template(&self) -> Option<&str> {
        self.tile_url_template.as_deref()
    }

    /// Server metadata returned for this layer by the last instantiation.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Error recorded for this layer by the last reload, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies server-derived attributes. Clears any prior error.
    pub(crate) fn apply_instantiation(&mut self, tile_url_template: String, metadata: Value) {
        self.tile_url_template = Some(tile_url_template);
        self.metadata = Some(metadata);
        self.error = None;
    }

    /// Marks this layer with an error without clearing prior derived state.
    pub(crate) fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_layer_has_cartodb_type_tag() {
        let layer = Layer::data("l1", "SELECT * FROM t", "#layer {}");
        assert_eq!(layer.kind().type_tag(), "cartodb");
        assert!(layer.is_visible());
    }

    #[test]
    fn test_apply_instantiation_clears_error() {
        let mut layer = Layer::data("l1", "SELECT * FROM t", "#layer {}");
        layer.set_error("boom".to_string());
        assert!(layer.error().is_some());

        layer.apply_instantiation("https://tiles/{z}/{x}/{y}.png".to_string(), json!({}));
        assert!(layer.error().is_none());
        assert_eq!(
            layer.tile_url_template(),
            Some("https://tiles/{z}/{x}/{y}.png")
        );
    }

    #[test]
    fn test_set_error_keeps_prior_derived_state() {
        let mut layer = Layer::data("l1", "SELECT * FROM t", "#layer {}");
        layer.apply_instantiation("https://tiles/{z}/{x}/{y}.png".to_string(), json!({"ok": 1}));

        layer.set_error("server down".to_string());
        assert_eq!(layer.error(), Some("server down"));
        assert!(layer.tile_url_template().is_some());
        assert!(layer.metadata().is_some());
    }
}

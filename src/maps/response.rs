//! Instantiation response model and wrapper.
//!
//! [`MapResponse`] is the serde model of the raw server payload; it is our
//! own type, decoupled from the service's full response surface — only the
//! fields the reconciler consumes are deserialized. [`Response`] pairs a
//! raw payload with the settings that produced the originating request so
//! authenticated resource URLs can be re-derived during reconciliation.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::EngineSettings;

/// Raw success payload of a map instantiation.
#[derive(Debug, Clone, Deserialize)]
pub struct MapResponse {
    /// Identifier assigned to the instantiated layer group.
    pub layergroupid: String,
    /// Per-layer and per-dataview metadata.
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// Timestamp of the last data update, as reported by the service.
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Metadata section of an instantiation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    /// Layer metadata, positionally correlated with the request's layer list.
    #[serde(default)]
    pub layers: Vec<LayerMetadata>,
    /// Dataview metadata keyed by dataview id.
    #[serde(default)]
    pub dataviews: HashMap<String, DataviewMetadata>,
}

/// Metadata returned for one layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerMetadata {
    /// Layer type echoed by the service.
    #[serde(rename = "type", default)]
    pub layer_type: Option<String>,
    /// Opaque per-layer metadata (stats, cartocss warnings, ...).
    #[serde(default)]
    pub meta: Option<Value>,
}

/// Metadata returned for one dataview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataviewMetadata {
    /// Result endpoints for the dataview.
    #[serde(default)]
    pub url: DataviewUrls,
    /// Inline aggregation result, when the service precomputes one.
    #[serde(default)]
    pub result: Option<Value>,
}

/// Result endpoints for a dataview, by scheme.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataviewUrls {
    #[serde(default)]
    pub http: Option<String>,
    #[serde(default)]
    pub https: Option<String>,
}

/// A raw instantiation payload tagged with the settings that produced the
/// originating request.
///
/// Constructed fresh per server reply and discarded after reconciliation.
/// Pure and synchronous: all URL derivation happens on demand, without
/// touching any model state.
#[derive(Debug, Clone)]
pub struct Response {
    settings: EngineSettings,
    raw: MapResponse,
}

impl Response {
    /// Wraps a raw payload with the originating request's settings.
    pub fn new(settings: EngineSettings, raw: MapResponse) -> Self {
        Self { settings, raw }
    }

    /// Layer group id assigned by this instantiation.
    pub fn layergroup_id(&self) -> &str {
        &self.raw.layergroupid
    }

    /// Metadata for the layer at `index` in request order.
    pub fn layer_metadata(&self, index: usize) -> Option<&LayerMetadata> {
        self.raw.metadata.layers.get(index)
    }

    /// Number of layers the service returned metadata for.
    pub fn layer_count(&self) -> usize {
        self.raw.metadata.layers.len()
    }

    /// Metadata for the dataview with the given id.
    pub fn dataview_metadata(&self, id: &str) -> Option<&DataviewMetadata> {
        self.raw.metadata.dataviews.get(id)
    }

    /// Authenticated tile URL template for the layer at `index`.
    pub fn tile_url_template(&self, index: usize) -> String {
        let base = self.settings.server_url.trim_end_matches('/');
        let url = format!(
            "{}/api/v1/map/{}/{}/{{z}}/{{x}}/{{y}}.png",
            base, self.raw.layergroupid, index
        );
        self.authenticate(url)
    }

    /// Authenticated tile URL templates for every layer with metadata,
    /// in layer order.
    pub fn tile_url_templates(&self) -> Vec<String> {
        (0..self.layer_count())
            .map(|i| self.tile_url_template(i))
            .collect()
    }

    /// Authenticated result URL for the dataview with the given id.
    ///
    /// Prefers the https endpoint when the service returns both.
    pub fn dataview_url(&self, id: &str) -> Option<String> {
        let meta = self.dataview_metadata(id)?;
        let url = meta.url.https.as_ref().or(meta.url.http.as_ref())?;
        Some(self.authenticate(url.clone()))
    }

    /// Appends the request credential to a resource URL.
    fn authenticate(&self, url: String) -> String {
        match self.settings.credentials() {
            Some(creds) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}{}={}", url, sep, creds.param_name(), creds.value())
            }
            None => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> MapResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_response() {
        let response = parse(json!({"layergroupid": "lg1"}));
        assert_eq!(response.layergroupid, "lg1");
        assert!(response.metadata.layers.is_empty());
        assert!(response.metadata.dataviews.is_empty());
    }

    #[test]
    fn test_tile_url_template_carries_api_key() {
        let settings = EngineSettings::new("acme", "https://acme.example.com").with_api_key("k1");
        let raw = parse(json!({
            "layergroupid": "lg1",
            "metadata": {"layers": [{"type": "mapnik"}]}
        }));
        let response = Response::new(settings, raw);

        assert_eq!(
            response.tile_url_template(0),
            "https://acme.example.com/api/v1/map/lg1/0/{z}/{x}/{y}.png?api_key=k1"
        );
    }

    #[test]
    fn test_tile_url_template_without_credentials() {
        let settings = EngineSettings::new("acme", "https://acme.example.com");
        let raw = parse(json!({"layergroupid": "lg1"}));
        let response = Response::new(settings, raw);

        assert_eq!(
            response.tile_url_template(0),
            "https://acme.example.com/api/v1/map/lg1/0/{z}/{x}/{y}.png"
        );
    }

    #[test]
    fn test_dataview_url_prefers_https() {
        let settings = EngineSettings::new("acme", "https://acme.example.com").with_api_key("k1");
        let raw = parse(json!({
            "layergroupid": "lg1",
            "metadata": {
                "dataviews": {
                    "d1": {"url": {
                        "http": "http://acme.example.com/api/v1/map/lg1/dataview/d1",
                        "https": "https://acme.example.com/api/v1/map/lg1/dataview/d1"
                    }}
                }
            }
        }));
        let response = Response::new(settings, raw);

        assert_eq!(
            response.dataview_url("d1").unwrap(),
            "https://acme.example.com/api/v1/map/lg1/dataview/d1?api_key=k1"
        );
        assert!(response.dataview_url("missing").is_none());
    }
}

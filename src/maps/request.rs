//! Instantiation request value objects.

use crate::config::{Credentials, EngineSettings};
use serde_json::Value;

/// Query parameters attached to an instantiation request.
///
/// Carries the optional stat tag plus at most one credential. The API key
/// takes precedence over the auth token when both are configured.
#[derive(Debug, Clone)]
pub struct RequestParams {
    credentials: Option<Credentials>,
    stat_tag: Option<String>,
}

impl RequestParams {
    /// Builds request parameters from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            credentials: settings.credentials(),
            stat_tag: settings.stat_tag.clone(),
        }
    }

    /// The credential attached to this request, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Query pairs in wire form.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(tag) = &self.stat_tag {
            pairs.push(("stat_tag", tag.clone()));
        }
        if let Some(creds) = &self.credentials {
            pairs.push((creds.param_name(), creds.value().to_string()));
        }
        pairs
    }
}

/// One instantiation request: payload, parameters and target endpoint.
///
/// Ephemeral: built per reload call and discarded once the transport call
/// resolves.
#[derive(Debug, Clone)]
pub struct MapRequest {
    endpoint: String,
    payload: Value,
    params: RequestParams,
}

impl MapRequest {
    /// Creates a request for the given endpoint.
    pub fn new(endpoint: String, payload: Value, params: RequestParams) -> Self {
        Self {
            endpoint,
            payload,
            params,
        }
    }

    /// Full URL of the instantiation endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The serialized map payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The request's query parameters.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}

/// Resolves the instantiation endpoint for the configured map mode.
///
/// Anonymous maps post the full definition to the map root; named maps post
/// bindings to the pre-registered template.
pub fn instantiation_url(settings: &EngineSettings) -> String {
    let base = settings.server_url.trim_end_matches('/');
    match &settings.template_name {
        Some(template) => format!("{}/api/v1/map/named/{}", base, template),
        None => format!("{}/api/v1/map", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_prefer_api_key() {
        let settings = EngineSettings::new("acme", "https://acme.example.com")
            .with_api_key("k1")
            .with_auth_token("t1")
            .with_stat_tag("usage-123");
        let params = RequestParams::from_settings(&settings);

        let pairs = params.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("stat_tag", "usage-123".to_string()),
                ("api_key", "k1".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_auth_token_only() {
        let settings =
            EngineSettings::new("acme", "https://acme.example.com").with_auth_token("t1");
        let params = RequestParams::from_settings(&settings);

        assert_eq!(params.query_pairs(), vec![("auth_token", "t1".to_string())]);
    }

    #[test]
    fn test_anonymous_endpoint() {
        let settings = EngineSettings::new("acme", "https://acme.example.com/");
        assert_eq!(
            instantiation_url(&settings),
            "https://acme.example.com/api/v1/map"
        );
    }

    #[test]
    fn test_named_endpoint() {
        let settings = EngineSettings::new("acme", "https://acme.example.com")
            .with_template_name("world_borders");
        assert_eq!(
            instantiation_url(&settings),
            "https://acme.example.com/api/v1/map/named/world_borders"
        );
    }

    #[test]
    fn test_request_is_plain_value_object() {
        let settings = EngineSettings::new("acme", "https://acme.example.com");
        let request = MapRequest::new(
            instantiation_url(&settings),
            json!({"layers": []}),
            RequestParams::from_settings(&settings),
        );

        assert_eq!(request.endpoint(), "https://acme.example.com/api/v1/map");
        assert_eq!(request.payload(), &json!({"layers": []}));
        assert!(request.params().credentials().is_none());
    }
}

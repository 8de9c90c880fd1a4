//! Maps API client abstraction.
//!
//! The [`MapsApiClient`] trait abstracts the network round trip to the map
//! instantiation endpoint, allowing dependency injection and mock clients
//! in tests. [`ReqwestMapsClient`] is the production implementation.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use super::error::TransportError;
use super::request::MapRequest;
use super::response::MapResponse;

/// Default HTTP timeout for instantiation requests.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for maps API transport clients.
///
/// Implementors perform the network round trip to the instantiation
/// endpoint and resolve exactly once per request, with either the decoded
/// success payload or a transport error — never both, never neither.
pub trait MapsApiClient: Send + Sync {
    /// Posts an instantiation request and decodes the reply.
    fn instantiate_map(
        &self,
        request: &MapRequest,
    ) -> impl Future<Output = Result<MapResponse, TransportError>> + Send;
}

/// Error body returned by the service on a failed instantiation.
#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Maps API client using reqwest.
///
/// Uses a reusable `reqwest::Client` with connection pooling and a
/// construction-time timeout.
#[derive(Clone)]
pub struct ReqwestMapsClient {
    http: reqwest::Client,
}

impl ReqwestMapsClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

impl MapsApiClient for ReqwestMapsClient {
    async fn instantiate_map(&self, request: &MapRequest) -> Result<MapResponse, TransportError> {
        trace!(endpoint = request.endpoint(), "instantiation request starting");

        let response = self
            .http
            .post(request.endpoint())
            .query(&request.params().query_pairs())
            .json(request.payload())
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = request.endpoint(), error = %e, "instantiation request failed");
                TransportError::Http(format!("request failed: {}", e))
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Http(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            // The service reports instantiation failures as a JSON errors array.
            let errors = serde_json::from_slice::<ServiceErrorBody>(&bytes)
                .map(|body| body.errors)
                .unwrap_or_default();

            warn!(
                endpoint = request.endpoint(),
                status = status.as_u16(),
                error_count = errors.len(),
                "instantiation rejected by service"
            );

            if errors.is_empty() {
                return Err(TransportError::Http(format!(
                    "HTTP {} from {}",
                    status,
                    request.endpoint()
                )));
            }
            return Err(TransportError::Service { errors });
        }

        let decoded: MapResponse = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        debug!(
            endpoint = request.endpoint(),
            layergroupid = %decoded.layergroupid,
            layer_count = decoded.metadata.layers.len(),
            "instantiation succeeded"
        );

        Ok(decoded)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::maps::request::{instantiation_url, RequestParams};
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock maps client for testing.
    ///
    /// Returns a canned outcome and records every payload it was handed.
    pub struct MockMapsClient {
        pub response: Result<MapResponse, TransportError>,
        pub requests: Mutex<Vec<serde_json::Value>>,
    }

    impl MockMapsClient {
        pub fn with_response(response: Result<MapResponse, TransportError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl MapsApiClient for MockMapsClient {
        async fn instantiate_map(
            &self,
            request: &MapRequest,
        ) -> Result<MapResponse, TransportError> {
            if let Ok(mut seen) = self.requests.lock() {
                seen.push(request.payload().clone());
            }
            self.response.clone()
        }
    }

    fn success_response() -> MapResponse {
        serde_json::from_value(json!({"layergroupid": "lg1"})).unwrap()
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockMapsClient::with_response(Ok(success_response()));
        let settings = EngineSettings::new("acme", "https://acme.example.com");
        let request = MapRequest::new(
            instantiation_url(&settings),
            json!({"layers": []}),
            RequestParams::from_settings(&settings),
        );

        let result = mock.instantiate_map(&request).await;
        assert_eq!(result.unwrap().layergroupid, "lg1");
        assert_eq!(mock.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockMapsClient::with_response(Err(TransportError::Service {
            errors: vec!["syntax error".to_string()],
        }));
        let settings = EngineSettings::new("acme", "https://acme.example.com");
        let request = MapRequest::new(
            instantiation_url(&settings),
            json!({"layers": []}),
            RequestParams::from_settings(&settings),
        );

        let result = mock.instantiate_map(&request).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_service_error_body_decoding() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"errors": ["syntax error", "bad column"]}"#).unwrap();
        assert_eq!(body.errors.len(), 2);
    }

    #[test]
    fn test_transport_error_messages() {
        let service = TransportError::Service {
            errors: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(service.messages(), vec!["a", "b"]);

        let http = TransportError::Http("timeout".to_string());
        assert_eq!(http.messages(), vec!["HTTP error: timeout"]);
    }
}

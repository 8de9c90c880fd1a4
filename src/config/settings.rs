//! Engine settings and credential selection.

/// Immutable configuration for one engine instance.
///
/// Captured at construction; shared read-only by all requests for the
/// engine's lifetime. `username` and `server_url` are required, everything
/// else is optional. A present `template_name` switches the engine into
/// named-map mode.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Name of the user registered with the maps service.
    pub username: String,
    /// Base URL of the maps service.
    pub server_url: String,
    /// API key used to authenticate against the maps service.
    pub api_key: Option<String>,
    /// Auth token used to authenticate when no API key is configured.
    pub auth_token: Option<String>,
    /// Pre-registered template name; presence selects the named-map payload shape.
    pub template_name: Option<String>,
    /// Opaque token forwarded to the server for usage attribution.
    pub stat_tag: Option<String>,
}

impl EngineSettings {
    /// Creates settings with the required fields and no optional ones.
    pub fn new(username: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            server_url: server_url.into(),
            api_key: None,
            auth_token: None,
            template_name: None,
            stat_tag: None,
        }
    }

    /// Sets the API key credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the auth token credential.
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Sets the named-map template, switching the engine to named-map mode.
    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = Some(template_name.into());
        self
    }

    /// Sets the usage-attribution stat tag.
    pub fn with_stat_tag(mut self, stat_tag: impl Into<String>) -> Self {
        self.stat_tag = Some(stat_tag.into());
        self
    }

    /// Returns the credential to attach to request parameters, if any.
    ///
    /// Exactly one credential is ever attached to a request. The API key
    /// takes precedence when both are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(key) = &self.api_key {
            return Some(Credentials::ApiKey(key.clone()));
        }
        self.auth_token.clone().map(Credentials::AuthToken)
    }

    /// Whether the engine serializes named-map payloads.
    pub fn is_named_map(&self) -> bool {
        self.template_name.is_some()
    }
}

/// The single credential attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `api_key` query parameter.
    ApiKey(String),
    /// `auth_token` query parameter.
    AuthToken(String),
}

impl Credentials {
    /// The wire name of the query parameter carrying this credential.
    pub fn param_name(&self) -> &'static str {
        match self {
            Credentials::ApiKey(_) => "api_key",
            Credentials::AuthToken(_) => "auth_token",
        }
    }

    /// The credential value.
    pub fn value(&self) -> &str {
        match self {
            Credentials::ApiKey(v) => v,
            Credentials::AuthToken(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_takes_precedence_over_auth_token() {
        let settings = EngineSettings::new("acme", "https://acme.example.com")
            .with_api_key("k1")
            .with_auth_token("t1");

        let creds = settings.credentials().unwrap();
        assert_eq!(creds, Credentials::ApiKey("k1".to_string()));
        assert_eq!(creds.param_name(), "api_key");
    }

    #[test]
    fn test_auth_token_used_when_no_api_key() {
        let settings =
            EngineSettings::new("acme", "https://acme.example.com").with_auth_token("t1");

        let creds = settings.credentials().unwrap();
        assert_eq!(creds, Credentials::AuthToken("t1".to_string()));
        assert_eq!(creds.param_name(), "auth_token");
    }

    #[test]
    fn test_no_credentials_configured() {
        let settings = EngineSettings::new("acme", "https://acme.example.com");
        assert!(settings.credentials().is_none());
    }

    #[test]
    fn test_template_name_selects_named_map_mode() {
        let anonymous = EngineSettings::new("acme", "https://acme.example.com");
        assert!(!anonymous.is_named_map());

        let named = EngineSettings::new("acme", "https://acme.example.com")
            .with_template_name("world_borders");
        assert!(named.is_named_map());
    }
}

//! Client configuration.

use std::fmt;

use url::Url;

use crate::error::ApiError;
use crate::format::WireFormat;

pub const ENV_URL: &str = "FUNDRAISING_API_URL";
pub const ENV_API_KEY: &str = "FUNDRAISING_API_KEY";
pub const ENV_FORMAT: &str = "FUNDRAISING_API_FORMAT";
pub const ENV_USERNAME: &str = "FUNDRAISING_API_USERNAME";
pub const ENV_PASSWORD: &str = "FUNDRAISING_API_PASSWORD";
pub const ENV_DOMAIN: &str = "FUNDRAISING_API_DOMAIN";

/// HTTP basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything an `HttpChannel` needs to talk to one API deployment.
///
/// One value per configuration; nothing is shared globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub format: WireFormat,
    pub credentials: Option<Credentials>,
    /// White-label domain sent in the `x-domain` header.
    pub domain: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            format: WireFormat::default(),
            credentials: None,
            domain: None,
        }
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Build a config from `FUNDRAISING_API_*` environment variables.
    ///
    /// URL and API key are required. Credentials are used only when both
    /// username and password are set.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ApiError::Config(format!("{key} must be set")))
        };

        let mut config = ClientConfig::new(required(ENV_URL)?, required(ENV_API_KEY)?);
        if let Some(format) = lookup(ENV_FORMAT) {
            config.format = format.parse()?;
        }
        if let (Some(username), Some(password)) = (lookup(ENV_USERNAME), lookup(ENV_PASSWORD)) {
            config.credentials = Some(Credentials::new(username, password));
        }
        config.domain = lookup(ENV_DOMAIN).filter(|d| !d.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL and API key and return the parsed root URL
    /// (`{base_url}/{api_key}/`).
    pub fn validate(&self) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base url must be an absolute http(s) url: {}",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ApiError::Config("api key must not be empty".to_string()));
        }
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.api_key);
        }
        Ok(url)
    }
}

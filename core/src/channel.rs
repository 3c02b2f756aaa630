//! Configurable HTTP channel.
//!
//! # Design
//! `HttpChannel` owns the deployment root (`{base_url}/{api_key}`), the wire
//! format, and the optional credentials and domain. Request building is pure:
//! `request`, `request_with_body` and `request_raw` produce `HttpRequest`
//! values with content negotiation and auth headers already attached.
//! `send` hands a request to the transport and converts non-2xx statuses into
//! `ApiError`; `decode`/`decode_list` parse a successful body in the
//! channel's wire format.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::format::WireFormat;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

pub const DOMAIN_HEADER: &str = "x-domain";

#[derive(Clone)]
pub struct HttpChannel {
    root: Url,
    format: WireFormat,
    credentials: Option<Credentials>,
    domain: Option<String>,
    transport: Arc<dyn Transport>,
}

impl HttpChannel {
    /// Channel using the default blocking `ureq` transport.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(
        config: &ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            root: config.validate()?,
            format: config.format,
            credentials: config.credentials.clone(),
            domain: config.domain.clone(),
            transport: Arc::new(transport),
        })
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// URL for `segments` below the root. Each segment is percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Bodiless request with negotiation and auth headers.
    pub fn request(&self, method: HttpMethod, segments: &[&str]) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), self.format.content_type().to_string())];
        if let Some(credentials) = &self.credentials {
            headers.push(("authorization".to_string(), basic_auth(credentials)));
        }
        if let Some(domain) = &self.domain {
            headers.push((DOMAIN_HEADER.to_string(), domain.clone()));
        }
        HttpRequest {
            method,
            url: self.url(segments),
            headers,
            body: None,
        }
    }

    /// Request whose body is `body` encoded in the channel's wire format.
    pub fn request_with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        segments: &[&str],
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let encoded = self.format.encode(body)?;
        Ok(self.request_raw(method, segments, encoded, self.format.content_type()))
    }

    /// Request carrying an opaque body with its own content type.
    pub fn request_raw(
        &self,
        method: HttpMethod,
        segments: &[&str],
        body: Vec<u8>,
        content_type: &str,
    ) -> HttpRequest {
        let mut request = self.request(method, segments);
        request
            .headers
            .push(("content-type".to_string(), content_type.to_string()));
        request.body = Some(body);
        request
    }

    /// Execute `request`, mapping non-2xx statuses to errors.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        check_status(request, response)
    }

    pub fn decode<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<T, ApiError> {
        self.format.decode(&response.body)
    }

    pub fn decode_list<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        self.format.decode_list(&response.body)
    }

    /// Send and decode a single value.
    pub fn execute<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T, ApiError> {
        let response = self.send(request)?;
        self.decode(&response)
    }

    /// Send and decode a collection.
    pub fn execute_list<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<Vec<T>, ApiError> {
        let response = self.send(request)?;
        self.decode_list(&response)
    }
}

impl fmt::Debug for HttpChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpChannel")
            .field("root", &self.root.as_str())
            .field("format", &self.format)
            .field("credentials", &self.credentials)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

fn basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(raw))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(request: &HttpRequest, response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    tracing::warn!(
        method = %request.method,
        url = %request.url,
        status = response.status,
        "request failed"
    );
    Err(ApiError::from_status(response.status, response.body_text()))
}

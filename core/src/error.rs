//! Error types for the fundraising API client.
//!
//! # Design
//! The status codes callers branch on (400, 403, 404) get dedicated variants
//! carrying the raw response body. Every other non-2xx response lands in
//! `ErrorResponse` with the status and body. Client-side failures (argument
//! validation, codec errors, transport errors) have their own variants so
//! they never masquerade as server responses.

/// Errors returned by `HttpChannel` and `PageApi`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request as malformed or conflicting (400).
    #[error("bad request: {body}")]
    BadRequest { body: String },

    /// The credentials are wrong or do not grant access to the resource (403).
    #[error("forbidden: {body}")]
    Forbidden { body: String },

    /// The requested page, update or image does not exist (404).
    #[error("resource not found: {body}")]
    NotFound { body: String },

    /// Any other non-2xx response.
    #[error("HTTP {status}: {body}")]
    ErrorResponse { status: u16, body: String },

    /// Arguments were rejected before any request was sent.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The HTTP round-trip itself failed.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be encoded in the wire format.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-2xx status and body onto the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => ApiError::BadRequest { body },
            403 => ApiError::Forbidden { body },
            404 => ApiError::NotFound { body },
            _ => ApiError::ErrorResponse { status, body },
        }
    }

    /// The HTTP status this error represents, if any.
    ///
    /// Client-side validation failures report 400 so callers can treat them
    /// like the equivalent server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } | ApiError::Validation(_) => Some(400),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::ErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body for HTTP failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { body }
            | ApiError::Forbidden { body }
            | ApiError::NotFound { body }
            | ApiError::ErrorResponse { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

//! HTTP transport port.
//!
//! The request client is written against this trait instead of a concrete
//! HTTP library. A transport resolves to a [`TransportResponse`] for every
//! HTTP response it receives, whatever the status; it only errors when no
//! response arrived at all (network failure, timeout). Status
//! interpretation — including the 401 refresh path — belongs to the
//! client, not the transport.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;
use storefront_domain::HttpMethod;

/// Name of the authorization header the client manages.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Port for executing HTTP requests.
pub trait HttpTransport: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received (network
    /// failure, timeout, invalid URL). A response with a non-success
    /// status is still `Ok`.
    fn execute(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// One request as handed to the transport. Ephemeral, built per call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Headers to send, in order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: TransportBody,
}

impl TransportRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: TransportBody::Empty,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: TransportBody) -> Self {
        self.body = body;
        self
    }

    /// Replaces the authorization header, or appends it if absent.
    pub fn set_authorization(&mut self, value: String) {
        if let Some(header) = self
            .headers
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
        {
            header.1 = value;
        } else {
            self.headers.push((AUTHORIZATION_HEADER.to_string(), value));
        }
    }

    /// Returns the current authorization header value, if set.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
            .map(|(_, value)| value.as_str())
    }
}

/// Request body variants the storefront backend accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportBody {
    /// No body (GET requests).
    Empty,
    /// JSON payload, sent with `Content-Type: application/json`.
    Json(Value),
    /// One file as a multipart form field.
    Multipart {
        /// Form field name.
        field_name: String,
        /// File name reported in the part.
        file_name: String,
        /// Raw file contents.
        bytes: Vec<u8>,
    },
}

/// Response as seen by the client: a status and a decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as JSON where possible, `Null` when empty.
    pub body: Value,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true for exactly 401 Unauthorized.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Transport-level failures: no HTTP response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never reached the server or the connection dropped.
    #[error("network error: {message}")]
    Network {
        /// Description of the failure.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It resolves to a
//! response for every HTTP status the server returns; only failures with
//! no response at all (network, timeout) map to `TransportError`.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde_json::Value;
use storefront_application::ports::{
    HttpTransport, TransportBody, TransportError, TransportRequest, TransportResponse,
};
use storefront_domain::HttpMethod;

/// HTTP transport backed by `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport with the given per-request timeout.
    ///
    /// Redirects are followed up to 10 hops, matching the backend's
    /// occasional trailing-slash redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(timeout_ms: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("storefront-client/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client, timeout_ms })
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the request body to the builder.
    ///
    /// Multipart bodies let reqwest produce the boundary-bearing
    /// `Content-Type` header itself.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: TransportBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match body {
            TransportBody::Empty => Ok(builder),

            TransportBody::Json(payload) => Ok(builder.json(&payload)),

            TransportBody::Multipart {
                field_name,
                file_name,
                bytes,
            } => {
                let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime.essence_str())
                    .map_err(|e| TransportError::Other(e.to_string()))?;
                let form = reqwest::multipart::Form::new().part(field_name, part);
                Ok(builder.multipart(form))
            }
        }
    }

    /// Decodes a response body: JSON where possible, a plain string for
    /// non-JSON text, `Null` when empty.
    fn decode_body(bytes: &[u8]) -> Value {
        if bytes.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        })
    }

    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::Network {
                message: error.to_string(),
            };
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(self.timeout_ms));

        let is_multipart = matches!(request.body, TransportBody::Multipart { .. });
        for (name, value) in &request.headers {
            // reqwest owns the multipart Content-Type (it carries the
            // boundary), so a caller-supplied one is skipped there.
            if is_multipart && name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(name, value);
        }

        builder = Self::build_body(builder, request.body)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;

        tracing::debug!(status, len = bytes.len(), "response received");

        Ok(TransportResponse::new(status, Self::decode_body(&bytes)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
    }

    #[test]
    fn test_decode_body_json() {
        assert_eq!(
            ReqwestTransport::decode_body(br#"{"token": "A2"}"#),
            json!({"token": "A2"})
        );
    }

    #[test]
    fn test_decode_body_plain_text() {
        assert_eq!(
            ReqwestTransport::decode_body(b"Internal Server Error"),
            Value::String("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_decode_body_empty() {
        assert_eq!(ReqwestTransport::decode_body(b""), Value::Null);
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(30_000).is_ok());
    }

    #[test]
    fn test_multipart_body_builds() {
        let client = Client::new();
        let builder = client.post("https://api.shop.example/article/1/photo");
        let result = ReqwestTransport::build_body(
            builder,
            TransportBody::Multipart {
                field_name: "photo".to_string(),
                file_name: "front.jpg".to_string(),
                bytes: vec![0xff, 0xd8],
            },
        );
        assert!(result.is_ok());
    }
}

//! Authenticated request client with transparent token refresh.
//!
//! One logical call moves through a fixed state machine:
//!
//! ```text
//! SENDING -> (2xx)            -> Ok
//! SENDING -> (non-2xx)        -> Error
//! SENDING -> (401) -> REFRESHING -> (no token) -> Login
//! SENDING -> (401) -> REFRESHING -> (token) -> RETRYING -> (2xx|401|other) -> Ok|Login|Error
//! SENDING -> (transport failure) -> Error
//! ```
//!
//! Exactly one [`Envelope`] is produced per call, and at most one refresh
//! is attempted — a 401 on the retry resolves to `Login` without a second
//! refresh. Concurrent calls that each hit a 401 refresh independently;
//! refreshes are not coalesced.

use serde_json::{Value, json};
use tracing::{debug, warn};

use storefront_domain::{ClientConfig, Envelope, ErrorDetail, HttpMethod, Role};

use crate::ApplicationResult;
use crate::auth::TokenStore;
use crate::ports::{
    CredentialStorage, HttpTransport, TransportBody, TransportRequest, TransportResponse,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// API client bound to a transport, a token store, and a base URL.
///
/// The client mutates the token store in exactly one place: persisting a
/// freshly refreshed access token before the retry is sent.
#[derive(Debug, Clone)]
pub struct ApiClient<T, S: CredentialStorage> {
    transport: T,
    store: TokenStore<S>,
    config: ClientConfig,
}

impl<T: HttpTransport, S: CredentialStorage> ApiClient<T, S> {
    /// Creates a client.
    pub const fn new(config: ClientConfig, transport: T, store: TokenStore<S>) -> Self {
        Self {
            transport,
            store,
            config,
        }
    }

    /// Returns the token store this client reads and writes.
    pub const fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    /// Returns the client configuration.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues a JSON request against `path`, authenticated as `role`.
    ///
    /// `body` is ignored for GET. The returned envelope is the only
    /// outcome — transport and storage failures fold into
    /// [`Envelope::Error`], an unrecoverable 401 into [`Envelope::Login`].
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
        role: Role,
    ) -> Envelope {
        let body = match body {
            Some(payload) if method.has_body() => TransportBody::Json(payload),
            _ => TransportBody::Empty,
        };

        let request = TransportRequest::new(method, self.config.endpoint(path))
            .with_header("Content-Type", JSON_CONTENT_TYPE)
            .with_body(body);

        self.dispatch(request, role).await
    }

    /// Uploads one file as a multipart POST, authenticated as `role`.
    ///
    /// Identical three-status contract and single-retry rule as
    /// [`Self::request`].
    pub async fn upload(
        &self,
        path: &str,
        field_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
        role: Role,
    ) -> Envelope {
        let request = TransportRequest::new(HttpMethod::Post, self.config.endpoint(path))
            .with_body(TransportBody::Multipart {
                field_name: field_name.to_string(),
                file_name: file_name.to_string(),
                bytes,
            });

        self.dispatch(request, role).await
    }

    /// Persists the full credential set after a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store cannot be written.
    pub async fn store_login(
        &self,
        role: Role,
        access_token: &str,
        refresh_token: &str,
        identity: &str,
    ) -> ApplicationResult<()> {
        self.store.save_token(role, access_token).await?;
        self.store.save_refresh(role, refresh_token).await?;
        self.store.save_identity(role, identity).await?;
        Ok(())
    }

    /// Clears all credentials for a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store cannot be written.
    pub async fn logout(&self, role: Role) -> ApplicationResult<()> {
        self.store.clear(role).await
    }

    async fn dispatch(&self, mut request: TransportRequest, role: Role) -> Envelope {
        request.set_authorization(self.bearer_for(role).await);

        debug!(method = %request.method, url = %request.url, %role, "dispatching request");

        match self.transport.execute(request.clone()).await {
            Ok(response) if response.is_unauthorized() => {
                self.refresh_and_retry(request, role).await
            }
            Ok(response) => Self::settle(response),
            Err(error) => Envelope::error(ErrorDetail::message(error.to_string())),
        }
    }

    /// Builds the bearer header value for a role.
    ///
    /// An absent (or unreadable) credential still yields a syntactically
    /// present header carrying an empty token; the server rejects it and
    /// the 401 path handles it uniformly.
    async fn bearer_for(&self, role: Role) -> String {
        let token = match self.store.token(role).await {
            Ok(token) => token.unwrap_or_default(),
            Err(error) => {
                warn!(%role, %error, "credential read failed, sending empty bearer token");
                String::new()
            }
        };
        format!("Bearer {token}")
    }

    async fn refresh_and_retry(&self, mut request: TransportRequest, role: Role) -> Envelope {
        warn!(%role, url = %request.url, "access token rejected, attempting refresh");

        let Some(token) = self.refresh_access_token(role).await else {
            return Envelope::Login;
        };

        // The store must hold the new token before the retry goes out.
        if let Err(error) = self.store.save_token(role, &token).await {
            return Envelope::error(ErrorDetail::message(format!(
                "failed to persist refreshed token: {error}"
            )));
        }

        request.set_authorization(format!("Bearer {token}"));
        debug!(%role, url = %request.url, "retrying with refreshed token");

        match self.transport.execute(request).await {
            // A 401 surviving the retry means the session is over; a
            // second refresh is never attempted.
            Ok(response) if response.is_unauthorized() => Envelope::Login,
            Ok(response) => Self::settle(response),
            Err(error) => Envelope::error(ErrorDetail::message(error.to_string())),
        }
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Any failure — transport error, non-success status, missing `token`
    /// field — resolves to `None`, which the caller maps to `Login`.
    async fn refresh_access_token(&self, role: Role) -> Option<String> {
        let refresh_token = match self.store.refresh(role).await {
            Ok(token) => token.unwrap_or_default(),
            Err(error) => {
                warn!(%role, %error, "refresh token read failed");
                String::new()
            }
        };

        let request =
            TransportRequest::new(HttpMethod::Post, self.config.endpoint(&role.refresh_path()))
                .with_header("Content-Type", JSON_CONTENT_TYPE)
                .with_body(TransportBody::Json(json!({ "token": refresh_token })));

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%role, %error, "token refresh request failed");
                return None;
            }
        };

        if !response.is_success() {
            warn!(%role, status = response.status, "token refresh rejected");
            return None;
        }

        response
            .body
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }

    fn settle(response: TransportResponse) -> Envelope {
        if response.is_success() {
            Envelope::ok(response.body)
        } else {
            Envelope::error(ErrorDetail::http(response.status, response.body))
        }
    }
}

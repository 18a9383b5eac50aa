//! Response envelope for API calls.
//!
//! Every call through the request client resolves into exactly one
//! [`Envelope`] — the client never propagates an error past its boundary.
//! The three variants mirror the `{ok, error, login}` contract the
//! storefront views are written against.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outcome of one logical API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    /// The request succeeded with a 2xx status.
    Ok {
        /// Response body as returned by the backend.
        data: Value,
    },
    /// The request failed for any reason other than an unrecoverable 401.
    Error {
        /// Best available description of the failure.
        detail: ErrorDetail,
    },
    /// Authorization could not be restored; the caller must re-authenticate.
    Login,
}

impl Envelope {
    /// Builds an `Ok` envelope from a response payload.
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self::Ok { data }
    }

    /// Builds an `Error` envelope from a failure description.
    #[must_use]
    pub const fn error(detail: ErrorDetail) -> Self {
        Self::Error { detail }
    }

    /// Returns true if the call succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns true if the caller must redirect to a login view.
    #[must_use]
    pub const fn is_login(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Returns the payload of a successful call, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Ok { data } => Some(data),
            _ => None,
        }
    }
}

/// Description of a failed call, carried by [`Envelope::Error`].
///
/// Holds whatever the transport could recover: the HTTP status if a
/// response was received, the server's error payload if it sent one,
/// and a human-readable message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// HTTP status of the failed response, if one was received.
    #[serde(default)]
    pub status: Option<u16>,
    /// Error payload returned by the server, if any.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Human-readable summary of the failure.
    pub message: String,
}

impl ErrorDetail {
    /// Detail for a response the server answered with a non-success status.
    #[must_use]
    pub fn http(status: u16, payload: Value) -> Self {
        Self {
            status: Some(status),
            payload: if payload.is_null() { None } else { Some(payload) },
            message: "request failed".to_string(),
        }
    }

    /// Detail for a failure with no response (network error, timeout).
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            payload: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

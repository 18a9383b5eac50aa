//! Authorization roles and their credential namespaces.
//!
//! The storefront exposes two authorization scopes: the shopper-facing
//! `user` role and the back-office `administrator` role. Each role owns
//! an isolated set of persisted credentials; the two never share tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization scope selecting which credential namespace a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper-facing role (default for API calls).
    #[default]
    User,
    /// Back-office administrator role.
    Administrator,
}

impl Role {
    /// Returns both roles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::User, Self::Administrator]
    }

    /// Returns the role as the string the backend and storage keys use.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Administrator => "administrator",
        }
    }

    /// Storage key for the access token of this role.
    #[must_use]
    pub fn token_key(self) -> String {
        format!("api_token{}", self.as_str())
    }

    /// Storage key for the refresh token of this role.
    #[must_use]
    pub fn refresh_token_key(self) -> String {
        format!("api_refresh_token{}", self.as_str())
    }

    /// Storage key for the identity string of this role.
    #[must_use]
    pub fn identity_key(self) -> String {
        format!("api_identity{}", self.as_str())
    }

    /// Relative path of the token refresh endpoint for this role.
    #[must_use]
    pub fn refresh_path(self) -> String {
        format!("auth/{}/refresh", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

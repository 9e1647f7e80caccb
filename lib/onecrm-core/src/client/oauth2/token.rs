//! OAuth2 access token returned by the token endpoint.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An OAuth2 access token, as returned by `auth/{owner_type}/access_token`.
///
/// The token doubles as an [`Authentication`](crate::Authentication) value:
/// `Authentication::from(token)` sends it as `Authorization: Bearer <access_token>`.
///
/// No validity check is made client-side: expired or empty tokens are still
/// sent, the server decides.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct OAuth2AccessToken {
    access_token: String,
    #[serde(default)]
    #[zeroize(skip)]
    token_type: String,
    #[serde(default)]
    #[zeroize(skip)]
    expires_in: u64,
    #[serde(default)]
    refresh_token: String,
}

impl OAuth2AccessToken {
    /// Creates a bearer token from a raw access token value.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_in: 0,
            refresh_token: String::new(),
        }
    }

    /// Sets the lifetime in seconds, as reported by the server.
    #[must_use]
    pub fn with_expires_in(mut self, expires_in: u64) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    /// Returns the access token value.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the token type (usually `Bearer`).
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the lifetime reported by the server, in seconds.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// Returns the lifetime reported by the server as a [`Duration`].
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }

    /// Returns the refresh token if the server provided a non-empty one.
    pub fn refresh_token(&self) -> Option<&str> {
        Some(self.refresh_token.as_str()).filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for OAuth2AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

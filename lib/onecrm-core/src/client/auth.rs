use std::fmt;

use base64::Engine;
use http::HeaderValue;
use reqwest::header::{AUTHORIZATION, HeaderName};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::client::oauth2::OAuth2AccessToken;

/// Errors that can occur while applying authentication to a request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// Bearer token contains invalid characters for HTTP headers.
    #[display("Bearer token contains invalid characters: {message}")]
    InvalidBearerToken {
        /// Description of the invalid characters or format issue.
        message: String,
    },

    /// Basic authentication credentials cannot be turned into a header.
    #[display("Basic auth credentials cannot be encoded: {message}")]
    InvalidBasicCredentials {
        /// Description of the encoding issue.
        message: String,
    },

    /// API key header name is invalid.
    #[display("Invalid API key header name '{header_name}': {message}")]
    InvalidHeaderName {
        /// The invalid header name that was provided.
        header_name: String,
        /// Description of why the header name is invalid.
        message: String,
    },

    /// API key value contains invalid characters for HTTP headers.
    #[display("API key contains invalid characters: {message}")]
    InvalidApiKey {
        /// Description of the invalid characters or format issue.
        message: String,
    },
}

/// Secure wrapper for sensitive string data that automatically zeroes memory on drop.
///
/// A `SecureString` cannot be serialized, so secrets never end up in a
/// serialized payload by accident:
///
/// ```rust,compile_fail
/// fn assert_serialize<T: serde::Serialize>() {}
///
/// assert_serialize::<onecrm_core::SecureString>();
/// ```
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SecureString` and returns the inner String.
    ///
    /// The caller becomes responsible for the secure handling of the returned String.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.0)
    }

    /// Returns `true` if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn mask_sensitive(value: &str) -> String {
        if value.len() <= 8 {
            "***".to_string()
        } else {
            let head = value.get(..4).unwrap_or_default();
            let tail = value.get(value.len() - 4..).unwrap_or_default();
            format!("{head}...{tail}")
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

/// Authentication applied by an [`ApiClient`](super::ApiClient) to every outgoing request.
///
/// # Examples
///
/// ```rust
/// use onecrm_core::{Authentication, OAuth2AccessToken};
///
/// // HTTP Basic authentication
/// let auth = Authentication::basic("admin", "secret");
///
/// // OAuth2 bearer token, usually obtained through an `AuthFlow`
/// let auth = Authentication::from(OAuth2AccessToken::new("tok123"));
///
/// // API key in a custom header
/// let auth = Authentication::ApiKey {
///     header_name: "X-API-Key".to_string(),
///     key: "secret-key".into(),
/// };
/// ```
#[derive(Clone)]
pub enum Authentication {
    /// HTTP Basic authentication (RFC 7617).
    /// Adds `Authorization: Basic <base64(username:password)>` header.
    Basic {
        /// The username for Basic authentication.
        username: String,
        /// The password for Basic authentication.
        password: SecureString,
    },

    /// OAuth2 access token, sent as a bearer token (RFC 6750).
    /// Adds `Authorization: Bearer <access_token>` header.
    OAuth2(OAuth2AccessToken),

    /// API key authentication with custom header.
    /// Adds `<header_name>: <key>` header.
    ApiKey {
        /// The header name for the API key.
        header_name: String,
        /// The API key value.
        key: SecureString,
    },
}

impl Authentication {
    /// Creates a Basic authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<SecureString>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Converts the authentication into an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` if the credentials cannot be represented
    /// as an HTTP header.
    pub fn to_header(&self) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        match self {
            Self::Basic { username, password } => {
                let credentials = format!("{username}:{}", password.as_str());
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                let value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|e| {
                    AuthenticationError::InvalidBasicCredentials {
                        message: e.to_string(),
                    }
                })?;
                Ok((AUTHORIZATION, value))
            }

            Self::OAuth2(token) => {
                let header_value = format!("Bearer {}", token.access_token());
                let value = HeaderValue::from_str(&header_value).map_err(|e| {
                    AuthenticationError::InvalidBearerToken {
                        message: e.to_string(),
                    }
                })?;
                Ok((AUTHORIZATION, value))
            }

            Self::ApiKey { header_name, key } => {
                let header = HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                    AuthenticationError::InvalidHeaderName {
                        header_name: header_name.clone(),
                        message: e.to_string(),
                    }
                })?;
                let value = HeaderValue::from_str(key.as_str()).map_err(|e| {
                    AuthenticationError::InvalidApiKey {
                        message: e.to_string(),
                    }
                })?;
                Ok((header, value))
            }
        }
    }

    /// Decorates an outgoing request with the credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` if the credentials cannot be represented
    /// as an HTTP header; the request must not be sent in that case.
    pub fn apply(&self, request: &mut reqwest::Request) -> Result<(), AuthenticationError> {
        let (name, value) = self.to_header()?;
        request.headers_mut().insert(name, value);
        Ok(())
    }
}

impl From<OAuth2AccessToken> for Authentication {
    fn from(token: OAuth2AccessToken) -> Self {
        Self::OAuth2(token)
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::OAuth2(token) => f.debug_tuple("OAuth2").field(token).finish(),
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => write!(f, "Basic (username: {username})"),
            Self::OAuth2(token) => write!(f, "OAuth2 (token_type: {})", token.token_type()),
            Self::ApiKey { header_name, key } => write!(f, "ApiKey ({header_name}: {key})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_authentication() {
        let auth = Authentication::from(OAuth2AccessToken::new("tok123"));
        let (header_name, header_value) = auth.to_header().expect("valid header");

        assert_eq!(header_name, AUTHORIZATION);
        assert_eq!(header_value, "Bearer tok123");
    }

    #[test]
    fn test_bearer_authentication_with_empty_token() {
        let auth = Authentication::from(OAuth2AccessToken::new(""));
        let (_, header_value) = auth.to_header().expect("empty token is still a header");

        assert_eq!(header_value, "Bearer ");
    }

    #[test]
    fn test_basic_authentication() {
        let auth = Authentication::basic("user", "pass");
        let (header_name, header_value) = auth.to_header().expect("valid header");

        assert_eq!(header_name, AUTHORIZATION);
        // "user:pass" base64 encoded is "dXNlcjpwYXNz"
        assert_eq!(header_value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_authentication_accepts_any_credentials() {
        let auth = Authentication::basic("user:with:colons", "p\u{e4}ss\n");

        assert!(auth.to_header().is_ok());
    }

    #[test]
    fn test_api_key_authentication() {
        let auth = Authentication::ApiKey {
            header_name: "X-API-Key".to_string(),
            key: "secret-key-123".into(),
        };
        let (header_name, header_value) = auth.to_header().expect("valid header");

        assert_eq!(header_name, "x-api-key");
        assert_eq!(header_value, "secret-key-123");
    }

    #[test]
    fn test_apply_sets_authorization_header() {
        let mut request = reqwest::Request::new(
            http::Method::GET,
            "http://localhost/me".parse().expect("valid url"),
        );
        let auth = Authentication::from(OAuth2AccessToken::new("tok123"));

        auth.apply(&mut request).expect("apply auth");

        assert_eq!(
            request.headers().get(AUTHORIZATION).map(HeaderValue::as_bytes),
            Some(&b"Bearer tok123"[..])
        );
    }

    #[test]
    fn test_display_masks_secrets() {
        let auth = Authentication::basic("user", "password");
        assert_eq!(auth.to_string(), "Basic (username: user)");

        let auth = Authentication::ApiKey {
            header_name: "X-API-Key".to_string(),
            key: "secret-key-12345".into(),
        };
        assert_eq!(auth.to_string(), "ApiKey (X-API-Key: secr...2345)");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = Authentication::basic("user", "very-secret");
        let debug_str = format!("{auth:?}");

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("very-secret"));
    }

    #[test]
    fn test_secure_string_mask_short_tokens() {
        assert_eq!(SecureString::mask_sensitive("short"), "***");
        assert_eq!(SecureString::mask_sensitive("12345678"), "***");
        assert_eq!(SecureString::mask_sensitive("123456789"), "1234...6789");
    }

    #[test]
    fn test_authentication_errors() {
        let auth = Authentication::from(OAuth2AccessToken::new("\0invalid"));
        let result = auth.to_header();
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidBearerToken { .. })
        ));

        let auth = Authentication::ApiKey {
            header_name: "Invalid Header".to_string(),
            key: "key".into(),
        };
        let result = auth.to_header();
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidHeaderName { .. })
        ));

        let auth = Authentication::ApiKey {
            header_name: "X-API-Key".to_string(),
            key: "\0invalid".into(),
        };
        let result = auth.to_header();
        assert!(matches!(result, Err(AuthenticationError::InvalidApiKey { .. })));
    }

    #[test]
    fn test_secure_string_conversions() {
        let secure: SecureString = "test".to_string().into();
        assert_eq!(secure.as_str(), "test");

        let secure = SecureString::new("test".to_string());
        assert_eq!(secure.into_string(), "test");
    }
}

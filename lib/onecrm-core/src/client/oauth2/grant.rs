//! Request bodies of the token endpoint.

use serde::Serialize;

/// Body of `POST auth/{owner_type}/access_token`, tagged by `grant_type`.
#[derive(Debug, Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub(super) enum GrantRequest<'a> {
    AuthorizationCode {
        client_id: &'a str,
        client_secret: &'a str,
        scope: &'a str,
        code: &'a str,
        redirect_uri: &'a str,
    },
    Password {
        client_id: &'a str,
        client_secret: &'a str,
        scope: &'a str,
        username: &'a str,
        password: &'a str,
    },
    ClientCredentials {
        client_id: &'a str,
        client_secret: &'a str,
        scope: &'a str,
    },
}

impl GrantRequest<'_> {
    pub(super) fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::Password { .. } => "password",
            Self::ClientCredentials { .. } => "client_credentials",
        }
    }
}

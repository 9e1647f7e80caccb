use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::grant::GrantRequest;
use super::settings::AuthFlowSettings;
use super::token::OAuth2AccessToken;
use crate::client::{ApiClient, ApiClientError, RequestOptions, SecureString};

/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "profile";

/// Owner type used when none is configured.
pub const DEFAULT_OWNER_TYPE: &str = "user";

const REDACTED_BODY: &str = "[REDACTED]";

/// OAuth2 flow engine for the 1CRM API.
///
/// An `AuthFlow` is immutable once built. Every token request goes through an
/// unauthenticated [`ApiClient`] bound to the flow's base URL.
///
/// The authorization code flow is two-step: [`init_auth_code`](Self::init_auth_code)
/// issues the authorization URL, the user comes back with a code, and
/// [`finalize_auth_code`](Self::finalize_auth_code) exchanges it. The other
/// grants are single-step.
#[derive(Clone)]
pub struct AuthFlow {
    base_url: String,
    client_id: String,
    client_secret: SecureString,
    redirect_uri: String,
    username: String,
    password: SecureString,
    scope: String,
    owner_type: String,
    state: String,
}

impl AuthFlow {
    /// Creates a builder for a flow against the API at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> AuthFlowBuilder {
        AuthFlowBuilder::new(base_url)
    }

    /// The client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// The requested scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The owner type (`user` or `contact`).
    pub fn owner_type(&self) -> &str {
        &self.owner_type
    }

    /// The opaque state passed through the authorization code flow.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Starts the authorization code flow.
    ///
    /// Returns the URL the end user must be redirected to:
    /// `{base}/auth/{owner_type}/authorize?response_type=code&client_id=..&redirect_uri=..&state=..`.
    /// No network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::UrlError`] if the base URL is not a valid URL.
    pub fn init_auth_code(&self) -> Result<Url, ApiClientError> {
        let mut url = format!("{}/auth/{}/authorize", self.base_url, self.owner_type)
            .parse::<Url>()?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", &self.state);
        Ok(url)
    }

    /// Completes the authorization code flow, exchanging `code` for a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, the API answers
    /// with a non-2xx status, or the token response is malformed.
    pub async fn finalize_auth_code(
        &self,
        code: &str,
        cancellation: CancellationToken,
    ) -> Result<OAuth2AccessToken, ApiClientError> {
        let request = GrantRequest::AuthorizationCode {
            client_id: &self.client_id,
            client_secret: self.client_secret.as_str(),
            scope: &self.scope,
            code,
            redirect_uri: &self.redirect_uri,
        };
        self.request_token(&request, cancellation).await
    }

    /// Obtains a token for the resource owner (user or contact) with the
    /// password grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, the API answers
    /// with a non-2xx status, or the token response is malformed.
    pub async fn init_resource_owner(
        &self,
        cancellation: CancellationToken,
    ) -> Result<OAuth2AccessToken, ApiClientError> {
        let request = GrantRequest::Password {
            client_id: &self.client_id,
            client_secret: self.client_secret.as_str(),
            scope: &self.scope,
            username: &self.username,
            password: self.password.as_str(),
        };
        self.request_token(&request, cancellation).await
    }

    /// Obtains a token with the client credentials grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is cancelled, the API answers
    /// with a non-2xx status, or the token response is malformed.
    pub async fn init_client_credentials(
        &self,
        cancellation: CancellationToken,
    ) -> Result<OAuth2AccessToken, ApiClientError> {
        let request = GrantRequest::ClientCredentials {
            client_id: &self.client_id,
            client_secret: self.client_secret.as_str(),
            scope: &self.scope,
        };
        self.request_token(&request, cancellation).await
    }

    async fn request_token(
        &self,
        request: &GrantRequest<'_>,
        cancellation: CancellationToken,
    ) -> Result<OAuth2AccessToken, ApiClientError> {
        debug!(
            grant_type = request.grant_type(),
            owner_type = %self.owner_type,
            "requesting token"
        );
        let client = ApiClient::builder(self.base_url.as_str())
            .with_cancellation(cancellation)
            .build();
        let options = RequestOptions::new().json(request)?;

        let token = client
            .post(&format!("auth/{}/access_token", self.owner_type), options)
            .await?
            .json::<OAuth2AccessToken>()
            .await
            .map_err(redact_token_body)?;
        Ok(token)
    }
}

/// The raw token response may hold a valid access token next to the
/// malformed field, so it never reaches the error.
fn redact_token_body(error: ApiClientError) -> ApiClientError {
    match error {
        ApiClientError::JsonError { path, error, .. } => ApiClientError::JsonError {
            path,
            error,
            body: REDACTED_BODY.to_string(),
        },
        other => other,
    }
}

impl fmt::Debug for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthFlow")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("owner_type", &self.owner_type)
            .field("state", &self.state)
            .finish()
    }
}

/// Builder for [`AuthFlow`].
///
/// Each field is resolved once, in [`build`](Self::build): the value set on
/// the builder, else the value from [`AuthFlowSettings`], else the default
/// (`scope = "profile"`, `owner_type = "user"`, empty otherwise).
#[derive(Debug, Clone)]
pub struct AuthFlowBuilder {
    base_url: String,
    settings: AuthFlowSettings,
    client_id: Option<String>,
    client_secret: Option<SecureString>,
    redirect_uri: Option<String>,
    username: Option<String>,
    password: Option<SecureString>,
    scope: Option<String>,
    owner_type: Option<String>,
    state: Option<String>,
}

impl AuthFlowBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            settings: AuthFlowSettings::default(),
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            username: None,
            password: None,
            scope: None,
            owner_type: None,
            state: None,
        }
    }

    /// Uses `settings` as fallback for the values not set on the builder.
    #[must_use]
    pub fn with_settings(mut self, settings: AuthFlowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the client ID.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the client secret.
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: impl Into<SecureString>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the redirect URI of the authorization code flow.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the resource owner username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the resource owner password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<SecureString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the owner type: `user` or `contact`.
    #[must_use]
    pub fn with_owner_type(mut self, owner_type: impl Into<String>) -> Self {
        self.owner_type = Some(owner_type.into());
        self
    }

    /// Sets the opaque state of the authorization code flow.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Resolves the configuration and builds the flow.
    pub fn build(self) -> AuthFlow {
        let Self {
            base_url,
            settings,
            client_id,
            client_secret,
            redirect_uri,
            username,
            password,
            scope,
            owner_type,
            state,
        } = self;

        AuthFlow {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id
                .or_else(|| settings.client_id.clone())
                .unwrap_or_default(),
            client_secret: client_secret
                .or_else(|| settings.client_secret.clone())
                .unwrap_or_default(),
            redirect_uri: redirect_uri
                .or_else(|| settings.redirect_uri.clone())
                .unwrap_or_default(),
            username: username
                .or_else(|| settings.username.clone())
                .unwrap_or_default(),
            password: password
                .or_else(|| settings.password.clone())
                .unwrap_or_default(),
            scope: scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            owner_type: owner_type.unwrap_or_else(|| DEFAULT_OWNER_TYPE.to_string()),
            state: state.unwrap_or_default(),
        }
    }
}

use tokio_util::sync::CancellationToken;

use super::{ApiClient, Authentication};

/// Builder for creating [`ApiClient`] instances.
///
/// # Default Configuration
///
/// - **Authentication**: none
/// - **Cancellation**: a token that is never cancelled
/// - **Transport**: a default `reqwest::Client`
///
/// # Example
///
/// ```rust
/// use onecrm_core::{ApiClient, Authentication};
/// use tokio_util::sync::CancellationToken;
///
/// let shutdown = CancellationToken::new();
/// let client = ApiClient::builder("https://crm.example.com/api.php/")
///     .with_authentication(Authentication::basic("admin", "secret"))
///     .with_cancellation(shutdown.child_token())
///     .build();
///
/// assert_eq!(client.base_url(), "https://crm.example.com/api.php");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    client: Option<reqwest::Client>,
    base_url: String,
    authentication: Option<Authentication>,
    cancellation: Option<CancellationToken>,
}

impl ApiClientBuilder {
    pub(super) fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: None,
            base_url: base_url.into(),
            authentication: None,
            cancellation: None,
        }
    }

    /// Builds the [`ApiClient`]. Trailing slashes of the base URL are removed.
    pub fn build(self) -> ApiClient {
        let Self {
            client,
            base_url,
            authentication,
            cancellation,
        } = self;

        ApiClient {
            client: client.unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            authentication,
            cancellation: cancellation.unwrap_or_default(),
        }
    }

    /// Sets the authentication applied to every request.
    #[must_use]
    pub fn with_authentication(mut self, authentication: impl Into<Authentication>) -> Self {
        self.authentication = Some(authentication.into());
        self
    }

    /// Sets the default cancellation token of every request.
    ///
    /// A single request can still override it with
    /// [`RequestOptions::with_cancellation`](super::RequestOptions::with_cancellation).
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as transport (timeouts, proxy, TLS, ...).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }
}

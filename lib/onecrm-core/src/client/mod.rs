use http::Method;
use tokio_util::sync::CancellationToken;

mod builder;
pub use self::builder::ApiClientBuilder;

mod execution;

mod body;
pub use self::body::RequestBody;

mod query;
pub use self::query::QueryValues;

mod options;
pub use self::options::RequestOptions;

mod response;
pub use self::response::Response;

mod auth;
pub use self::auth::{Authentication, AuthenticationError, SecureString};

pub mod oauth2;

mod error;
pub use self::error::{ApiClientError, ApiError};

/// HTTP client for the 1CRM API.
///
/// An `ApiClient` is bound to a base URL and an optional [`Authentication`].
/// Each call performs exactly one HTTP round trip: options are merged into a
/// request, the authentication decorates it, the request is sent, and the
/// status code is checked. Statuses outside `200..300` become
/// [`ApiClientError::Api`]; other statuses yield a [`Response`] whose body has
/// not been read yet.
///
/// The client is cheap to clone and read-only after construction, so it can
/// be shared between tasks.
///
/// # Example
///
/// ```rust,no_run
/// use onecrm_core::{ApiClient, Authentication, RequestOptions};
/// # use serde::Deserialize;
/// # #[derive(Deserialize)]
/// # struct Contact { id: String }
///
/// # async fn example() -> Result<(), onecrm_core::ApiClientError> {
/// let client = ApiClient::new(
///     "https://crm.example.com/api.php",
///     Some(Authentication::basic("admin", "secret")),
/// );
///
/// let contact: Contact = client
///     .get("data/Contact/42", RequestOptions::new())
///     .await?
///     .json()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    authentication: Option<Authentication>,
    cancellation: CancellationToken,
}

// Create
impl ApiClient {
    /// Creates a client with a default transport and a never-cancelled token.
    ///
    /// Trailing slashes of `base_url` are removed.
    pub fn new(base_url: impl Into<String>, authentication: Option<Authentication>) -> Self {
        let builder = Self::builder(base_url);
        match authentication {
            Some(authentication) => builder.with_authentication(authentication).build(),
            None => builder.build(),
        }
    }

    /// Creates a builder for a client bound to `base_url`.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Returns a copy of this client bound to another authentication.
    #[must_use]
    pub fn with_authentication(&self, authentication: Option<Authentication>) -> Self {
        Self {
            authentication,
            ..self.clone()
        }
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The authentication applied to every request, if any.
    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }
}

// Send
impl ApiClient {
    /// Sends a request with an arbitrary HTTP method to `{base_url}/{path}`.
    ///
    /// # Errors
    ///
    /// - transport errors ([`ApiClientError::ReqwestError`], [`ApiClientError::UrlError`], ...)
    /// - [`ApiClientError::Cancelled`] if the cancellation token fires before completion
    /// - [`ApiClientError::Authentication`] if the credentials cannot be applied
    /// - [`ApiClientError::Api`] if the status code is outside `200..300`
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.exchange(method, path, options).await
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.request(Method::GET, path, options).await
    }

    /// Sends a `POST` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.request(Method::POST, path, options).await
    }

    /// Sends a `PUT` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.request(Method::PUT, path, options).await
    }

    /// Sends a `PATCH` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.request(Method::PATCH, path, options).await
    }

    /// Sends a `DELETE` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        self.request(Method::DELETE, path, options).await
    }
}

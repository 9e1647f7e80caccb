//! # 1CRM Endpoints
//!
//! Typed wrappers for common 1CRM API endpoints, built on [`onecrm_core`].
//!
//! [`EndpointsClient`] dereferences to [`ApiClient`], so every generic
//! request method stays available next to the typed ones.
//!
//! ```rust,no_run
//! use onecrm_core::{Authentication, RequestOptions};
//! use onecrm_endpoints::EndpointsClient;
//!
//! # async fn example() -> Result<(), onecrm_core::ApiClientError> {
//! let client = EndpointsClient::new(
//!     "https://crm.example.com/api.php",
//!     Some(Authentication::basic("admin", "secret")),
//! );
//!
//! let me = client.me(RequestOptions::new()).await?;
//! let id = client
//!     .files()
//!     .upload("notes.txt", "hello", RequestOptions::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use onecrm_core::{ApiClient, Authentication};

mod files;
pub use self::files::{FileMetadata, Files};

mod me;
pub use self::me::UserInfo;

/// An [`ApiClient`] with typed endpoint methods.
#[derive(Debug, Clone, derive_more::Deref, derive_more::From)]
pub struct EndpointsClient {
    client: ApiClient,
}

impl EndpointsClient {
    /// Creates a client bound to `base_url`, see [`ApiClient::new`].
    pub fn new(base_url: impl Into<String>, authentication: Option<Authentication>) -> Self {
        Self {
            client: ApiClient::new(base_url, authentication),
        }
    }

    /// File upload, download and metadata operations.
    pub fn files(&self) -> Files<'_> {
        Files::new(&self.client)
    }

    /// Returns the wrapped client.
    pub fn into_inner(self) -> ApiClient {
        self.client
    }
}

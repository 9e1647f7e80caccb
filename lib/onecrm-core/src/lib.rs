//! # 1CRM Core
//!
//! Async HTTP client for the 1CRM REST API.
//!
//! This crate provides:
//! - **[`ApiClient`]** - an HTTP client bound to a base URL and an optional [`Authentication`]
//! - **[`RequestOptions`]** - per-request body, query, headers, content type and cancellation
//! - **[`Response`]** - a successful response whose body is read at most once
//! - **[`oauth2::AuthFlow`]** - the OAuth2 flows exposed by the API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use onecrm_core::{ApiClient, Authentication, RequestOptions};
//! # use serde::Deserialize;
//! # #[derive(Deserialize)]
//! # struct UserInfo { id: String, name: String }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(
//!     "https://crm.example.com/api.php",
//!     Some(Authentication::basic("admin", "secret")),
//! );
//!
//! let me: UserInfo = client
//!     .get("me", RequestOptions::new())
//!     .await?
//!     .json()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`ApiClientError`]. A status code outside
//! `200..300` is reported as [`ApiClientError::Api`], carrying the status code
//! and the raw response body:
//!
//! ```rust,no_run
//! use onecrm_core::{ApiClient, ApiClientError, RequestOptions};
//!
//! # async fn example(client: ApiClient) {
//! match client.get("data/Contact/unknown", RequestOptions::new()).await {
//!     Ok(_response) => { /* 2xx */ }
//!     Err(ApiClientError::Api(error)) => {
//!         eprintln!("API error {}: {}", error.code(), error.message());
//!     }
//!     Err(error) => eprintln!("request failed: {error}"),
//! }
//! # }
//! ```
//!
//! ## Cancellation
//!
//! Requests are bound to a [`CancellationToken`](tokio_util::sync::CancellationToken),
//! either the client's own (see [`ApiClientBuilder::with_cancellation`]) or one
//! given per request with [`RequestOptions::with_cancellation`]. A cancelled
//! request fails with [`ApiClientError::Cancelled`].

mod client;

pub use self::client::oauth2;
pub use self::client::oauth2::OAuth2AccessToken;
pub use self::client::{
    ApiClient, ApiClientBuilder, ApiClientError, ApiError, Authentication, AuthenticationError,
    QueryValues, RequestBody, RequestOptions, Response, SecureString,
};

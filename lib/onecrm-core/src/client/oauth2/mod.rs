//! OAuth2 flows against the 1CRM API.
//!
//! The API exposes its own OAuth2 endpoints, relative to the API base URL:
//!
//! - `GET  auth/{owner_type}/authorize`: interactive authorization page
//! - `POST auth/{owner_type}/access_token`: token exchange, JSON body
//!
//! where `owner_type` is `user` (CRM users) or `contact` (portal contacts).
//!
//! # Supported Flows
//!
//! - **Authorization Code**: [`AuthFlow::init_auth_code`] builds the URL the end
//!   user is redirected to, then [`AuthFlow::finalize_auth_code`] exchanges the
//!   returned code for a token
//! - **Resource Owner Password**: [`AuthFlow::init_resource_owner`]
//! - **Client Credentials**: [`AuthFlow::init_client_credentials`]
//!
//! Tokens are never refreshed automatically: on an expired-token API error the
//! caller runs a flow again.
//!
//! # Example
//!
//! ```rust,no_run
//! use onecrm_core::ApiClient;
//! use onecrm_core::oauth2::{AuthFlow, AuthFlowSettings};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), onecrm_core::ApiClientError> {
//! let base_url = "https://crm.example.com/api.php";
//! let flow = AuthFlow::builder(base_url)
//!     .with_settings(AuthFlowSettings::from_env())
//!     .with_scope("profile")
//!     .build();
//!
//! let token = flow.init_client_credentials(CancellationToken::new()).await?;
//! let client = ApiClient::new(base_url, Some(token.into()));
//! # Ok(())
//! # }
//! ```

mod flow;
mod grant;
mod settings;
mod token;

pub use self::flow::{AuthFlow, AuthFlowBuilder, DEFAULT_OWNER_TYPE, DEFAULT_SCOPE};
pub use self::settings::AuthFlowSettings;
pub use self::token::OAuth2AccessToken;

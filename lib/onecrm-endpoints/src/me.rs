use onecrm_core::{ApiClientError, RequestOptions};
use serde::Deserialize;

use crate::EndpointsClient;

/// The authenticated user, as returned by `GET me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: String,
    /// Login name.
    pub name: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role, for instance `admin` or `user`.
    pub role: String,
    /// Primary email address.
    pub email: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Whether the user belongs to a partner account.
    pub is_partner: bool,
}

impl EndpointsClient {
    /// Fetches the user the client is authenticated as.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a [`UserInfo`].
    pub async fn me(&self, options: RequestOptions) -> Result<UserInfo, ApiClientError> {
        self.get("me", options).await?.json().await
    }
}

use crate::client::SecureString;

const CLIENT_ID: &str = "ONECRM_CLIENT_ID";
const CLIENT_SECRET: &str = "ONECRM_CLIENT_SECRET";
const REDIRECT_URI: &str = "ONECRM_REDIRECT_URI";
const USERNAME: &str = "ONECRM_USERNAME";
const PASSWORD: &str = "ONECRM_PASSWORD";

/// Externally provided defaults for an [`AuthFlow`](super::AuthFlow).
///
/// Loading settings is an explicit step: the flow itself never reads the
/// environment. Values set directly on the
/// [`AuthFlowBuilder`](super::AuthFlowBuilder) take precedence over settings.
///
/// | Variable               | Field           |
/// |------------------------|-----------------|
/// | `ONECRM_CLIENT_ID`     | `client_id`     |
/// | `ONECRM_CLIENT_SECRET` | `client_secret` |
/// | `ONECRM_REDIRECT_URI`  | `redirect_uri`  |
/// | `ONECRM_USERNAME`      | `username`      |
/// | `ONECRM_PASSWORD`      | `password`      |
#[derive(Debug, Clone, Default)]
pub struct AuthFlowSettings {
    pub(super) client_id: Option<String>,
    pub(super) client_secret: Option<SecureString>,
    pub(super) redirect_uri: Option<String>,
    pub(super) username: Option<String>,
    pub(super) password: Option<SecureString>,
}

impl AuthFlowSettings {
    /// Reads the `ONECRM_*` environment variables.
    ///
    /// Unset or non-unicode variables are left empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings from an arbitrary key/value source, using the
    /// `ONECRM_*` variable names as keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: lookup(CLIENT_ID),
            client_secret: lookup(CLIENT_SECRET).map(SecureString::from),
            redirect_uri: lookup(REDIRECT_URI),
            username: lookup(USERNAME),
            password: lookup(PASSWORD).map(SecureString::from),
        }
    }

    /// The client ID, if provided.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// The redirect URI, if provided.
    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// The resource owner username, if provided.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn should_read_known_keys() {
        let source = HashMap::from([
            ("ONECRM_CLIENT_ID", "abc"),
            ("ONECRM_CLIENT_SECRET", "xyz"),
            ("ONECRM_USERNAME", "jdoe"),
            ("UNRELATED", "ignored"),
        ]);

        let settings =
            AuthFlowSettings::from_lookup(|key| source.get(key).map(ToString::to_string));

        assert_eq!(settings.client_id(), Some("abc"));
        assert_eq!(
            settings.client_secret.as_ref().map(SecureString::as_str),
            Some("xyz")
        );
        assert_eq!(settings.username(), Some("jdoe"));
        assert_eq!(settings.redirect_uri(), None);
        assert!(settings.password.is_none());
    }

    #[test]
    fn should_not_leak_secrets_in_debug() {
        let settings = AuthFlowSettings::from_lookup(|key| {
            (key == "ONECRM_PASSWORD").then(|| "hunter2".to_string())
        });

        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}

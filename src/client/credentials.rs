use std::fmt;

use crate::client::error::ConfigurationError;

/// API user name and key used to sign every request.
///
/// Values are kept as given; [`RequestSigner`](super::RequestSigner) checks
/// them before the first request is sent. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    api_key: String,
}

impl Credentials {
    pub const USERNAME_ENV: &'static str = "PAYSIMPLE_USERNAME";
    pub const API_KEY_ENV: &'static str = "PAYSIMPLE_API_KEY";

    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Read `PAYSIMPLE_USERNAME` and `PAYSIMPLE_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let read = |variable: &'static str| {
            lookup(variable).ok_or(ConfigurationError::MissingEnvironment { variable })
        };
        Ok(Self::new(read(Self::USERNAME_ENV)?, read(Self::API_KEY_ENV)?))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

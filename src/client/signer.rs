//! `PSSERVER` request authorization.
//!
//! The header value is
//! `PSSERVER accessid={username}; timestamp={timestamp}; signature={signature}`
//! where the signature is base64(HMAC-SHA256(key = api key, message = timestamp)).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::client::credentials::Credentials;
use crate::client::error::ConfigurationError;

type HmacSha256 = Hmac<Sha256>;

pub const AUTH_SCHEME: &str = "PSSERVER";

/// Produces a fresh `Authorization` header value for every attempt.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    clock: fn() -> DateTime<Utc>,
}

impl RequestSigner {
    /// Wrap credentials after checking them once.
    pub fn new(credentials: Credentials) -> Result<Self, ConfigurationError> {
        Self::check(&credentials)?;
        Ok(Self {
            credentials,
            clock: Utc::now,
        })
    }

    /// Replace the time source used by [`RequestSigner::sign`].
    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Reject credentials that cannot produce a well-formed header.
    pub fn check(credentials: &Credentials) -> Result<(), ConfigurationError> {
        let username = credentials.username();
        if username.is_empty() {
            return Err(ConfigurationError::MissingUsername);
        }
        if username
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control() || ch == ';')
        {
            return Err(ConfigurationError::InvalidUsername);
        }
        if credentials.api_key().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        Ok(())
    }

    /// Sign with the current time.
    pub fn sign(&self) -> Result<String, ConfigurationError> {
        self.sign_at((self.clock)())
    }

    /// Sign with an explicit timestamp.
    pub fn sign_at(&self, at: DateTime<Utc>) -> Result<String, ConfigurationError> {
        Self::check(&self.credentials)?;
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_key().as_bytes())
            .map_err(|_| ConfigurationError::MissingApiKey)?;
        mac.update(timestamp.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!(
            "{AUTH_SCHEME} accessid={}; timestamp={timestamp}; signature={signature}",
            self.credentials.username()
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn signs_timestamp_with_api_key() {
        let signer = RequestSigner::new(Credentials::new("merchant", "secret-key")).unwrap();
        assert_eq!(
            signer.sign_at(at()).unwrap(),
            "PSSERVER accessid=merchant; timestamp=2024-01-02T03:04:05.000000Z; \
             signature=uFlLUBMKvpak0L6cO4z4scM9w08RYP7Q+W0ZHqsSkao="
        );
    }

    #[test]
    fn each_signature_uses_its_own_timestamp() {
        let signer = RequestSigner::new(Credentials::new("merchant", "secret-key")).unwrap();
        let first = signer.sign_at(at()).unwrap();
        let second = signer.sign_at(at() + chrono::Duration::seconds(1)).unwrap();
        assert_ne!(first, second);
        assert!(signer.sign().unwrap().starts_with("PSSERVER accessid=merchant; timestamp="));
    }

    #[test]
    fn rejects_unusable_credentials() {
        assert!(matches!(
            RequestSigner::new(Credentials::new("", "key")),
            Err(ConfigurationError::MissingUsername)
        ));
        assert!(matches!(
            RequestSigner::new(Credentials::new("mer chant", "key")),
            Err(ConfigurationError::InvalidUsername)
        ));
        assert!(matches!(
            RequestSigner::new(Credentials::new("merchant;x=1", "key")),
            Err(ConfigurationError::InvalidUsername)
        ));
        assert!(matches!(
            RequestSigner::new(Credentials::new("merchant", "")),
            Err(ConfigurationError::MissingApiKey)
        ));
    }
}

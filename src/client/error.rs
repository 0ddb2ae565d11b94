use std::error::Error as StdError;
use std::fmt;

use crate::domain::{EndpointError, ValidationFailure};

/// Error raised by an [`HttpTransport`](super::http) while performing one attempt.
pub type TransportError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PaySimpleClient`](super::PaySimpleClient).
///
/// Only [`PaySimpleError::Transport`] is produced after retrying; every other
/// variant ends the call on the attempt that raised it.
pub enum PaySimpleError {
    /// The model broke at least one validation rule; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// The API answered with a non-success status and a well-formed error body.
    #[error("endpoint returned HTTP {status}: {error}")]
    Endpoint { status: u16, error: EndpointError },

    /// The API answered with a non-success status and a body that is not an error object.
    #[error("malformed response (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Every attempt failed before an HTTP response was received.
    #[error(transparent)]
    Transport(#[from] TransportFailure),

    /// Credentials, base URL, or HTTP client set-up is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A success body did not match the expected response envelope.
    #[error("failed to decode response body: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PaySimpleError {
    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Endpoint { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("username must not be empty")]
    MissingUsername,

    #[error("username must not contain whitespace, control characters or ';'")]
    InvalidUsername,

    #[error("api key must not be empty")]
    MissingApiKey,

    #[error("environment variable {variable} is not set")]
    MissingEnvironment { variable: &'static str },

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid request path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request path {path:?} leaves the base URL's origin")]
    ForeignPath { path: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Every transport error of one call, in attempt order.
#[derive(Debug)]
pub struct TransportFailure {
    errors: Vec<TransportError>,
}

impl TransportFailure {
    pub(crate) fn new(errors: Vec<TransportError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[TransportError] {
        &self.errors
    }

    pub fn attempts(&self) -> usize {
        self.errors.len()
    }

    pub fn into_errors(self) -> Vec<TransportError> {
        self.errors
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failed after {} attempt(s)", self.errors.len())?;
        if let Some(last) = self.errors.last() {
            write!(f, "; last error: {last}")?;
        }
        Ok(())
    }
}

impl StdError for TransportFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.errors
            .last()
            .map(|err| err.as_ref() as &(dyn StdError + 'static))
    }
}

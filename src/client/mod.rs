//! Client layer: signs, sends and retries calls, and maps responses to domain types.

mod credentials;
mod error;
mod http;
mod retry;
mod signer;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::domain::{PagedResult, ResponseEnvelope, Validate};

pub use credentials::Credentials;
pub use error::{ConfigurationError, PaySimpleError, TransportError, TransportFailure};
pub use http::{ApiRequest, HttpResponse, Method};
pub use retry::RetryPolicy;
pub use signer::{AUTH_SCHEME, RequestSigner};

use http::{
    ACCEPT, APPLICATION_JSON, AUTHORIZATION, CONNECTION, CONTENT_TYPE, HttpRequest, HttpTransport,
    ReqwestTransport,
};
use retry::AttemptError;

pub const SANDBOX_BASE_URL: &str = "https://sandbox-api.paysimple.com/v4/";
pub const PRODUCTION_BASE_URL: &str = "https://api.paysimple.com/v4/";

const DEFAULT_USER_AGENT: &str = concat!("paysimple-rust/", env!("CARGO_PKG_VERSION"));

/// Well-known PaySimple deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Versioned API root, with a trailing `/`.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`PaySimpleClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or
/// retry behavior.
pub struct PaySimpleClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    retry: RetryPolicy,
}

impl PaySimpleClientBuilder {
    /// Create a builder targeting the sandbox with the default retry policy.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: Environment::default().base_url().to_owned(),
            timeout: None,
            user_agent: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Target a well-known environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_owned();
        self
    }

    /// Use an explicit base URL instead of a well-known environment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to each attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Attempts per call; values below 1 still make one attempt.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts;
        self
    }

    /// Wait between attempts after a transport failure.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry.delay = delay;
        self
    }

    /// Replace the whole retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Build a [`PaySimpleClient`].
    ///
    /// Fails with [`PaySimpleError::Configuration`] when the credentials
    /// cannot sign a request, the base URL is unusable, or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<PaySimpleClient, PaySimpleError> {
        let signer = RequestSigner::new(self.credentials)?;
        signer.sign()?;
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigurationError::HttpClient)?;

        tracing::debug!(
            base_url = %base_url,
            max_attempts = self.retry.attempts(),
            "paysimple client configured"
        );

        Ok(PaySimpleClient {
            signer,
            base_url,
            retry: self.retry,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level PaySimple client.
///
/// Every call is signed, sent with JSON headers, and retried on transport
/// failures according to the [`RetryPolicy`]. Non-success responses become
/// [`PaySimpleError::Endpoint`] or [`PaySimpleError::MalformedResponse`] and
/// are never retried. The client is cheap to clone and may serve any number
/// of concurrent calls.
pub struct PaySimpleClient {
    signer: RequestSigner,
    base_url: Url,
    retry: RetryPolicy,
    http: Arc<dyn HttpTransport>,
}

impl PaySimpleClient {
    /// Create a client for `environment` with default settings.
    ///
    /// For more customization, use [`PaySimpleClient::builder`].
    pub fn new(credentials: Credentials, environment: Environment) -> Result<Self, PaySimpleError> {
        Self::builder(credentials).environment(environment).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> PaySimpleClientBuilder {
        PaySimpleClientBuilder::new(credentials)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Resolve `path` against the base URL; a leading `/` is ignored.
    ///
    /// Paths that resolve to another scheme, host or port, such as absolute
    /// URLs, are rejected so signed headers never leave the configured origin.
    pub fn url(&self, path: &str) -> Result<Url, PaySimpleError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ConfigurationError::InvalidPath {
                path: path.to_owned(),
                source,
            })?;
        if url.origin() != self.base_url.origin() {
            return Err(ConfigurationError::ForeignPath {
                path: path.to_owned(),
            }
            .into());
        }
        Ok(url)
    }

    /// Run `model`'s validation rules without sending anything.
    pub fn validate<M: Validate + ?Sized>(&self, model: &M) -> Result<(), PaySimpleError> {
        crate::domain::validate(model)?;
        Ok(())
    }

    /// Send a call and return the raw success response.
    ///
    /// Errors:
    /// - [`PaySimpleError::Configuration`] when signing fails (nothing is sent),
    /// - [`PaySimpleError::Endpoint`] / [`PaySimpleError::MalformedResponse`] for non-2xx responses,
    /// - [`PaySimpleError::Transport`] once every attempt failed without a response.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, PaySimpleError> {
        self.dispatch(&request).await
    }

    /// Send a call and decode `Response` from the success envelope.
    ///
    /// An empty success body decodes as an envelope without `Response`, so
    /// `T = Option<_>` accepts `204 No Content`.
    pub async fn send_and_decode<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, PaySimpleError> {
        let response = self.dispatch(&request).await?;
        decode_envelope::<T>(response.body).map(ResponseEnvelope::into_response)
    }

    /// Send a list call and decode the items together with paging detail.
    pub async fn send_and_decode_paged<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<PagedResult<T>, PaySimpleError> {
        let response = self.dispatch(&request).await?;
        decode_envelope::<Vec<T>>(response.body).map(ResponseEnvelope::into_paged)
    }

    /// Validate `model`, then send it as the JSON body of a `method` call to `path`.
    pub async fn send_validated<M>(
        &self,
        method: Method,
        path: &str,
        model: &M,
    ) -> Result<HttpResponse, PaySimpleError>
    where
        M: Validate + Serialize + ?Sized,
    {
        self.validate(model)?;
        let request = ApiRequest::new(method, path).with_json(model)?;
        self.dispatch(&request).await
    }

    /// [`PaySimpleClient::send_validated`] followed by envelope decoding.
    pub async fn send_validated_and_decode<M, T>(
        &self,
        method: Method,
        path: &str,
        model: &M,
    ) -> Result<T, PaySimpleError>
    where
        M: Validate + Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_validated(method, path, model).await?;
        decode_envelope::<T>(response.body).map(ResponseEnvelope::into_response)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<HttpResponse, PaySimpleError> {
        let mut url = self.url(request.path())?;
        if let Some(query) = request.query() {
            query.apply_to(&mut url);
        }

        let span = tracing::debug_span!("paysimple_request", method = %request.method(), url = %url);
        retry::run(&self.retry, |number| {
            self.attempt(request.method(), &url, request.body(), number)
        })
        .instrument(span)
        .await
    }

    async fn attempt(
        &self,
        method: Method,
        url: &Url,
        body: Option<&str>,
        number: u32,
    ) -> Result<HttpResponse, AttemptError> {
        let authorization = self.signer.sign().map_err(PaySimpleError::from)?;

        let mut headers = vec![
            (AUTHORIZATION, authorization),
            (ACCEPT, APPLICATION_JSON.to_owned()),
            // the server sends a body with 204 responses
            (CONNECTION, "close".to_owned()),
        ];
        if body.is_some() {
            headers.push((CONTENT_TYPE, APPLICATION_JSON.to_owned()));
        }

        tracing::debug!(attempt = number, "sending request");
        let response = self
            .http
            .execute(HttpRequest {
                method,
                url: url.clone(),
                headers,
                body: body.map(str::to_owned),
            })
            .await
            .map_err(AttemptError::Transport)?;

        if response.is_success() {
            return Ok(response);
        }
        Err(endpoint_failure(response).into())
    }
}

fn endpoint_failure(response: HttpResponse) -> PaySimpleError {
    let HttpResponse { status, body } = response;
    match crate::transport::decode_error_body(&body) {
        Ok(error) => {
            tracing::debug!(status, error_code = %error.error_code, "endpoint rejected request");
            PaySimpleError::Endpoint { status, error }
        }
        Err(source) => {
            tracing::debug!(status, "endpoint returned an undecodable error body");
            PaySimpleError::MalformedResponse {
                status,
                body,
                source,
            }
        }
    }
}

fn decode_envelope<T: DeserializeOwned>(body: String) -> Result<ResponseEnvelope<T>, PaySimpleError> {
    let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
    serde_json::from_str(text).map_err(|source| PaySimpleError::Decode { body, source })
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };

    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&normalized).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an absolute http(s) URL".to_owned()));
    }
    Ok(url)
}

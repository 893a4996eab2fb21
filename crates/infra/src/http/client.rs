//! Process-wide HTTP client.
//!
//! One instance is built at startup from [`ApiConfig`] and reused for every
//! request: fixed base URL, fixed timeout (180 s by default), no retry and
//! no backoff. Response bodies are JSON; [`parse_json`] is the single point
//! where every body is decoded, so a non-parseable body always surfaces as
//! a typed error rather than a panic.
//!
//! Requests are cancellable: [`HttpClient::send_with_cancel`] races the
//! in-flight request against a [`CancellationToken`] supplied by the
//! caller.

use std::time::Duration;

use chameleon_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use chameleon_domain::{ApiConfig, ChameleonError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::errors::{error_for_status, InfraError};

/// HTTP client with a fixed base URL and timeout.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    /// Start building a new HTTP client for the given base URL.
    pub fn builder(base_url: impl Into<String>) -> HttpClientBuilder {
        HttpClientBuilder::new(base_url)
    }

    /// Build a client from the API section of the application configuration.
    ///
    /// # Errors
    /// Returns `ChameleonError::Config` if the base URL does not parse, or
    /// `ChameleonError::Internal` if the underlying client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::builder(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
    }

    /// The configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for a path appended to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute the provided request builder. Single attempt; transport
    /// errors map into domain errors on the way out.
    ///
    /// # Errors
    /// Returns `ChameleonError::Network` for transport failures and
    /// timeouts, `ChameleonError::Internal` for malformed requests.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            ChameleonError::from(infra)
        })?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                let infra: InfraError = err.into();
                Err(ChameleonError::from(infra))
            }
        }
    }

    /// Execute a request, aborting early if the caller cancels.
    ///
    /// # Errors
    /// As [`HttpClient::send`]; cancellation surfaces as
    /// `ChameleonError::Network`.
    pub async fn send_with_cancel(
        &self,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!("HTTP request cancelled by caller");
                Err(ChameleonError::Network("request cancelled".into()))
            }
            result = self.send(builder) => result,
        }
    }
}

/// Decode a response body as JSON.
///
/// Success bodies deserialize into `T`; non-success responses fold the
/// backend's `{"error": ...}` body into a status-derived domain error.
///
/// # Errors
/// Returns `ChameleonError::InvalidInput` when a success body is not valid
/// JSON for `T`, or the status-derived error for non-2xx responses.
pub async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|err| {
        let infra: InfraError = err.into();
        ChameleonError::from(infra)
    })?;

    if !status.is_success() {
        return Err(error_for_status(status, &bytes));
    }

    serde_json::from_slice(&bytes).map_err(|err| {
        ChameleonError::InvalidInput(format!("response body was not valid JSON: {err}"))
    })
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl HttpClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `ChameleonError::Config` for an unparseable base URL, or
    /// `ChameleonError::Network` if the underlying client cannot be built.
    pub fn build(self) -> Result<HttpClient> {
        // Validate early so a bad deployment value fails at startup, not on
        // the first request.
        let parsed = Url::parse(&self.base_url).map_err(|err| {
            let infra: InfraError = err.into();
            ChameleonError::from(infra)
        })?;

        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            ChameleonError::from(infra)
        })?;

        Ok(HttpClient {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }
}

//! HTTP client with per-profile timeout support.
//!
//! A thin wrapper around reqwest carrying the timeout configuration for one
//! class of requests. Failures are never retried here: a failed request
//! simply forfeits whatever data it would have produced.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use settler_domain::SettlerError;
use tracing::debug;

/// HTTP client bound to one timeout profile.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, SettlerError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SettlerError> {
        let request = builder
            .build()
            .map_err(|err| SettlerError::Internal(format!("invalid request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) if err.is_timeout() => {
                debug!(%method, %url, error = %err, "HTTP request timed out");
                Err(SettlerError::Network(format!("timeout while requesting {url}")))
            }
            Err(err) if err.is_connect() => {
                debug!(%method, %url, error = %err, "HTTP connect failed");
                Err(SettlerError::Network(format!("connect error for {url}: {err}")))
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(SettlerError::Network(format!("request to {url} failed: {err}")))
            }
        }
    }
}

/// Builder for [`HttpClient`].
///
/// The three timeout knobs map straight onto reqwest's: `timeout` is a total
/// deadline covering connect through body, `connect_timeout` bounds only the
/// connect phase and `read_timeout` only the wait between reads. A profile
/// that needs a slow connect but fast reads sets the latter two and leaves
/// the total deadline unset.
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpClientBuilder {
    /// Total per-request deadline, connect phase included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Connect-phase timeout; unset means reqwest's default.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Timeout for each read of the response; runs separately from the
    /// connect phase.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, SettlerError> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect) = self.connect_timeout {
            builder = builder.connect_timeout(connect);
        }

        if let Some(read) = self.read_timeout {
            builder = builder.read_timeout(read);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| SettlerError::Internal(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}

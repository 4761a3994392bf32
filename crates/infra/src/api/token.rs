//! Client-credentials token lifecycle
//!
//! One [`TokenProvider`] exists per store and owns that store's bearer token.
//! The provider acquires its first token at construction and fails hard if
//! the credentials are rejected, so a broken store is skipped cleanly instead
//! of limping on without a token. Refresh happens lazily: every caller goes
//! through [`TokenProvider::bearer`], which re-requests the token at most
//! once when the stored one has expired.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Conservative margin under the provider's real token lifetime.
const TOKEN_LIFETIME: Duration = Duration::from_secs(220);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// A bearer token and the moment it stops being trusted.
#[derive(Debug, Clone)]
struct AccessToken {
    bearer: String,
    expires_at: Instant,
}

impl AccessToken {
    fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Per-store token owner with lazy refresh.
pub struct TokenProvider {
    http: HttpClient,
    authorize_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<AccessToken>,
}

impl TokenProvider {
    /// Acquire an initial token and build the provider.
    ///
    /// # Errors
    /// Returns `ApiError::Auth` when the credential exchange fails; the
    /// caller should treat this as a hard error for the store.
    pub async fn connect(
        http: HttpClient,
        authorize_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let authorize_url = authorize_url.into();
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        let token = request_token(&http, &authorize_url, &client_id, &client_secret).await?;
        info!(authorize_url = %authorize_url, "access token acquired");

        Ok(Self { http, authorize_url, client_id, client_secret, token: Mutex::new(token) })
    }

    /// Return a valid bearer value, refreshing the stored token first when it
    /// has expired.
    ///
    /// The token mutex is held across the expiry check and the re-request, so
    /// refresh-then-fetch is atomic per provider: no caller can observe an
    /// expired token, and a single call triggers at most one refresh.
    pub async fn bearer(&self) -> Result<String, ApiError> {
        let mut token = self.token.lock().await;
        if token.expired() {
            debug!(authorize_url = %self.authorize_url, "access token expired, refreshing");
            *token = request_token(
                &self.http,
                &self.authorize_url,
                &self.client_id,
                &self.client_secret,
            )
            .await?;
        }
        Ok(token.bearer.clone())
    }

    /// Force the stored token into the expired state.
    #[cfg(test)]
    pub(crate) async fn force_expire(&self) {
        let mut token = self.token.lock().await;
        token.expires_at = Instant::now() - Duration::from_secs(1);
    }
}

async fn request_token(
    http: &HttpClient,
    authorize_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, ApiError> {
    let request = http
        .request(Method::POST, authorize_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")]);

    let response = http
        .send(request)
        .await
        .map_err(|err| ApiError::Auth(format!("token request failed: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Auth(format!(
            "token endpoint {authorize_url} returned status {status}"
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|err| ApiError::Auth(format!("malformed token response: {err}")))?;

    Ok(AccessToken { bearer: body.access_token, expires_at: Instant::now() + TOKEN_LIFETIME })
}

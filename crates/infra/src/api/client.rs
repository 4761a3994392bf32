//! Token-aware retailer API client
//!
//! Exposes the three content-typed GET operations the reconciliation flow
//! needs: invoice list (JSON), specification sheet (xlsx bytes) and
//! specification document (PDF bytes). All of them flow through one
//! [`RetailerClient::get_raw`] pipeline stage, so the refresh contract and
//! the status/network error mapping exist exactly once; new endpoints
//! inherit both for free.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use settler_domain::SettlerError;
use tracing::debug;

use super::errors::ApiError;
use super::token::TokenProvider;
use crate::http::HttpClient;

const ACCEPT_JSON: &str = "application/vnd.retailer.v10+json";
const ACCEPT_SHEET: &str =
    "application/vnd.retailer.v10+openxmlformats-officedocument.spreadsheetml.sheet";
const ACCEPT_PDF: &str = "application/vnd.retailer.v10+pdf";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
// Sheet exports are slow to start serving but quick once they flow: the
// connect phase gets its own generous window and only the reads are tight.
const SHEET_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const SHEET_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// One store's API client: two timeout profiles plus that store's tokens.
pub struct RetailerClient {
    default_http: HttpClient,
    sheet_http: HttpClient,
    tokens: TokenProvider,
}

impl RetailerClient {
    /// Build the client for one store and acquire its first token.
    ///
    /// # Errors
    /// Fails when the HTTP clients cannot be built or the credential
    /// exchange is rejected; both are hard errors for this store.
    pub async fn connect(
        authorize_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, ApiError> {
        let default_http = HttpClient::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(user_agent())
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        let sheet_http = HttpClient::builder()
            .connect_timeout(SHEET_CONNECT_TIMEOUT)
            .read_timeout(SHEET_READ_TIMEOUT)
            .user_agent(user_agent())
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        let tokens =
            TokenProvider::connect(default_http.clone(), authorize_url, client_id, client_secret)
                .await?;

        Ok(Self { default_http, sheet_http, tokens })
    }

    /// GET the invoice list for a period as raw JSON bytes.
    pub async fn fetch_invoice_list(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get_raw(&self.default_http, url, ACCEPT_JSON).await
    }

    /// GET one invoice's specification sheet as raw xlsx bytes.
    pub async fn fetch_specification_sheet(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get_raw(&self.sheet_http, url, ACCEPT_SHEET).await
    }

    /// GET one invoice's specification document as raw PDF bytes.
    pub async fn fetch_specification_document(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.get_raw(&self.default_http, url, ACCEPT_PDF).await
    }

    async fn get_raw(
        &self,
        http: &HttpClient,
        url: &str,
        accept: &str,
    ) -> Result<Vec<u8>, ApiError> {
        // Refresh contract: validated once per call, before the request.
        let bearer = self.tokens.bearer().await?;

        let request = http
            .request(Method::GET, url)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
            .header(ACCEPT, accept);

        let response = http.send(request).await.map_err(|err| match err {
            SettlerError::Network(message) => {
                ApiError::Network { url: url.to_string(), message }
            }
            other => ApiError::Config(other.to_string()),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), url: url.to_string() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Body { url: url.to_string(), message: err.to_string() })?;

        debug!(url, bytes = bytes.len(), "API response body received");
        Ok(bytes.to_vec())
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }
}

fn user_agent() -> String {
    format!("settler/{}", env!("CARGO_PKG_VERSION"))
}

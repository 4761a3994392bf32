//! [`InvoiceGateway`] adapter over the retailer client
//!
//! Owns URL construction and the JSON decode of the invoice list, leaving
//! the wire client to deal purely in raw bytes.

use async_trait::async_trait;
use serde::Deserialize;
use settler_core::ports::InvoiceGateway;
use settler_core::InvoicePeriod;
use settler_domain::{InvoiceReference, Result, SettlerError};

use super::client::RetailerClient;

#[derive(Debug, Default, Deserialize)]
struct InvoiceListing {
    #[serde(rename = "invoiceListItems", default)]
    invoice_list_items: Vec<InvoiceReference>,
}

/// Gateway for one store, bound to the shared resource base URL.
pub struct RetailerGateway {
    client: RetailerClient,
    base_url: String,
}

impl RetailerGateway {
    pub fn new(client: RetailerClient, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }
}

#[async_trait]
impl InvoiceGateway for RetailerGateway {
    async fn list_invoices(&self, period: &InvoicePeriod) -> Result<Vec<InvoiceReference>> {
        let url = format!(
            "{}/invoices?period-start-date={}&period-end-date={}",
            self.base_url,
            period.start_param(),
            period.end_param()
        );

        let body = self.client.fetch_invoice_list(&url).await.map_err(SettlerError::from)?;
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let listing: InvoiceListing = serde_json::from_slice(&body)
            .map_err(|err| SettlerError::Http(format!("invoice list decode failed: {err}")))?;
        Ok(listing.invoice_list_items)
    }

    async fn specification_sheet(&self, invoice_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/invoices/{}/specification?page=", self.base_url, invoice_id);
        Ok(self.client.fetch_specification_sheet(&url).await.map_err(SettlerError::from)?)
    }
}

//! Shared domain types
//!
//! Plain data carried between the API client, the spreadsheet extractor and
//! the orders repository. Nothing in here performs I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Credentials and identity of one seller account (store).
///
/// `code` is the short internal suffix appended to order identifiers when
/// matching rows against the orders table (e.g. `"_ADE"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCredentials {
    pub name: String,
    pub code: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Retailer API endpoints shared by every store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUrls {
    /// Resource base, e.g. `https://api.retailer.example/retailer`
    pub base_url: String,
    /// Client-credentials token endpoint
    pub authorize_url: String,
}

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Where downloaded specification sheets are archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_archive_dir")]
    pub dir: String,
}

fn default_archive_dir() -> String {
    ".".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self { dir: default_archive_dir() }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub api: ApiUrls,
    #[serde(default)]
    pub archive: ArchiveConfig,
    pub stores: Vec<StoreCredentials>,
}

/// One invoice as returned by the invoice-list endpoint.
///
/// Consumed immediately to request its specification sheet; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceReference {
    #[serde(rename = "invoiceId")]
    pub invoice_id: String,
    #[serde(rename = "periodStartDate", default)]
    pub period_start: Option<NaiveDate>,
    #[serde(rename = "periodEndDate", default)]
    pub period_end: Option<NaiveDate>,
}

/// Compensation and correction labels as the retailer emits them on the
/// specification sheet. Labels outside this set are ignored by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompensationCategory {
    /// "Compensatie"
    Compensation,
    /// "Compensatie zoekgeraakte artikel(en)"
    CompensationLostItems,
    /// "Correctie verkoopprijs artikel(en)"
    SalePriceCorrection,
}

impl CompensationCategory {
    /// Map a raw sheet label onto a category. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Compensatie" => Some(Self::Compensation),
            "Compensatie zoekgeraakte artikel(en)" => Some(Self::CompensationLostItems),
            "Correctie verkoopprijs artikel(en)" => Some(Self::SalePriceCorrection),
            _ => None,
        }
    }

    /// Whether this category updates the compensation field pair
    /// (as opposed to the return-correction pair).
    pub fn is_compensation(self) -> bool {
        matches!(self, Self::Compensation | Self::CompensationLostItems)
    }
}

/// One extracted line item from a specification sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationRow {
    /// Order number as printed on the sheet, without the store code suffix.
    pub order_number: String,
    pub category: CompensationCategory,
    pub amount: f64,
    /// Value of the sheet's date column, normalized to `YYYY-MM-DD` when the
    /// cell held a date, otherwise the raw cell text.
    pub date: String,
    pub ean: Option<String>,
}

impl CompensationRow {
    /// Composite identifier used to match the orders table:
    /// order number + store code suffix.
    pub fn order_id(&self, store_code: &str) -> String {
        format!("{}{}", self.order_number, store_code)
    }
}

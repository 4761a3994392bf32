//! Port interfaces for the reconciliation flow
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use settler_domain::{CompensationRow, InvoiceReference, Result};

use crate::period::InvoicePeriod;

/// Trait for the retailer invoice API
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// List the invoices issued for a period. An empty list is a normal
    /// outcome, not an error.
    async fn list_invoices(&self, period: &InvoicePeriod) -> Result<Vec<InvoiceReference>>;

    /// Download the specification spreadsheet for one invoice, as raw bytes.
    async fn specification_sheet(&self, invoice_id: &str) -> Result<Vec<u8>>;
}

/// Trait for turning downloaded spreadsheet bytes into line items
pub trait SheetParser: Send + Sync {
    /// Extract the compensation/correction rows from a specification sheet.
    /// Rows with labels outside the known category set are dropped.
    fn extract(&self, bytes: &[u8]) -> Result<Vec<CompensationRow>>;
}

/// Trait for applying reconciliation updates to the orders table
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Mark an order as compensated. Returns the number of rows affected;
    /// zero means no matching order and is not an error.
    async fn apply_compensation(&self, order_id: &str, amount: f64, date: &str) -> Result<u64>;

    /// Mark an order's sale-price correction. Returns the number of rows
    /// affected; zero means no matching order and is not an error.
    async fn apply_return_correction(&self, order_id: &str, amount: f64, date: &str)
        -> Result<u64>;
}

/// Trait for archiving downloaded sheets as audit artifacts
pub trait SheetArchive: Send + Sync {
    /// Persist the sheet bytes as `{store_name}_{invoice_id}_{month_name}.xlsx`
    /// and return the path written.
    fn store(
        &self,
        store_name: &str,
        invoice_id: &str,
        month_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf>;
}

//! Reconciliation service - core business logic
//!
//! Walks one store's invoices for a period, pulls each specification sheet,
//! and applies the extracted compensation/correction rows to the orders
//! table. Failures are isolated: a failed fetch or parse forfeits only that
//! invoice, a failed update only that row, and everything is tallied in the
//! returned [`RunSummary`].

use std::sync::Arc;

use settler_domain::{InvoiceReference, StoreCredentials};
use tracing::{debug, info, warn};

use super::summary::{FailureKind, InvoiceOutcome, RunSummary};
use crate::period::InvoicePeriod;
use crate::ports::{InvoiceGateway, OrdersRepository, SheetArchive, SheetParser};

/// Reconciliation service
pub struct ReconcileService {
    gateway: Arc<dyn InvoiceGateway>,
    parser: Arc<dyn SheetParser>,
    orders: Arc<dyn OrdersRepository>,
    archive: Arc<dyn SheetArchive>,
}

impl ReconcileService {
    /// Create a new reconciliation service
    pub fn new(
        gateway: Arc<dyn InvoiceGateway>,
        parser: Arc<dyn SheetParser>,
        orders: Arc<dyn OrdersRepository>,
        archive: Arc<dyn SheetArchive>,
    ) -> Self {
        Self { gateway, parser, orders, archive }
    }

    /// Reconcile one store for the given period.
    ///
    /// Never fails as a whole: every error degrades to a logged, counted
    /// continuation. The only result is the database's updated state, the
    /// archived sheets, and the summary.
    pub async fn run_store(
        &self,
        store: &StoreCredentials,
        period: &InvoicePeriod,
    ) -> RunSummary {
        let mut summary = RunSummary::new(&store.name);

        info!(
            store = %store.name,
            start = %period.start_param(),
            end = %period.end_param(),
            "listing invoices"
        );

        let invoices = match self.gateway.list_invoices(period).await {
            Ok(invoices) => invoices,
            Err(err) => {
                warn!(store = %store.name, error = %err, "invoice list fetch failed");
                summary.list_failure = Some(err.to_string());
                return summary;
            }
        };

        if invoices.is_empty() {
            info!(store = %store.name, "no invoices for this period");
            return summary;
        }

        for invoice in &invoices {
            let outcome = self.process_invoice(store, period, invoice).await;
            summary.record(outcome);
        }

        info!(
            store = %store.name,
            invoices = summary.invoices_seen,
            rows_matched = summary.rows_matched,
            failures = summary.failures(),
            "store run complete"
        );

        summary
    }

    async fn process_invoice(
        &self,
        store: &StoreCredentials,
        period: &InvoicePeriod,
        invoice: &InvoiceReference,
    ) -> InvoiceOutcome {
        let invoice_id = invoice.invoice_id.as_str();

        let bytes = match self.gateway.specification_sheet(invoice_id).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(store = %store.name, invoice_id, error = %err, "sheet fetch failed");
                return InvoiceOutcome::aborted(invoice_id, FailureKind::Fetch, err.to_string());
            }
        };

        let mut outcome = InvoiceOutcome::new(invoice_id);

        // Audit side channel; a write failure must not cost us the invoice.
        match self.archive.store(&store.name, invoice_id, &period.month_name(), &bytes) {
            Ok(path) => debug!(store = %store.name, invoice_id, path = %path.display(), "sheet archived"),
            Err(err) => {
                warn!(store = %store.name, invoice_id, error = %err, "sheet archive failed");
                outcome.archive_failure = Some(err.to_string());
            }
        }

        let rows = match self.parser.extract(&bytes) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(store = %store.name, invoice_id, error = %err, "sheet parse failed");
                outcome.error =
                    Some(super::summary::ReconcileFailure { kind: FailureKind::Parse, message: err.to_string() });
                return outcome;
            }
        };

        outcome.rows_extracted = rows.len();
        debug!(store = %store.name, invoice_id, rows = rows.len(), "sheet extracted");

        for row in &rows {
            let order_id = row.order_id(&store.code);
            let result = if row.category.is_compensation() {
                self.orders.apply_compensation(&order_id, row.amount, &row.date).await
            } else {
                self.orders.apply_return_correction(&order_id, row.amount, &row.date).await
            };

            match result {
                Ok(affected) => {
                    outcome.rows_applied += 1;
                    if affected > 0 {
                        outcome.rows_matched += 1;
                    } else {
                        // Not every invoice page touches every order.
                        debug!(order_id, "no matching order record");
                    }
                }
                Err(err) => {
                    warn!(order_id, error = %err, "order update failed");
                    outcome.row_failures += 1;
                }
            }
        }

        outcome
    }
}

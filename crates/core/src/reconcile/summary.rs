//! Typed run results
//!
//! Every failure during a store run is recorded here instead of only being
//! printed, so callers and tests can assert on failure counts.

use serde::{Deserialize, Serialize};

/// What went wrong while processing one invoice or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Sheet download failed (HTTP status, connect or timeout)
    Fetch,
    /// Sheet bytes could not be parsed
    Parse,
    /// Archive side channel failed (never aborts the invoice)
    Archive,
    /// Orders table update failed
    Database,
}

/// A recorded failure with its human-readable cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of processing a single invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceOutcome {
    pub invoice_id: String,
    /// Line items extracted from the sheet (known categories only)
    pub rows_extracted: usize,
    /// Updates executed against the orders table
    pub rows_applied: usize,
    /// Updates that actually hit an order record (affected > 0)
    pub rows_matched: usize,
    /// Row updates that errored and were skipped
    pub row_failures: usize,
    /// Archive side-channel failure, if any
    pub archive_failure: Option<String>,
    /// Fetch/parse failure that aborted this invoice, if any
    pub error: Option<ReconcileFailure>,
}

impl InvoiceOutcome {
    pub fn new(invoice_id: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            rows_extracted: 0,
            rows_applied: 0,
            rows_matched: 0,
            row_failures: 0,
            archive_failure: None,
            error: None,
        }
    }

    pub fn aborted(invoice_id: impl Into<String>, kind: FailureKind, message: String) -> Self {
        let mut outcome = Self::new(invoice_id);
        outcome.error = Some(ReconcileFailure { kind, message });
        outcome
    }

    /// Whether the sheet was fetched and parsed successfully.
    pub fn completed(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated result of one store's reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub store: String,
    pub invoices_seen: usize,
    pub sheets_processed: usize,
    pub rows_applied: usize,
    pub rows_matched: usize,
    pub row_failures: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    pub archive_failures: usize,
    /// Set when the invoice-list call itself failed; the run for this store
    /// then saw no invoices at all.
    pub list_failure: Option<String>,
    pub outcomes: Vec<InvoiceOutcome>,
}

impl RunSummary {
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            invoices_seen: 0,
            sheets_processed: 0,
            rows_applied: 0,
            rows_matched: 0,
            row_failures: 0,
            fetch_failures: 0,
            parse_failures: 0,
            archive_failures: 0,
            list_failure: None,
            outcomes: Vec::new(),
        }
    }

    /// Fold one invoice outcome into the totals.
    pub fn record(&mut self, outcome: InvoiceOutcome) {
        self.invoices_seen += 1;
        self.rows_applied += outcome.rows_applied;
        self.rows_matched += outcome.rows_matched;
        self.row_failures += outcome.row_failures;
        if outcome.archive_failure.is_some() {
            self.archive_failures += 1;
        }
        match outcome.error.as_ref().map(|e| e.kind) {
            None => self.sheets_processed += 1,
            Some(FailureKind::Fetch) => self.fetch_failures += 1,
            Some(FailureKind::Parse) => self.parse_failures += 1,
            // Archive and database failures never abort an invoice; they are
            // counted through the per-row/per-invoice fields above.
            Some(FailureKind::Archive | FailureKind::Database) => self.sheets_processed += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Total number of recorded failures of any kind.
    pub fn failures(&self) -> usize {
        self.fetch_failures
            + self.parse_failures
            + self.archive_failures
            + self.row_failures
            + usize::from(self.list_failure.is_some())
    }
}

//! Reconciliation flow: service and typed run results

pub mod service;
pub mod summary;

pub use service::ReconcileService;
pub use summary::{FailureKind, InvoiceOutcome, ReconcileFailure, RunSummary};

//! # Settler Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - The reconciliation service and its typed run results
//! - Invoice period arithmetic
//!
//! ## Architecture Principles
//! - Only depends on `settler-domain`
//! - No database, HTTP, or filesystem code
//! - All external dependencies via traits

pub mod period;
pub mod ports;
pub mod reconcile;

pub use period::InvoicePeriod;
pub use ports::{InvoiceGateway, OrdersRepository, SheetArchive, SheetParser};
pub use reconcile::{FailureKind, InvoiceOutcome, ReconcileFailure, ReconcileService, RunSummary};

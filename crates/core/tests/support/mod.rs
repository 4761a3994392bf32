//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the reconciliation ports, enabling
//! deterministic unit tests without network or database dependencies.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use settler_core::ports::{InvoiceGateway, OrdersRepository, SheetArchive, SheetParser};
use settler_core::InvoicePeriod;
use settler_domain::{CompensationRow, InvoiceReference, Result as DomainResult, SettlerError};

/// Scripted gateway: a fixed invoice list plus per-invoice sheet results.
pub struct MockGateway {
    pub invoices: DomainResult<Vec<InvoiceReference>>,
    pub sheets: HashMap<String, DomainResult<Vec<u8>>>,
}

impl MockGateway {
    pub fn new(invoice_ids: &[&str]) -> Self {
        let invoices = invoice_ids
            .iter()
            .map(|id| InvoiceReference {
                invoice_id: (*id).to_string(),
                period_start: None,
                period_end: None,
            })
            .collect();
        Self { invoices: Ok(invoices), sheets: HashMap::new() }
    }

    pub fn with_sheet(mut self, invoice_id: &str, result: DomainResult<Vec<u8>>) -> Self {
        self.sheets.insert(invoice_id.to_string(), result);
        self
    }
}

#[async_trait]
impl InvoiceGateway for MockGateway {
    async fn list_invoices(&self, _period: &InvoicePeriod) -> DomainResult<Vec<InvoiceReference>> {
        match &self.invoices {
            Ok(list) => Ok(list.clone()),
            Err(err) => Err(SettlerError::Http(err.to_string())),
        }
    }

    async fn specification_sheet(&self, invoice_id: &str) -> DomainResult<Vec<u8>> {
        match self.sheets.get(invoice_id) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(err)) => Err(SettlerError::Http(err.to_string())),
            None => Err(SettlerError::Http(format!("no scripted sheet for {invoice_id}"))),
        }
    }
}

/// Parser that maps sheet bytes (as UTF-8 keys) onto scripted rows.
#[derive(Default)]
pub struct MockParser {
    pub rows: HashMap<Vec<u8>, DomainResult<Vec<CompensationRow>>>,
}

impl MockParser {
    pub fn with_rows(mut self, bytes: &[u8], result: DomainResult<Vec<CompensationRow>>) -> Self {
        self.rows.insert(bytes.to_vec(), result);
        self
    }
}

impl SheetParser for MockParser {
    fn extract(&self, bytes: &[u8]) -> DomainResult<Vec<CompensationRow>> {
        match self.rows.get(bytes) {
            Some(Ok(rows)) => Ok(rows.clone()),
            Some(Err(err)) => Err(SettlerError::Sheet(err.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

/// Recorded update call against the mock orders repository.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedUpdate {
    pub kind: UpdateKind,
    pub order_id: String,
    pub amount: f64,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Compensation,
    ReturnCorrection,
}

/// In-memory orders repository: `known_orders` match (affected = 1),
/// everything else misses (affected = 0). Order ids listed in `failing`
/// error out instead.
#[derive(Default)]
pub struct MockOrders {
    pub known_orders: Vec<String>,
    pub failing: Vec<String>,
    pub applied: Mutex<Vec<AppliedUpdate>>,
}

impl MockOrders {
    pub fn with_orders(order_ids: &[&str]) -> Self {
        Self {
            known_orders: order_ids.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn applied(&self) -> Vec<AppliedUpdate> {
        self.applied.lock().unwrap().clone()
    }

    fn apply(&self, kind: UpdateKind, order_id: &str, amount: f64, date: &str) -> DomainResult<u64> {
        if self.failing.iter().any(|id| id == order_id) {
            return Err(SettlerError::Database(format!("update failed for {order_id}")));
        }
        self.applied.lock().unwrap().push(AppliedUpdate {
            kind,
            order_id: order_id.to_string(),
            amount,
            date: date.to_string(),
        });
        Ok(u64::from(self.known_orders.iter().any(|id| id == order_id)))
    }
}

#[async_trait]
impl OrdersRepository for MockOrders {
    async fn apply_compensation(&self, order_id: &str, amount: f64, date: &str) -> DomainResult<u64> {
        self.apply(UpdateKind::Compensation, order_id, amount, date)
    }

    async fn apply_return_correction(
        &self,
        order_id: &str,
        amount: f64,
        date: &str,
    ) -> DomainResult<u64> {
        self.apply(UpdateKind::ReturnCorrection, order_id, amount, date)
    }
}

/// Archive mock that records writes, optionally failing every call.
#[derive(Default)]
pub struct MockArchive {
    pub fail: bool,
    pub stored: Mutex<Vec<String>>,
}

impl SheetArchive for MockArchive {
    fn store(
        &self,
        store_name: &str,
        invoice_id: &str,
        month_name: &str,
        _bytes: &[u8],
    ) -> DomainResult<PathBuf> {
        if self.fail {
            return Err(SettlerError::Internal("archive unavailable".to_string()));
        }
        let name = format!("{store_name}_{invoice_id}_{month_name}.xlsx");
        self.stored.lock().unwrap().push(name.clone());
        Ok(PathBuf::from(name))
    }
}

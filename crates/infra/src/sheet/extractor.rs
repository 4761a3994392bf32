//! Specification sheet extractor
//!
//! Reads the retailer's xlsx specification sheet and extracts the
//! compensation and correction line items. The sheet is positional: the
//! retailer does not version its layout, so the extractor addresses columns
//! by index and drops any row whose category label is not in the known set.
//! Header rows and subtotal rows fall out naturally that way.

use std::io::Cursor;

use calamine::{Data, DataType, Range, Reader, Xlsx};
use settler_core::ports::SheetParser;
use settler_domain::{CompensationCategory, CompensationRow, Result, SettlerError};
use tracing::debug;

const COL_CATEGORY: usize = 0;
const COL_ORDER: usize = 2;
const COL_EAN: usize = 4;
const COL_DATE: usize = 5;
const COL_AMOUNT: usize = 9;

/// Extractor over the first worksheet of a specification sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecSheetExtractor;

impl SpecSheetExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SheetParser for SpecSheetExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<CompensationRow>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|err| SettlerError::Sheet(format!("not a readable xlsx workbook: {err}")))?;

        let range: Range<Data> = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SettlerError::Sheet("workbook has no worksheets".to_string()))?
            .map_err(|err| SettlerError::Sheet(format!("cannot read first worksheet: {err}")))?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for row in range.rows() {
            let Some(category) = cell_str(row, COL_CATEGORY)
                .and_then(|label| CompensationCategory::from_label(&label))
            else {
                continue;
            };

            let Some(order_number) = cell_str(row, COL_ORDER) else {
                dropped += 1;
                continue;
            };
            let Some(amount) = cell_f64(row, COL_AMOUNT) else {
                dropped += 1;
                continue;
            };
            let date = cell_date(row, COL_DATE).unwrap_or_default();
            let ean = cell_str(row, COL_EAN);

            rows.push(CompensationRow { order_number, category, amount, date, ean });
        }

        debug!(rows = rows.len(), dropped, "specification sheet extracted");
        Ok(rows)
    }
}

/// Text of a cell. Numeric cells render as text because the retailer emits
/// order numbers and EANs as either, depending on the export.
fn cell_str(row: &[Data], col: usize) -> Option<String> {
    match row.get(col)? {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
        }
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{n}"))
            }
        }
        Data::Int(n) => Some(format!("{n}")),
        _ => None,
    }
}

fn cell_f64(row: &[Data], col: usize) -> Option<f64> {
    match row.get(col)? {
        Data::Float(n) => Some(*n),
        Data::Int(n) => Some(*n as f64),
        // Some exports carry the amount as text with a decimal comma.
        Data::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

fn cell_date(row: &[Data], col: usize) -> Option<String> {
    match row.get(col)? {
        Data::DateTime(_) | Data::DateTimeIso(_) => row
            .get(col)
            .and_then(DataType::as_datetime)
            .map(|dt| dt.format("%Y-%m-%d").to_string()),
        _ => cell_str(row, col),
    }
}

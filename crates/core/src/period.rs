//! Invoice period arithmetic
//!
//! Explicit calendar computation for the reconciliation window, replacing
//! any string-slicing over formatted dates. Two shapes exist: a full
//! calendar month, and the "previous semi-monthly" window used when the
//! tool runs without arguments.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use settler_domain::{Result, SettlerError};

/// The date range for which invoices are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl InvoicePeriod {
    /// Build the period covering one calendar month, leap-year aware.
    pub fn calendar_month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            SettlerError::InvalidInput(format!("invalid period month: {year}-{month:02}"))
        })?;
        let end = first_of_next_month(start) - Duration::days(1);
        Ok(Self { start, end })
    }

    /// Build the default window when no month is given: the earliest
    /// semi-month boundary (day 1 or day 15) falling on or after one month
    /// ago, extended by twenty days.
    pub fn previous_semi_monthly(today: NaiveDate) -> Self {
        let floor = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        let start = semi_month_start_on_or_after(floor);
        Self { start, end: start + Duration::days(20) }
    }

    /// English month name of the period start, used in archive file names.
    pub fn month_name(&self) -> String {
        self.start.format("%B").to_string()
    }

    /// `YYYY-MM-DD` formatting for the API's period query parameters.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Day 1 of a valid year/month pair always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn semi_month_start_on_or_after(date: NaiveDate) -> NaiveDate {
    match date.day() {
        1 => date,
        d if d <= 15 => date.with_day(15).unwrap_or(date),
        _ => first_of_next_month(date),
    }
}

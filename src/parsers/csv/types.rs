use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Layout of the `Date` column: day of month, abbreviated month name,
/// four digit year (`05 Jan 2024`).
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Amounts must stay strictly below this magnitude, which keeps any
/// realistic statement total far from the `Decimal` range.
pub const MAX_ABS_AMOUNT: i64 = 1_000_000_000_000_000;

/// Raw `Date` cell from a statement export.
///
/// Only the `DD Mon YYYY` layout is accepted. Anything else (ISO dates,
/// slashes, numeric months) is rejected rather than guessed at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvDate(String);

impl CsvDate {
    pub fn parse(&self) -> Option<NaiveDate> {
        let s = self.0.trim();

        // chrono's %Y takes any digit count; the year must be exactly four.
        let year = s.rsplit(char::is_whitespace).next()?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CsvDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Raw `Amount` cell. May carry comma thousands separators (`1,234.56`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvAmount(String);

impl CsvAmount {
    pub fn parse(&self) -> Option<Decimal> {
        let cleaned: String = self.0.chars().filter(|c| *c != ',').collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        Decimal::from_str(cleaned)
            .ok()
            .filter(|amount| amount.abs() < Decimal::from(MAX_ABS_AMOUNT))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CsvAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

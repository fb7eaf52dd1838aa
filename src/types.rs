use crate::{errors::ParseError, parsers::csv::prelude::CsvTransaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved fallback category. Always present in the store and never
/// assigned through keyword matching.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of money movement for a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    /// Money out (an expense)
    Debit,
    /// Money in (a payment)
    Credit,
}

impl Flow {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("debit") {
            Some(Flow::Debit)
        } else if value.eq_ignore_ascii_case("credit") {
            Some(Flow::Credit)
        } else {
            None
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Debit => f.write_str("Debit"),
            Flow::Credit => f.write_str("Credit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub details: String,
    pub amount: Decimal,
    pub flow: Flow,
    pub category: String,
}

impl Transaction {
    /// Details as compared against keywords: trimmed and lower-cased.
    pub fn match_key(&self) -> String {
        self.details.trim().to_lowercase()
    }

    pub fn is_debit(&self) -> bool {
        self.flow == Flow::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.flow == Flow::Credit
    }
}

/// Total amount spent per category. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: Decimal,
}

impl TryFrom<CsvTransaction> for Transaction {
    type Error = ParseError;

    fn try_from(row: CsvTransaction) -> Result<Self, Self::Error> {
        let category = row
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Ok(Transaction {
            date: row.date,
            details: row.details,
            amount: row.amount,
            flow: row.flow,
            category,
        })
    }
}

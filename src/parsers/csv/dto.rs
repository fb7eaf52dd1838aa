use super::types::{CsvAmount, CsvDate};
use crate::{errors::ParseError, types::Flow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CsvTransactionRaw {
    #[serde(rename = "Date")]
    pub date: CsvDate,
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Amount")]
    pub amount: CsvAmount,
    #[serde(rename = "Debit/Credit")]
    pub flow: String,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvTransaction {
    pub date: NaiveDate,
    pub details: String,
    pub amount: Decimal,
    pub flow: Flow,
    pub category: Option<String>,
}

impl CsvTransaction {
    /// Validates one raw record. `row` is the 1-based data row used in errors.
    pub fn from_raw(row: usize, raw: CsvTransactionRaw) -> Result<Self, ParseError> {
        let date = raw.date.parse().ok_or_else(|| ParseError::InvalidDate {
            row,
            value: raw.date.as_str().to_string(),
        })?;

        let amount = raw.amount.parse().ok_or_else(|| ParseError::InvalidAmount {
            row,
            value: raw.amount.as_str().to_string(),
        })?;

        let flow = Flow::parse(&raw.flow).ok_or_else(|| ParseError::InvalidFlow {
            row,
            value: raw.flow.clone(),
        })?;

        Ok(CsvTransaction {
            date,
            details: raw.details,
            amount,
            flow,
            category: raw.category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(date: &str, amount: &str, flow: &str) -> CsvTransactionRaw {
        CsvTransactionRaw {
            date: date.into(),
            details: "Coffee Shop".to_string(),
            amount: amount.into(),
            flow: flow.to_string(),
            category: None,
        }
    }

    #[test]
    fn test_from_raw_valid() {
        let txn = CsvTransaction::from_raw(1, raw("05 Jan 2024", "12.50", "Debit")).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(txn.amount, dec!(12.50));
        assert_eq!(txn.flow, Flow::Debit);
        assert_eq!(txn.details, "Coffee Shop");
    }

    #[test]
    fn test_from_raw_reports_row_and_value() {
        let err = CsvTransaction::from_raw(3, raw("2024-01-05", "12.50", "Debit")).unwrap_err();
        match err {
            ParseError::InvalidDate { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "2024-01-05");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_raw_invalid_amount() {
        let err = CsvTransaction::from_raw(2, raw("05 Jan 2024", "abc", "Debit")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount { row: 2, .. }));
    }

    #[test]
    fn test_from_raw_invalid_flow() {
        let err = CsvTransaction::from_raw(1, raw("05 Jan 2024", "1.00", "Transfer")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFlow { row: 1, .. }));
    }
}

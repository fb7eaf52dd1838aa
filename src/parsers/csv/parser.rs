use super::dto::{CsvTransaction, CsvTransactionRaw};
use crate::errors::{ParseError, ParseResult};
use crate::parsers::traits::Parser;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Headers every statement export must carry. `Category` is optional.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Details", "Amount", "Debit/Credit"];

pub struct CsvParser;

impl CsvParser {
    fn check_headers(headers: &StringRecord) -> ParseResult<()> {
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ParseError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }
}

impl Parser for CsvParser {
    type Output = CsvTransaction;

    fn parse(content: &str) -> ParseResult<Vec<Self::Output>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();
        Self::check_headers(&headers)?;

        let mut transactions = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let raw: CsvTransactionRaw = record.deserialize(Some(&headers))?;
            transactions.push(CsvTransaction::from_raw(index + 1, raw)?);
        }

        Ok(transactions)
    }
}

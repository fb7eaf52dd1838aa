use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a statement export into transactions.
///
/// Any of these aborts the whole load: no partial list of transactions is
/// ever returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A required header is not present in the input
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Date cell does not follow the `DD Mon YYYY` layout
    #[error("Invalid date {value:?} on row {row}, expected a date like \"05 Jan 2024\"")]
    InvalidDate { row: usize, value: String },

    /// Amount cell is not a decimal number once thousands separators are
    /// removed, or its magnitude is out of range
    #[error("Invalid amount {value:?} on row {row}")]
    InvalidAmount { row: usize, value: String },

    /// `Debit/Credit` cell holds something other than `Debit` or `Credit`
    #[error("Invalid Debit/Credit value {value:?} on row {row}")]
    InvalidFlow { row: usize, value: String },

    /// The CSV reader could not decode a record
    #[error("CSV decode failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read {path}: {source}")]
    ReadContentFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The builder was asked to parse without content or a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,
}

/// Errors raised while reading or writing the category file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold a category-to-keywords mapping.
    /// Learned keywords are never discarded to recover from this.
    #[error("Category file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode categories: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from category and keyword mutations.
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors from applying one user correction. Each row fails on its own.
#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("No transaction at row {0}")]
    UnknownTransaction(usize),

    /// Only expenses (debits) can be recategorized
    #[error("Row {0} is not an expense")]
    NotAnExpense(usize),

    #[error(transparent)]
    Category(#[from] CategoryError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
pub type CategoryResult<T> = Result<T, CategoryError>;

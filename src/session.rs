//! Session-scoped state and the command handlers a presentation layer calls.
//!
//! A [`Session`] owns the category store and the working set of the last
//! upload. Handlers run one at a time to completion; the store is flushed
//! to disk inside each mutating handler, independent of the session.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::builder::ParserBuilder;
use crate::categorizer::{Categorizer, ResolutionPolicy};
use crate::config::Config;
use crate::errors::{CorrectionError, ParseResult, PersistenceResult};
use crate::feedback::{Correction, Edit, apply_corrections};
use crate::store::CategoryStore;
use crate::summary;
use crate::types::{CategorySummary, Transaction};

#[derive(Debug)]
pub struct Session {
    store: CategoryStore,
    transactions: Vec<Transaction>,
    policy: ResolutionPolicy,
}

impl Session {
    pub fn new(store: CategoryStore, policy: ResolutionPolicy) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            policy,
        }
    }

    /// Loads the store named by `config`. A corrupt store fails the open.
    pub fn open(config: &Config) -> PersistenceResult<Self> {
        let store = CategoryStore::load(&config.store_path)?;
        Ok(Self::new(store, config.resolution))
    }

    /// Parses and categorizes an uploaded statement, replacing the working
    /// set. On error the working set is left empty.
    pub fn on_upload(&mut self, content: &str) -> ParseResult<&[Transaction]> {
        self.load(ParserBuilder::new().content(content))
    }

    pub fn on_upload_file(&mut self, path: impl AsRef<Path>) -> ParseResult<&[Transaction]> {
        self.load(ParserBuilder::new().path(path.as_ref()))
    }

    fn load(&mut self, builder: ParserBuilder) -> ParseResult<&[Transaction]> {
        self.transactions.clear();

        let mut transactions = builder.parse().inspect_err(|err| {
            warn!(error = %err, "failed to load statement");
        })?;
        Categorizer::new(&self.store, self.policy).apply(&mut transactions);

        info!(count = transactions.len(), "loaded statement");
        self.transactions = transactions;
        Ok(&self.transactions)
    }

    /// Creates a category. Returns `false` when it already exists or the
    /// name is blank.
    pub fn on_add_category(&mut self, name: &str) -> PersistenceResult<bool> {
        self.store.add_category(name)
    }

    /// Applies per-row category edits, learning a keyword for each change.
    /// Only debit rows are editable. One outcome per edit, in order.
    pub fn on_apply_edits(&mut self, edits: &[Edit]) -> Vec<Result<Correction, CorrectionError>> {
        apply_corrections(&mut self.transactions, edits, &mut self.store)
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Expenses with their working-set row index, which is what edits refer to.
    pub fn debits(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions.iter().enumerate().filter(|(_, t)| t.is_debit())
    }

    /// Payments with their working-set row index.
    pub fn credits(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions.iter().enumerate().filter(|(_, t)| t.is_credit())
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.store.names()
    }

    /// Spending per category over the debits of the working set.
    pub fn expense_summary(&self) -> Vec<CategorySummary> {
        summary::summarize(self.debits().map(|(_, t)| t))
    }

    pub fn total_credits(&self) -> Decimal {
        summary::total_credits(&self.transactions)
    }

    pub fn total_debits(&self) -> Decimal {
        summary::total_debits(&self.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseError;
    use crate::store::DEFAULT_STORE_FILE;
    use crate::types::UNCATEGORIZED;
    use rust_decimal_macros::dec;
    use tempfile::{TempDir, tempdir};

    const STATEMENT: &str = "\
Date,Details,Amount,Debit/Credit
05 Jan 2024,Coffee Shop,12.50,Debit
06 Jan 2024,Rent Payment,\"1,234.56\",Debit
07 Jan 2024,Salary,\"5,000.00\",Credit
08 Jan 2024,Bakery,3.00,Debit
";

    fn open(dir: &TempDir) -> Session {
        let config = Config::new().with_store_path(dir.path().join(DEFAULT_STORE_FILE));
        Session::open(&config).unwrap()
    }

    #[test]
    fn test_upload_categorizes_with_store() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_add_category("Food").unwrap();
        session.on_upload(STATEMENT).unwrap();
        session.on_apply_edits(&[Edit::new(0, "Food")]);

        let mut next = open(&dir);
        let txns = next.on_upload(STATEMENT).unwrap();
        assert_eq!(txns[0].category, "Food");
        assert_eq!(txns[1].category, UNCATEGORIZED);
    }

    #[test]
    fn test_correction_survives_new_session() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_add_category("Housing").unwrap();
        session.on_upload(STATEMENT).unwrap();

        let outcomes = session.on_apply_edits(&[Edit::new(1, "Housing")]);
        assert!(outcomes[0].is_ok());
        assert_eq!(session.transactions()[1].category, "Housing");
        drop(session);

        let mut next = open(&dir);
        let txns = next.on_upload(STATEMENT).unwrap();
        assert_eq!(txns[1].category, "Housing");
    }

    #[test]
    fn test_bad_upload_clears_working_set() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_upload(STATEMENT).unwrap();
        assert_eq!(session.transactions().len(), 4);

        let bad = "Date,Details,Amount,Debit/Credit\n2024-01-05,Coffee Shop,12.50,Debit\n";
        let err = session.on_upload(bad).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDate { .. }));
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_edit_on_payment_row_is_rejected() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_add_category("Income").unwrap();
        session.on_upload(STATEMENT).unwrap();

        let outcomes = session.on_apply_edits(&[Edit::new(2, "Income")]);
        assert!(matches!(outcomes[0], Err(CorrectionError::NotAnExpense(2))));
        assert_eq!(session.transactions()[2].category, UNCATEGORIZED);
        assert!(session.store().get("Income").unwrap().keywords.is_empty());
    }

    #[test]
    fn test_oversized_amount_rejects_upload() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        let content = "Date,Details,Amount,Debit/Credit\n\
                       05 Jan 2024,Wire,\"79,228,162,514,264,337,593,543,950,335\",Debit\n\
                       06 Jan 2024,Wire,1,Debit\n";
        let err = session.on_upload(content).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount { row: 1, .. }));
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_upload_missing_column() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        let err = session.on_upload("Date,Details,Amount\n05 Jan 2024,Coffee,1.00\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn(column) if column == "Debit/Credit"));
    }

    #[test]
    fn test_debits_credits_and_totals() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_upload(STATEMENT).unwrap();

        let debit_rows: Vec<_> = session.debits().map(|(i, _)| i).collect();
        let credit_rows: Vec<_> = session.credits().map(|(i, _)| i).collect();
        assert_eq!(debit_rows, [0, 1, 3]);
        assert_eq!(credit_rows, [2]);

        assert_eq!(session.total_credits(), dec!(5000.00));
        let summed: Decimal = session.expense_summary().iter().map(|s| s.total_amount).sum();
        assert_eq!(summed, session.total_debits());
        assert_eq!(summed, dec!(1250.06));
    }

    #[test]
    fn test_expense_summary_after_edits() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        session.on_add_category("Food").unwrap();
        session.on_add_category("Housing").unwrap();
        session.on_upload(STATEMENT).unwrap();
        session.on_apply_edits(&[Edit::new(0, "Food"), Edit::new(1, "Housing"), Edit::new(3, "Food")]);

        let summary = session.expense_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category, "Housing");
        assert_eq!(summary[0].total_amount, dec!(1234.56));
        assert_eq!(summary[1].category, "Food");
        assert_eq!(summary[1].total_amount, dec!(15.50));
    }

    #[test]
    fn test_category_names_in_creation_order() {
        let dir = tempdir().unwrap();
        let mut session = open(&dir);
        assert!(session.on_add_category("Travel").unwrap());
        assert!(session.on_add_category("Food").unwrap());
        assert!(!session.on_add_category("Travel").unwrap());
        assert_eq!(session.category_names(), [UNCATEGORIZED, "Travel", "Food"]);
    }

    #[test]
    fn test_open_corrupt_store_fails() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_STORE_FILE), "not json").unwrap();
        let config = Config::new().with_store_path(dir.path().join(DEFAULT_STORE_FILE));
        assert!(Session::open(&config).is_err());
    }
}

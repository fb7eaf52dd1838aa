//! Learning from user corrections.
//!
//! Moving a transaction to another category memorizes its exact details
//! string as a keyword of that category, so the next upload with the same
//! details is labelled automatically.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CategoryError, CorrectionError};
use crate::store::CategoryStore;
use crate::types::Transaction;

/// A user request to move the transaction at `index` to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub index: usize,
    pub category: String,
}

impl Edit {
    pub fn new(index: usize, category: impl Into<String>) -> Self {
        Self {
            index,
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The transaction already had the requested category.
    Unchanged,
    /// The transaction moved. `learned` is false when the keyword was
    /// already known or the target is the sentinel category.
    Reassigned { from: String, learned: bool },
}

/// Moves `transaction` to `category` and records its details as a keyword.
///
/// The target category must exist. If the keyword cannot be persisted the
/// transaction keeps its previous category.
pub fn apply_correction(
    transaction: &mut Transaction,
    category: &str,
    store: &mut CategoryStore,
) -> Result<Correction, CategoryError> {
    if transaction.category == category {
        return Ok(Correction::Unchanged);
    }
    if !store.contains(category) {
        return Err(CategoryError::UnknownCategory(category.to_string()));
    }

    let from = std::mem::replace(&mut transaction.category, category.to_string());
    match store.add_keyword(category, &transaction.details) {
        Ok(learned) => Ok(Correction::Reassigned { from, learned }),
        Err(err) => {
            transaction.category = from;
            Err(err)
        }
    }
}

/// Applies a batch of edits row by row. Only debit rows can be edited.
///
/// There is no all-or-nothing guarantee: a failing edit is reported in its
/// slot of the returned vector and the remaining edits still run.
pub fn apply_corrections(
    transactions: &mut [Transaction],
    edits: &[Edit],
    store: &mut CategoryStore,
) -> Vec<Result<Correction, CorrectionError>> {
    edits
        .iter()
        .map(|edit| -> Result<Correction, CorrectionError> {
            let transaction = transactions
                .get_mut(edit.index)
                .ok_or(CorrectionError::UnknownTransaction(edit.index))?;
            if !transaction.is_debit() {
                return Err(CorrectionError::NotAnExpense(edit.index));
            }
            Ok(apply_correction(transaction, &edit.category, store)?)
        })
        .inspect(|outcome| {
            if let Err(err) = outcome {
                warn!(error = %err, "correction failed");
            }
        })
        .collect()
}

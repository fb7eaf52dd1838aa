//! Assigns categories to transactions by exact, case-insensitive matching
//! of the transaction details against each category's keywords.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::store::CategoryStore;
use crate::types::{Transaction, UNCATEGORIZED};

/// How a transaction is labelled when its details match keywords in more
/// than one category. Categories are ranked by creation order in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// The most recently created matching category wins.
    #[default]
    LastMatchWins,
    /// The earliest created matching category wins.
    FirstMatchWins,
}

impl ResolutionPolicy {
    /// Picks one category rank out of the matching ones. `ranks` is never
    /// empty and is in ascending order.
    fn resolve(self, ranks: &[usize]) -> Option<usize> {
        match self {
            ResolutionPolicy::LastMatchWins => ranks.last().copied(),
            ResolutionPolicy::FirstMatchWins => ranks.first().copied(),
        }
    }
}

/// Keyword index built from a store snapshot.
#[derive(Debug)]
pub struct Categorizer<'a> {
    names: Vec<&'a str>,
    // lower-cased keyword -> ascending category ranks
    index: HashMap<String, Vec<usize>>,
    policy: ResolutionPolicy,
}

impl<'a> Categorizer<'a> {
    pub fn new(store: &'a CategoryStore, policy: ResolutionPolicy) -> Self {
        let mut names = Vec::new();
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        let matchable = store
            .categories()
            .iter()
            .filter(|c| !c.is_sentinel() && !c.keywords.is_empty());

        for category in matchable {
            let rank = names.len();
            names.push(category.name.as_str());
            for keyword in &category.keywords {
                let ranks = index.entry(keyword.to_lowercase()).or_default();
                if ranks.last() != Some(&rank) {
                    ranks.push(rank);
                }
            }
        }

        Self {
            names,
            index,
            policy,
        }
    }

    /// Category for a single details string, `None` when nothing matches.
    pub fn lookup(&self, details: &str) -> Option<&'a str> {
        let key = details.trim().to_lowercase();
        let ranks = self.index.get(&key)?;
        self.policy.resolve(ranks).map(|rank| self.names[rank])
    }

    /// Re-labels every transaction from scratch: each one is reset to the
    /// sentinel and then given its matching category, if any.
    pub fn apply(&self, transactions: &mut [Transaction]) {
        for txn in transactions.iter_mut() {
            txn.category = self
                .lookup(&txn.details)
                .unwrap_or(UNCATEGORIZED)
                .to_string();
        }
    }
}

/// Categorizes `transactions` against `store` with the default policy.
pub fn categorize(mut transactions: Vec<Transaction>, store: &CategoryStore) -> Vec<Transaction> {
    Categorizer::new(store, ResolutionPolicy::default()).apply(&mut transactions);
    transactions
}

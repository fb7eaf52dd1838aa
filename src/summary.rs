use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::types::{CategorySummary, Flow, Transaction};

/// Per-category totals, largest first.
///
/// Groups are formed in category-name order and then stably sorted by total,
/// so equal totals always come out alphabetically.
pub fn summarize<'a, I>(transactions: I) -> Vec<CategorySummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for txn in transactions {
        *totals.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    let mut summary: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(category, total_amount)| CategorySummary {
            category: category.to_string(),
            total_amount,
        })
        .collect();
    summary.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    summary
}

fn total_for(transactions: &[Transaction], flow: Flow) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.flow == flow)
        .map(|t| t.amount)
        .sum()
}

/// Sum of all credit (money in) amounts.
pub fn total_credits(transactions: &[Transaction]) -> Decimal {
    total_for(transactions, Flow::Credit)
}

pub fn total_debits(transactions: &[Transaction]) -> Decimal {
    total_for(transactions, Flow::Debit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(category: &str, amount: Decimal, flow: Flow) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            details: "x".to_string(),
            amount,
            flow,
            category: category.to_string(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Food", dec!(12.50), Flow::Debit),
            txn("Housing", dec!(900.00), Flow::Debit),
            txn("Food", dec!(7.25), Flow::Debit),
            txn("Uncategorized", dec!(0.10), Flow::Debit),
            txn("Uncategorized", dec!(0.20), Flow::Debit),
            txn("Uncategorized", dec!(2500), Flow::Credit),
            txn("Uncategorized", dec!(1234.56), Flow::Credit),
        ]
    }

    #[test]
    fn test_summarize_groups_and_sorts_descending() {
        let debits: Vec<_> = sample().into_iter().filter(Transaction::is_debit).collect();
        let summary = summarize(&debits);

        let rows: Vec<_> = summary
            .iter()
            .map(|s| (s.category.as_str(), s.total_amount))
            .collect();
        assert_eq!(
            rows,
            [
                ("Housing", dec!(900.00)),
                ("Food", dec!(19.75)),
                ("Uncategorized", dec!(0.30)),
            ]
        );
    }

    #[test]
    fn test_summary_total_matches_debits_exactly() {
        let transactions = sample();
        let debits: Vec<_> = transactions.iter().filter(|t| t.is_debit()).collect();

        let summed: Decimal = summarize(debits).iter().map(|s| s.total_amount).sum();
        assert_eq!(summed, total_debits(&transactions));
        assert_eq!(summed, dec!(920.05));
    }

    #[test]
    fn test_ties_are_alphabetical() {
        let transactions = vec![
            txn("Travel", dec!(10), Flow::Debit),
            txn("Books", dec!(10), Flow::Debit),
            txn("Games", dec!(10), Flow::Debit),
        ];
        let names: Vec<_> = summarize(&transactions)
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(names, ["Books", "Games", "Travel"]);
    }

    #[test]
    fn test_total_credits() {
        assert_eq!(total_credits(&sample()), dec!(3734.56));
        assert_eq!(total_credits(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_summarize_empty() {
        let none: Vec<Transaction> = Vec::new();
        assert!(summarize(&none).is_empty());
    }
}

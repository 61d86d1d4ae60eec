//! Pure derivations over a ledger snapshot: overall totals and per-date
//! grouping. Nothing here mutates or persists.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::Transaction;

/// Balance figures derived from a ledger snapshot. The three fields are
/// independent reductions; `expense` is the absolute value of the negative
/// sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub balance: f64,
    pub income: f64,
    pub expense: f64,
}

/// All entries sharing one calendar date, most recently created first.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub date_balance: f64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let balance = transactions.iter().map(|t| t.amount).sum();
    let income = transactions
        .iter()
        .map(|t| t.amount)
        .filter(|amount| *amount > 0.0)
        .sum();
    let expense: f64 = transactions
        .iter()
        .map(|t| t.amount)
        .filter(|amount| *amount < 0.0)
        .sum();
    Totals {
        balance,
        income,
        expense: expense.abs(),
    }
}

/// Partitions a snapshot by date, newest date first. Entries within a group
/// are ordered by descending id, and `date_balance` is the signed sum of the
/// group.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        by_date
            .entry(transaction.date)
            .or_default()
            .push(transaction.clone());
    }
    by_date
        .into_iter()
        .rev()
        .map(|(date, mut group)| {
            group.sort_by(|a, b| b.id.cmp(&a.id));
            let date_balance = group.iter().map(|t| t.amount).sum();
            DateGroup {
                date,
                transactions: group,
                date_balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, amount: f64, date: &str) -> Transaction {
        Transaction {
            id,
            description: format!("entry {}", id),
            amount,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn totals_of_empty_ledger_are_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn totals_reduce_income_and_expense_independently() {
        let snapshot = vec![
            entry(1, 50_000.0, "2024-01-10"),
            entry(2, -300.0, "2024-01-10"),
        ];
        let totals = totals(&snapshot);
        assert_eq!(totals.balance, 49_700.0);
        assert_eq!(totals.income, 50_000.0);
        assert_eq!(totals.expense, 300.0);
    }

    #[test]
    fn balance_identity_holds_without_zero_amounts() {
        let snapshot = vec![
            entry(1, 1_200.5, "2024-01-08"),
            entry(2, -99.5, "2024-01-09"),
            entry(3, 40.0, "2024-01-10"),
            entry(4, -0.25, "2024-01-10"),
        ];
        let totals = totals(&snapshot);
        assert!((totals.balance - (totals.income - totals.expense)).abs() < 1e-9);
    }

    #[test]
    fn grouping_of_empty_ledger_is_empty() {
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn groups_are_date_descending_and_id_descending_within() {
        let snapshot = vec![
            entry(1, 50_000.0, "2024-01-10"),
            entry(2, -300.0, "2024-01-10"),
            entry(3, -40.0, "2024-01-12"),
        ];
        let groups = group_by_date(&snapshot);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2024-01-12".parse().unwrap());
        assert_eq!(groups[1].date, "2024-01-10".parse().unwrap());
        assert_eq!(groups[1].date_balance, 49_700.0);
        let ids: Vec<i64> = groups[1].transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn grouping_partitions_the_snapshot_exactly() {
        let snapshot = vec![
            entry(5, 10.0, "2024-02-01"),
            entry(3, -2.0, "2024-01-15"),
            entry(8, 4.0, "2024-02-01"),
            entry(1, 7.0, "2023-12-31"),
        ];
        let groups = group_by_date(&snapshot);
        let mut regrouped: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.transactions.iter().map(|t| t.id))
            .collect();
        regrouped.sort_unstable();
        assert_eq!(regrouped, vec![1, 3, 5, 8]);
        for pair in groups.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
    }
}

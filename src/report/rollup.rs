//! Per-month rollups for a calendar year.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind};

/// The totals for one calendar month, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRollup {
    /// The calendar year of the rollup.
    pub year: i32,
    /// The month number, 1 through 12.
    pub month: u8,
    /// The sum of income amounts in the month.
    pub income: i64,
    /// The sum of expense amounts in the month.
    pub expense: i64,
    /// `income - expense` for the month.
    pub balance: i64,
}

/// Group `year`'s transactions by month and total each group.
///
/// Transactions outside `year` are ignored. The result is ordered by
/// month ascending and contains one entry per month that has at least
/// one transaction; months without transactions are omitted, not
/// zero-filled. Callers that want all twelve months for presentation
/// must zero-fill themselves.
pub fn rollup_by_month(transactions: &[Transaction], year: i32) -> Vec<MonthlyRollup> {
    let mut totals: BTreeMap<u8, (i64, i64)> = BTreeMap::new();

    for transaction in transactions {
        if transaction.date.year() != year {
            continue;
        }

        let entry = totals.entry(u8::from(transaction.date.month())).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount,
            TransactionKind::Expense => entry.1 += transaction.amount,
        }
    }

    totals
        .into_iter()
        .map(|(month, (income, expense))| MonthlyRollup {
            year,
            month,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        auth::OwnerId,
        transaction::{Transaction, TransactionKind},
    };

    use super::{MonthlyRollup, rollup_by_month};

    fn test_transaction(kind: TransactionKind, amount: i64, date: Date) -> Transaction {
        Transaction {
            id: 0,
            owner: OwnerId::new(1),
            kind,
            amount,
            category: "Lainnya".to_owned(),
            description: String::new(),
            date,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            test_transaction(TransactionKind::Income, 5_000, date!(2024 - 01 - 15)),
            test_transaction(TransactionKind::Expense, 150, date!(2024 - 01 - 14)),
            test_transaction(TransactionKind::Expense, 50, date!(2024 - 02 - 01)),
        ]
    }

    #[test]
    fn rollup_groups_by_month_ascending() {
        let got = rollup_by_month(&sample_transactions(), 2024);

        let want = vec![
            MonthlyRollup {
                year: 2024,
                month: 1,
                income: 5_000,
                expense: 150,
                balance: 4_850,
            },
            MonthlyRollup {
                year: 2024,
                month: 2,
                income: 0,
                expense: 50,
                balance: -50,
            },
        ];
        assert_eq!(want, got);
    }

    #[test]
    fn rollup_omits_months_without_transactions() {
        let got = rollup_by_month(&sample_transactions(), 2024);

        assert_eq!(got.len(), 2, "only January and February have entries");
    }

    #[test]
    fn rollup_ignores_other_years() {
        let mut transactions = sample_transactions();
        transactions.push(test_transaction(
            TransactionKind::Income,
            9_999,
            date!(2023 - 12 - 31),
        ));

        let got = rollup_by_month(&transactions, 2024);

        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|rollup| rollup.year == 2024));
    }

    #[test]
    fn rollup_of_empty_year_is_empty() {
        let got = rollup_by_month(&sample_transactions(), 2025);

        assert!(got.is_empty());
    }

    #[test]
    fn rollup_is_idempotent() {
        let transactions = sample_transactions();

        let first = rollup_by_month(&transactions, 2024);
        let second = rollup_by_month(&transactions, 2024);

        assert_eq!(first, second);
    }

    #[test]
    fn rollup_balance_matches_income_minus_expense() {
        for rollup in rollup_by_month(&sample_transactions(), 2024) {
            assert_eq!(rollup.balance, rollup.income - rollup.expense);
        }
    }
}

//! Summary totals over a filtered transaction sequence.

use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind};

/// Totals over a filtered transaction sequence, in minor currency units.
///
/// Always computed over the entire filtered set, never a paginated page:
/// callers that also request pagination for a listing must summarize the
/// unsliced sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: i64,
    /// The sum of all expense amounts.
    pub total_expense: i64,
    /// `total_income - total_expense`.
    pub balance: i64,
    /// The number of transactions considered.
    pub transaction_count: usize,
}

/// Sum a transaction sequence into a [Summary].
///
/// An empty sequence produces an all-zero summary; that is not an error.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0;
    let mut total_expense = 0;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => total_expense += transaction.amount,
        }
    }

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transaction_count: transactions.len(),
    }
}

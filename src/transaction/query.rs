//! The query gateway over the transaction table.
//!
//! Every fetch is scoped to a single owner and returns transactions
//! ordered by date descending, with the row ID descending as the
//! tie-break so that the newest insertion comes first. Callers layer
//! pagination and aggregation on top of the returned sequence.

use rusqlite::{Connection, params_from_iter, types::Value};
use time::Date;

use crate::{Error, auth::OwnerId, transaction::TransactionKind};

use super::core::{Transaction, map_transaction_row};

/// The predicates the transaction store supports: equality on kind and
/// category, and an inclusive date range.
///
/// Fields left as `None` impose no constraint.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Match only transactions of this kind.
    pub kind: Option<TransactionKind>,
    /// Match only transactions with this category label.
    pub category: Option<String>,
    /// Match only transactions dated on or after this date.
    pub date_from: Option<Date>,
    /// Match only transactions dated on or before this date.
    pub date_to: Option<Date>,
}

/// Fetch all of `owner`'s transactions matching `query`, newest first.
///
/// Ties on the date are broken by row ID descending so the ordering is
/// stable across calls while the underlying data does not change.
///
/// # Errors
/// Returns [Error::UpstreamFailure] if the query fails; the failure is
/// surfaced immediately without retry.
pub fn fetch_transactions(
    owner: OwnerId,
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut where_clause_parts = vec!["owner_id = ?1".to_string()];
    let mut query_parameters = vec![Value::Integer(owner.as_i64())];

    if let Some(kind) = query.kind {
        where_clause_parts.push(format!("kind = ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(kind.as_str().to_owned()));
    }

    if let Some(ref category) = query.category {
        where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(category.clone()));
    }

    if let Some(date_from) = query.date_from {
        where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(date_from.to_string()));
    }

    if let Some(date_to) = query.date_to {
        where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(date_to.to_string()));
    }

    let query_string = format!(
        "SELECT id, owner_id, kind, amount, category, description, date, \
         created_at, updated_at \
         FROM \"transaction\" WHERE {} \
         ORDER BY date DESC, id DESC",
        where_clause_parts.join(" AND ")
    );

    connection
        .prepare(&query_string)?
        .query_map(params_from_iter(query_parameters.iter()), |row| {
            map_transaction_row(row)
        })?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        auth::OwnerId,
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{TransactionQuery, fetch_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn seed_transactions(conn: &Connection, owner: OwnerId) {
        let rows = [
            (TransactionKind::Income, 5_000, "Gaji", date!(2024 - 01 - 15)),
            (
                TransactionKind::Expense,
                150,
                "Makanan",
                date!(2024 - 01 - 14),
            ),
            (
                TransactionKind::Expense,
                50,
                "Transportasi",
                date!(2024 - 02 - 01),
            ),
        ];

        for (kind, amount, category, date) in rows {
            create_transaction(
                Transaction::build(owner, kind, amount, category).date(date),
                conn,
            )
            .expect("Could not create transaction");
        }
    }

    #[test]
    fn fetch_orders_by_date_descending() {
        let conn = get_test_connection();
        let owner = OwnerId::new(1);
        seed_transactions(&conn, owner);

        let got = fetch_transactions(owner, &TransactionQuery::default(), &conn)
            .expect("Could not fetch transactions");

        let dates: Vec<_> = got.iter().map(|transaction| transaction.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 02 - 01),
                date!(2024 - 01 - 15),
                date!(2024 - 01 - 14)
            ]
        );
    }

    #[test]
    fn fetch_breaks_date_ties_newest_insertion_first() {
        let conn = get_test_connection();
        let owner = OwnerId::new(1);
        let day = date!(2024 - 03 - 01);
        for amount in [100, 200, 300] {
            create_transaction(
                Transaction::build(owner, TransactionKind::Expense, amount, "Makanan").date(day),
                &conn,
            )
            .unwrap();
        }

        let got = fetch_transactions(owner, &TransactionQuery::default(), &conn).unwrap();

        let amounts: Vec<_> = got.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(amounts, vec![300, 200, 100]);
    }

    #[test]
    fn fetch_filters_by_kind() {
        let conn = get_test_connection();
        let owner = OwnerId::new(1);
        seed_transactions(&conn, owner);

        let query = TransactionQuery {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        };
        let got = fetch_transactions(owner, &query, &conn).unwrap();

        assert_eq!(got.len(), 2);
        assert!(
            got.iter()
                .all(|transaction| transaction.kind == TransactionKind::Expense)
        );
    }

    #[test]
    fn fetch_filters_by_category() {
        let conn = get_test_connection();
        let owner = OwnerId::new(1);
        seed_transactions(&conn, owner);

        let query = TransactionQuery {
            category: Some("Makanan".to_owned()),
            ..Default::default()
        };
        let got = fetch_transactions(owner, &query, &conn).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "Makanan");
    }

    #[test]
    fn fetch_date_bounds_are_inclusive() {
        let conn = get_test_connection();
        let owner = OwnerId::new(1);
        seed_transactions(&conn, owner);

        let query = TransactionQuery {
            date_from: Some(date!(2024 - 01 - 15)),
            date_to: Some(date!(2024 - 01 - 15)),
            ..Default::default()
        };
        let got = fetch_transactions(owner, &query, &conn).unwrap();

        assert_eq!(got.len(), 1, "boundary date should match exactly once");
        assert_eq!(got[0].date, date!(2024 - 01 - 15));
    }

    #[test]
    fn fetch_never_returns_another_owners_rows() {
        let conn = get_test_connection();
        seed_transactions(&conn, OwnerId::new(1));

        let got = fetch_transactions(OwnerId::new(2), &TransactionQuery::default(), &conn)
            .expect("Could not fetch transactions");

        assert!(got.is_empty());
    }
}

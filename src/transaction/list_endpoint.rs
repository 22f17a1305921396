//! The endpoint for listing transactions with filters and pagination.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::OwnerId,
    filter::{FilterCriteria, FilterParams, paginate},
    transaction::fetch_transactions,
};

/// Respond with the caller's transactions, filtered, ordered by date
/// descending, and paginated.
///
/// Pagination is applied after filtering and ordering, so a page is a
/// window into the full filtered sequence.
pub(crate) async fn get_transactions_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, Error> {
    let criteria = FilterCriteria::try_from(params)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = fetch_transactions(owner, &criteria.query, &connection)?;
    let page = paginate(transactions, criteria.limit, criteria.offset);

    Ok(Json(json!({ "success": true, "data": page })))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        endpoints,
        test_utils::{TEST_TOKEN, new_test_server, new_test_state, seed_transaction, test_owner},
        transaction::{Transaction, TransactionKind},
    };

    #[tokio::test]
    async fn list_returns_newest_first() {
        let state = new_test_state();
        seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Income, 5_000, "Gaji")
                .date(date!(2024 - 01 - 15)),
        )
        .unwrap();
        seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Expense, 150, "Makanan")
                .date(date!(2024 - 01 - 20)),
        )
        .unwrap();
        let server = new_test_server(state);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(TEST_TOKEN)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2024-01-20");
        assert_eq!(rows[1]["date"], "2024-01-15");
    }

    #[tokio::test]
    async fn list_applies_filters_and_pagination() {
        let state = new_test_state();
        for day in 1..=5u8 {
            seed_transaction(
                &state,
                Transaction::build(test_owner(), TransactionKind::Expense, 100, "Makanan")
                    .date(date!(2024 - 02 - 01).replace_day(day).unwrap()),
            )
            .unwrap();
        }
        seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Income, 5_000, "Gaji")
                .date(date!(2024 - 02 - 10)),
        )
        .unwrap();
        let server = new_test_server(state);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("type", "expense")
            .add_query_param("limit", "2")
            .add_query_param("offset", "1")
            .authorization_bearer(TEST_TOKEN)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2024-02-04");
        assert_eq!(rows[1]["date"], "2024-02-03");
    }

    #[tokio::test]
    async fn list_rejects_malformed_filter() {
        let server = new_test_server(new_test_state());

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("date_from", "20/01/2024")
            .authorization_bearer(TEST_TOKEN)
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn list_requires_a_session() {
        let server = new_test_server(new_test_state());

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_unauthorized();
    }
}

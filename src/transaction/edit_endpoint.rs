//! The endpoint for editing an existing transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Date;

use crate::{
    AppState, Error,
    auth::OwnerId,
    database_id::TransactionId,
    transaction::{TransactionUpdate, update_transaction},
};

/// The request body for editing a transaction. Absent fields keep their
/// current value.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EditTransactionBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    amount: Option<i64>,
    category: Option<String>,
    description: Option<String>,
    date: Option<Date>,
}

/// Apply a partial update to one of the caller's transactions and
/// respond with the updated record.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidKind] if `type` is not `income` or `expense`,
/// - [Error::InvalidAmount] if the new amount is zero or negative,
/// - [Error::NotFound] if the ID does not refer to one of the caller's
///   transactions,
/// - or [Error::UpstreamFailure] if there is an SQL error.
pub(crate) async fn edit_transaction_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(transaction_id): Path<TransactionId>,
    Json(body): Json<EditTransactionBody>,
) -> Result<Json<Value>, Error> {
    let update = TransactionUpdate {
        kind: body.kind.map(|kind| kind.parse()).transpose()?,
        amount: body.amount,
        category: body.category,
        description: body.description,
        date: body.date,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = update_transaction(transaction_id, owner, update, &connection)?;

    Ok(Json(json!({ "success": true, "data": transaction })))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        endpoints::{TRANSACTION, format_endpoint},
        test_utils::{TEST_TOKEN, new_test_server, new_test_state, seed_transaction, test_owner},
        transaction::{Transaction, TransactionKind},
    };

    #[tokio::test]
    async fn edit_replaces_only_given_fields() {
        let state = new_test_state();
        let transaction = seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Expense, 150, "Makanan")
                .description("nasi goreng"),
        )
        .unwrap();
        let server = new_test_server(state);

        let response = server
            .put(&format_endpoint(TRANSACTION, transaction.id))
            .authorization_bearer(TEST_TOKEN)
            .json(&json!({ "amount": 200 }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["amount"], 200);
        assert_eq!(body["data"]["category"], "Makanan");
        assert_eq!(body["data"]["description"], "nasi goreng");
    }

    #[tokio::test]
    async fn edit_with_unknown_kind_is_rejected() {
        let state = new_test_state();
        let transaction = seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Expense, 150, "Makanan"),
        )
        .unwrap();
        let server = new_test_server(state);

        let response = server
            .put(&format_endpoint(TRANSACTION, transaction.id))
            .authorization_bearer(TEST_TOKEN)
            .json(&json!({ "type": "transfer" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn edit_missing_transaction_is_not_found() {
        let server = new_test_server(new_test_state());

        let response = server
            .put(&format_endpoint(TRANSACTION, 999))
            .authorization_bearer(TEST_TOKEN)
            .json(&json!({ "amount": 200 }))
            .await;

        response.assert_status_not_found();
    }
}

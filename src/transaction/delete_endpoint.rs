//! The endpoint for deleting a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, auth::OwnerId, database_id::TransactionId, transaction::delete_transaction,
};

/// Delete one of the caller's transactions by its ID.
pub(crate) async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    delete_transaction(transaction_id, owner, &connection)?;

    Ok(Json(
        json!({ "success": true, "message": "transaction deleted" }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::{
        endpoints::{TRANSACTION, format_endpoint},
        test_utils::{TEST_TOKEN, new_test_server, new_test_state, seed_transaction, test_owner},
        transaction::{Transaction, TransactionKind},
    };

    #[tokio::test]
    async fn delete_removes_the_transaction() {
        let state = new_test_state();
        let transaction = seed_transaction(
            &state,
            Transaction::build(test_owner(), TransactionKind::Expense, 150, "Makanan"),
        )
        .unwrap();
        let server = new_test_server(state);
        let path = format_endpoint(TRANSACTION, transaction.id);

        let response = server.delete(&path).authorization_bearer(TEST_TOKEN).await;

        response.assert_status_ok();
        let lookup = server.get(&path).authorization_bearer(TEST_TOKEN).await;
        lookup.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = new_test_server(new_test_state());

        let response = server
            .delete(&format_endpoint(TRANSACTION, 999))
            .authorization_bearer(TEST_TOKEN)
            .await;

        response.assert_status_not_found();
    }
}

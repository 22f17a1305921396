//! The endpoint for retrieving a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, auth::OwnerId, database_id::TransactionId, transaction::get_transaction,
};

/// Respond with one of the caller's transactions by its ID.
///
/// Another owner's transaction is indistinguishable from a missing one:
/// both produce a 404.
pub(crate) async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = get_transaction(transaction_id, owner, &connection)?;

    Ok(Json(json!({ "success": true, "data": transaction })))
}

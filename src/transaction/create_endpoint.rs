//! The endpoint for recording a new transaction.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use time::Date;

use crate::{
    AppState, Error,
    auth::OwnerId,
    transaction::{Transaction, TransactionKind, create_transaction},
};

/// The request body for recording a transaction.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateTransactionBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    amount: Option<i64>,
    category: Option<String>,
    #[serde(default)]
    description: String,
    date: Option<Date>,
}

/// Record a new transaction for the calling owner.
///
/// The date defaults to today and the description to an empty string.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if `type`, `amount`, or `category` is absent,
/// - [Error::InvalidKind] if `type` is not `income` or `expense`,
/// - [Error::InvalidAmount] if the amount is zero or negative,
/// - or [Error::UpstreamFailure] if there is an SQL error.
pub(crate) async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(body): Json<CreateTransactionBody>,
) -> Result<Response, Error> {
    let kind: TransactionKind = body.kind.ok_or(Error::MissingField("type"))?.parse()?;
    let amount = body.amount.ok_or(Error::MissingField("amount"))?;
    let category = body.category.ok_or(Error::MissingField("category"))?;

    let mut builder =
        Transaction::build(owner, kind, amount, &category).description(&body.description);
    if let Some(date) = body.date {
        builder = builder.date(date);
    }

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = create_transaction(builder, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": transaction })),
    )
        .into_response())
}

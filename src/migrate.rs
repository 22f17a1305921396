//! One-shot import of legacy transaction records.
//!
//! Clients that kept their ledger in local storage can push it here in
//! one request. Records are imported one at a time: an invalid record is
//! skipped and reported, never aborting the rest of the batch. Only a
//! store failure aborts the import.

use axum::{Extension, Json, extract::State};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::OwnerId,
    filter::parse_date,
    transaction::{Transaction, TransactionKind, create_transaction},
};

/// The request body for the migration endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct MigrateBody {
    transactions: Vec<Value>,
}

/// A transaction record in the legacy client format.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    amount: Option<i64>,
    category: Option<String>,
    #[serde(default)]
    description: String,
    date: Option<String>,
}

/// Import a batch of legacy records as the calling owner's transactions.
///
/// Responds with the number of records imported and a list of per-record
/// error messages for the ones that were skipped.
///
/// # Errors
/// Returns [Error::UpstreamFailure] if the store fails; validation
/// problems in individual records are reported, not returned.
pub(crate) async fn migrate_endpoint(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Json(body): Json<MigrateBody>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let mut migrated = 0usize;
    let mut errors = Vec::new();

    for (index, value) in body.transactions.into_iter().enumerate() {
        match serde_json::from_value::<LegacyRecord>(value) {
            Ok(record) => match import_record(owner, record, &connection) {
                Ok(()) => migrated += 1,
                Err(Error::UpstreamFailure(error)) => return Err(Error::UpstreamFailure(error)),
                Err(error) => errors.push(format!("record {index}: {error}")),
            },
            Err(error) => errors.push(format!("record {index}: {error}")),
        }
    }

    tracing::info!(
        "migrated {migrated} legacy records for owner {owner}, skipped {}",
        errors.len()
    );

    Ok(Json(json!({
        "success": true,
        "migrated": migrated,
        "errors": errors,
    })))
}

fn import_record(
    owner: OwnerId,
    record: LegacyRecord,
    connection: &Connection,
) -> Result<(), Error> {
    let kind: TransactionKind = record.kind.ok_or(Error::MissingField("type"))?.parse()?;
    let amount = record.amount.ok_or(Error::MissingField("amount"))?;
    let category = record.category.ok_or(Error::MissingField("category"))?;

    let mut builder =
        Transaction::build(owner, kind, amount, &category).description(&record.description);
    if let Some(date) = parse_date(record.date.as_deref(), "date")? {
        builder = builder.date(date);
    }

    create_transaction(builder, connection)?;

    Ok(())
}

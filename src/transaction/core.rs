//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, auth::OwnerId, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brings money in or takes money out.
///
/// The kind determines the sign of the amount in aggregation: income adds
/// to the balance, expense subtracts from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The lowercase wire representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind \"{other}\"").into(),
            )),
        }
    }
}

/// An income or expense event recorded by an owner.
///
/// Amounts are positive integer minor currency units; the kind carries the
/// sign. To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The owner the transaction belongs to.
    pub owner: OwnerId,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money in minor currency units. Always positive.
    pub amount: i64,
    /// The category label, e.g. "Makanan", "Gaji".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The calendar date the transaction happened on.
    pub date: Date,
    /// When the record was created. Not used by aggregation.
    pub created_at: OffsetDateTime,
    /// When the record was last modified. Not used by aggregation.
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        owner: OwnerId,
        kind: TransactionKind,
        amount: i64,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            owner,
            kind,
            amount,
            category: category.to_owned(),
            description: String::new(),
            date: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The description defaults to an empty string and the date defaults to
/// today. Pass the finished builder to [create_transaction] to persist it.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The owner the transaction will belong to.
    pub owner: OwnerId,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount in minor currency units. Must be positive.
    pub amount: i64,
    /// The category label.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened on, today when `None`.
    pub date: Option<Date>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the date the transaction happened on.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }
}

/// The fields of a transaction that may be changed after creation.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// Replace the transaction kind.
    pub kind: Option<TransactionKind>,
    /// Replace the amount in minor currency units. Must be positive.
    pub amount: Option<i64>,
    /// Replace the category label.
    pub category: Option<String>,
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the date the transaction happened on.
    pub date: Option<Date>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is zero or negative,
/// - or [Error::UpstreamFailure] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount <= 0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    let now = OffsetDateTime::now_utc();
    let date = builder.date.unwrap_or(now.date());

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" \
             (owner_id, kind, amount, category, description, date, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
             RETURNING id, owner_id, kind, amount, category, description, date, \
             created_at, updated_at",
        )?
        .query_row(
            (
                builder.owner,
                builder.kind,
                builder.amount,
                builder.category,
                builder.description,
                date,
                now,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve one of `owner`'s transactions by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction belonging
///   to `owner`,
/// - or [Error::UpstreamFailure] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    owner: OwnerId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, owner_id, kind, amount, category, description, date, \
             created_at, updated_at \
             FROM \"transaction\" WHERE id = ?1 AND owner_id = ?2",
        )?
        .query_row((id, owner), map_transaction_row)?;

    Ok(transaction)
}

/// Apply `update` to one of `owner`'s transactions and bump `updated_at`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the new amount is zero or negative,
/// - [Error::NotFound] if `id` does not refer to a transaction belonging
///   to `owner`,
/// - or [Error::UpstreamFailure] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    owner: OwnerId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if let Some(amount) = update.amount
        && amount <= 0
    {
        return Err(Error::InvalidAmount(amount));
    }

    let current = get_transaction(id, owner, connection)?;

    let transaction = connection
        .prepare(
            "UPDATE \"transaction\" \
             SET kind = ?1, amount = ?2, category = ?3, description = ?4, \
             date = ?5, updated_at = ?6 \
             WHERE id = ?7 AND owner_id = ?8 \
             RETURNING id, owner_id, kind, amount, category, description, date, \
             created_at, updated_at",
        )?
        .query_row(
            (
                update.kind.unwrap_or(current.kind),
                update.amount.unwrap_or(current.amount),
                update.category.unwrap_or(current.category),
                update.description.unwrap_or(current.description),
                update.date.unwrap_or(current.date),
                OffsetDateTime::now_utc(),
                id,
                owner,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Delete one of `owner`'s transactions by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction belonging
///   to `owner`,
/// - or [Error::UpstreamFailure] if there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    owner: OwnerId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND owner_id = ?2",
        (id, owner),
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                amount INTEGER NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Covers the owner-scoped, date-ordered queries used by every listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner_date \
         ON \"transaction\"(owner_id, date)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        owner: row.get(1)?,
        kind: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

//! Owner identity and session resolution.
//!
//! The identity provider is an external collaborator: it provisions rows
//! in the session table and hands clients a bearer token. This module
//! only resolves tokens back to an owner, retrying transient store
//! failures with a bounded backoff before failing closed.

mod middleware;
mod retry;
mod session;

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

pub(crate) use middleware::{AuthState, auth_guard};
pub use retry::RetryPolicy;
pub(crate) use retry::resolve_owner;
pub use session::create_session;
pub(crate) use session::{create_session_table, resolve_session};

/// The owner an authenticated request acts on behalf of.
///
/// Handlers receive this as a request extension inserted by the auth
/// guard; every store operation is scoped to exactly one `OwnerId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(i64);

impl OwnerId {
    /// Create an owner ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for OwnerId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for OwnerId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(OwnerId)
    }
}

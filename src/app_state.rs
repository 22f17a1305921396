//! Defines the state shared between route handlers.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, auth::RetryPolicy, db};

/// The state of the application shared between route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// How session resolution behaves when the store fails transiently.
    pub retry_policy: RetryPolicy,
}

impl AppState {
    /// Create the shared application state, ensuring the database schema
    /// exists.
    ///
    /// # Errors
    /// Returns [Error::UpstreamFailure] if the schema cannot be created.
    pub fn new(db_connection: Connection, retry_policy: RetryPolicy) -> Result<Self, Error> {
        db::initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            retry_policy,
        })
    }
}

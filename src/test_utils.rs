//! Helpers shared by the endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{OwnerId, RetryPolicy, create_session},
    routing::build_router,
    transaction::{Transaction, TransactionBuilder, create_transaction},
};

pub(crate) const TEST_TOKEN: &str = "opensesame";

pub(crate) fn test_owner() -> OwnerId {
    OwnerId::new(1)
}

/// Create an app state over an in-memory database with one valid session
/// for [test_owner].
pub(crate) fn new_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database");
    let state =
        AppState::new(connection, RetryPolicy::default()).expect("Could not create app state");

    {
        let connection = state.db_connection.lock().unwrap();
        create_session(TEST_TOKEN, test_owner(), Duration::hours(1), &connection)
            .expect("Could not create session");
    }

    state
}

pub(crate) fn new_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

/// Insert a transaction directly into `state`'s database.
pub(crate) fn seed_transaction(
    state: &AppState,
    builder: TransactionBuilder,
) -> Result<Transaction, Error> {
    let connection = state.db_connection.lock().unwrap();
    create_transaction(builder, &connection)
}

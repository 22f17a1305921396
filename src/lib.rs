//! Spendlog is a web service for tracking personal income and expenses.
//!
//! This library provides a JSON REST API over a SQLite ledger: filtered
//! transaction listings, summary totals, monthly report rollups, and
//! downloadable CSV/JSON exports.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod category;
mod database_id;
mod db;
mod endpoints;
mod export;
mod filter;
mod logging;
mod migrate;
mod report;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use auth::{OwnerId, RetryPolicy, create_session};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request could not be matched to an authenticated owner.
    ///
    /// The session token is missing, expired, does not resolve to a
    /// session row, or the session store kept failing after retries. The
    /// response must never fall back to another owner's data.
    #[error("the request could not be matched to an authenticated owner")]
    Unauthorized,

    /// The filter query parameters could not be turned into a valid
    /// predicate.
    ///
    /// Covers malformed dates, a `date_from` after `date_to`, negative or
    /// non-numeric `limit`/`offset` values, and unknown `type` values.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The requested export format is not recognized.
    #[error("unsupported export format \"{0}\", use csv or json")]
    UnsupportedFormat(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., the transaction ID) are correct and that the
    /// resource belongs to the calling owner.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A transaction amount was zero or negative.
    ///
    /// Amounts are minor currency units and must be positive; the
    /// transaction kind determines the sign in aggregation.
    #[error("{0} is not a valid amount, amounts must be positive minor units")]
    InvalidAmount(i64),

    /// A transaction kind string was neither `income` nor `expense`.
    #[error("\"{0}\" is not a transaction kind, use income or expense")]
    InvalidKind(String),

    /// A required field was absent from a request body.
    #[error("the required field \"{0}\" is missing")]
    MissingField(&'static str),

    /// An error occurred while rendering an export payload.
    #[error("could not serialize export: {0}")]
    SerializationError(String),

    /// The transaction store failed.
    ///
    /// Wraps the underlying SQL error and surfaces it without retry;
    /// retries, if any, belong to the identity collaborator, not this
    /// core.
    #[error("the transaction store failed: {0}")]
    UpstreamFailure(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::UpstreamFailure(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::InvalidFilter(_)
            | Error::UnsupportedFormat(_)
            | Error::InvalidAmount(_)
            | Error::InvalidKind(_)
            | Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SerializationError(error) => {
                tracing::error!("could not serialize export: {error}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::UpstreamFailure(error) => {
                tracing::error!("the transaction store failed: {error}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::DatabaseLockError => {
                tracing::error!("could not acquire the database lock");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

//! Bounded retry for owner resolution.
//!
//! The identity provider is eventually consistent: a session row written
//! moments ago can be momentarily unreadable. Resolution therefore
//! retries transient store failures up to a configured number of
//! attempts with a linear backoff, then fails closed. A token that is
//! plainly unknown or expired is never retried.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::Error;

use super::{OwnerId, resolve_session};

/// How often and how patiently to retry transient failures while
/// resolving an owner.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// The total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The base wait between attempts; attempt `n` waits `n` times this.
    pub backoff: std::time::Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: std::time::Duration::from_millis(100),
        }
    }
}

/// Resolve a bearer token to an owner, retrying per `policy`.
///
/// Only [Error::UpstreamFailure] is retried; an unknown or expired token
/// fails immediately with [Error::Unauthorized].
///
/// # Errors
/// Returns [Error::Unauthorized] once the attempt budget is spent. The
/// underlying store error is logged, never surfaced to the caller: an
/// owner that cannot be resolved is treated the same as one that does
/// not exist.
pub async fn resolve_owner(
    token: &str,
    policy: RetryPolicy,
    db_connection: &Arc<Mutex<Connection>>,
) -> Result<OwnerId, Error> {
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        let result = {
            let connection = db_connection
                .lock()
                .map_err(|_| Error::DatabaseLockError)?;
            resolve_session(token, &connection)
        };

        match result {
            Err(Error::UpstreamFailure(error)) if attempt < attempts => {
                tracing::warn!(
                    "session lookup failed on attempt {attempt} of {attempts}: {error}"
                );
                tokio::time::sleep(policy.backoff * attempt).await;
            }
            Err(Error::UpstreamFailure(error)) => {
                tracing::error!("session lookup failed after {attempts} attempts: {error}");
            }
            other => return other,
        }
    }

    Err(Error::Unauthorized)
}

//! Session rows mapping bearer tokens to owners.
//!
//! Tokens are stored as SHA-256 digests so a leaked database does not
//! leak usable credentials. Rows carry an expiry; expired rows resolve
//! to [Error::Unauthorized] exactly like missing ones.

use rusqlite::Connection;
use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};

use crate::Error;

use super::OwnerId;

/// Create the session table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_session_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS session (
                token_hash BLOB PRIMARY KEY,
                owner_id INTEGER NOT NULL,
                expires_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Store a session row granting `owner` access for `valid_for`.
///
/// `token` is the plaintext bearer token the client will present; only
/// its digest is stored.
///
/// # Errors
/// Returns [Error::UpstreamFailure] if the row cannot be written.
pub fn create_session(
    token: &str,
    owner: OwnerId,
    valid_for: Duration,
    connection: &Connection,
) -> Result<(), Error> {
    let expires_at = OffsetDateTime::now_utc() + valid_for;

    connection.execute(
        "INSERT OR REPLACE INTO session (token_hash, owner_id, expires_at) \
         VALUES (?1, ?2, ?3)",
        (hash_token(token), owner, expires_at),
    )?;

    Ok(())
}

/// Resolve a bearer token to the owner it was issued for.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthorized] if the token is unknown or expired,
/// - or [Error::UpstreamFailure] if the lookup itself fails.
pub fn resolve_session(token: &str, connection: &Connection) -> Result<OwnerId, Error> {
    let row = connection
        .prepare("SELECT owner_id, expires_at FROM session WHERE token_hash = ?1")?
        .query_row([hash_token(token)], |row| {
            Ok((row.get::<usize, OwnerId>(0)?, row.get::<usize, OffsetDateTime>(1)?))
        });

    match row {
        Ok((owner, expires_at)) if expires_at > OffsetDateTime::now_utc() => Ok(owner),
        Ok(_) => Err(Error::Unauthorized),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::Unauthorized),
        Err(error) => Err(Error::UpstreamFailure(error)),
    }
}

fn hash_token(token: &str) -> Vec<u8> {
    Sha256::digest(token).to_vec()
}

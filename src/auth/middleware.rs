//! Authentication middleware that resolves bearer tokens to owners.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{RetryPolicy, resolve_owner};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The database connection holding the session table.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The retry policy for transient session lookup failures.
    pub retry_policy: RetryPolicy,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            retry_policy: state.retry_policy,
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The owner ID is placed into the request and the request executed
/// normally if the token resolves, otherwise a 401 response is returned
/// and the handler never runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(owner): Extension<OwnerId>` to receive the owner ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token.to_owned(),
        None => return Error::Unauthorized.into_response(),
    };

    let owner = match resolve_owner(&token, state.retry_policy, &state.db_connection).await {
        Ok(owner) => owner,
        Err(Error::Unauthorized) => return Error::Unauthorized.into_response(),
        Err(error) => {
            tracing::error!("could not resolve owner: {error}");
            return error.into_response();
        }
    };

    let (mut parts, body) = request.into_parts();
    parts.extensions.insert(owner);

    next.run(Request::from_parts(parts, body)).await
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

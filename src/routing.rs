//! Assembles the REST API routes.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState,
    auth::auth_guard,
    category::get_categories,
    endpoints,
    export::get_export,
    logging_middleware,
    migrate::migrate_endpoint,
    report::{get_monthly_report, get_summary},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Create the API router with all endpoints attached.
///
/// Everything except the category catalog and the coffee endpoint sits
/// behind the bearer token guard.
pub fn build_router(state: AppState) -> Router {
    let unprotected = Router::new()
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::COFFEE, get(get_coffee));

    let protected = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report))
        .route(endpoints::EXPORT, get(get_export))
        .route(endpoints::MIGRATE, post(migrate_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected
        .merge(unprotected)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_coffee() -> Response {
    StatusCode::IM_A_TEAPOT.into_response()
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "not found" })),
    )
        .into_response()
}

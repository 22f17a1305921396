//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged in full at the `debug` level. The bearer token
/// in the `Authorization` header is redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (mut headers, body_text) = extract_header_and_body_text_from_request(request).await;

    let authorization = headers.headers.remove(AUTHORIZATION);
    log_request(&headers, &body_text);
    if let Some(value) = authorization {
        headers.headers.insert(AUTHORIZATION, value);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    match truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT) {
        Some(preview) => {
            tracing::info!("Received request: {headers:#?}\nbody: {preview}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {headers:#?}\nbody: {body:?}"),
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    match truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT) {
        Some(preview) => {
            tracing::info!("Sending response: {headers:#?}\nbody: {preview}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {headers:#?}\nbody: {body:?}"),
    }
}

/// Truncate `body` to at most `limit` bytes without splitting a UTF-8
/// character. Bodies within the limit return `None` and are logged whole.
fn truncate_to_char_boundary(body: &str, limit: usize) -> Option<&str> {
    if body.len() <= limit {
        return None;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

//! Request-scoped middleware.

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::handlers::AppError;

/// Bounds each request by `deadline`.
///
/// When the deadline passes the handler future is dropped, which cancels any
/// in-flight store or cache call, and the client gets a 408 envelope.
pub async fn request_deadline(
    State(deadline): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %path, ?deadline, "Request deadline exceeded");
            AppError::request_canceled().into_response()
        }
    }
}

pub mod chat;
pub mod health;

use axum::{http::StatusCode, response::Response};
use service_core::error::ErrorResponse;

pub use chat::chat;
pub use health::health_check;

/// Unknown routes still answer with a JSON error body.
pub async fn not_found() -> Response {
    ErrorResponse::new("Not found").into_response_with(StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed() -> Response {
    ErrorResponse::new("Method not allowed").into_response_with(StatusCode::METHOD_NOT_ALLOWED)
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::ErrorResponse;
use thiserror::Error;

use crate::services::ProviderError;

/// Failure of a `/chat` request.
///
/// Validation problems are the caller's fault (400); anything raised by the
/// generator is reported verbatim as a 500.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No query provided")]
    NoQuery,

    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    Generation(#[from] ProviderError),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::NoQuery | ChatError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ChatError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status();
        ErrorResponse::new(self.to_string()).into_response_with(status)
    }
}

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ChatError;

/// Body of `POST /chat`.
///
/// Extracted from any JSON value: a missing, non-string or empty `query`
/// is rejected with `ChatError::NoQuery` rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
}

impl ChatRequest {
    pub fn from_value(body: &Value) -> Result<Self, ChatError> {
        body.get("query")
            .and_then(Value::as_str)
            .filter(|query| !query.is_empty())
            .map(|query| ChatRequest {
                query: query.to_string(),
            })
            .ok_or(ChatError::NoQuery)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ChatRequest
where
    S: Send + Sync,
{
    type Rejection = ChatError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ChatError::InvalidBody(rejection.body_text()))?;

        Self::from_value(&body)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

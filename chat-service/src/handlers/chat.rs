use axum::{extract::State, Json};

use crate::dtos::{ChatRequest, ChatResponse};
use crate::error::ChatError;
use crate::services::ProviderError;
use crate::startup::AppState;

/// `POST /chat`: forward the query to the configured generator.
#[tracing::instrument(
    skip(state, request),
    fields(provider = %state.generator.name(), query_len = request.query.len())
)]
pub async fn chat(
    State(state): State<AppState>,
    request: ChatRequest,
) -> Result<Json<ChatResponse>, ChatError> {
    let generation = state.generator.generate(&request.query);

    let result = match state.generation_timeout {
        Some(limit) => tokio::time::timeout(limit, generation)
            .await
            .unwrap_or_else(|_| Err(ProviderError::Timeout(limit.as_secs()))),
        None => generation.await,
    };

    let response = result.map_err(|e| {
        tracing::error!(error = %e, "Text generation failed");
        e
    })?;

    tracing::info!(response_len = response.len(), "Chat query answered");

    Ok(Json(ChatResponse { response }))
}

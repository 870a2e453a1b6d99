//! AI chat relay. Stateless: conversation history lives in the client.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Forwards `message` verbatim and returns the generated reply.
pub async fn relay(generator: &dyn TextGenerator, message: &str) -> Result<String, AppError> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let reply = generator.generate(message).await?;
    debug!("Chat reply: {} chars", reply.len());
    Ok(reply)
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = relay(state.llm.as_ref(), &request.message).await?;
    Ok(Json(ChatResponse { reply }))
}

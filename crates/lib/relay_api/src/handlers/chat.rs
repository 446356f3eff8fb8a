//! Chat handler — relays one message to the upstream completion API.

use axum::Json;
use axum::extract::State;
use relay_core::{ChatRequest, ChatResponse};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedJson;

/// `POST /chat` — forward `message` upstream and return the generated reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let reply = state.relay.handle(&request).await?;
    Ok(Json(reply))
}

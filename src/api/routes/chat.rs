//! Chat endpoint

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::evaluation::EvaluationInput;
use crate::domain::retrieval::RetrievedDocument;
use crate::domain::workflow::RouteDecision;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub transaction_id: String,
    pub session_id: String,
    pub retrieved_documents: Vec<RetrievedDocument>,
    pub route_taken: RouteDecision,
}

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message cannot be empty").with_param("message"));
    }

    let session = match request.session_id.as_deref() {
        Some(id) => state.sessions.get(id).await?,
        None => state.sessions.create(None).await?,
    };

    let outcome = state
        .engine
        .process(&request.message, Some(session.id.clone()))
        .await;

    info!(
        transaction_id = %outcome.transaction_id,
        session_id = %outcome.session_id,
        route = %outcome.route,
        "Chat request answered"
    );

    if let Err(e) = state
        .sessions
        .record_exchange(
            &session.id,
            &request.message,
            &outcome.response,
            &outcome.transaction_id,
        )
        .await
    {
        warn!(session_id = %session.id, error = %e, "Failed to update session history");
    }

    if let Some(queue) = &state.evaluation_queue {
        queue.submit(
            EvaluationInput::new(request.message.as_str(), outcome.response.as_str())
                .with_contexts(outcome.contexts())
                .with_transaction_id(outcome.transaction_id.as_str()),
        );
    }

    Ok(Json(ChatResponse {
        response: outcome.response,
        transaction_id: outcome.transaction_id,
        session_id: outcome.session_id,
        retrieved_documents: outcome.retrieved_documents,
        route_taken: outcome.route,
    }))
}

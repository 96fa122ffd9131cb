//! Chat session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::session::{HistoryEntry, SessionSummary};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionHistoryResponse {
    pub session_id: String,
    pub history: Vec<HistoryEntry>,
}

/// GET /sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ListSessionsResponse>, ApiError> {
    let sessions = state.sessions.list().await?;
    let total = sessions.len();

    Ok(Json(ListSessionsResponse { sessions, total }))
}

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSummary>), ApiError> {
    let session = state.sessions.create(request.name).await?;

    Ok((StatusCode::CREATED, Json(session.summary())))
}

/// DELETE /sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(session_id = %session_id, "Deleting session");

    state.sessions.delete(&session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /sessions/{session_id}/history
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionHistoryResponse>, ApiError> {
    let history = state.sessions.history(&session_id).await?;

    Ok(Json(SessionHistoryResponse {
        session_id,
        history,
    }))
}

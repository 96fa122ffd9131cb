//! Feedback endpoint

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub transaction_id: String,
    pub feedback: String,
    #[serde(default)]
    pub feedback_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub transaction_id: String,
}

/// POST /feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    debug!(transaction_id = %request.transaction_id, "Submitting feedback");

    if request.feedback.trim().is_empty() {
        return Err(ApiError::bad_request("Feedback cannot be empty").with_param("feedback"));
    }

    let record = state
        .results
        .record_feedback(
            &request.transaction_id,
            &request.feedback,
            request.feedback_text,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            id: record.id,
            transaction_id: record.transaction_id,
        }),
    ))
}

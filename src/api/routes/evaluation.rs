//! Evaluation endpoints

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::evaluation::{BatchEvaluationResult, EvaluationInput};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub scores: BTreeMap<&'static str, f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchEvaluationRequest {
    pub cases: Vec<EvaluationInput>,
}

/// GET /evaluation/{transaction_id}
pub async fn get_evaluation(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let record = state
        .results
        .evaluation(&transaction_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "No evaluation recorded for transaction '{}'",
                transaction_id
            ))
        })?;

    Ok(Json(EvaluationResponse {
        transaction_id: Some(record.transaction_id),
        scores: record.scores.to_map(),
        evaluated_at: Some(record.evaluated_at),
    }))
}

/// POST /evaluation
pub async fn evaluate(
    State(state): State<AppState>,
    Json(input): Json<EvaluationInput>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    if input.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query cannot be empty").with_param("query"));
    }

    let transaction_id = input.transaction_id.clone();
    let result = state.pipeline.evaluate(input).await;

    Ok(Json(EvaluationResponse {
        transaction_id,
        scores: result.to_map(),
        evaluated_at: None,
    }))
}

/// POST /evaluation/batch
pub async fn evaluate_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchEvaluationRequest>,
) -> Result<Json<BatchEvaluationResult>, ApiError> {
    let cases = request.cases.len();
    let result = state.pipeline.evaluate_batch(request.cases).await?;

    info!(cases = cases, "Batch evaluation completed");

    Ok(Json(result))
}

//! Document ingestion endpoints

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::retrieval::NewDocument;

#[derive(Debug, Clone, Deserialize)]
pub struct AddDocumentRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddDocumentResponse {
    pub document_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentCountResponse {
    pub count: usize,
}

/// POST /documents
///
/// `metadata.id` is used as the document id when it is a string.
pub async fn add_document(
    State(state): State<AppState>,
    Json(request): Json<AddDocumentRequest>,
) -> Result<(StatusCode, Json<AddDocumentResponse>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Document content cannot be empty").with_param("content"));
    }

    let id = request
        .metadata
        .get("id")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let document = NewDocument::new(id, request.content).with_metadata(request.metadata);
    let mut ids = state.documents.add_documents(vec![document]).await?;

    let document_id = ids
        .pop()
        .ok_or_else(|| ApiError::internal("Document store returned no id"))?;

    info!(document_id = %document_id, "Document added");

    Ok((StatusCode::CREATED, Json(AddDocumentResponse { document_id })))
}

/// GET /documents/count
pub async fn count_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentCountResponse>, ApiError> {
    let count = state.documents.count().await?;

    Ok(Json(DocumentCountResponse { count }))
}

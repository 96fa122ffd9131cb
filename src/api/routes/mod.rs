//! Gateway endpoints

pub mod chat;
pub mod documents;
pub mod evaluation;
pub mod feedback;
pub mod sessions;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

/// Chat, feedback, session, document and evaluation routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/feedback", post(feedback::submit_feedback))
        // Sessions
        .route("/sessions", get(sessions::list_sessions).post(sessions::create_session))
        .route("/sessions/{session_id}", delete(sessions::delete_session))
        .route("/sessions/{session_id}/history", get(sessions::session_history))
        // Documents
        .route("/documents", post(documents::add_document))
        .route("/documents/count", get(documents::count_documents))
        // Evaluation
        .route("/evaluation", post(evaluation::evaluate))
        .route("/evaluation/batch", post(evaluation::evaluate_batch))
        .route("/evaluation/{transaction_id}", get(evaluation::get_evaluation))
}

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::routes;
use super::state::AppState;

/// Create the full router with application state
///
/// CORS is permissive so browser front ends on any origin can call the API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(routes::create_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::state::test_support::{state_with_engine, test_state};
    use crate::domain::retrieval::RetrievedDocument;
    use crate::domain::telemetry::{ResultSink, TelemetryRecord};
    use crate::domain::workflow::MockWorkflowEngine;
    use crate::infrastructure::evaluation::EvaluationQueue;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn telemetry(transaction_id: &str) -> TelemetryRecord {
        TelemetryRecord {
            transaction_id: transaction_id.to_string(),
            session_id: "session-1".to_string(),
            query: "What is RAG?".to_string(),
            retrieved_documents: Vec::new(),
            assembled_context: String::new(),
            complete_prompt: "Query: What is RAG?\nContext: ".to_string(),
            response: "Retrieval-augmented generation.".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_router(test_state());

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, "GET", "/live", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_router(test_state());
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:8501")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let app = create_router(test_state());

        let (status, body) = send(&app, "POST", "/chat", Some(json!({"message": "   "}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["param"], "message");
    }

    #[tokio::test]
    async fn test_chat_unknown_session_is_not_found() {
        let app = create_router(test_state());

        let (status, _) = send(
            &app,
            "POST",
            "/chat",
            Some(json!({"message": "hi", "session_id": "missing"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_creates_session_and_records_history() {
        let app = create_router(test_state());

        let (status, body) = send(&app, "POST", "/chat", Some(json!({"message": "hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "canned answer");
        assert_eq!(body["route_taken"], "direct");
        assert!(body["retrieved_documents"].as_array().unwrap().is_empty());

        let session_id = body["session_id"].as_str().unwrap().to_string();
        let (status, body) = send(&app, "GET", &format!("/sessions/{}/history", session_id), None).await;

        assert_eq!(status, StatusCode::OK);
        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[0]["content"], "hello");
        assert_eq!(history[1]["role"], "assistant");
        assert_eq!(history[1]["content"], "canned answer");
    }

    #[tokio::test]
    async fn test_chat_reports_retrieval_route() {
        let engine = MockWorkflowEngine::new("grounded answer").with_documents(vec![
            RetrievedDocument::new("P1", 0.9),
            RetrievedDocument::new("P2", 0.8),
        ]);
        let app = create_router(state_with_engine(engine));

        let (status, body) = send(&app, "POST", "/chat", Some(json!({"message": "docs?"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route_taken"], "retrieval");
        assert_eq!(body["retrieved_documents"][0]["content"], "P1");
        assert_eq!(body["retrieved_documents"][1]["content"], "P2");
    }

    #[tokio::test]
    async fn test_chat_submits_background_evaluation() {
        let state = test_state();
        let (queue, _worker) = EvaluationQueue::start(state.pipeline.clone(), 8, 2);
        let app = create_router(state.with_evaluation_queue(queue));

        let (_, body) = send(&app, "POST", "/chat", Some(json!({"message": "hello"}))).await;
        let uri = format!("/evaluation/{}", body["transaction_id"].as_str().unwrap());

        let mut found = None;
        for _ in 0..50 {
            let (status, body) = send(&app, "GET", &uri, None).await;
            if status == StatusCode::OK {
                found = Some(body);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let body = found.expect("evaluation was not recorded");
        assert_eq!(body["scores"].as_object().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_feedback_requires_known_transaction() {
        let state = test_state();
        state.results.record_telemetry(telemetry("tx-1")).await.unwrap();
        let app = create_router(state.clone());

        let (status, _) = send(
            &app,
            "POST",
            "/feedback",
            Some(json!({"transaction_id": "unknown", "feedback": "thumbs_up"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            "POST",
            "/feedback",
            Some(json!({"transaction_id": "tx-1", "feedback": "thumbs_down", "feedback_text": "too vague"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["transaction_id"], "tx-1");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = create_router(test_state());

        let (status, created) =
            send(&app, "POST", "/sessions", Some(json!({"name": "Support"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Support");
        assert_eq!(created["message_count"], 0);

        let (_, list) = send(&app, "GET", "/sessions", None).await;
        assert_eq!(list["total"], 1);

        let uri = format!("/sessions/{}", created["id"].as_str().unwrap());
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_and_count_documents() {
        let app = create_router(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/documents",
            Some(json!({"content": "Rust is a systems language", "metadata": {"id": "rust-1"}})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["document_id"], "rust-1");

        send(&app, "POST", "/documents", Some(json!({"content": "Tokio is a runtime"}))).await;

        let (_, body) = send(&app, "GET", "/documents/count", None).await;
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_on_demand_evaluation_returns_all_scores() {
        let app = create_router(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/evaluation",
            Some(json!({"query": "q", "response": "a", "contexts": ["c"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let scores = body["scores"].as_object().unwrap();
        assert_eq!(scores.len(), 8);
        assert!(scores.contains_key("lexical_overlap_bleu"));
    }

    #[tokio::test]
    async fn test_batch_evaluation_validation() {
        let app = create_router(test_state());

        let (status, body) =
            send(&app, "POST", "/evaluation/batch", Some(json!({"cases": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_batch");

        let (status, body) = send(
            &app,
            "POST",
            "/evaluation/batch",
            Some(json!({"cases": [
                {"query": "q1", "response": "a1", "contexts": ["c"]},
                {"query": "q2", "response": "a2"}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cases"].as_array().unwrap().len(), 2);
        assert_eq!(body["cases"][0]["context_precision"], 0.5);
        assert_eq!(body["cases"][1]["context_precision"], 0.0);
        assert_eq!(body["cases"][1]["answer_relevancy"], 0.5);
        assert_eq!(body["averages"]["context_precision"], 0.25);
        assert!(body["cases"][0].get("lexical_overlap_bleu").is_none());
    }

    #[tokio::test]
    async fn test_unknown_evaluation_is_not_found() {
        let app = create_router(test_state());

        let (status, body) = send(&app, "GET", "/evaluation/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }
}

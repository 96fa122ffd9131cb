//! Chat session service

use std::sync::Arc;

use tracing::info;

use crate::domain::session::{ChatSession, HistoryEntry, SessionSummary};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Creates, lists and extends chat sessions
#[derive(Debug, Clone)]
pub struct SessionService {
    storage: Arc<dyn Storage<ChatSession>>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn Storage<ChatSession>>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, name: Option<String>) -> Result<ChatSession, DomainError> {
        let session = self.storage.create(ChatSession::new(name)).await?;
        info!(session_id = %session.id, "Session created");
        Ok(session)
    }

    pub async fn get(&self, id: &str) -> Result<ChatSession, DomainError> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", id)))
    }

    /// Sessions, most recently updated first
    pub async fn list(&self) -> Result<Vec<SessionSummary>, DomainError> {
        let mut sessions = self.storage.list().await?;
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(sessions.iter().map(ChatSession::summary).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if !self.storage.delete(id).await? {
            return Err(DomainError::not_found(format!("Session '{}' not found", id)));
        }

        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Chronological history of a session
    pub async fn history(&self, id: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        Ok(self.get(id).await?.history)
    }

    /// Appends one user/assistant exchange
    ///
    /// The append runs as a single storage update, so concurrent exchanges on
    /// one session all land and a deleted session stays deleted.
    pub async fn record_exchange(
        &self,
        id: &str,
        query: &str,
        response: &str,
        transaction_id: &str,
    ) -> Result<(), DomainError> {
        let (query, response, transaction_id) =
            (query.to_string(), response.to_string(), transaction_id.to_string());

        self.storage
            .update(
                id,
                Box::new(move |session: &mut ChatSession| {
                    session.record_exchange(query, response, transaction_id)
                }),
            )
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session '{}' not found", id)))?;

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.storage.count().await.map(|_| ())
    }
}

//! Chat session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::llm::MessageRole;
use crate::domain::storage::StorageEntity;

/// One message in a session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A named conversation with its chronological history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl ChatSession {
    pub fn new(name: Option<String>) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let name = name.unwrap_or_else(|| format!("Chat {}", now.format("%Y-%m-%d %H:%M")));

        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// Appends the user query and assistant answer of one exchange
    pub fn record_exchange(
        &mut self,
        query: impl Into<String>,
        response: impl Into<String>,
        transaction_id: impl Into<String>,
    ) {
        let now = Utc::now();
        let transaction_id = transaction_id.into();

        self.history.push(HistoryEntry {
            role: MessageRole::User,
            content: query.into(),
            transaction_id: Some(transaction_id.clone()),
            timestamp: now,
        });
        self.history.push(HistoryEntry {
            role: MessageRole::Assistant,
            content: response.into(),
            transaction_id: Some(transaction_id),
            timestamp: now,
        });
        self.updated_at = now;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            message_count: self.history.len(),
        }
    }
}

impl StorageEntity for ChatSession {
    const COLLECTION: &'static str = "chat_sessions";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Session listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

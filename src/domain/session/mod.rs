//! Chat session domain

mod entity;

pub use entity::{ChatSession, HistoryEntry, SessionSummary};

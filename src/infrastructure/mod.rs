//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod evaluation;
pub mod llm;
pub mod logging;
pub mod retrieval;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod workflow;

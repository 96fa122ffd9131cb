//! Workflow infrastructure - LLM-backed nodes and the interaction engine

mod classifier;
mod engine;
mod generator;

pub use classifier::LlmRoutingClassifier;
pub use engine::RagWorkflowEngine;
pub use generator::LlmGenerator;

//! Workflow domain module
//!
//! A single query moves through a fixed state machine:
//!
//! ```text
//! Router ──► Retrieval ──► Generation ──► End
//!    └─────► DirectResponse ─────────────► End
//! ```
//!
//! The router asks a [`RoutingClassifier`] for a judgement, the retrieval node
//! fetches passages and assembles them into a context block, and exactly one
//! generation node produces the answer.

mod context;
mod engine;
mod error;
mod generator;
mod prompts;
mod routing;
mod state;

pub use context::assemble_context;
pub use engine::WorkflowEngine;
pub use error::WorkflowError;
pub use generator::Generator;
pub use prompts::{complete_prompt, grounded_instruction, APOLOGY_RESPONSE, DIRECT_INSTRUCTION, ROUTING_INSTRUCTION};
pub use routing::RoutingClassifier;
pub use state::{InteractionOutcome, InteractionState, RouteDecision, WorkflowNode};

#[cfg(test)]
pub use engine::mock::MockWorkflowEngine;
#[cfg(test)]
pub use generator::mock::MockGenerator;
#[cfg(test)]
pub use routing::mock::MockRoutingClassifier;

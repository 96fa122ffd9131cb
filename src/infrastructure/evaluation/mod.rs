//! Evaluation infrastructure - scorers, pipeline and background queue

mod judge;
mod lexical;
mod pipeline;
mod queue;

pub use judge::LlmJudgeScorer;
pub use lexical::{BleuScorer, RougeScorer};
pub use pipeline::EvaluationPipeline;
pub use queue::{EvaluationQueue, EvaluationWorker};

//! CLI module for the agentic RAG gateway
//!
//! - `serve`: HTTP API
//! - `ask`: one-shot query, prints the outcome as JSON
//! - `ingest`: loads a JSON Lines document file into the vector store
//! - `evaluate`: batch evaluation of a JSON case file

pub mod ask;
pub mod evaluate;
pub mod ingest;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Agentic RAG gateway - routed retrieval-augmented chat with answer evaluation
#[derive(Parser)]
#[command(name = "agentic-rag-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Answer a single query
    Ask(ask::AskArgs),

    /// Embed and store documents from a JSON Lines file
    Ingest(ingest::IngestArgs),

    /// Evaluate a batch of cases from a JSON file
    Evaluate(evaluate::EvaluateArgs),
}

/// Loads `.env` and layered configuration, then installs logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_session() {
        let cli = Cli::try_parse_from([
            "agentic-rag-gateway",
            "ask",
            "What is Rust?",
            "--session-id",
            "s-1",
        ])
        .unwrap();

        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.query, "What is Rust?");
                assert_eq!(args.session_id.as_deref(), Some("s-1"));
                assert!(!args.evaluate);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["agentic-rag-gateway", "serve", "--port", "9000"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Serve(ref args) if args.port == Some(9000)
        ));
    }

    #[test]
    fn test_evaluate_requires_file() {
        assert!(Cli::try_parse_from(["agentic-rag-gateway", "evaluate"]).is_err());
    }
}

//! Ingest command - loads JSON Lines documents into the vector store

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::retrieval::DocumentStore;
use crate::infrastructure::retrieval::parse_jsonl;

#[derive(Args, Clone)]
pub struct IngestArgs {
    /// JSON Lines file with `page_content` and `metadata` per row
    pub file: PathBuf,
}

/// Validate, embed and store every row, printing the stored ids
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_app_state_with_config(&config).await?;

    let ids = load_documents(state.documents.as_ref(), &args.file).await?;
    let count = state.documents.count().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "ingested": ids.len(),
            "document_ids": ids,
            "total_documents": count,
        }))?
    );

    Ok(())
}

/// Reads a JSON Lines file and adds its rows in one batch
async fn load_documents(store: &dyn DocumentStore, path: &Path) -> anyhow::Result<Vec<String>> {
    let input = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let documents =
        parse_jsonl(&input).with_context(|| format!("Invalid document file {}", path.display()))?;
    let ids = store.add_documents(documents).await?;

    info!(count = ids.len(), file = %path.display(), "Documents ingested");

    Ok(ids)
}

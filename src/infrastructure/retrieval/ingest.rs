//! JSON Lines document ingestion

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::retrieval::NewDocument;
use crate::domain::DomainError;

#[derive(Debug, Deserialize)]
struct JsonlRow {
    page_content: String,
    #[serde(default)]
    metadata: HashMap<String, serde_json::Value>,
}

/// Parses `{"page_content": ..., "metadata": {...}}` rows
///
/// The id comes from `metadata.id`, falling back to `doc_<row index>`. Blank lines are
/// skipped. Any malformed or empty row rejects the whole input.
pub fn parse_jsonl(input: &str) -> Result<Vec<NewDocument>, DomainError> {
    let mut documents = Vec::new();

    for (line_number, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row: JsonlRow = serde_json::from_str(line).map_err(|e| {
            DomainError::validation(format!("Line {}: invalid document row: {}", line_number + 1, e))
        })?;

        if row.page_content.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Line {}: page_content is empty",
                line_number + 1
            )));
        }

        let id = match row.metadata.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => format!("doc_{}", documents.len()),
        };

        documents.push(NewDocument::new(id, row.page_content).with_metadata(row.metadata));
    }

    Ok(documents)
}

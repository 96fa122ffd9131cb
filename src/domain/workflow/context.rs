//! Context assembly from retrieved passages

use crate::domain::retrieval::RetrievedDocument;

/// Formats passages as `Document 1: ...` blocks separated by a blank line
///
/// Numbering is 1-based and follows retriever order. No documents yield an empty string.
pub fn assemble_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("Document {}: {}", i + 1, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

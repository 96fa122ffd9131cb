//! Fixed instructions used by the workflow nodes

/// Instruction for the routing judgement
pub const ROUTING_INSTRUCTION: &str = "You are a routing agent. Decide whether the user's \
query requires retrieving documents from a knowledge base to answer accurately, or whether \
it can be answered directly (greetings, small talk, general knowledge). \
Respond with only \"retrieval\" or \"direct\".";

/// System instruction for answers that do not use retrieved context
pub const DIRECT_INSTRUCTION: &str =
    "You are a helpful AI assistant. Respond naturally to the user's message.";

/// Returned to the caller whenever generation fails
pub const APOLOGY_RESPONSE: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again later.";

/// System instruction embedding the assembled context
pub fn grounded_instruction(context: &str) -> String {
    format!(
        "You are a helpful AI assistant. Use the provided context to answer the user's \
question accurately and concisely. If the context doesn't contain relevant information, \
say so politely.\n\nContext:\n{}",
        context
    )
}

/// Prompt summary recorded in telemetry
pub fn complete_prompt(query: &str, context: &str) -> String {
    format!("Query: {}\nContext: {}", query, context)
}

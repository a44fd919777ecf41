//! Caller-facing request/response shapes

use serde::{Deserialize, Serialize};

/// Query request. `user_id` and `context` are accepted for the caller's
/// conversation bookkeeping and do not influence matching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct WellnessQuery {
    /// Free-text question
    #[cfg_attr(feature = "mcp", schemars(description = "Free-text wellness question"))]
    pub query: String,
    #[cfg_attr(feature = "mcp", schemars(description = "Caller's user id (optional, unused)"))]
    #[serde(default)]
    pub user_id: Option<String>,
    #[cfg_attr(
        feature = "mcp",
        schemars(description = "Conversation context object (optional, unused)")
    )]
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// A cited corpus entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub question: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessResponse {
    pub answer: String,
    pub confidence: f32,
    pub sources: Vec<Source>,
    pub follow_up_questions: [String; 3],
}

/// Knowledge-add request
#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct AddKnowledgeRequest {
    #[cfg_attr(feature = "mcp", schemars(description = "Canonical question text"))]
    pub question: String,
    #[cfg_attr(feature = "mcp", schemars(description = "Answer returned for this question"))]
    pub answer: String,
}

/// Result of a successful `add_knowledge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeAdded {
    pub id: u64,
    pub persisted: bool,
}

/// Store summary for status surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeStatus {
    pub documents: usize,
    pub embedder: String,
    pub dimension: usize,
}

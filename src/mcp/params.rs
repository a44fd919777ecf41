//! Tool parameters that have no library-level request type

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for wellness_search tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Free-text question to look up")]
    pub query: String,
    /// Maximum number of results to return (default: 3)
    #[schemars(description = "Maximum number of results (default: 3, max: 20)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    3
}

pub const MAX_SEARCH_LIMIT: usize = 20;

impl SearchParams {
    /// Zero falls back to the default; anything above the cap is clamped.
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            0 => default_limit(),
            n => n.min(MAX_SEARCH_LIMIT),
        }
    }
}

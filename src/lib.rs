//! Semantic knowledge-base matcher for the wellness conversational backend.
//!
//! # Modules
//!
//! - `core`: configuration and root path resolution
//! - `search`: embedders, the flat vector index and the persisted knowledge store
//! - `knowledge`: seed corpus, follow-up table and the query matcher
//! - `mcp`: stdio MCP server exposing the matcher as tools

pub mod core;
pub mod error;
pub mod knowledge;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod search;

pub use error::{MatcherError, StoreError};
pub use knowledge::{KnowledgeMatcher, WellnessQuery, WellnessResponse};
pub use search::{Document, KnowledgeStore, ScoredDocument};

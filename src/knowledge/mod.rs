//! Wellness knowledge base: seed corpus, follow-up table and query matcher

pub mod follow_ups;
pub mod matcher;
pub mod seeds;
pub mod types;

pub use follow_ups::{follow_ups_for, DEFAULT_FOLLOW_UPS};
pub use matcher::{
    compose_response, KnowledgeMatcher, CONFIDENCE_THRESHOLD, DISCLAIMER, SEARCH_K,
};
pub use seeds::{seed_documents, SeedDocument, SEED_DOCUMENTS};
pub use types::{
    AddKnowledgeRequest, KnowledgeAdded, KnowledgeStatus, Source, WellnessQuery, WellnessResponse,
};

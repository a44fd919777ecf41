//! Semantic search over the knowledge corpus
//!
//! Question embeddings live in an exhaustive L2 index; the knowledge store
//! keeps the parallel document list and persists both side by side.

pub mod embedder;
pub mod flat_index;
pub mod store;

pub use embedder::{create_embedder, Embedder, HtpEmbedder, Model2VecEmbedder};
pub use flat_index::{normalize_l2, FlatIndex};
pub use store::{AddReport, Document, KnowledgeStore, NewDocument, ScoredDocument, StoragePaths};

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::{anyhow, Result};
    use std::collections::HashMap;

    use super::Embedder;

    /// Embedder with hand-picked vectors; unknown texts fail to embed.
    pub struct StubEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        dimension: usize,
    }

    impl StubEmbedder {
        pub fn new(dimension: usize, vectors: &[(&str, Vec<f32>)]) -> Self {
            Self {
                vectors: vectors
                    .iter()
                    .map(|(text, v)| (text.to_string(), v.clone()))
                    .collect(),
                dimension,
            }
        }

        /// Fails on every input
        pub fn failing(dimension: usize) -> Self {
            Self::new(dimension, &[])
        }
    }

    impl Embedder for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| anyhow!("no stub vector for {:?}", text))
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn name(&self) -> &str {
            "stub"
        }
    }
}

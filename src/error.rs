use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the knowledge store and its vector index
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Embedding failed: {0:#}")]
    Embedding(anyhow::Error),
    #[error("Embedding dimension mismatch: index={expected}, vector={actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Embedder returned {actual} vectors for {expected} texts")]
    BatchSizeMismatch { expected: usize, actual: usize },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Index encoding error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("Document list encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Persisted state is inconsistent: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by the knowledge matcher to its callers
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Knowledge store is unavailable: a writer panicked while holding the lock")]
    Poisoned,
}

//! Knowledge store - embedder, vector index and document list
//!
//! Persists two companion files:
//! - index.bin: flat vector index (bincode serialized)
//! - documents.json: document list (`{id, question, answer}` array)

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::embedder::Embedder;
use super::flat_index::{normalize_l2, FlatIndex};
use crate::core::config::ResolvedPaths;
use crate::error::StoreError;
use crate::knowledge::seeds::seed_documents;

/// A stored question/answer pair. `id` is its position in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub question: String,
    pub answer: String,
}

/// A document waiting to be added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub question: String,
    pub answer: String,
}

impl NewDocument {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Search hit: a copy of the stored document plus `1 - squared L2 distance`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    pub score: f32,
}

/// Outcome of a successful in-memory add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    /// Ids assigned to the batch, in input order
    pub ids: Range<u64>,
    /// Whether the updated state reached disk
    pub persisted: bool,
}

/// Locations of the two persisted artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub dir: PathBuf,
    pub index: PathBuf,
    pub documents: PathBuf,
}

impl StoragePaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            index: dir.join("index.bin"),
            documents: dir.join("documents.json"),
        }
    }

    pub fn exist(&self) -> bool {
        self.index.exists() && self.documents.exists()
    }
}

impl From<&ResolvedPaths> for StoragePaths {
    fn from(paths: &ResolvedPaths) -> Self {
        Self {
            dir: paths.storage_dir.clone(),
            index: paths.index.clone(),
            documents: paths.documents.clone(),
        }
    }
}

/// Append-only question/answer store with nearest-neighbour search.
///
/// `documents[i]` always pairs with row `i` of the index.
pub struct KnowledgeStore {
    embedder: Box<dyn Embedder>,
    index: FlatIndex,
    documents: Vec<Document>,
    storage: Option<StoragePaths>,
}

impl KnowledgeStore {
    /// Empty store. With `storage = None` nothing is ever written to disk.
    pub fn new(embedder: Box<dyn Embedder>, storage: Option<StoragePaths>) -> Self {
        let index = FlatIndex::new(embedder.dimension());
        Self {
            embedder,
            index,
            documents: Vec::new(),
            storage,
        }
    }

    /// Create a store and load (or seed) its persisted state
    pub fn open(embedder: Box<dyn Embedder>, storage: StoragePaths) -> Result<Self, StoreError> {
        let mut store = Self::new(embedder, Some(storage));
        store.initialize()?;
        Ok(store)
    }

    /// Load the persisted index and documents, or rebuild from the seed
    /// corpus if they are missing or unusable.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let Some(storage) = self.storage.clone() else {
            self.reseed()?;
            return Ok(());
        };

        fs::create_dir_all(&storage.dir).map_err(|e| StoreError::io(&storage.dir, e))?;

        if storage.exist() {
            match self.load(&storage) {
                Ok((index, documents)) => {
                    self.index = index;
                    self.documents = documents;
                    info!(
                        "Loaded existing knowledge store with {} documents",
                        self.documents.len()
                    );
                    return Ok(());
                }
                Err(e) => warn!("Error loading knowledge store: {}. Rebuilding.", e),
            }
        }

        info!("Creating default knowledge store");
        self.reseed()?;
        Ok(())
    }

    fn load(&self, storage: &StoragePaths) -> Result<(FlatIndex, Vec<Document>), StoreError> {
        let bytes = fs::read(&storage.index).map_err(|e| StoreError::io(&storage.index, e))?;
        let index = FlatIndex::deserialize(&bytes)?;

        let content = fs::read_to_string(&storage.documents)
            .map_err(|e| StoreError::io(&storage.documents, e))?;
        let documents: Vec<Document> = serde_json::from_str(&content)?;

        if index.dimension() != self.embedder.dimension() {
            return Err(StoreError::DimensionMismatch {
                expected: self.embedder.dimension(),
                actual: index.dimension(),
            });
        }
        if index.len() != documents.len() {
            return Err(StoreError::Corrupt(format!(
                "index holds {} vectors but document list holds {}",
                index.len(),
                documents.len()
            )));
        }
        if let Some((pos, doc)) = documents
            .iter()
            .enumerate()
            .find(|(pos, doc)| doc.id != *pos as u64)
        {
            return Err(StoreError::Corrupt(format!(
                "document at position {} has id {}",
                pos, doc.id
            )));
        }

        Ok((index, documents))
    }

    /// Replace the whole corpus with the seed documents
    pub fn reseed(&mut self) -> Result<AddReport, StoreError> {
        let seeds = seed_documents();
        let vectors = self.embed_questions(&seeds)?;

        self.index = FlatIndex::new(self.embedder.dimension());
        self.documents.clear();
        Ok(self.append(seeds, vectors))
    }

    /// Embed and append a batch, then persist the full state.
    ///
    /// Nothing is stored if any question fails to embed. A failed write is
    /// logged and reported through `AddReport::persisted`; the in-memory
    /// state keeps the new documents either way.
    pub fn add_documents(&mut self, docs: Vec<NewDocument>) -> Result<AddReport, StoreError> {
        if docs.is_empty() {
            let next = self.documents.len() as u64;
            return Ok(AddReport {
                ids: next..next,
                persisted: false,
            });
        }

        let vectors = self.embed_questions(&docs)?;
        Ok(self.append(docs, vectors))
    }

    fn embed_questions(&self, docs: &[NewDocument]) -> Result<Vec<Vec<f32>>, StoreError> {
        let questions: Vec<&str> = docs.iter().map(|d| d.question.as_str()).collect();
        let mut vectors = self
            .embedder
            .embed_batch(&questions)
            .map_err(StoreError::Embedding)?;

        if vectors.len() != docs.len() {
            return Err(StoreError::BatchSizeMismatch {
                expected: docs.len(),
                actual: vectors.len(),
            });
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.index.dimension()) {
            return Err(StoreError::DimensionMismatch {
                expected: self.index.dimension(),
                actual: bad.len(),
            });
        }

        for vector in &mut vectors {
            normalize_l2(vector);
        }
        Ok(vectors)
    }

    /// `vectors` must already be validated against the index dimension
    fn append(&mut self, docs: Vec<NewDocument>, vectors: Vec<Vec<f32>>) -> AddReport {
        let start = self.documents.len() as u64;
        if let Err(e) = self.index.add(&vectors) {
            // Unreachable after embed_questions validated every vector.
            error!("Index rejected validated vectors: {}", e);
            return AddReport {
                ids: start..start,
                persisted: false,
            };
        }

        let count = docs.len() as u64;
        self.documents
            .extend(docs.into_iter().enumerate().map(|(i, doc)| Document {
                id: start + i as u64,
                question: doc.question,
                answer: doc.answer,
            }));

        let persisted = match self.persist() {
            Ok(written) => written,
            Err(e) => {
                error!("Error saving knowledge store: {}", e);
                false
            }
        };

        info!("Added {} documents to knowledge store", count);
        AddReport {
            ids: start..start + count,
            persisted,
        }
    }

    /// Write both artifacts. Returns `false` for an in-memory store.
    fn persist(&self) -> Result<bool, StoreError> {
        let Some(storage) = &self.storage else {
            return Ok(false);
        };

        write_replacing(&storage.index, &self.index.serialize()?)?;
        let json = serde_json::to_string_pretty(&self.documents)?;
        write_replacing(&storage.documents, json.as_bytes())?;

        debug!(
            "Saved knowledge store with {} documents to {}",
            self.documents.len(),
            storage.dir.display()
        );
        Ok(true)
    }

    /// The `min(k, len)` nearest documents to `query`, nearest first
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, StoreError> {
        if self.documents.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let mut query_embedding = self.embedder.embed(query).map_err(StoreError::Embedding)?;
        normalize_l2(&mut query_embedding);

        let hits = self
            .index
            .search(&query_embedding, k.min(self.documents.len()))?;

        Ok(hits
            .into_iter()
            .filter_map(|(label, distance)| {
                let doc = self.documents.get(usize::try_from(label).ok()?)?;
                Some(ScoredDocument {
                    document: doc.clone(),
                    score: 1.0 - distance,
                })
            })
            .collect())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    pub fn storage(&self) -> Option<&StoragePaths> {
        self.storage.as_ref()
    }
}

/// Write to a sibling temp file, then rename over `path`
fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

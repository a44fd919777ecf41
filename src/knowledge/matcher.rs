//! Knowledge matcher - turns a free-text query into an answer
//!
//! Looks up the two nearest corpus questions and shapes the response by the
//! best score: no hits, a hedged low-confidence answer, or a direct answer.

use anyhow::{Context, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info};

use super::follow_ups::{follow_ups_for, DEFAULT_FOLLOW_UPS};
use super::types::{KnowledgeAdded, KnowledgeStatus, Source, WellnessResponse};
use crate::core::paths::KbPaths;
use crate::error::MatcherError;
use crate::search::{
    create_embedder, AddReport, KnowledgeStore, NewDocument, ScoredDocument, StoragePaths,
};

/// Scores at or above this get a direct answer
pub const CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Candidates retrieved per query
pub const SEARCH_K: usize = 2;

/// Appended to every answer
pub const DISCLAIMER: &str = "Note: This information is provided for educational purposes only and is not a substitute for professional medical advice. Please consult with a healthcare provider for personalized guidance.";

const NO_INFORMATION: &str = "I don't have specific information about that.";
const LOW_CONFIDENCE_PREFIX: &str =
    "I'm not entirely sure about that, but here's some related information:";

/// Shared matcher; queries run concurrently, additions are exclusive.
pub struct KnowledgeMatcher {
    store: RwLock<KnowledgeStore>,
}

impl KnowledgeMatcher {
    pub fn new(store: KnowledgeStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Build the configured embedder and open the persisted store under `paths`
    pub fn open(paths: &KbPaths) -> Result<Self> {
        let embedder = create_embedder(&paths.config, &paths.root)
            .context("Failed to initialize embedder")?;
        let store = KnowledgeStore::open(embedder, StoragePaths::from(&paths.resolved))
            .with_context(|| {
                format!(
                    "Failed to open knowledge store at {}",
                    paths.resolved.storage_dir.display()
                )
            })?;
        info!(
            "Knowledge base ready: {} documents, embedder {}",
            store.len(),
            store.embedder_name()
        );
        Ok(Self::new(store))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, KnowledgeStore>, MatcherError> {
        self.store.read().map_err(|_| MatcherError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, KnowledgeStore>, MatcherError> {
        self.store.write().map_err(|_| MatcherError::Poisoned)
    }

    /// Answer a query from the corpus.
    ///
    /// Embedding failures are returned, not folded into the "no
    /// information" answer.
    pub fn process_query(&self, query: &str) -> Result<WellnessResponse, MatcherError> {
        let query = query.trim();

        let results = self.read()?.search(query, SEARCH_K).map_err(|e| {
            error!("Error processing wellness query: {}", e);
            MatcherError::from(e)
        })?;

        let response = compose_response(&results);
        debug!(
            "Query matched {} candidates, confidence {:.3}",
            results.len(),
            response.confidence
        );
        Ok(response)
    }

    /// Add one question/answer pair to the corpus
    pub fn add_knowledge(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<KnowledgeAdded, MatcherError> {
        let report = self
            .write()?
            .add_documents(vec![NewDocument::new(question, answer)])
            .map_err(|e| {
                error!("Error adding knowledge: {}", e);
                MatcherError::from(e)
            })?;

        Ok(KnowledgeAdded {
            id: report.ids.start,
            persisted: report.persisted,
        })
    }

    /// Rebuild the corpus from the seed documents
    pub fn reseed(&self) -> Result<AddReport, MatcherError> {
        Ok(self.write()?.reseed()?)
    }

    pub fn status(&self) -> Result<KnowledgeStatus, MatcherError> {
        let store = self.read()?;
        Ok(KnowledgeStatus {
            documents: store.len(),
            embedder: store.embedder_name().to_string(),
            dimension: store.dimension(),
        })
    }

    /// Raw nearest-neighbour lookup, without response shaping
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>, MatcherError> {
        Ok(self.read()?.search(query.trim(), k)?)
    }
}

/// Shape ranked search results (nearest first) into a response
pub fn compose_response(results: &[ScoredDocument]) -> WellnessResponse {
    let Some(best) = results.first() else {
        return WellnessResponse {
            answer: format!("{} {}", NO_INFORMATION, DISCLAIMER),
            confidence: 0.0,
            sources: Vec::new(),
            follow_up_questions: owned(DEFAULT_FOLLOW_UPS),
        };
    };

    let confidence = best.score;
    let follow_up_questions = owned(follow_ups_for(Some(&best.document.question)));

    if confidence < CONFIDENCE_THRESHOLD {
        return WellnessResponse {
            answer: format!(
                "{} {} {}",
                LOW_CONFIDENCE_PREFIX, best.document.answer, DISCLAIMER
            ),
            confidence,
            sources: vec![source(best)],
            follow_up_questions,
        };
    }

    WellnessResponse {
        answer: format!("{} {}", best.document.answer, DISCLAIMER),
        confidence,
        sources: results.iter().map(source).collect(),
        follow_up_questions,
    }
}

fn source(result: &ScoredDocument) -> Source {
    Source {
        question: result.document.question.clone(),
        score: result.score,
    }
}

fn owned(questions: [&str; 3]) -> [String; 3] {
    questions.map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::error::StoreError;
    use crate::knowledge::seeds::SEED_DOCUMENTS;
    use crate::search::testing::StubEmbedder;
    use crate::search::{Document, HtpEmbedder};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn hit(id: u64, question: &str, answer: &str, score: f32) -> ScoredDocument {
        ScoredDocument {
            document: Document {
                id,
                question: question.to_string(),
                answer: answer.to_string(),
            },
            score,
        }
    }

    fn seeded_matcher() -> KnowledgeMatcher {
        let mut store = KnowledgeStore::new(Box::new(HtpEmbedder::new()), None);
        store.initialize().unwrap();
        KnowledgeMatcher::new(store)
    }

    #[test]
    fn test_no_results() {
        let response = compose_response(&[]);
        assert_eq!(response.confidence, 0.0);
        assert!(response.sources.is_empty());
        assert_eq!(response.follow_up_questions, owned(DEFAULT_FOLLOW_UPS));
        assert!(response.answer.starts_with(NO_INFORMATION));
        assert!(response.answer.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let results = [
            hit(0, "What is sexual wellness?", "Wellness answer.", 0.6),
            hit(1, "Other question", "Other answer.", 0.4),
        ];
        let response = compose_response(&results);

        assert_eq!(response.confidence, 0.6);
        assert_eq!(response.answer, format!("Wellness answer. {}", DISCLAIMER));
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[1].question, "Other question");
        assert_eq!(response.sources[1].score, 0.4);
    }

    #[test]
    fn test_just_below_threshold_is_hedged() {
        let results = [
            hit(0, "What is sexual wellness?", "Wellness answer.", 0.599_999),
            hit(1, "Other question", "Other answer.", 0.4),
        ];
        let response = compose_response(&results);

        assert_eq!(response.confidence, 0.599_999);
        assert_eq!(
            response.answer,
            format!("{} Wellness answer. {}", LOW_CONFIDENCE_PREFIX, DISCLAIMER)
        );
        assert_eq!(
            response.sources,
            vec![Source {
                question: "What is sexual wellness?".to_string(),
                score: 0.599_999,
            }]
        );
        assert_eq!(
            response.follow_up_questions[0],
            "How can I improve my sexual health?"
        );
    }

    #[test]
    fn test_negative_score_is_low_confidence() {
        let response = compose_response(&[hit(0, "q", "a", -0.8)]);
        assert_eq!(response.confidence, -0.8);
        assert_eq!(response.sources.len(), 1);
    }

    #[test]
    fn test_unknown_question_uses_default_follow_ups() {
        for score in [0.95, 0.1] {
            let results = [hit(10, "What is a kegel?", "An exercise.", score)];
            let response = compose_response(&results);
            assert_eq!(response.follow_up_questions, owned(DEFAULT_FOLLOW_UPS));
        }
    }

    #[test]
    fn test_exact_seed_question() {
        let matcher = seeded_matcher();
        let response = matcher.process_query("What is sexual wellness?").unwrap();

        assert!(response.answer.contains(SEED_DOCUMENTS[0].answer));
        assert!(response.answer.ends_with(DISCLAIMER));
        assert!(response.confidence >= CONFIDENCE_THRESHOLD);
        assert_eq!(response.sources[0].question, "What is sexual wellness?");
        assert_eq!(response.sources.len(), 2);
        assert_eq!(
            response.follow_up_questions[1],
            "What is the relationship between mental health and sexual health?"
        );
    }

    #[test]
    fn test_query_is_trimmed() {
        let matcher = seeded_matcher();
        let padded = matcher
            .process_query("   How can I practice safer sex?\n")
            .unwrap();
        let exact = matcher.process_query("How can I practice safer sex?").unwrap();
        assert_eq!(padded, exact);
    }

    #[test]
    fn test_nonsense_query_is_low_confidence() {
        let matcher = seeded_matcher();
        let response = matcher.process_query("asdkjhasdkjh nonsense").unwrap();

        assert!(response.confidence < CONFIDENCE_THRESHOLD);
        assert!(response.sources.len() <= 1);
        assert!(response.answer.ends_with(DISCLAIMER));
    }

    #[test]
    fn test_empty_corpus() {
        let store = KnowledgeStore::new(Box::new(HtpEmbedder::new()), None);
        let matcher = KnowledgeMatcher::new(store);

        let response = matcher.process_query("What is sexual wellness?").unwrap();
        assert_eq!(response.confidence, 0.0);
        assert!(response.sources.is_empty());
        assert_eq!(response.follow_up_questions, owned(DEFAULT_FOLLOW_UPS));
    }

    #[test]
    fn test_add_knowledge_then_match() {
        let dir = TempDir::new().unwrap();
        let store = KnowledgeStore::open(
            Box::new(HtpEmbedder::new()),
            StoragePaths::in_dir(dir.path()),
        )
        .unwrap();
        let matcher = KnowledgeMatcher::new(store);

        let added = matcher
            .add_knowledge("What are kegel exercises?", "Pelvic floor exercises.")
            .unwrap();
        assert_eq!(
            added,
            KnowledgeAdded {
                id: 10,
                persisted: true
            }
        );

        let response = matcher.process_query("what are kegel exercises").unwrap();
        assert!(response.answer.starts_with("Pelvic floor exercises."));
        assert_eq!(response.follow_up_questions, owned(DEFAULT_FOLLOW_UPS));
        assert_eq!(matcher.status().unwrap().documents, 11);
    }

    #[test]
    fn test_open_from_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let paths = KbPaths::from_root_with_config(root, Config::default());

        let matcher = KnowledgeMatcher::open(&paths).unwrap();
        let status = matcher.status().unwrap();
        assert_eq!(status.documents, SEED_DOCUMENTS.len());
        assert_eq!(status.embedder, "htp-384");
        assert!(paths.resolved.index.exists());
        assert!(paths.resolved.documents.exists());
    }

    #[test]
    fn test_add_knowledge_embedding_failure() {
        let store = KnowledgeStore::new(Box::new(StubEmbedder::failing(3)), None);
        let matcher = KnowledgeMatcher::new(store);

        let err = matcher.add_knowledge("q", "a").unwrap_err();
        assert!(matches!(err, MatcherError::Store(StoreError::Embedding(_))));
        assert_eq!(matcher.status().unwrap().documents, 0);
    }

    #[test]
    fn test_query_embedding_failure_is_surfaced() {
        let mut store = KnowledgeStore::new(
            Box::new(StubEmbedder::new(2, &[("known", vec![1.0, 0.0])])),
            None,
        );
        store
            .add_documents(vec![NewDocument::new("known", "answer")])
            .unwrap();
        let matcher = KnowledgeMatcher::new(store);

        assert!(matcher.process_query("known").is_ok());
        assert!(matches!(
            matcher.process_query("unknown"),
            Err(MatcherError::Store(StoreError::Embedding(_)))
        ));
    }

    #[test]
    fn test_concurrent_queries_and_additions() {
        let matcher = Arc::new(seeded_matcher());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let matcher = Arc::clone(&matcher);
                std::thread::spawn(move || {
                    matcher
                        .add_knowledge(&format!("Question number {}", i), "Answer")
                        .unwrap();
                    matcher.process_query("How can I practice safer sex?").unwrap()
                })
            })
            .collect();

        for handle in handles {
            let response = handle.join().unwrap();
            assert_eq!(
                response.sources[0].question,
                "How can I practice safer sex?"
            );
        }

        let store = matcher.read().unwrap();
        assert_eq!(store.len(), 14);
        for (pos, doc) in store.documents().iter().enumerate() {
            assert_eq!(doc.id, pos as u64);
        }
    }
}

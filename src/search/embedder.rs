//! Embedder trait and implementations
//!
//! - HtpEmbedder: Harmonic Token Projection (built-in, no model file)
//! - Model2VecEmbedder: static neural embeddings (requires model download)

use anyhow::{Context, Result};
use model2vec::Model2Vec;
use std::f64::consts::PI;
use std::path::Path;
use tracing::info;

use crate::core::config::{Config, EmbeddingMode};

/// Embedding model abstraction
pub trait Embedder: Send + Sync {
    /// Generate embedding for a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, one vector per input in order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimension
    fn dimension(&self) -> usize;

    /// Get model name/identifier
    fn name(&self) -> &str;
}

// ============================================================================
// HTP Embedder
// ============================================================================

/// HTP embedding dimension (two components per modulus)
pub const HTP_DIM: usize = 384;

const NUM_MODULI: usize = HTP_DIM / 2;

static COPRIME_MODULI: [u64; NUM_MODULI] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997, 1009, 1013, 1019, 1021, 1031, 1033, 1039,
    1049, 1051, 1061, 1063, 1069, 1087, 1091, 1093, 1097, 1103, 1109, 1117, 1123, 1129, 1151, 1153,
    1163,
];

/// Harmonic Token Projection embedder.
///
/// Each token is hashed to an integer whose residues modulo a set of
/// coprime moduli are projected onto the unit circle. A text embeds as the
/// normalised mean of its token projections, so identical token bags embed
/// identically regardless of case and punctuation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtpEmbedder;

impl HtpEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn embed_text(text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; HTP_DIM];
        }

        let mut sum = vec![0.0f64; HTP_DIM];
        for token in &tokens {
            let n = token_hash(token);
            for (i, &m) in COPRIME_MODULI.iter().enumerate() {
                let theta = 2.0 * PI * ((n % m) as f64) / (m as f64);
                sum[2 * i] += theta.sin();
                sum[2 * i + 1] += theta.cos();
            }
        }

        let norm = sum.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            sum.iter().map(|x| (x / norm) as f32).collect()
        } else {
            vec![0.0; HTP_DIM]
        }
    }
}

impl Embedder for HtpEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::embed_text(text))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::embed_text(t)).collect())
    }

    fn dimension(&self) -> usize {
        HTP_DIM
    }

    fn name(&self) -> &str {
        "htp-384"
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// FNV-1a over the whole token
fn token_hash(token: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    token.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

// ============================================================================
// Model2Vec Embedder
// ============================================================================

/// Model2Vec based embedder
pub struct Model2VecEmbedder {
    model: Model2Vec,
    model_id: String,
    dimension: usize,
}

impl Model2VecEmbedder {
    /// Load model from local path
    pub fn from_path(path: &Path) -> Result<Self> {
        let model = Model2Vec::from_pretrained(path.to_string_lossy().as_ref(), None, None)
            .with_context(|| format!("Failed to load Model2Vec from: {}", path.display()))?;

        Self::with_model(model, path.to_string_lossy().to_string())
    }

    /// Load model from HuggingFace Hub
    pub fn from_pretrained(model_id: &str) -> Result<Self> {
        let model = Model2Vec::from_pretrained(model_id, None, None)
            .with_context(|| format!("Failed to load Model2Vec: {}", model_id))?;

        Self::with_model(model, model_id.to_string())
    }

    fn with_model(model: Model2Vec, model_id: String) -> Result<Self> {
        // Static models do not report their width, so probe once.
        let probe = model
            .encode(&["dimension probe"])
            .context("Failed to probe model dimension")?;

        Ok(Self {
            dimension: probe.ncols(),
            model,
            model_id,
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let texts = [text];
        let embeddings = self.model.encode(&texts).context("Failed to encode text")?;
        Ok(embeddings.row(0).to_vec())
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self.model.encode(texts).context("Failed to encode texts")?;
        Ok(embeddings.rows().into_iter().map(|r| r.to_vec()).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create the embedder selected by `config`
pub fn create_embedder(config: &Config, root: &Path) -> Result<Box<dyn Embedder>> {
    match config.embedding.mode {
        EmbeddingMode::Htp => Ok(Box::new(HtpEmbedder::new())),
        EmbeddingMode::Model2Vec => {
            let embedder = match config.resolve_model_path(root) {
                Some(path) => Model2VecEmbedder::from_path(&path)?,
                None => Model2VecEmbedder::from_pretrained(&config.embedding.model_id)?,
            };
            info!(
                "Loaded Model2Vec embedder {} ({}d)",
                embedder.name(),
                embedder.dimension()
            );
            Ok(Box::new(embedder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_htp_embedder() {
        let embedder = HtpEmbedder::new();

        let emb = embedder.embed("hello world").unwrap();
        assert_eq!(emb.len(), embedder.dimension());
        assert_eq!(embedder.name(), "htp-384");

        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_moduli_cover_dimension() {
        assert_eq!(COPRIME_MODULI.len() * 2, HTP_DIM);
        assert_eq!(COPRIME_MODULI[NUM_MODULI - 1], 1163);
        assert!(COPRIME_MODULI.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_htp_ignores_case_and_punctuation() {
        let embedder = HtpEmbedder::new();
        let a = embedder.embed("What is sexual wellness?").unwrap();
        let b = embedder.embed("what is SEXUAL wellness").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_htp_long_tokens_are_distinct() {
        // Tokens sharing a suffix must not collide.
        assert_ne!(token_hash("relationship"), token_hash("membership"));
        assert_ne!(token_hash("communication"), token_hash("contraception"));
    }

    #[test]
    fn test_htp_shared_tokens_raise_similarity() {
        let embedder = HtpEmbedder::new();
        let base = embedder.embed("How can I practice safer sex?").unwrap();
        let close = embedder.embed("how to practice safer sex").unwrap();
        let far = embedder.embed("quarterly revenue forecast").unwrap();

        assert!(cosine(&base, &close) > cosine(&base, &far));
    }

    #[test]
    fn test_htp_empty_text_is_zero_vector() {
        let emb = HtpEmbedder::new().embed("  ?! ").unwrap();
        assert_eq!(emb.len(), HTP_DIM);
        assert!(emb.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_htp_batch_matches_single() {
        let embedder = HtpEmbedder::new();
        let batch = embedder.embed_batch(&["one", "two"]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], embedder.embed("two").unwrap());
    }

    #[test]
    fn test_create_embedder_htp() {
        let embedder = create_embedder(&Config::default(), Path::new(".")).unwrap();

        assert_eq!(embedder.dimension(), 384);
        assert_eq!(embedder.name(), "htp-384");
    }

    #[test]
    #[ignore] // Requires model download
    fn test_model2vec_embedder() {
        let embedder = Model2VecEmbedder::from_pretrained("minishlab/potion-base-8M").unwrap();
        let emb = embedder.embed("What is consent?").unwrap();
        assert_eq!(emb.len(), embedder.dimension());
    }
}

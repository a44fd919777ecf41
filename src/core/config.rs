//! wellness-kb configuration module
//!
//! The config lives at `<root>/.wellness-kb.json`. Every field has a default,
//! so a partial file (or no file at all) is valid.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILE: &str = ".wellness-kb.json";
pub const CONFIG_VERSION: u32 = 1;

/// Default Model2Vec model ID
pub const DEFAULT_MODEL2VEC_MODEL: &str = "minishlab/potion-base-8M";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Where the persisted index and document list are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    #[serde(default = "default_index_file", rename = "indexFile")]
    pub index_file: String,

    #[serde(default = "default_documents_file", rename = "documentsFile")]
    pub documents_file: String,
}

fn default_storage_dir() -> String {
    "static/wellness_db".to_string()
}

fn default_index_file() -> String {
    "index.bin".to_string()
}

fn default_documents_file() -> String {
    "documents.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            index_file: default_index_file(),
            documents_file: default_documents_file(),
        }
    }
}

/// Which embedder backs the knowledge store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Built-in harmonic token projection, no model file
    #[default]
    Htp,
    /// Model2Vec static embeddings
    Model2Vec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub mode: EmbeddingMode,

    #[serde(default = "default_model_id", rename = "modelId")]
    pub model_id: String,

    #[serde(default, rename = "modelPath")]
    pub model_path: Option<String>,
}

fn default_model_id() -> String {
    DEFAULT_MODEL2VEC_MODEL.to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::default(),
            model_id: default_model_id(),
            model_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: StorageConfig::default(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl Config {
    /// Load config from `root`, falling back to defaults on any problem.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => {
                if config.version > CONFIG_VERSION {
                    warn!(
                        "Config version {} is newer than supported version {}",
                        config.version, CONFIG_VERSION
                    );
                }
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}. Using defaults.", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(root.join(CONFIG_FILE), content)?;
        Ok(())
    }

    /// Get resolved paths based on the root directory
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        let storage_dir = root.join(&self.storage.dir);
        ResolvedPaths {
            root: root.to_path_buf(),
            index: storage_dir.join(&self.storage.index_file),
            documents: storage_dir.join(&self.storage.documents_file),
            storage_dir,
        }
    }

    /// Model2Vec model location; relative paths are taken from `root`
    pub fn resolve_model_path(&self, root: &Path) -> Option<PathBuf> {
        self.embedding.model_path.as_ref().map(|p| {
            let path = PathBuf::from(p);
            if path.is_absolute() {
                path
            } else {
                root.join(path)
            }
        })
    }
}

/// Resolved absolute paths for the knowledge store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub storage_dir: PathBuf,
    pub index: PathBuf,
    pub documents: PathBuf,
}

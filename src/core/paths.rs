//! Root directory resolution
//!
//! The root holds `.wellness-kb.json` and the storage directory.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;

use super::config::{Config, ResolvedPaths};

/// Environment variable for root path configuration
pub const ROOT_PATH_ENV: &str = "WELLNESS_KB_ROOT";

/// Root paths wrapper that combines config and resolved paths
pub struct KbPaths {
    pub root: PathBuf,
    pub resolved: ResolvedPaths,
    pub config: Config,
}

impl KbPaths {
    /// Resolve from the environment variable or current directory
    pub fn new() -> Result<Self> {
        Ok(Self::from_root(get_root()?))
    }

    /// Create paths from a specific root directory, loading its config
    pub fn from_root(root: PathBuf) -> Self {
        let config = Config::load(&root);
        Self::from_root_with_config(root, config)
    }

    pub fn from_root_with_config(root: PathBuf, config: Config) -> Self {
        let resolved = config.resolve_paths(&root);
        Self {
            root,
            resolved,
            config,
        }
    }
}

/// Priority: WELLNESS_KB_ROOT env var > current directory
pub fn get_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ROOT_PATH_ENV) {
        let root = PathBuf::from(&path);
        if root.exists() {
            return Ok(root);
        }
        warn!(
            "{} is set to '{}' but path does not exist. Falling back to current directory.",
            ROOT_PATH_ENV, path
        );
    }
    std::env::current_dir().context("Failed to get current directory")
}

//! Typed configuration for the retrieval service.
//!
//! Configuration is read from a JSON file once at startup. Everything is
//! validated eagerly; a bad config is the only fatal error in the system.

use anyhow::{Context, Result, bail};
use quarry_chunk::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_embedding_model() -> String {
    "all-minilm-l6-v2".to_string()
}

/// Static configuration for one retrieval process.
///
/// Pattern groups map a [`Category`] onto the glob patterns whose matches
/// belong to it. Category keys are a closed enum, so a typo in the config
/// fails deserialization instead of silently creating an unreachable group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Root directory the index covers; all paths are stored relative to it.
    pub project_root: PathBuf,
    /// Category → glob patterns (relative to `project_root`).
    pub index_patterns: BTreeMap<Category, Vec<String>>,
    /// Wildcard-stripped substring fragments; any file whose relative path
    /// contains one is excluded.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    /// Chunk budget in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Overlap budget in characters, kept strictly below `chunk_size`.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Embedding model identifier, resolved by quarry-embed.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl IndexConfig {
    /// Create a configuration with defaults and no pattern groups.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            index_patterns: BTreeMap::new(),
            exclude_patterns: Vec::new(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            embedding_model: default_embedding_model(),
        }
    }

    /// Add a pattern group for a category.
    pub fn with_patterns(mut self, category: Category, patterns: &[&str]) -> Self {
        self.index_patterns
            .entry(category)
            .or_default()
            .extend(patterns.iter().map(|p| p.to_string()));
        self
    }

    /// Set chunking budgets.
    pub fn with_chunking(mut self, chunk_size: usize, chunk_overlap: usize) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self
    }

    /// Add exclusion fragments.
    pub fn with_exclude(mut self, patterns: &[&str]) -> Self {
        self.exclude_patterns
            .extend(patterns.iter().map(|p| p.to_string()));
        self
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: IndexConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate and normalize the configuration.
    ///
    /// Rejects empty pattern groups, a zero chunk size, unparsable glob
    /// patterns, and a missing project root. An overlap that is not strictly
    /// below `chunk_size` is clamped with a warning so chunking always makes
    /// progress.
    pub fn validate(&mut self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        if self.chunk_overlap >= self.chunk_size {
            let capped = self.chunk_size - 1;
            warn!(
                "chunk_overlap {} >= chunk_size {}; capping to {}",
                self.chunk_overlap, self.chunk_size, capped
            );
            self.chunk_overlap = capped;
        }
        if self.index_patterns.is_empty() {
            bail!("index_patterns must define at least one category group");
        }
        for (category, patterns) in &self.index_patterns {
            for pattern in patterns {
                glob::Pattern::new(pattern).with_context(|| {
                    format!("invalid glob pattern '{pattern}' in category '{category}'")
                })?;
            }
        }
        if !self.project_root.is_dir() {
            bail!(
                "project_root {} is not a directory",
                self.project_root.display()
            );
        }
        Ok(())
    }
}

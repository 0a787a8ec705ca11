//! Orchestration of discovery, chunking, embedding, and query serving.
//!
//! [`RetrievalService`] owns one [`Snapshot`] at a time: the file records and
//! the embedding index built from the same pass over the tree. Reindexing
//! builds a complete replacement off to the side and swaps the `Arc`, so a
//! query observes either the old generation or the new one, never a mix.

use crate::config::IndexConfig;
use crate::retrieval::discovery::FileDiscoverer;
use crate::retrieval::embedding_index::{EmbeddingIndex, SearchResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quarry_chunk::{Category, Chunk, Chunker, detect_language};
use quarry_embed::EmbeddingProvider;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// One indexed file as recorded at index time.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Path relative to the project root, with `/` separators.
    pub path: String,
    pub category: Category,
    /// Content length in characters.
    pub size: usize,
    pub modified_at: DateTime<Utc>,
    pub language: String,
}

/// A file that matched an index pattern but could not be indexed.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of one indexing pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub files_indexed: usize,
    pub chunks_created: usize,
    /// Bytes on disk across all indexed files.
    pub total_size: u64,
    pub by_category: BTreeMap<Category, usize>,
    pub skipped: Vec<SkippedFile>,
}

/// Full content of one file, read fresh from disk at request time.
///
/// `category` is taken from the current snapshot and is `None` for files
/// that exist on disk but were never indexed.
#[derive(Debug, Clone, Serialize)]
pub struct FileContext {
    pub path: String,
    pub content: String,
    pub category: Option<Category>,
    /// Content length in characters.
    pub size: usize,
    pub modified_at: DateTime<Utc>,
    pub language: String,
}

/// One immutable index generation: file records plus the embedding index
/// built from them in the same pass.
#[derive(Debug, Default)]
struct Snapshot {
    files: BTreeMap<String, FileRecord>,
    index: EmbeddingIndex,
}

/// Indexing and query facade over one project root.
pub struct RetrievalService {
    config: IndexConfig,
    chunker: Chunker,
    discoverer: FileDiscoverer,
    provider: Arc<dyn EmbeddingProvider>,
    snapshot: RwLock<Arc<Snapshot>>,
    // Serializes indexing passes; a reindex requested mid-pass waits its turn.
    index_pass: Mutex<()>,
}

impl std::fmt::Debug for RetrievalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalService")
            .field("project_root", &self.config.project_root)
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl RetrievalService {
    /// Create a service from a validated configuration. No indexing happens
    /// until [`index_all`](Self::index_all) runs; until then every search
    /// sees an empty index.
    pub fn new(config: IndexConfig, provider: Arc<dyn EmbeddingProvider>) -> Self {
        let chunker = Chunker::new(config.chunk_size, config.chunk_overlap);
        let discoverer = FileDiscoverer::new(&config.project_root, &config.exclude_patterns);
        Self {
            config,
            chunker,
            discoverer,
            provider,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            index_pass: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Walk every configured pattern group, chunk and embed what it finds,
    /// and swap the result in as the current generation.
    ///
    /// Unreadable files are recorded in [`IndexStats::skipped`] and do not
    /// abort the pass. A pass that finds nothing installs an empty
    /// generation, clearing whatever was indexed before.
    pub async fn index_all(&self) -> Result<IndexStats> {
        let _pass = self.index_pass.lock().await;

        info!(
            "Indexing project root {}",
            self.config.project_root.display()
        );

        // Discovery, reads, and chunking are blocking filesystem work; they
        // run off the async workers so in-flight requests stay responsive.
        let root = self.config.project_root.clone();
        let patterns = self.config.index_patterns.clone();
        let discoverer = self.discoverer.clone();
        let chunker = self.chunker.clone();
        let TreeScan {
            mut stats,
            files,
            chunks,
        } = tokio::task::spawn_blocking(move || scan_tree(&root, &patterns, &discoverer, &chunker))
            .await??;
        stats.chunks_created = chunks.len();

        let index = EmbeddingIndex::build(self.provider.as_ref(), chunks).await?;
        let snapshot = Arc::new(Snapshot { files, index });
        *self.snapshot.write().await = snapshot;

        info!(
            "Indexed {} files into {} chunks ({} skipped)",
            stats.files_indexed,
            stats.chunks_created,
            stats.skipped.len()
        );
        Ok(stats)
    }

    /// Discard the current generation and rebuild from disk.
    pub async fn reindex(&self) -> Result<IndexStats> {
        self.index_all().await
    }

    /// Search the current generation. See
    /// [`EmbeddingIndex::search`] for ordering and filtering semantics.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        filter: Option<Category>,
    ) -> Result<Vec<SearchResult>> {
        let snapshot = self.current_snapshot().await;
        snapshot
            .index
            .search(self.provider.as_ref(), query, top_k, filter)
            .await
    }

    /// Read a file fresh from disk, relative to the project root.
    ///
    /// Returns `Ok(None)` for a path that does not resolve to a regular
    /// file, and an error only when a file exists but cannot be read.
    pub async fn file_context(&self, path: &str) -> Result<Option<FileContext>> {
        let full = self.config.project_root.join(path);
        if !full.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&full)
            .with_context(|| format!("failed to read {}", full.display()))?;
        let modified_at = full
            .metadata()
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        let relative = relative_path(&self.config.project_root, &full);
        let snapshot = self.current_snapshot().await;
        let category = snapshot.files.get(&relative).map(|r| r.category);

        Ok(Some(FileContext {
            size: content.chars().count(),
            language: detect_language(&relative),
            path: relative,
            content,
            category,
            modified_at,
        }))
    }

    /// List indexed files from the current generation, optionally restricted
    /// to one category, ordered by category then path.
    pub async fn list_indexed_files(&self, filter: Option<Category>) -> Vec<FileRecord> {
        let snapshot = self.current_snapshot().await;
        let mut records: Vec<FileRecord> = snapshot
            .files
            .values()
            .filter(|r| filter.is_none_or(|c| r.category == c))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.category.cmp(&b.category).then(a.path.cmp(&b.path)));
        records
    }

    /// Number of chunks in the current generation.
    pub async fn chunk_count(&self) -> usize {
        self.current_snapshot().await.index.len()
    }

    async fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }
}

/// Everything one pass over the tree produces, before embedding.
struct TreeScan {
    stats: IndexStats,
    files: BTreeMap<String, FileRecord>,
    chunks: Vec<Chunk>,
}

/// Walk every pattern group, reading and chunking what it finds. Blocking;
/// callers run it on a blocking task.
fn scan_tree(
    root: &Path,
    patterns: &BTreeMap<Category, Vec<String>>,
    discoverer: &FileDiscoverer,
    chunker: &Chunker,
) -> Result<TreeScan> {
    let mut stats = IndexStats::default();
    let mut files = BTreeMap::new();
    let mut chunks: Vec<Chunk> = Vec::new();

    for (&category, group) in patterns {
        let found = discoverer.discover(group)?;
        for path in found {
            match index_file(root, chunker, &path, category, &mut files, &mut chunks) {
                Ok(disk_size) => {
                    stats.files_indexed += 1;
                    stats.total_size += disk_size;
                    *stats.by_category.entry(category).or_default() += 1;
                }
                Err(e) => {
                    let relative = relative_path(root, &path);
                    warn!("Skipping {relative}: {e:#}");
                    stats.skipped.push(SkippedFile {
                        path: relative,
                        reason: format!("{e:#}"),
                    });
                }
            }
        }
    }
    Ok(TreeScan {
        stats,
        files,
        chunks,
    })
}

/// Read, record, and chunk one file. Returns its size on disk.
fn index_file(
    root: &Path,
    chunker: &Chunker,
    path: &Path,
    category: Category,
    files: &mut BTreeMap<String, FileRecord>,
    chunks: &mut Vec<Chunk>,
) -> Result<u64> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let metadata = path
        .metadata()
        .with_context(|| format!("failed to stat {}", path.display()))?;
    let modified_at = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let relative = relative_path(root, path);
    files.insert(
        relative.clone(),
        FileRecord {
            path: relative.clone(),
            category,
            size: content.chars().count(),
            modified_at,
            language: detect_language(&relative),
        },
    );
    chunks.extend(chunker.chunk(&content, &relative, category));
    Ok(metadata.len())
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    // Stored paths always use forward slashes, matching the config's
    // glob patterns.
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

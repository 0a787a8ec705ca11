//! quarry-retriever: indexing and semantic retrieval over a project tree
//!
//! This crate turns a configured project root into a searchable in-memory
//! index: glob-based file discovery, overlapping chunking, batch embedding,
//! and inner-product top-k search with category filtering.
//!
//! ## Key Modules
//!
//! - **[`config`]**: typed configuration loaded once at startup
//! - **[`retrieval`]**: discovery, vector index, embedding index, and the
//!   [`RetrievalService`](retrieval::service::RetrievalService) orchestrator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quarry_retriever::config::IndexConfig;
//! use quarry_retriever::retrieval::service::RetrievalService;
//! use quarry_embed::{EmbedConfig, FastEmbedProvider};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = IndexConfig::load("quarry.json")?;
//! let provider = FastEmbedProvider::create(EmbedConfig::new(&config.embedding_model)).await?;
//! let service = RetrievalService::new(config, Arc::new(provider));
//! let stats = service.index_all().await?;
//! println!("indexed {} files", stats.files_indexed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! IndexConfig → FileDiscoverer → Chunker → EmbeddingProvider → EmbeddingIndex
//!                                                                   ↓
//!                     queries → embed → FlatVectorIndex top-k → Snapshot swap
//! ```
//!
//! The (file records, chunks, vectors) triple lives in one snapshot that is
//! rebuilt off to the side and swapped atomically, so queries observe either
//! the fully-old or fully-new generation, never a mix.

pub mod config;
pub mod retrieval;

pub use config::IndexConfig;
pub use retrieval::embedding_index::SearchResult;
pub use retrieval::service::{FileContext, FileRecord, IndexStats, RetrievalService, SkippedFile};

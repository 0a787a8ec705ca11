//! # quarry-mcp
//!
//! A Model Context Protocol (MCP) server exposing semantic retrieval over a
//! configured project tree. On startup the server indexes every configured
//! pattern group, then serves queries over stdio until the client disconnects.
//!
//! ## MCP Tools
//!
//! - **search_codebase**: semantic search with optional category filtering
//! - **get_file_context**: full content of one file, read fresh from disk
//! - **list_indexed_files**: indexed files grouped by category
//! - **reindex**: discard the current index and rebuild from disk
//!
//! ## Quick Start
//!
//! ```bash
//! quarry-mcp --config ./quarry.json
//! ```
//!
//! The configuration file is JSON; see `quarry_retriever::IndexConfig` for
//! the schema. A minimal example:
//!
//! ```json
//! {
//!   "project_root": ".",
//!   "index_patterns": {
//!     "documentation": ["docs/**/*.md"],
//!     "code": ["src/**/*.rs"]
//!   }
//! }
//! ```
//!
//! ## Integration with MCP clients
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "quarry": {
//!       "command": "quarry-mcp",
//!       "args": ["--config", "/path/to/quarry.json"]
//!     }
//!   }
//! }
//! ```

mod server;
pub mod tools;

use server::QuarryMcpServer;

use anyhow::{Context, Result};
use quarry_embed::{EmbedConfig, FastEmbedProvider};
use quarry_retriever::{IndexConfig, RetrievalService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Startup configuration for the MCP server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the JSON index configuration.
    pub config_path: PathBuf,
    /// Overrides the configuration file's `project_root` when set.
    pub root_override: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            root_override: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("./quarry.json"),
            root_override: None,
        }
    }
}

/// Load configuration, build the initial index, and serve MCP over stdio.
///
/// Returns when the client disconnects. A configuration that fails to load
/// or validate is fatal; indexing problems with individual files are not.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    info!("Starting quarry MCP server");

    let mut index_config = IndexConfig::load(&config.config_path)
        .with_context(|| format!("failed to load {}", config.config_path.display()))?;
    if let Some(root) = config.root_override {
        index_config.project_root = root;
        index_config.validate()?;
    }

    let provider = FastEmbedProvider::create(EmbedConfig::new(&index_config.embedding_model))
        .await
        .context("failed to initialize embedding provider")?;
    let service = Arc::new(RetrievalService::new(index_config, Arc::new(provider)));

    let stats = service.index_all().await.context("initial indexing failed")?;
    info!(
        "Initial index ready: {} files, {} chunks, {} skipped",
        stats.files_indexed,
        stats.chunks_created,
        stats.skipped.len()
    );

    let server = QuarryMcpServer::new(service);
    server.serve_stdio().await
}

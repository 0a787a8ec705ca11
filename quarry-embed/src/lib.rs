//! # quarry-embed
//!
//! Text embedding for the quarry retrieval system: a provider trait with an
//! async batch API, a fastembed-backed implementation running local ONNX
//! models, and a deterministic stub for tests.
//!
//! ## Quick Start
//!
//! ```no_run
//! use quarry_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = FastEmbedProvider::create(EmbedConfig::new("all-minilm-l6-v2")).await?;
//! let texts = vec!["Hello world".to_string()];
//! let result = provider.embed_texts(&texts).await?;
//! println!("dimension: {}", result.dimension);
//! # Ok(())
//! # }
//! ```
//!
//! Embeddings are L2-normalized by default so inner product equals cosine
//! similarity. Model loading and inference run on blocking tasks; loaded
//! models are cached process-wide by name.

pub mod config;
pub mod error;
pub mod provider;
pub mod stub;

pub use config::EmbedConfig;
pub use error::{EmbedError, Result};
pub use provider::{EmbeddingProvider, EmbeddingResult, FastEmbedProvider};
pub use stub::StubEmbeddingProvider;

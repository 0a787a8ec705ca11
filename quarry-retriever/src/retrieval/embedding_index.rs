//! One immutable generation of chunks and their vectors.
//!
//! An [`EmbeddingIndex`] is built in a single batch-embed pass and never
//! mutated; reindexing builds a fresh one and the service swaps it in whole.
//! Chunk i of the chunk list corresponds to vector i of the index; result
//! reconstruction depends on that positional correspondence.

use crate::retrieval::vector_index::FlatVectorIndex;
use anyhow::{Result, bail};
use quarry_chunk::{Category, Chunk};
use quarry_embed::EmbeddingProvider;
use quarry_embed::provider::normalize_in_place;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A chunk plus its similarity to the query. Constructed per query, never
/// stored.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub chunk: Chunk,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
}

/// Overfetch multiplier compensating for post-filtering by category.
const OVERFETCH: usize = 3;

/// Chunks and their L2-normalized vectors for one index generation.
#[derive(Debug, Default)]
pub struct EmbeddingIndex {
    chunks: Vec<Chunk>,
    vectors: FlatVectorIndex,
}

impl EmbeddingIndex {
    /// An index holding nothing; every search returns an empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Embed all chunk contents in one batch and build the vector index.
    ///
    /// An empty chunk set builds an empty index with a warning rather than
    /// failing.
    pub async fn build(provider: &dyn EmbeddingProvider, chunks: Vec<Chunk>) -> Result<Self> {
        if chunks.is_empty() {
            warn!("No chunks to index");
            return Ok(Self::empty());
        }

        info!("Building index for {} chunks", chunks.len());
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let result = provider.embed_texts(&texts).await?;
        if result.len() != chunks.len() {
            bail!(
                "embedding count {} does not match chunk count {}",
                result.len(),
                chunks.len()
            );
        }

        let mut vectors = FlatVectorIndex::new(result.dimension);
        let embeddings = result
            .embeddings
            .into_iter()
            .map(|mut embedding| {
                // Idempotent for providers that already normalize.
                normalize_in_place(&mut embedding);
                embedding
            })
            .collect();
        vectors.add(embeddings)?;

        info!("Index built with {} vectors", vectors.len());
        Ok(Self { chunks, vectors })
    }

    /// Embed the query and return up to `top_k` matching chunks in
    /// descending similarity order, optionally restricted to one category.
    ///
    /// Neighbors are overfetched threefold before filtering. Candidates with
    /// non-positive similarity are dropped, so a corpus with nothing related
    /// to the query yields an empty list rather than noise.
    pub async fn search(
        &self,
        provider: &dyn EmbeddingProvider,
        query: &str,
        top_k: usize,
        filter: Option<Category>,
    ) -> Result<Vec<SearchResult>> {
        if self.vectors.is_empty() {
            warn!("Index is empty");
            return Ok(Vec::new());
        }

        let mut query_vector = provider.embed_text(query).await?;
        normalize_in_place(&mut query_vector);
        if query_vector.len() != self.vectors.dimension() {
            bail!(
                "query dimension {} does not match index dimension {}",
                query_vector.len(),
                self.vectors.dimension()
            );
        }

        let fetch = (top_k * OVERFETCH).min(self.vectors.len());
        let candidates = self.vectors.query_top_k(&query_vector, fetch);
        debug!("Retrieved {} candidates for top_k={top_k}", candidates.len());

        let mut results = Vec::new();
        for (index, score) in candidates {
            let Some(chunk) = self.chunks.get(index) else {
                continue;
            };
            if score <= 0.0 {
                continue;
            }
            if let Some(category) = filter {
                if chunk.category != category {
                    continue;
                }
            }
            results.push(SearchResult {
                chunk: chunk.clone(),
                score,
            });
            if results.len() >= top_k {
                break;
            }
        }
        Ok(results)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

//! Deterministic stub provider for tests and dependency injection.
//!
//! [`StubEmbeddingProvider`] hashes whitespace tokens into a fixed-dimension
//! bag-of-words vector and L2-normalizes it. Texts sharing tokens get a
//! positive inner product and identical texts embed identically, with no
//! model files or ONNX runtime involved, so search ordering and filter
//! behavior stay assertable in unit tests.

use crate::error::Result;
use crate::provider::{EmbeddingProvider, EmbeddingResult, normalize_in_place};
use async_trait::async_trait;
use fnv::FnvHasher;
use std::hash::Hasher;

/// Hash-based embedding provider with no model behind it.
#[derive(Debug, Clone)]
pub struct StubEmbeddingProvider {
    dimension: usize,
}

impl StubEmbeddingProvider {
    /// Create a stub provider with the default dimension (32).
    pub fn new() -> Self {
        Self { dimension: 32 }
    }

    /// Create a stub provider with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            let mut hasher = FnvHasher::default();
            hasher.write(token.as_bytes());
            let hash = hasher.finish();
            let index = (hash % self.dimension as u64) as usize;
            // Sign from a higher hash bit keeps distinct token sets from
            // collapsing onto the same direction.
            let sign = if hash & (1 << 17) == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }
        normalize_in_place(&mut vector);
        vector
    }
}

impl Default for StubEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_one(text))
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<EmbeddingResult> {
        Ok(EmbeddingResult::new(
            texts.iter().map(|t| self.embed_one(t)).collect(),
        ))
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

//! Flat in-memory nearest-neighbor index over normalized vectors.
//!
//! Vectors are compared by inner product, which equals cosine similarity for
//! unit-length inputs. Search is exact and deterministic: descending score
//! with ascending insertion index as the tie-break.

use anyhow::{Result, bail};
use std::cmp::Ordering;

/// Exact inner-product top-k index.
#[derive(Debug, Clone, Default)]
pub struct FlatVectorIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatVectorIndex {
    /// Create an empty index for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append vectors to the index, preserving insertion order.
    ///
    /// Insertion position is the vector's identity: position i here must
    /// correspond to element i of whatever collection the caller is
    /// indexing.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimension {
                bail!(
                    "vector dimension {} does not match index dimension {}",
                    vector.len(),
                    self.dimension
                );
            }
        }
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Return up to `k` (index, similarity) pairs ordered by descending
    /// inner product.
    pub fn query_top_k(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if k == 0 || self.vectors.is_empty() || query.len() != self.dimension {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, dot(query, v)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

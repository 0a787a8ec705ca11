//! Configuration for embedding models

use serde::{Deserialize, Serialize};

/// Configuration for an embedding provider.
///
/// The model name selects one of fastembed's built-in ONNX models; an
/// unrecognized name is rejected when the provider initializes, so a config
/// typo is fatal at startup rather than at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Name of the embedding model to use
    pub model_name: String,
    /// Maximum batch size for embedding generation
    pub batch_size: usize,
    /// Whether to L2-normalize embeddings
    pub normalize: bool,
}

impl EmbedConfig {
    /// Create a configuration for the named model with default settings.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            batch_size: 32,
            normalize: true,
        }
    }

    /// Set the maximum batch size for embedding generation.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set whether embeddings are L2-normalized.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::new("all-minilm-l6-v2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods() {
        let config = EmbedConfig::new("bge-small-en-v1.5")
            .with_batch_size(8)
            .with_normalize(false);
        assert_eq!(config.model_name, "bge-small-en-v1.5");
        assert_eq!(config.batch_size, 8);
        assert!(!config.normalize);
    }

    #[test]
    fn batch_size_floor() {
        let config = EmbedConfig::default().with_batch_size(0);
        assert_eq!(config.batch_size, 1);
    }
}

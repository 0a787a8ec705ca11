//! Chunking and per-chunk metadata extraction for the quarry retrieval system.

pub mod chunk;

pub use chunk::{Category, Chunk, Chunker, UnknownCategory, detect_language, parse_filter};

//! Core retrieval: file discovery, vector search, and orchestration.

pub mod discovery;
pub mod embedding_index;
pub mod service;
pub mod vector_index;

//! Embedding storage system

pub mod batch;
pub mod index;

pub use batch::EmbeddingBatch;
pub use index::{Hit, SimilarityIndex};

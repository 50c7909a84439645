//! Error taxonomy for indexing, alignment and evaluation
//!
//! Every failure is surfaced to the caller as-is. Operations are local and
//! deterministic, so nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	/// Query vector or projection output disagrees with the index dimension.
	#[error("dimension mismatch: expected {expected}, got {actual}")]
	DimensionMismatch { expected: usize, actual: usize },

	/// A non-positive top-k was requested.
	#[error("top_k must be at least 1")]
	InvalidK,

	/// Majority vote needs at least one result.
	#[error("query \"{query}\" returned no results")]
	EmptyResultSet { query: String },

	#[error("index '{name}' not found at {}", .path.display())]
	IndexNotFound { name: String, path: PathBuf },

	/// Persisted artifacts could not be decoded or disagree with each other.
	#[error("corrupt index data: {0}")]
	CorruptMetadata(String),

	#[error("unknown class label '{0}'")]
	UnknownLabel(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Embedding provider failure, passed through untouched.
	#[error(transparent)]
	Provider(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

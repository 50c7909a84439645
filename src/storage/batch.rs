//! Embedding batch files: audio (or projected audio) embeddings with labels
//!
//! Produced by `cue embed` or by offline projection training; consumed by
//! `cue build`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{IndexRecord, LabelSet};
use crate::error::Error;
use crate::storage::SimilarityIndex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingBatch {
	dim: usize,
	filenames: Vec<String>,
	classes: Vec<String>,
	embeddings: Vec<Vec<f32>>,
}

impl EmbeddingBatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.embeddings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.embeddings.is_empty()
	}

	pub fn dim(&self) -> usize {
		self.dim
	}

	/// Append one sample; the first sample fixes the batch dimension
	pub fn push(&mut self, filename: impl Into<String>, class: impl Into<String>, embedding: Vec<f32>) -> crate::Result<()> {
		if self.is_empty() {
			self.dim = embedding.len();
		} else if embedding.len() != self.dim {
			return Err(Error::DimensionMismatch {
				expected: self.dim,
				actual: embedding.len(),
			});
		}
		self.filenames.push(filename.into());
		self.classes.push(class.into());
		self.embeddings.push(embedding);
		Ok(())
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent).context("Failed to create batch directory")?;
			}
		}
		let bytes = rmp_serde::to_vec_named(self).context("Failed to serialize embedding batch")?;
		fs::write(path, bytes).context("Failed to write embedding batch")?;
		Ok(())
	}

	pub fn load(path: &Path) -> Result<Self> {
		let bytes = fs::read(path)
			.with_context(|| format!("Failed to read embedding batch {}", path.display()))?;
		let batch: Self = rmp_serde::from_slice(&bytes).context("Failed to deserialize embedding batch")?;

		if batch.filenames.len() != batch.len() || batch.classes.len() != batch.len() {
			anyhow::bail!(
				"Embedding batch is misaligned: {} embeddings, {} filenames, {} classes",
				batch.len(),
				batch.filenames.len(),
				batch.classes.len()
			);
		}
		Ok(batch)
	}

	/// Build a similarity index, rejecting classes outside `labels`
	pub fn into_index(self, labels: &LabelSet) -> crate::Result<SimilarityIndex> {
		for class in &self.classes {
			labels.require(class)?;
		}

		let records = self
			.filenames
			.into_iter()
			.zip(self.classes)
			.map(|(filename, class)| IndexRecord { filename, class })
			.collect();

		SimilarityIndex::build(self.embeddings, records)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn push_enforces_uniform_dimension() {
		let mut batch = EmbeddingBatch::new();
		batch.push("a.wav", "drums", vec![1.0, 0.0]).unwrap();
		let err = batch.push("b.wav", "keys", vec![1.0]).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 1 }));
	}

	#[test]
	fn save_load_and_build() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("audio.msgpack");

		let mut batch = EmbeddingBatch::new();
		batch.push("drums_01.wav", "drums", vec![2.0, 0.0]).unwrap();
		batch.push("keys_01.wav", "keys", vec![0.0, 5.0]).unwrap();
		batch.save(&path).unwrap();

		let index = EmbeddingBatch::load(&path).unwrap().into_index(&LabelSet::default()).unwrap();
		assert_eq!(index.len(), 2);
		assert_eq!(index.record(1).unwrap().filename, "keys_01.wav");
		assert_eq!(index.vector(0).unwrap(), &[1.0, 0.0]);
	}

	#[test]
	fn unknown_class_is_rejected() {
		let mut batch = EmbeddingBatch::new();
		batch.push("bass_01.wav", "bass", vec![1.0]).unwrap();
		let err = batch.into_index(&LabelSet::default()).unwrap_err();
		assert!(matches!(err, Error::UnknownLabel(ref l) if l == "bass"));
	}
}

//! Exact inner-product similarity index
//!
//! Vectors are stored row-major in one flat buffer, every row scaled to unit
//! length at build time so that inner product equals cosine similarity.
//! Metadata lives in a parallel list addressed by the same row position.
//!
//! On disk an index is two co-located artifacts sharing a name:
//! `<name>.index` (MessagePack vector store) and `<name>_metadata.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{INDEX_EXT, METADATA_SUFFIX};
use crate::core::embedding::{dot, normalize};
use crate::core::IndexRecord;
use crate::error::{Error, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Search hit: row position and inner-product score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
	pub position: usize,
	pub score: f32,
}

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
	dim: usize,
	vectors: Vec<f32>,
	records: Vec<IndexRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VectorStore {
	version: String,
	created: DateTime<Utc>,
	dim: usize,
	count: usize,
	vectors: Vec<f32>,
}

impl SimilarityIndex {
	/// Build from parallel vectors and records, normalizing every vector.
	pub fn build(vectors: Vec<Vec<f32>>, records: Vec<IndexRecord>) -> Result<Self> {
		if vectors.len() != records.len() {
			return Err(Error::CorruptMetadata(format!(
				"{} vectors but {} metadata records",
				vectors.len(),
				records.len()
			)));
		}

		let dim = vectors.first().map_or(0, Vec::len);
		let mut flat = Vec::with_capacity(dim * vectors.len());

		for (position, mut vector) in vectors.into_iter().enumerate() {
			if vector.len() != dim {
				return Err(Error::DimensionMismatch {
					expected: dim,
					actual: vector.len(),
				});
			}
			if vector.iter().any(|v| !v.is_finite()) {
				return Err(Error::CorruptMetadata(format!(
					"row {} ({}) contains a non-finite value",
					position, records[position].filename
				)));
			}
			if !normalize(&mut vector) {
				crate::ui::debug(&format!(
					"Row {} ({}) has zero norm and cannot be normalized",
					position, records[position].filename
				));
			}
			flat.extend_from_slice(&vector);
		}

		Ok(Self {
			dim,
			vectors: flat,
			records,
		})
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn dim(&self) -> usize {
		self.dim
	}

	pub fn records(&self) -> &[IndexRecord] {
		&self.records
	}

	pub fn record(&self, position: usize) -> Option<&IndexRecord> {
		self.records.get(position)
	}

	pub fn vector(&self, position: usize) -> Option<&[f32]> {
		if position >= self.len() {
			return None;
		}
		let start = position * self.dim;
		Some(&self.vectors[start..start + self.dim])
	}

	fn rows(&self) -> impl Iterator<Item = &[f32]> {
		// chunks_exact panics on a zero chunk size
		self.vectors.chunks_exact(self.dim.max(1)).take(self.len())
	}

	/// Exact top-k by inner product, highest score first.
	///
	/// Equal scores keep insertion order.
	pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Hit>> {
		if k == 0 {
			return Err(Error::InvalidK);
		}
		if query.len() != self.dim {
			return Err(Error::DimensionMismatch {
				expected: self.dim,
				actual: query.len(),
			});
		}

		let mut hits: Vec<Hit> = self
			.rows()
			.enumerate()
			.map(|(position, row)| Hit {
				position,
				score: dot(row, query),
			})
			.collect();

		hits.sort_by(|a, b| b.score.total_cmp(&a.score));
		hits.truncate(k);
		Ok(hits)
	}

	/// Write both artifacts into `dir`
	pub fn persist(&self, dir: &Path, name: &str) -> Result<()> {
		fs::create_dir_all(dir)?;

		let store = VectorStore {
			version: VERSION.to_string(),
			created: Utc::now(),
			dim: self.dim,
			count: self.len(),
			vectors: self.vectors.clone(),
		};
		let bytes = rmp_serde::to_vec(&store)
			.map_err(|e| Error::CorruptMetadata(format!("failed to encode vectors: {}", e)))?;
		fs::write(vector_path(dir, name), bytes)?;

		let json = serde_json::to_string_pretty(&self.records)
			.map_err(|e| Error::CorruptMetadata(format!("failed to encode metadata: {}", e)))?;
		fs::write(metadata_path(dir, name), json)?;

		crate::ui::debug(&format!(
			"Persisted index '{}' ({} vectors, dim {}) to {}",
			name,
			self.len(),
			self.dim,
			dir.display()
		));
		Ok(())
	}

	/// Read both artifacts back; vectors are taken as stored
	pub fn load(dir: &Path, name: &str) -> Result<Self> {
		let vectors_file = vector_path(dir, name);
		let metadata_file = metadata_path(dir, name);

		for path in [&vectors_file, &metadata_file] {
			if !path.exists() {
				return Err(Error::IndexNotFound {
					name: name.to_string(),
					path: path.clone(),
				});
			}
		}

		let bytes = fs::read(&vectors_file)?;
		let store: VectorStore = rmp_serde::from_slice(&bytes)
			.map_err(|e| Error::CorruptMetadata(format!("{}: {}", vectors_file.display(), e)))?;

		let json = fs::read_to_string(&metadata_file)?;
		let records: Vec<IndexRecord> = serde_json::from_str(&json)
			.map_err(|e| Error::CorruptMetadata(format!("{}: {}", metadata_file.display(), e)))?;

		if store.vectors.len() != store.count * store.dim {
			return Err(Error::CorruptMetadata(format!(
				"vector store holds {} floats, expected {} x {}",
				store.vectors.len(),
				store.count,
				store.dim
			)));
		}
		if records.len() != store.count {
			return Err(Error::CorruptMetadata(format!(
				"{} vectors but {} metadata records",
				store.count,
				records.len()
			)));
		}

		if store.version != VERSION {
			crate::ui::debug(&format!(
				"Index '{}' was built by v{} (current v{})",
				name, store.version, VERSION
			));
		}
		crate::ui::debug(&format!(
			"Loaded index '{}' ({} vectors, dim {}, built {})",
			name,
			store.count,
			store.dim,
			store.created.format("%Y-%m-%d %H:%M")
		));

		Ok(Self {
			dim: store.dim,
			vectors: store.vectors,
			records,
		})
	}
}

pub fn vector_path(dir: &Path, name: &str) -> PathBuf {
	dir.join(format!("{}.{}", name, INDEX_EXT))
}

pub fn metadata_path(dir: &Path, name: &str) -> PathBuf {
	dir.join(format!("{}{}", name, METADATA_SUFFIX))
}

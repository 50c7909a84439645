//! # Text-Audio Alignment
//!
//! Three ways of turning a text query into audio results:
//!
//! - [`PrototypeAlignment`]: route the query to a class by comparing it with
//!   class-name anchors, then return samples of that class.
//! - [`LinearProjection`]: embed (and optionally project) the query into the
//!   index space and run a similarity search.
//! - [`ContrastiveProjection`]: same search with a contrastively trained
//!   projection.

pub mod contrastive;
pub mod linear;
pub mod projection;
pub mod prototype;

use crate::core::{Embedding, QueryResult};
use crate::error::{Error, Result};
use crate::models::TextEncoder;
use crate::storage::SimilarityIndex;

pub use contrastive::ContrastiveProjection;
pub use linear::LinearProjection;
pub use projection::AffineMap;
pub use prototype::PrototypeAlignment;

/// Common query contract for every strategy
pub trait Alignment {
	fn name(&self) -> &str;

	/// Ranked results for `text`, at most `top_k` of them
	fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>>;
}

pub(crate) fn embed(encoder: &dyn TextEncoder, text: &str) -> Result<Embedding> {
	encoder.embed_text(text).map_err(Error::Provider)
}

/// Shared body of the projection strategies: embed, map, renormalize, search.
pub(crate) struct ProjectedSearch<'a> {
	encoder: &'a dyn TextEncoder,
	index: &'a SimilarityIndex,
	map: Option<AffineMap>,
}

impl<'a> ProjectedSearch<'a> {
	/// Validates the map output against the index once, up front
	pub(crate) fn new(encoder: &'a dyn TextEncoder, index: &'a SimilarityIndex, map: Option<AffineMap>) -> Result<Self> {
		if let Some(map) = &map {
			if map.output_dim() != index.dim() {
				return Err(Error::DimensionMismatch {
					expected: index.dim(),
					actual: map.output_dim(),
				});
			}
		}
		Ok(Self { encoder, index, map })
	}

	pub(crate) fn project(&self, text: &str) -> Result<Embedding> {
		let embedding = embed(self.encoder, text)?;
		match &self.map {
			Some(map) => map.apply(embedding.as_slice()),
			None => Ok(Embedding::new(embedding.into_vec())),
		}
	}

	pub(crate) fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>> {
		if top_k == 0 {
			return Err(Error::InvalidK);
		}
		let query = self.project(text)?;
		let hits = self.index.search(query.as_slice(), top_k)?;

		Ok(hits
			.into_iter()
			.filter_map(|hit| {
				self.index
					.record(hit.position)
					.map(|record| QueryResult::scored(record, hit.score))
			})
			.collect())
	}
}

//! Linear projection alignment
//!
//! The index holds audio embeddings already mapped into the text space, so a
//! query is embedded, optionally passed through an explicit affine map, and
//! searched directly.

use crate::core::QueryResult;
use crate::error::Result;
use crate::models::TextEncoder;
use crate::storage::SimilarityIndex;

use super::{AffineMap, Alignment, ProjectedSearch};

pub struct LinearProjection<'a> {
	search: ProjectedSearch<'a>,
}

impl<'a> LinearProjection<'a> {
	/// Without a map the encoder output must already live in index space.
	///
	/// Fails with `DimensionMismatch` when the map output does not match the
	/// index dimension.
	pub fn new(encoder: &'a dyn TextEncoder, index: &'a SimilarityIndex, map: Option<AffineMap>) -> Result<Self> {
		Ok(Self {
			search: ProjectedSearch::new(encoder, index, map)?,
		})
	}
}

impl Alignment for LinearProjection<'_> {
	fn name(&self) -> &str {
		"Linear Projection Alignment"
	}

	fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>> {
		self.search.query(text, top_k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::alignment::testing::TableEncoder;
	use crate::core::IndexRecord;
	use crate::error::Error;
	use ndarray::array;

	fn index() -> SimilarityIndex {
		SimilarityIndex::build(
			vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7, 0.7]],
			vec![
				IndexRecord::new("kick.wav", "drums"),
				IndexRecord::new("piano.wav", "keys"),
				IndexRecord::new("both.wav", "keys"),
			],
		)
		.unwrap()
	}

	#[test]
	fn direct_embedding_searches_by_score() {
		let encoder = TableEncoder::default().with("drum loop", &[2.0, 0.1]);
		let index = index();
		let strategy = LinearProjection::new(&encoder, &index, None).unwrap();

		let results = strategy.query("drum loop", 3).unwrap();
		assert_eq!(results[0].filename, "kick.wav");
		assert_eq!(results[1].filename, "both.wav");
		let scores: Vec<f32> = results.iter().map(|r| r.score.unwrap()).collect();
		assert!(scores.windows(2).all(|w| w[0] >= w[1]));
		assert!(scores[0] <= 1.0 + 1e-6);
	}

	#[test]
	fn explicit_map_is_applied_before_search() {
		// Text axis 0 maps onto the "keys" audio axis
		let map = AffineMap::new(array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], array![0.0, 0.0]).unwrap();
		let encoder = TableEncoder::default().with("piano chords", &[1.0, 0.0, 0.0]);
		let index = index();
		let strategy = LinearProjection::new(&encoder, &index, Some(map)).unwrap();

		let results = strategy.query("piano chords", 1).unwrap();
		assert_eq!(results[0].filename, "piano.wav");
		assert!((results[0].score.unwrap() - 1.0).abs() < 1e-5);
	}

	#[test]
	fn map_output_must_match_index() {
		let map = AffineMap::new(ndarray::Array2::zeros((3, 3)), ndarray::Array1::zeros(3)).unwrap();
		let encoder = TableEncoder::default();
		let index = index();
		let err = LinearProjection::new(&encoder, &index, Some(map)).err().unwrap();
		assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3 }));
	}

	#[test]
	fn unmapped_embedding_of_wrong_size_fails() {
		let encoder = TableEncoder::default().with("drum loop", &[1.0, 0.0, 0.0]);
		let index = index();
		let strategy = LinearProjection::new(&encoder, &index, None).unwrap();
		assert!(matches!(
			strategy.query("drum loop", 2),
			Err(Error::DimensionMismatch { expected: 2, actual: 3 })
		));
	}
}

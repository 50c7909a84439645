//! Contrastive projection alignment (mini-CLAP)
//!
//! Text embeddings go through a projection trained jointly with the audio
//! side on a contrastive objective. Training happens offline; only the frozen
//! `W` and `b` are used here.

use crate::core::QueryResult;
use crate::error::Result;
use crate::models::TextEncoder;
use crate::storage::SimilarityIndex;

use super::{AffineMap, Alignment, ProjectedSearch};

pub struct ContrastiveProjection<'a> {
	search: ProjectedSearch<'a>,
}

impl<'a> ContrastiveProjection<'a> {
	pub fn new(encoder: &'a dyn TextEncoder, index: &'a SimilarityIndex, map: AffineMap) -> Result<Self> {
		Ok(Self {
			search: ProjectedSearch::new(encoder, index, Some(map))?,
		})
	}
}

impl Alignment for ContrastiveProjection<'_> {
	fn name(&self) -> &str {
		"Contrastive (Mini-CLAP) Alignment"
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
			vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.1, 1.0]],
			vec![
				IndexRecord::new("drums_01.wav", "drums"),
				IndexRecord::new("keys_01.wav", "keys"),
				IndexRecord::new("keys_02.wav", "keys"),
			],
		)
		.unwrap()
	}

	fn map() -> AffineMap {
		// Three text dims onto two shared dims, with a small bias toward drums
		AffineMap::new(array![[1.0, 0.0, 0.5], [0.0, 1.0, 0.5]], array![0.05, 0.0]).unwrap()
	}

	#[test]
	fn projected_query_finds_matching_class() {
		let encoder = TableEncoder::default().with("keyboard harmony", &[0.0, 1.0, 0.0]);
		let index = index();
		let strategy = ContrastiveProjection::new(&encoder, &index, map()).unwrap();

		let results = strategy.query("keyboard harmony", 2).unwrap();
		assert_eq!(results.len(), 2);
		assert!(results.iter().all(|r| r.class == "keys"));
	}

	#[test]
	fn projection_is_renormalized() {
		let encoder = TableEncoder::default().with("drum loop", &[1.0, 0.0, 0.0]);
		let index = index();
		let strategy = ContrastiveProjection::new(&encoder, &index, map()).unwrap();

		let results = strategy.query("drum loop", 1).unwrap();
		let score = results[0].score.unwrap();
		assert!(score <= 1.0 + 1e-6 && score > 0.99);
	}

	#[test]
	fn text_dimension_must_match_map_input() {
		let encoder = TableEncoder::default().with("drum loop", &[1.0, 0.0]);
		let index = index();
		let strategy = ContrastiveProjection::new(&encoder, &index, map()).unwrap();
		assert!(matches!(
			strategy.query("drum loop", 1),
			Err(Error::DimensionMismatch { expected: 3, actual: 2 })
		));
	}
}

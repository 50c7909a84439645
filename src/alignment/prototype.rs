//! Prototype routing: classify the query by class-name similarity
//!
//! No learned text-to-audio mapping is involved. The query is compared with
//! one anchor embedding per class name and routed to the best class; the
//! result is the first `top_k` samples of that class in index order.
//!
//! Samples inside the routed class are not ranked by audio similarity. This
//! mirrors the benchmark behaviour and is a known limitation.

use crate::core::{Embedding, LabelSet, QueryResult};
use crate::error::{Error, Result};
use crate::models::TextEncoder;
use crate::storage::SimilarityIndex;

use super::{embed, Alignment};

pub struct PrototypeAlignment<'a> {
	encoder: &'a dyn TextEncoder,
	index: &'a SimilarityIndex,
	/// Class anchors, embedded once at construction
	anchors: Vec<(String, Embedding)>,
}

impl<'a> PrototypeAlignment<'a> {
	pub fn new(encoder: &'a dyn TextEncoder, index: &'a SimilarityIndex, labels: &LabelSet) -> Result<Self> {
		let anchors = labels
			.iter()
			.map(|label| -> Result<(String, Embedding)> { Ok((label.to_string(), embed(encoder, label)?)) })
			.collect::<Result<Vec<_>>>()?;

		crate::ui::debug(&format!("Embedded {} class anchors: {}", anchors.len(), labels));
		Ok(Self { encoder, index, anchors })
	}

	/// Best matching class and its anchor score; the first anchor wins ties
	pub fn classify(&self, text: &str) -> Result<(&str, f32)> {
		let query = embed(self.encoder, text)?;

		let mut best: Option<(&str, f32)> = None;
		for (label, anchor) in &self.anchors {
			let score = query.similarity(anchor);
			if best.map_or(true, |(_, top)| score > top) {
				best = Some((label.as_str(), score));
			}
		}

		best.ok_or_else(|| Error::UnknownLabel(String::new()))
	}
}

impl Alignment for PrototypeAlignment<'_> {
	fn name(&self) -> &str {
		"Prototype-Based Alignment"
	}

	fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>> {
		if top_k == 0 {
			return Err(Error::InvalidK);
		}

		let (class, score) = self.classify(text)?;
		crate::ui::debug(&format!("\"{}\" routed to {} ({:.3})", text, class, score));

		Ok(self
			.index
			.records()
			.iter()
			.filter(|record| record.class == class)
			.take(top_k)
			.map(QueryResult::unscored)
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::alignment::testing::TableEncoder;
	use crate::core::IndexRecord;

	fn index() -> SimilarityIndex {
		SimilarityIndex::build(
			vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]],
			vec![
				IndexRecord::new("a", "drums"),
				IndexRecord::new("b", "drums"),
				IndexRecord::new("c", "keys"),
			],
		)
		.unwrap()
	}

	fn encoder() -> TableEncoder {
		TableEncoder::default()
			.with("drums", &[1.0, 0.0, 0.0])
			.with("keys", &[0.0, 1.0, 0.0])
			.with("kick snare rhythm", &[0.9, 0.2, 0.1])
			.with("soft piano", &[0.1, 0.9, 0.0])
			.with("ambiguous", &[1.0, 1.0, 0.0])
	}

	#[test]
	fn returns_class_members_in_insertion_order() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();

		let results = strategy.query("kick snare rhythm", 2).unwrap();
		let names: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
		assert_eq!(names, vec!["a", "b"]);
		assert!(results.iter().all(|r| r.score.is_none()));
	}

	#[test]
	fn short_class_returns_what_exists() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();

		let results = strategy.query("soft piano", 5).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].filename, "c");
	}

	#[test]
	fn ties_go_to_the_first_anchor() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();

		let (class, _) = strategy.classify("ambiguous").unwrap();
		assert_eq!(class, "drums");
	}

	#[test]
	fn anchors_are_embedded_once() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();
		assert_eq!(encoder.calls.get(), 2);

		strategy.query("kick snare rhythm", 1).unwrap();
		strategy.query("soft piano", 1).unwrap();
		assert_eq!(encoder.calls.get(), 4);
	}

	#[test]
	fn zero_k_is_rejected() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();
		assert!(matches!(strategy.query("soft piano", 0), Err(Error::InvalidK)));
	}

	#[test]
	fn provider_failures_pass_through() {
		let encoder = encoder();
		let index = index();
		let strategy = PrototypeAlignment::new(&encoder, &index, &LabelSet::default()).unwrap();
		assert!(matches!(strategy.query("unheard of", 1), Err(Error::Provider(_))));
	}
}

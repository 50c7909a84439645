//! # Evaluation
//!
//! Runs labeled queries through a retrieval function, reduces each top-k
//! result list to one predicted class by majority vote, and tallies the
//! predictions in a confusion matrix.

pub mod matrix;
pub mod queries;

use crate::config::DEFAULT_TOP_K;
use crate::core::{EvalQuery, LabelSet, QueryResult};
use crate::error::{Error, Result};
use crate::retrieval::RetrievalService;

pub use matrix::ConfusionMatrix;
pub use queries::{benchmark_queries, load_queries, quick_queries};

/// Most frequent label; among equally frequent labels the one seen first wins.
///
/// Returns `None` for an empty slice.
pub fn majority_vote<'a, I>(labels: I) -> Option<&'a str>
where
	I: IntoIterator<Item = &'a str>,
{
	// (label, count) in first-seen order
	let mut tally: Vec<(&str, usize)> = Vec::new();
	for label in labels {
		match tally.iter().position(|(l, _)| *l == label) {
			Some(i) => tally[i].1 += 1,
			None => tally.push((label, 1)),
		}
	}

	let mut best: Option<(&str, usize)> = None;
	for (label, count) in tally {
		if best.map_or(true, |(_, top)| count > top) {
			best = Some((label, count));
		}
	}
	best.map(|(label, _)| label)
}

pub struct Evaluator {
	labels: LabelSet,
	top_k: usize,
}

impl Evaluator {
	pub fn new(labels: LabelSet) -> Self {
		Self {
			labels,
			top_k: DEFAULT_TOP_K,
		}
	}

	pub fn with_top_k(mut self, top_k: usize) -> Self {
		self.top_k = top_k;
		self
	}

	pub fn top_k(&self) -> usize {
		self.top_k
	}

	/// Predicted class for one query
	pub fn predict<F>(&self, retrieve: &F, text: &str) -> Result<String>
	where
		F: Fn(&str, usize) -> Result<Vec<QueryResult>>,
	{
		let results = retrieve(text, self.top_k)?;
		majority_vote(results.iter().map(|r| r.class.as_str()))
			.map(str::to_string)
			.ok_or_else(|| Error::EmptyResultSet {
				query: text.to_string(),
			})
	}

	pub fn evaluate<F>(&self, retrieve: F, queries: &[EvalQuery]) -> Result<ConfusionMatrix>
	where
		F: Fn(&str, usize) -> Result<Vec<QueryResult>>,
	{
		if self.top_k == 0 {
			return Err(Error::InvalidK);
		}

		let mut matrix = ConfusionMatrix::new(self.labels.clone());
		for query in queries {
			// Reject bad ground truth before spending a retrieval on it
			self.labels.require(&query.class)?;

			let predicted = self.predict(&retrieve, &query.text)?;
			crate::ui::debug(&format!(
				"\"{}\" -> {} (expected {})",
				query.text, predicted, query.class
			));
			matrix.record(&query.class, &predicted)?;
		}
		Ok(matrix)
	}

	pub fn evaluate_service(&self, service: &RetrievalService<'_>, queries: &[EvalQuery]) -> Result<ConfusionMatrix> {
		self.evaluate(|text, k| service.query(text, k), queries)
	}
}

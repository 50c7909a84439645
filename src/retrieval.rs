//! Retrieval service: one call contract over any alignment strategy

use clap::ValueEnum;
use std::fmt;

use crate::alignment::Alignment;
use crate::config::{CONTRASTIVE_INDEX, LINEAR_INDEX, PROTOTYPE_INDEX};
use crate::core::QueryResult;
use crate::error::Result;

/// Strategy selector used by the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
	/// Route queries to a class via class-name anchors
	Prototype,
	/// Search an index of linearly projected audio embeddings
	Projection,
	/// Search with a contrastively trained text projection
	Contrastive,
}

impl Strategy {
	pub const ALL: [Strategy; 3] = [Strategy::Prototype, Strategy::Projection, Strategy::Contrastive];

	/// Default persisted index name for this strategy
	pub fn index_name(self) -> &'static str {
		match self {
			Strategy::Prototype => PROTOTYPE_INDEX,
			Strategy::Projection => LINEAR_INDEX,
			Strategy::Contrastive => CONTRASTIVE_INDEX,
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Strategy::Prototype => "prototype",
			Strategy::Projection => "projection",
			Strategy::Contrastive => "contrastive",
		};
		f.write_str(name)
	}
}

/// Evaluation target: one strategy or `all` of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Selection {
	All,
	Prototype,
	Projection,
	Contrastive,
}

impl Selection {
	/// Strategies named by `selections` in first-mention order; empty or `all` means every strategy
	pub fn expand(selections: &[Selection]) -> Vec<Strategy> {
		if selections.is_empty() || selections.contains(&Selection::All) {
			return Strategy::ALL.to_vec();
		}
		let mut strategies = Vec::with_capacity(selections.len());
		for selection in selections {
			let strategy = match selection {
				Selection::Prototype => Strategy::Prototype,
				Selection::Projection => Strategy::Projection,
				Selection::Contrastive => Strategy::Contrastive,
				Selection::All => continue,
			};
			if !strategies.contains(&strategy) {
				strategies.push(strategy);
			}
		}
		strategies
	}
}

/// Thin wrapper giving every strategy the same `query` surface.
///
/// Queries are pure functions of the strategy, the text and `top_k`; nothing
/// is cached or retried here.
pub struct RetrievalService<'a> {
	strategy: Box<dyn Alignment + 'a>,
}

impl<'a> RetrievalService<'a> {
	pub fn new(strategy: impl Alignment + 'a) -> Self {
		Self {
			strategy: Box::new(strategy),
		}
	}

	pub fn name(&self) -> &str {
		self.strategy.name()
	}

	pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult>> {
		self.strategy.query(text, top_k)
	}
}

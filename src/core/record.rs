//! Records flowing between the index, the strategies and the evaluator

use serde::{Deserialize, Serialize};

/// Metadata stored alongside each index row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
	pub filename: String,
	pub class: String,
}

impl IndexRecord {
	pub fn new(filename: impl Into<String>, class: impl Into<String>) -> Self {
		Self {
			filename: filename.into(),
			class: class.into(),
		}
	}
}

/// One ranked retrieval result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
	pub filename: String,
	pub class: String,
	/// Inner product with the query; `None` when the strategy does not rank
	/// by similarity (prototype routing).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub score: Option<f32>,
}

impl QueryResult {
	pub fn scored(record: &IndexRecord, score: f32) -> Self {
		Self {
			filename: record.filename.clone(),
			class: record.class.clone(),
			score: Some(score),
		}
	}

	pub fn unscored(record: &IndexRecord) -> Self {
		Self {
			filename: record.filename.clone(),
			class: record.class.clone(),
			score: None,
		}
	}
}

/// Labeled benchmark query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalQuery {
	pub text: String,
	pub class: String,
}

impl EvalQuery {
	pub fn new(text: impl Into<String>, class: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			class: class.into(),
		}
	}
}

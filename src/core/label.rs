//! Closed set of class labels

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ordered, duplicate-free class names.
///
/// Order matters: it fixes the confusion matrix layout and the order in which
/// prototype anchors are compared (first anchor wins ties).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
	pub fn new<I, S>(labels: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut names: Vec<String> = Vec::new();
		for label in labels {
			let label = label.into();
			let trimmed = label.trim();
			if trimmed.is_empty() {
				return Err(Error::UnknownLabel(label));
			}
			if names.iter().any(|n| n == trimmed) {
				continue;
			}
			names.push(trimmed.to_string());
		}
		if names.is_empty() {
			return Err(Error::UnknownLabel(String::new()));
		}
		Ok(Self(names))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn names(&self) -> &[String] {
		&self.0
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn position(&self, label: &str) -> Option<usize> {
		self.0.iter().position(|n| n == label)
	}

	/// Position of `label`, or `UnknownLabel`
	pub fn require(&self, label: &str) -> Result<usize> {
		self.position(label)
			.ok_or_else(|| Error::UnknownLabel(label.to_string()))
	}
}

impl Default for LabelSet {
	fn default() -> Self {
		Self(crate::config::DEFAULT_LABELS.iter().map(|s| s.to_string()).collect())
	}
}

impl FromStr for LabelSet {
	type Err = Error;

	/// Comma-separated list, e.g. `drums,keys`
	fn from_str(s: &str) -> Result<Self> {
		Self::new(s.split(',').filter(|p| !p.trim().is_empty()))
	}
}

impl fmt::Display for LabelSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.join(", "))
	}
}

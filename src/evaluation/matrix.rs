//! Confusion matrix over a closed label set

use colored::Colorize;
use std::fmt;

use crate::core::LabelSet;
use crate::error::Result;

/// Rows are actual classes, columns predicted classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
	labels: LabelSet,
	counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
	pub fn new(labels: LabelSet) -> Self {
		let n = labels.len();
		Self {
			labels,
			counts: vec![vec![0; n]; n],
		}
	}

	pub fn labels(&self) -> &LabelSet {
		&self.labels
	}

	pub fn record(&mut self, actual: &str, predicted: &str) -> Result<()> {
		let row = self.labels.require(actual)?;
		let col = self.labels.require(predicted)?;
		self.counts[row][col] += 1;
		Ok(())
	}

	/// Count for (actual, predicted); zero for labels outside the set
	pub fn count(&self, actual: &str, predicted: &str) -> usize {
		match (self.labels.position(actual), self.labels.position(predicted)) {
			(Some(row), Some(col)) => self.counts[row][col],
			_ => 0,
		}
	}

	pub fn row_total(&self, actual: &str) -> usize {
		self.labels
			.position(actual)
			.map_or(0, |row| self.counts[row].iter().sum())
	}

	pub fn total(&self) -> usize {
		self.counts.iter().flatten().sum()
	}

	pub fn correct(&self) -> usize {
		(0..self.counts.len()).map(|i| self.counts[i][i]).sum()
	}

	pub fn accuracy(&self) -> f32 {
		match self.total() {
			0 => 0.0,
			total => self.correct() as f32 / total as f32,
		}
	}

	/// Share of `actual` queries predicted correctly, `None` without queries
	pub fn recall(&self, actual: &str) -> Option<f32> {
		let row = self.labels.position(actual)?;
		let total: usize = self.counts[row].iter().sum();
		(total > 0).then(|| self.counts[row][row] as f32 / total as f32)
	}
}

impl fmt::Display for ConfusionMatrix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let width = self
			.labels
			.iter()
			.map(str::len)
			.max()
			.unwrap_or(0)
			.max(6);

		writeln!(f, "{}", "Rows: Actual | Columns: Predicted".dimmed())?;
		write!(f, "{:width$}", "", width = width + 2)?;
		for label in self.labels.iter() {
			write!(f, " {:>width$}", label, width = width)?;
		}
		writeln!(f)?;

		for (label, row) in self.labels.iter().zip(&self.counts) {
			write!(f, "{:width$}  ", label, width = width)?;
			for (col, count) in row.iter().enumerate() {
				let cell = format!(" {:>width$}", count, width = width);
				if Some(col) == self.labels.position(label) {
					write!(f, "{}", cell.bright_green())?;
				} else {
					write!(f, "{}", cell)?;
				}
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	#[test]
	fn accumulates_counts() {
		let mut cm = ConfusionMatrix::new(LabelSet::default());
		cm.record("drums", "drums").unwrap();
		cm.record("drums", "keys").unwrap();
		cm.record("keys", "keys").unwrap();

		assert_eq!(cm.count("drums", "keys"), 1);
		assert_eq!(cm.row_total("drums"), 2);
		assert_eq!(cm.total(), 3);
		assert_eq!(cm.correct(), 2);
		assert!((cm.accuracy() - 2.0 / 3.0).abs() < 1e-6);
		assert_eq!(cm.recall("keys"), Some(1.0));
	}

	#[test]
	fn unknown_label_is_an_error() {
		let mut cm = ConfusionMatrix::new(LabelSet::default());
		assert!(matches!(cm.record("drums", "bass"), Err(Error::UnknownLabel(_))));
		assert_eq!(cm.total(), 0);
	}

	#[test]
	fn empty_matrix_has_zero_accuracy() {
		let cm = ConfusionMatrix::new(LabelSet::default());
		assert_eq!(cm.accuracy(), 0.0);
		assert_eq!(cm.recall("drums"), None);
	}

	#[test]
	fn display_lists_every_label() {
		colored::control::set_override(false);
		let mut cm = ConfusionMatrix::new(LabelSet::default());
		cm.record("keys", "drums").unwrap();
		let text = cm.to_string();
		assert!(text.contains("Rows: Actual | Columns: Predicted"));
		assert!(text.lines().any(|l| l.starts_with("keys") && l.contains('1')));
	}
}

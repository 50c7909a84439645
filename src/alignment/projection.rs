//! Frozen affine text projection (`W`, `b`) fitted offline

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::Embedding;
use crate::error::{Error, Result};

/// `y = normalize(W · x + b)` with `W` shaped `(out, in)`
#[derive(Debug, Clone, PartialEq)]
pub struct AffineMap {
	weight: Array2<f32>,
	bias: Array1<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMap {
	rows: usize,
	cols: usize,
	/// Row-major `rows * cols`
	weight: Vec<f32>,
	bias: Vec<f32>,
}

impl AffineMap {
	pub fn new(weight: Array2<f32>, bias: Array1<f32>) -> Result<Self> {
		if weight.nrows() != bias.len() {
			return Err(Error::DimensionMismatch {
				expected: weight.nrows(),
				actual: bias.len(),
			});
		}
		Ok(Self { weight, bias })
	}

	pub fn from_parts(rows: usize, cols: usize, weight: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
		let weight = Array2::from_shape_vec((rows, cols), weight)
			.map_err(|e| Error::CorruptMetadata(format!("projection weight: {}", e)))?;
		Self::new(weight, Array1::from_vec(bias))
	}

	pub fn input_dim(&self) -> usize {
		self.weight.ncols()
	}

	pub fn output_dim(&self) -> usize {
		self.weight.nrows()
	}

	/// Project a text embedding and renormalize to unit length
	pub fn apply(&self, input: &[f32]) -> Result<Embedding> {
		if input.len() != self.input_dim() {
			return Err(Error::DimensionMismatch {
				expected: self.input_dim(),
				actual: input.len(),
			});
		}
		let projected = self.weight.dot(&ArrayView1::from(input)) + &self.bias;
		Ok(Embedding::new(projected.to_vec()))
	}

	pub fn load(path: &Path) -> Result<Self> {
		let bytes = fs::read(path)?;
		let stored: StoredMap = rmp_serde::from_slice(&bytes)
			.map_err(|e| Error::CorruptMetadata(format!("{}: {}", path.display(), e)))?;
		crate::ui::debug(&format!(
			"Loaded projection {} -> {} from {}",
			stored.cols,
			stored.rows,
			path.display()
		));
		Self::from_parts(stored.rows, stored.cols, stored.weight, stored.bias)
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let stored = StoredMap {
			rows: self.output_dim(),
			cols: self.input_dim(),
			weight: self.weight.iter().copied().collect(),
			bias: self.bias.to_vec(),
		};
		let bytes = rmp_serde::to_vec_named(&stored)
			.map_err(|e| Error::CorruptMetadata(format!("failed to encode projection: {}", e)))?;
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)?;
			}
		}
		fs::write(path, bytes)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn apply_projects_and_normalizes() {
		// Swap the two input axes and widen to 3 outputs
		let map = AffineMap::new(
			array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
			array![0.0, 0.0, 0.0],
		)
		.unwrap();
		let out = map.apply(&[3.0, 4.0]).unwrap();
		assert_eq!(out.dim(), 3);
		assert!((out.as_slice()[0] - 0.8).abs() < 1e-6);
		assert!((out.as_slice()[1] - 0.6).abs() < 1e-6);
		assert!((out.norm() - 1.0).abs() < 1e-6);
	}

	#[test]
	fn bias_is_added_before_normalizing() {
		let map = AffineMap::new(array![[1.0], [0.0]], array![0.0, 2.0]).unwrap();
		let out = map.apply(&[2.0]).unwrap();
		let expected = 1.0 / 2.0_f32.sqrt();
		assert!((out.as_slice()[0] - expected).abs() < 1e-6);
		assert!((out.as_slice()[1] - expected).abs() < 1e-6);
	}

	#[test]
	fn bias_must_match_rows() {
		let err = AffineMap::new(Array2::zeros((3, 2)), Array1::zeros(2)).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { expected: 3, actual: 2 }));
	}

	#[test]
	fn input_dimension_is_checked() {
		let map = AffineMap::new(Array2::zeros((2, 4)), Array1::zeros(2)).unwrap();
		assert!(matches!(map.apply(&[1.0; 3]), Err(Error::DimensionMismatch { expected: 4, actual: 3 })));
	}

	#[test]
	fn save_and_load_preserve_parameters() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("w.msgpack");
		let map = AffineMap::from_parts(2, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], vec![0.7, 0.8]).unwrap();
		map.save(&path).unwrap();
		assert_eq!(AffineMap::load(&path).unwrap(), map);
	}

	#[test]
	fn malformed_weight_shape_is_corrupt() {
		let err = AffineMap::from_parts(2, 2, vec![1.0; 3], vec![0.0; 2]).unwrap_err();
		assert!(matches!(err, Error::CorruptMetadata(_)));
	}
}

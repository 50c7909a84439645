//! Unit-norm embedding vectors shared by the text and audio sides

#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
	/// Create normalized embedding from raw data
	pub fn new(mut data: Vec<f32>) -> Self {
		normalize(&mut data);
		Self(data)
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<f32> {
		self.0
	}

	pub fn dim(&self) -> usize {
		self.0.len()
	}

	/// Inner product; cosine similarity for unit-norm inputs
	pub fn similarity(&self, other: &Self) -> f32 {
		dot(&self.0, &other.0)
	}

	pub fn norm(&self) -> f32 {
		l2_norm(&self.0)
	}
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn l2_norm(v: &[f32]) -> f32 {
	v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale to unit L2 norm in place. Zero (or non-finite) vectors are left
/// untouched and reported with `false`.
pub fn normalize(v: &mut [f32]) -> bool {
	let norm = l2_norm(v);
	if !norm.is_finite() || norm <= 0.0 {
		return false;
	}
	v.iter_mut().for_each(|x| *x /= norm);
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_normalizes_to_unit_length() {
		let e = Embedding::new(vec![3.0, 4.0]);
		assert!((e.norm() - 1.0).abs() < 1e-6);
		assert!((e.as_slice()[0] - 0.6).abs() < 1e-6);
	}

	#[test]
	fn zero_vector_is_left_alone() {
		let mut v = vec![0.0_f32; 4];
		assert!(!normalize(&mut v));
		assert_eq!(v, vec![0.0; 4]);
	}

	#[test]
	fn similarity_of_identical_unit_vectors_is_one() {
		let e = Embedding::new(vec![1.0, 2.0, 2.0]);
		assert!((e.similarity(&e) - 1.0).abs() < 1e-6);
	}
}

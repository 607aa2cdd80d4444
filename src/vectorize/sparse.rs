//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A sparse numeric vector in a fixed-dimension feature space.
///
/// Indices are strictly increasing and paired with non-zero values.
/// The dimension is fixed at vectorizer fit time; an empty index list
/// represents the all-zero vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Create a sparse vector from sorted (index, value) entries.
    pub fn new(dim: usize, entries: Vec<(usize, f64)>) -> Self {
        let mut indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (idx, value) in entries {
            debug_assert!(idx < dim);
            if value != 0.0 {
                indices.push(idx);
                values.push(value);
            }
        }
        SparseVector {
            dim,
            indices,
            values,
        }
    }

    /// Create the all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        SparseVector {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// The dimensionality of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether this is the all-zero vector.
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over (index, value) pairs of non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at the given index (zero if not stored).
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Dot product against a dense weight vector.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter().map(|(idx, value)| value * dense[idx]).sum()
    }

    /// Euclidean (L2) norm.
    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale all values in place.
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.values {
            *value *= factor;
        }
    }
}

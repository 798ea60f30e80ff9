//! Dense pairwise similarity over all item vectors.
//!
//! Vectors are L2-normalized, so the dot product is the cosine similarity.
//! Only the upper triangle is computed; the lower triangle is mirrored, so
//! the matrix is exactly symmetric.

use crate::vectorize::SparseVector;

/// `N × N` cosine similarities, row-major.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pairwise similarity.
    ///
    /// Diagonal entries are `1.0`, or `0.0` for zero vectors. Off-diagonal
    /// entries are clamped to `[0, 1]` to absorb rounding drift.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let mut values = vec![0.0; n * n];

        for i in 0..n {
            values[i * n + i] = if vectors[i].is_zero() { 0.0 } else { 1.0 };
            for j in (i + 1)..n {
                let sim = vectors[i].dot(&vectors[j]).clamp(0.0, 1.0);
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        tracing::debug!(items = n, "built similarity matrix");
        Self { n, values }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Mean of all off-diagonal entries; `0.0` for fewer than two items.
    pub fn mean_off_diagonal(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                sum += self.get(i, j);
            }
        }
        let pairs = (self.n * (self.n - 1) / 2) as f64;
        sum / pairs
    }
}

//! Sparse row vectors and the catalog feature matrix.

/// Sparse vector with strictly increasing column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Builds a vector from `(column, value)` pairs.
    ///
    /// Pairs are sorted by column; duplicate columns are summed and zeros
    /// dropped.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(u32, f32)>) -> Self {
        pairs.sort_by_key(|&(col, _)| col);
        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f32> = Vec::with_capacity(pairs.len());
        for (col, value) in pairs {
            if indices.last() == Some(&col) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(col);
                values.push(value);
            }
        }
        let mut v = Self { indices, values };
        v.drop_zeros();
        v
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for i in 0..self.values.len() {
            if self.values[i] != 0.0 {
                self.indices[keep] = self.indices[i];
                self.values[keep] = self.values[i];
                keep += 1;
            }
        }
        self.indices.truncate(keep);
        self.values.truncate(keep);
    }

    /// Column indices of the non-zero entries.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Non-zero values, aligned with [`SparseVector::indices`].
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns true for the zero vector.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `col`, zero when absent.
    #[must_use]
    pub fn get(&self, col: u32) -> f32 {
        self.indices
            .binary_search(&col)
            .map_or(0.0, |pos| self.values[pos])
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Scales to unit length in place. The zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// Dot product by merging the two index lists.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0_f32;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Dense copy of length `dim`.
    #[must_use]
    pub fn to_dense(&self, dim: usize) -> Vec<f32> {
        let mut dense = vec![0.0; dim];
        for (&col, &value) in self.indices.iter().zip(&self.values) {
            if let Some(slot) = dense.get_mut(col as usize) {
                *slot = value;
            }
        }
        dense
    }
}

/// N×V sparse matrix, one row per catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<SparseVector>,
    n_cols: usize,
}

impl FeatureMatrix {
    /// Wraps rows; every index must be below `n_cols`.
    #[must_use]
    pub fn new(rows: Vec<SparseVector>, n_cols: usize) -> Self {
        debug_assert!(rows
            .iter()
            .all(|r| r.indices().last().map_or(true, |&c| (c as usize) < n_cols)));
        Self { rows, n_cols }
    }

    /// Number of rows (items).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (vocabulary size).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &SparseVector {
        &self.rows[i]
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Total non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVector::nnz).sum()
    }
}

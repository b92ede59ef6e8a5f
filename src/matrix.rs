//! Labeled matrices and axis permutation.
//!
//! A [`LabeledMatrix`] pairs an `ndarray` grid with ordered row and column
//! label sequences. It is read-only once constructed; [`LabeledMatrix::reorder`]
//! returns a fresh matrix with rows/columns (and their labels, in lockstep)
//! permuted, never mutating in place.

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{Error, Result};

/// An n×m real-valued grid with row and column labels.
///
/// Invariant: label sequence lengths match the matrix dimensions; the
/// constructor rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    values: Array2<f64>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl LabeledMatrix {
    /// Create a labeled matrix, validating label lengths against the shape.
    pub fn new(
        values: Array2<f64>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self> {
        if row_labels.len() != values.nrows() {
            return Err(Error::DimensionMismatch {
                expected: values.nrows(),
                found: row_labels.len(),
            });
        }
        if col_labels.len() != values.ncols() {
            return Err(Error::DimensionMismatch {
                expected: values.ncols(),
                found: col_labels.len(),
            });
        }
        Ok(Self {
            values,
            row_labels,
            col_labels,
        })
    }

    /// Build a matrix from row slices, labeling both axes by index.
    ///
    /// Convenience for callers (and tests) that do not care about labels.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, |r| r.len());
        let mut flat = Vec::with_capacity(n * m);
        for row in rows {
            if row.len() != m {
                return Err(Error::DimensionMismatch {
                    expected: m,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let len = flat.len();
        let values = Array2::from_shape_vec((n, m), flat).map_err(|_| {
            Error::DimensionMismatch {
                expected: n * m,
                found: len,
            }
        })?;
        let row_labels = (0..n).map(|i| i.to_string()).collect();
        let col_labels = (0..m).map(|j| j.to_string()).collect();
        Self::new(values, row_labels, col_labels)
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// View of the underlying grid.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Row labels, in row order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column labels, in column order.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Permute rows and/or columns, labels in lockstep with their axis.
    ///
    /// `None` leaves an axis in identity order. Each supplied order must be
    /// a permutation of that axis's indices. The output holds exactly the
    /// same multiset of row and column vectors as the input, only
    /// reindexed, so
    /// `m.reorder(Some(&p), Some(&q))?.reorder(Some(&invert(&p)), Some(&invert(&q)))? == m`
    /// exactly.
    pub fn reorder(&self, rows: Option<&[usize]>, cols: Option<&[usize]>) -> Result<Self> {
        if let Some(order) = rows {
            if !is_permutation(order, self.nrows()) {
                return Err(Error::InvalidPermutation { axis: "rows" });
            }
        }
        if let Some(order) = cols {
            if !is_permutation(order, self.ncols()) {
                return Err(Error::InvalidPermutation { axis: "cols" });
            }
        }

        let mut values = self.values.clone();
        let mut row_labels = self.row_labels.clone();
        let mut col_labels = self.col_labels.clone();

        if let Some(order) = rows {
            values = values.select(Axis(0), order);
            row_labels = order.iter().map(|&i| self.row_labels[i].clone()).collect();
        }
        if let Some(order) = cols {
            values = values.select(Axis(1), order);
            col_labels = order.iter().map(|&j| self.col_labels[j].clone()).collect();
        }

        Ok(Self {
            values,
            row_labels,
            col_labels,
        })
    }
}

/// Invert a permutation: `invert(p)[p[i]] == i`.
pub fn invert(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> LabeledMatrix {
        LabeledMatrix::new(
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into(), "z".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_label_length_checked() {
        let err = LabeledMatrix::new(
            array![[1.0, 2.0], [3.0, 4.0]],
            vec!["a".into()],
            vec!["x".into(), "y".into()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_reorder_permutes_labels_in_lockstep() {
        let m = sample();
        let r = m.reorder(Some(&[1, 0]), Some(&[2, 0, 1])).unwrap();
        assert_eq!(r.row_labels(), &["b".to_string(), "a".to_string()]);
        assert_eq!(
            r.col_labels(),
            &["z".to_string(), "x".to_string(), "y".to_string()]
        );
        assert_eq!(r.values()[[0, 0]], 6.0);
        assert_eq!(r.values()[[1, 1]], 1.0);
    }

    #[test]
    fn test_reorder_identity_when_none() {
        let m = sample();
        let r = m.reorder(None, None).unwrap();
        assert_eq!(r, m);
    }

    #[test]
    fn test_reorder_round_trip() {
        let m = sample();
        let p = [1, 0];
        let q = [2, 0, 1];
        let back = m
            .reorder(Some(&p), Some(&q))
            .unwrap()
            .reorder(Some(&invert(&p)), Some(&invert(&q)))
            .unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let m = sample();
        assert_eq!(
            m.reorder(Some(&[0, 0]), None).unwrap_err(),
            Error::InvalidPermutation { axis: "rows" }
        );
        assert_eq!(
            m.reorder(None, Some(&[0, 1, 3])).unwrap_err(),
            Error::InvalidPermutation { axis: "cols" }
        );
    }

    #[test]
    fn test_invert() {
        assert_eq!(invert(&[2, 0, 1]), vec![1, 2, 0]);
        assert_eq!(invert(&[0, 1, 2]), vec![0, 1, 2]);
    }
}

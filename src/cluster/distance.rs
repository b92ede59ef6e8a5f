//! Pairwise distance computation.
//!
//! [`pdist`] builds a **condensed distance matrix**: the upper triangle of
//! the full pairwise matrix, row-major, in the canonical `i < j` order.
//! Length is N-choose-2; symmetry and the zero diagonal are implied.

use std::str::FromStr;

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Distance metric between two observation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Straight-line (L2) distance.
    Euclidean,
    /// Squared L2 distance; monotone in Euclidean but cheaper.
    SqEuclidean,
    /// City-block (L1) distance.
    Manhattan,
    /// Maximum coordinate difference (L∞).
    Chebyshev,
    /// One minus the cosine of the angle between vectors.
    Cosine,
    /// One minus the Pearson correlation coefficient.
    Correlation,
}

impl Metric {
    /// Distance between two vectors under this metric.
    pub fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        match self {
            Metric::Euclidean => sqeuclidean(a, b).sqrt(),
            Metric::SqEuclidean => sqeuclidean(a, b),
            Metric::Manhattan => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).abs())
                .sum(),
            Metric::Chebyshev => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            Metric::Cosine => cosine(a, b),
            Metric::Correlation => correlation(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Metric::Manhattan),
            "chebyshev" => Ok(Metric::Chebyshev),
            "cosine" => Ok(Metric::Cosine),
            "correlation" => Ok(Metric::Correlation),
            other => Err(Error::InvalidMetric {
                name: other.to_string(),
            }),
        }
    }
}

#[inline]
fn sqeuclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn cosine(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    let denom = na * nb;
    // Zero vectors carry no direction; treat them as coincident.
    if denom == 0.0 {
        return 0.0;
    }
    1.0 - dot / denom
}

fn correlation(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let n = a.len() as f64;
    let ma = a.sum() / n;
    let mb = b.sum() / n;
    let mut dot = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - ma;
        let dy = y - mb;
        dot += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }
    let denom = (va * vb).sqrt();
    // Constant vectors have no variance to correlate.
    if denom == 0.0 {
        return 0.0;
    }
    1.0 - dot / denom
}

/// Condensed pairwise distance matrix for `n` observations.
///
/// Flat sequence of length `n(n-1)/2` in canonical `i < j` enumeration
/// order. Created fresh per pipeline run and consumed by
/// [`linkage`](crate::cluster::linkage); never cached across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedDistance {
    values: Vec<f64>,
    n: usize,
}

impl CondensedDistance {
    /// Number of original observations.
    pub fn n_observations(&self) -> usize {
        self.n
    }

    /// The flat `i < j` distance sequence.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stored pairs, `n(n-1)/2`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

/// Pairwise distances between the rows of `data` under `metric`.
///
/// Pure function; fails with [`Error::TooFewObservations`] for fewer than
/// two rows.
pub fn pdist(data: ArrayView2<'_, f64>, metric: Metric) -> Result<CondensedDistance> {
    let n = data.nrows();
    if n < 2 {
        return Err(Error::TooFewObservations {
            axis: "observations",
            found: n,
        });
    }

    let mut values = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..(n - 1) {
        for j in (i + 1)..n {
            values.push(metric.distance(data.row(i), data.row(j)));
        }
    }

    Ok(CondensedDistance { values, n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pdist_euclidean() {
        let data = array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];
        let d = pdist(data.view(), Metric::Euclidean).unwrap();
        assert_eq!(d.n_observations(), 3);
        assert_eq!(d.len(), 3);
        // pairs in (0,1), (0,2), (1,2) order
        assert!((d.values()[0] - 5.0).abs() < 1e-10);
        assert!((d.values()[1] - 1.0).abs() < 1e-10);
        assert!((d.values()[2] - (9.0f64 + 9.0).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_pdist_manhattan_and_chebyshev() {
        let data = array![[0.0, 0.0], [3.0, -4.0]];
        let l1 = pdist(data.view(), Metric::Manhattan).unwrap();
        assert!((l1.values()[0] - 7.0).abs() < 1e-10);
        let linf = pdist(data.view(), Metric::Chebyshev).unwrap();
        assert!((linf.values()[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal_and_parallel() {
        let data = array![[1.0, 0.0], [0.0, 2.0], [3.0, 0.0]];
        let d = pdist(data.view(), Metric::Cosine).unwrap();
        assert!((d.values()[0] - 1.0).abs() < 1e-10); // orthogonal
        assert!(d.values()[1].abs() < 1e-10); // parallel
    }

    #[test]
    fn test_correlation_perfectly_anticorrelated() {
        let data = array![[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]];
        let d = pdist(data.view(), Metric::Correlation).unwrap();
        assert!((d.values()[0] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_too_few_observations() {
        let data = array![[1.0, 2.0]];
        let err = pdist(data.view(), Metric::Euclidean).unwrap_err();
        assert_eq!(
            err,
            Error::TooFewObservations {
                axis: "observations",
                found: 1
            }
        );
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("cityblock".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert_eq!("Cosine".parse::<Metric>().unwrap(), Metric::Cosine);
        assert_eq!(
            "mahalanobis".parse::<Metric>().unwrap_err(),
            Error::InvalidMetric {
                name: "mahalanobis".to_string()
            }
        );
    }
}

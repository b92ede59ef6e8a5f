//! Agglomerative linkage: condensed distances to a merge tree.
//!
//! Bottom-up clustering that starts with every observation in its own
//! cluster and repeatedly merges the closest pair until one remains,
//! recording `n-1` merges. The **linkage method** defines inter-cluster
//! distance after a merge:
//!
//! | Method | Inter-cluster distance |
//! |----------|----------------------------------------------|
//! | Single | min over cross-cluster member pairs |
//! | Complete | max over cross-cluster member pairs |
//! | Average | mean over cross-cluster member pairs |
//! | Weighted | mean of the two merged clusters' distances |
//! | Ward | within-cluster variance increase |
//! | Centroid | distance between cluster centroids |
//! | Median | distance between weighted cluster medians |
//!
//! The heavy lifting is done by kodama (BurntSushi), which implements the
//! Lance-Williams update rules for all seven methods; the steps are then
//! converted into our own [`MergeTree`] arena.
//!
//! Ward, centroid, and median linkage are only statistically meaningful
//! over Euclidean-derived distances. That precondition is **not enforced**
//! here; pairing them with another metric is the caller's responsibility,
//! matching the reference tools this mirrors.

use std::str::FromStr;

use kodama::{linkage as kodama_linkage, Method as KodamaMethod};

use super::distance::CondensedDistance;
use crate::error::{Error, Result};

/// Linkage method for agglomerative clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageMethod {
    /// Minimum distance between clusters. Chains; elongated clusters.
    Single,
    /// Maximum distance between clusters. Compact clusters.
    Complete,
    /// Mean distance over all cross-cluster pairs.
    Average,
    /// Mean of the merged clusters' distances (WPGMA).
    Weighted,
    /// Minimize within-cluster variance. Euclidean precondition.
    Ward,
    /// Distance between centroids. Euclidean precondition.
    Centroid,
    /// Distance between weighted medians. Euclidean precondition.
    Median,
}

impl LinkageMethod {
    fn to_kodama(self) -> KodamaMethod {
        match self {
            LinkageMethod::Single => KodamaMethod::Single,
            LinkageMethod::Complete => KodamaMethod::Complete,
            LinkageMethod::Average => KodamaMethod::Average,
            LinkageMethod::Weighted => KodamaMethod::Weighted,
            LinkageMethod::Ward => KodamaMethod::Ward,
            LinkageMethod::Centroid => KodamaMethod::Centroid,
            LinkageMethod::Median => KodamaMethod::Median,
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(LinkageMethod::Single),
            "complete" => Ok(LinkageMethod::Complete),
            "average" => Ok(LinkageMethod::Average),
            "weighted" => Ok(LinkageMethod::Weighted),
            "ward" => Ok(LinkageMethod::Ward),
            "centroid" => Ok(LinkageMethod::Centroid),
            "median" => Ok(LinkageMethod::Median),
            other => Err(Error::InvalidLinkage {
                name: other.to_string(),
            }),
        }
    }
}

/// A single merge in the tree.
///
/// `left` and `right` use SciPy/MATLAB-style ids: `0..n-1` are original
/// observations, and merge `i` creates node `n + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Left child id.
    pub left: usize,
    /// Right child id.
    pub right: usize,
    /// Dissimilarity at which the merge occurred.
    pub distance: f64,
    /// Number of original observations under the new node.
    pub size: usize,
}

/// Merge history of an agglomerative clustering run over `n` observations.
///
/// Exactly `n - 1` merges forming a single binary tree; the final merge's
/// `size` equals `n`. Immutable once produced, created fresh per pipeline
/// run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree {
    merges: Vec<Merge>,
    n_items: usize,
}

impl MergeTree {
    /// Create an empty tree over `n_items` observations.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge.
    pub fn add_merge(&mut self, left: usize, right: usize, distance: f64, size: usize) {
        self.merges.push(Merge {
            left,
            right,
            distance,
            size,
        });
    }

    /// Number of original observations.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// The merge arena, in creation order.
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Id of the root node, `2n - 2`.
    pub fn root(&self) -> usize {
        2 * self.n_items - 2
    }

    /// Merge distances, in creation order.
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }
}

/// Run agglomerative clustering over a condensed distance matrix.
///
/// Consumes the distances (kodama reuses the buffer as scratch space;
/// they are discarded after use regardless). Fails with
/// [`Error::TooFewObservations`] when `n < 2`.
pub fn linkage(mut dist: CondensedDistance, method: LinkageMethod) -> Result<MergeTree> {
    let n = dist.n_observations();
    if n < 2 {
        return Err(Error::TooFewObservations {
            axis: "observations",
            found: n,
        });
    }

    let dend = kodama_linkage(dist.values_mut(), n, method.to_kodama());

    let mut tree = MergeTree::new(n);
    for step in dend.steps() {
        tree.add_merge(step.cluster1, step.cluster2, step.dissimilarity, step.size);
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::distance::{pdist, Metric};
    use ndarray::array;

    #[test]
    fn test_linkage_merge_count_and_final_size() {
        let data = array![
            [0.0, 0.0],
            [0.1, 0.1],
            [10.0, 10.0],
            [10.1, 10.1],
            [5.0, 5.0]
        ];
        let d = pdist(data.view(), Metric::Euclidean).unwrap();
        let tree = linkage(d, LinkageMethod::Average).unwrap();
        assert_eq!(tree.n_items(), 5);
        assert_eq!(tree.n_merges(), 4);
        assert_eq!(tree.merges().last().unwrap().size, 5);
        assert_eq!(tree.root(), 8);
    }

    #[test]
    fn test_linkage_merges_closest_pair_first() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [10.0, 0.0]];
        let d = pdist(data.view(), Metric::Euclidean).unwrap();
        let tree = linkage(d, LinkageMethod::Single).unwrap();
        let first = tree.merges()[0];
        assert_eq!((first.left, first.right), (0, 1));
        assert!((first.distance - 1.0).abs() < 1e-10);
        assert_eq!(first.size, 2);
    }

    #[test]
    fn test_linkage_distances_monotone_for_average() {
        let data = array![[0.0], [1.0], [3.0], [7.0], [20.0]];
        let d = pdist(data.view(), Metric::Euclidean).unwrap();
        let tree = linkage(d, LinkageMethod::Average).unwrap();
        let heights = tree.distances();
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_linkage_method_from_str() {
        assert_eq!("ward".parse::<LinkageMethod>().unwrap(), LinkageMethod::Ward);
        assert_eq!(
            "AVERAGE".parse::<LinkageMethod>().unwrap(),
            LinkageMethod::Average
        );
        assert_eq!(
            "flexible".parse::<LinkageMethod>().unwrap_err(),
            Error::InvalidLinkage {
                name: "flexible".to_string()
            }
        );
    }
}

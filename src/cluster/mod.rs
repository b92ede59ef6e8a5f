//! Agglomerative clustering of matrix axes for display ordering.
//!
//! One axis runs through three stages, each feeding the next:
//!
//! 1. [`pdist`] — pairwise distances between observation vectors under a
//!    selectable [`Metric`], stored condensed (length N-choose-2).
//! 2. [`linkage`] — bottom-up merging of the closest clusters under a
//!    selectable [`LinkageMethod`], producing a [`MergeTree`] of `n-1`
//!    merge records.
//! 3. [`LeafOrder`] — a stack-based walk of the tree yielding the
//!    crossing-free left-to-right leaf arrangement, plus a color per
//!    branch for the dendrogram.
//!
//! The stages are pure: nothing is cached across runs, and identical
//! inputs always produce identical trees and orders.
//!
//! ```rust
//! use clustergram::cluster::{linkage, pdist, LeafOrder, LinkageMethod, Metric};
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0]];
//! let dist = pdist(data.view(), Metric::Euclidean).unwrap();
//! let tree = linkage(dist, LinkageMethod::Average).unwrap();
//! let order = LeafOrder::extract(&tree);
//! // the two nearby observations end up adjacent
//! let pos = |i| order.order().iter().position(|&x| x == i).unwrap();
//! assert_eq!(pos(0).abs_diff(pos(1)), 1);
//! ```

mod distance;
mod linkage;
mod order;

pub use distance::{pdist, CondensedDistance, Metric};
pub use linkage::{linkage, LinkageMethod, Merge, MergeTree};
pub use order::LeafOrder;

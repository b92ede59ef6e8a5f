//! # clustergram
//!
//! Hierarchical-clustering matrix reordering and heatmap layout: given a
//! labeled numeric matrix, independently order rows and/or columns by
//! **agglomerative clustering**, permute the matrix to that order, and
//! derive the colormap family, normalization, and colorbar anchors from
//! the data's sign distribution.
//!
//! Drawing itself lives behind the [`Canvas`] trait; this crate computes
//! what to draw and in what order. The orchestrator returns the row and
//! column permutations so they can be reused on companion data.
//!
//! ```rust
//! use clustergram::{ClusterGram, LabeledMatrix, LinkageMethod, Metric, NullCanvas};
//!
//! let m = LabeledMatrix::from_rows(&[
//!     vec![0.0, 0.1],
//!     vec![9.0, 9.2],
//!     vec![0.2, 0.0],
//! ]).unwrap();
//!
//! let (row_order, _col_order) = ClusterGram::new()
//!     .with_metric(Metric::Euclidean)
//!     .with_linkage(LinkageMethod::Average)
//!     .with_cluster_cols(false)
//!     .run(&m, &mut NullCanvas)
//!     .unwrap();
//!
//! // rows 0 and 2 are near-identical, so they end up adjacent
//! let pos = |i| row_order.iter().position(|&x| x == i).unwrap();
//! assert_eq!(pos(0).abs_diff(pos(2)), 1);
//! ```

pub mod cluster;
pub mod color;
/// Error types used across `clustergram`.
pub mod error;
pub mod matrix;
mod pipeline;
pub mod render;


pub use cluster::{linkage, pdist, CondensedDistance, LeafOrder, LinkageMethod, Merge, MergeTree, Metric};
pub use color::{Color, ColorPolicy, ColormapFamily, Normalization, ALMOST_BLACK, HIGHLIGHT};
pub use error::{Error, Result};
pub use matrix::{invert, LabeledMatrix};
pub use pipeline::{BranchColorFn, ClusterGram, LabelColorFn};
pub use render::{Canvas, NullCanvas, Orientation};

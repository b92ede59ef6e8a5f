//! The clustered-heatmap orchestrator.
//!
//! [`ClusterGram`] validates its configuration, runs the row and column
//! clustering pipelines, permutes the matrix to the extracted leaf
//! orders, derives the [`ColorPolicy`] from the original data, and hands
//! everything to a [`Canvas`]. The two axis pipelines read only the
//! immutable input matrix and write disjoint outputs, so they run on
//! separate threads under the `parallel` feature.

use std::path::PathBuf;

use ndarray::ArrayView2;

use crate::cluster::{linkage, pdist, LeafOrder, LinkageMethod, MergeTree, Metric};
use crate::color::{Color, ColorPolicy, ALMOST_BLACK};
use crate::error::{Error, Result};
use crate::matrix::LabeledMatrix;
use crate::render::{Canvas, Orientation};

/// Maps a label's text to its display color.
pub type LabelColorFn = Box<dyn Fn(&str) -> Color + Send + Sync>;

/// Maps the observation ids under a branch to the branch's color.
pub type BranchColorFn = Box<dyn Fn(&[usize]) -> Color + Send + Sync>;

/// Hierarchical-clustering heatmap layout engine.
///
/// Orders the rows and/or columns of a matrix by agglomerative
/// clustering, permutes the matrix to that order, and drives a renderer.
/// Returns the two orderings so a caller can apply them to companion
/// data.
///
/// ```rust
/// use clustergram::{ClusterGram, LabeledMatrix, NullCanvas};
///
/// let m = LabeledMatrix::from_rows(&[
///     vec![1.0, 2.0],
///     vec![3.0, 4.0],
///     vec![5.0, 6.0],
/// ]).unwrap();
///
/// let (row_order, col_order) = ClusterGram::new()
///     .with_cluster_cols(false)
///     .run(&m, &mut NullCanvas)
///     .unwrap();
///
/// assert_eq!(col_order, vec![0, 1]); // identity, columns not clustered
/// assert_eq!(row_order.len(), 3);
/// ```
pub struct ClusterGram {
    metric: Metric,
    linkage: LinkageMethod,
    cluster_rows: bool,
    cluster_cols: bool,
    time_series: bool,
    compute_covariance: bool,
    output: Option<PathBuf>,
    row_label_color: LabelColorFn,
    col_label_color: LabelColorFn,
    branch_color: BranchColorFn,
}

impl Default for ClusterGram {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterGram {
    /// Euclidean distance, average linkage, both axes clustered, neutral
    /// colors everywhere.
    pub fn new() -> Self {
        Self {
            metric: Metric::Euclidean,
            linkage: LinkageMethod::Average,
            cluster_rows: true,
            cluster_cols: true,
            time_series: false,
            compute_covariance: false,
            output: None,
            row_label_color: Box::new(|_| ALMOST_BLACK),
            col_label_color: Box::new(|_| ALMOST_BLACK),
            branch_color: Box::new(|_| ALMOST_BLACK),
        }
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the linkage method.
    pub fn with_linkage(mut self, linkage: LinkageMethod) -> Self {
        self.linkage = linkage;
        self
    }

    /// Cluster rows (default `true`). Disabled means identity row order.
    pub fn with_cluster_rows(mut self, yes: bool) -> Self {
        self.cluster_rows = yes;
        self
    }

    /// Cluster columns (default `true`). Disabled means identity column order.
    pub fn with_cluster_cols(mut self, yes: bool) -> Self {
        self.cluster_cols = yes;
        self
    }

    /// Treat the data as a time series: normalize colors symmetric about
    /// zero so the scale midpoint maps to zero.
    pub fn with_time_series(mut self, yes: bool) -> Self {
        self.time_series = yes;
        self
    }

    /// Request covariance computation. Requires column clustering.
    pub fn with_compute_covariance(mut self, yes: bool) -> Self {
        self.compute_covariance = yes;
        self
    }

    /// Persist the composed figure to `path` after drawing.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Color row labels through `f` (default: constant [`ALMOST_BLACK`]).
    pub fn with_row_label_color<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Color + Send + Sync + 'static,
    {
        self.row_label_color = Box::new(f);
        self
    }

    /// Color column labels through `f` (default: constant [`ALMOST_BLACK`]).
    pub fn with_col_label_color<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Color + Send + Sync + 'static,
    {
        self.col_label_color = Box::new(f);
        self
    }

    /// Color dendrogram branches through `f`, which receives the
    /// observation ids under each branch (default: constant
    /// [`ALMOST_BLACK`]).
    pub fn with_branch_color<F>(mut self, f: F) -> Self
    where
        F: Fn(&[usize]) -> Color + Send + Sync + 'static,
    {
        self.branch_color = Box::new(f);
        self
    }

    /// Cluster, reorder, select colors, and draw.
    ///
    /// Returns `(row_order, col_order)`; an unclustered axis reports the
    /// identity order. All validation and computation happens before the
    /// first canvas call, so a failure never leaves partial output.
    pub fn run(
        &self,
        matrix: &LabeledMatrix,
        canvas: &mut dyn Canvas,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        // Fires purely on cluster_cols, independent of cluster_rows.
        if self.compute_covariance && !self.cluster_cols {
            return Err(Error::InvalidConfig {
                message: "compute_covariance requires cluster_cols",
            });
        }

        let values = matrix.values();
        let (rows, cols) = self.run_axis_pipelines(values)?;

        let row_order: Vec<usize> = match &rows {
            Some((_, order)) => order.order().to_vec(),
            None => (0..matrix.nrows()).collect(),
        };
        let col_order: Vec<usize> = match &cols {
            Some((_, order)) => order.order().to_vec(),
            None => (0..matrix.ncols()).collect(),
        };

        let reordered = matrix.reorder(
            rows.as_ref().map(|_| row_order.as_slice()),
            cols.as_ref().map(|_| col_order.as_slice()),
        )?;
        // Aggregates come from the original matrix; reordering would not
        // change them anyway.
        let policy = ColorPolicy::select(matrix, self.time_series)?;

        if let Some((tree, order)) = &rows {
            let labels = tinted_labels(matrix.row_labels(), order, &self.row_label_color);
            canvas.draw_dendrogram(Orientation::Rows, tree, &labels, order.branch_colors())?;
        }
        if let Some((tree, order)) = &cols {
            let labels = tinted_labels(matrix.col_labels(), order, &self.col_label_color);
            canvas.draw_dendrogram(Orientation::Cols, tree, &labels, order.branch_colors())?;
        }
        canvas.draw_heatmap(&reordered, &policy)?;
        canvas.draw_colorbar(policy.ticks)?;
        if let Some(path) = &self.output {
            canvas.save(path)?;
        }

        Ok((row_order, col_order))
    }

    #[cfg(feature = "parallel")]
    fn run_axis_pipelines(&self, values: ArrayView2<'_, f64>) -> Result<AxisOutputs> {
        let (rows, cols) = rayon::join(
            || self.axis_pipeline(values, "rows", self.cluster_rows),
            || self.axis_pipeline(values.t(), "cols", self.cluster_cols),
        );
        Ok((rows?, cols?))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_axis_pipelines(&self, values: ArrayView2<'_, f64>) -> Result<AxisOutputs> {
        let rows = self.axis_pipeline(values, "rows", self.cluster_rows)?;
        let cols = self.axis_pipeline(values.t(), "cols", self.cluster_cols)?;
        Ok((rows, cols))
    }

    /// One axis: distances, linkage, leaf order. `data`'s rows are the
    /// observations being ordered.
    fn axis_pipeline(
        &self,
        data: ArrayView2<'_, f64>,
        axis: &'static str,
        enabled: bool,
    ) -> Result<Option<(MergeTree, LeafOrder)>> {
        if !enabled {
            return Ok(None);
        }
        let n = data.nrows();
        if n < 2 {
            return Err(Error::TooFewObservations { axis, found: n });
        }
        let dist = pdist(data, self.metric)?;
        let tree = linkage(dist, self.linkage)?;
        let order = LeafOrder::extract_with(&tree, |leaves| (self.branch_color)(leaves));
        Ok(Some((tree, order)))
    }
}

type AxisOutputs = (
    Option<(MergeTree, LeafOrder)>,
    Option<(MergeTree, LeafOrder)>,
);

fn tinted_labels(
    labels: &[String],
    order: &LeafOrder,
    color_fn: &LabelColorFn,
) -> Vec<(String, Color)> {
    order
        .order()
        .iter()
        .map(|&i| {
            let text = labels[i].clone();
            let color = color_fn(&text);
            (text, color)
        })
        .collect()
}

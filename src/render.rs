//! The rendering collaborator boundary.
//!
//! The pipeline computes orderings and a color policy; it does not paint.
//! A [`Canvas`] implementation owns the actual drawing of dendrograms,
//! heatmap cells, and the colorbar, and the persistence of the composed
//! figure. [`NullCanvas`] is the no-op implementation for callers that
//! only want the orderings back.

use std::path::Path;

use crate::cluster::MergeTree;
use crate::color::{Color, ColorPolicy};
use crate::error::Result;
use crate::matrix::LabeledMatrix;

/// Which matrix axis a dendrogram belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The row dendrogram, drawn beside the heatmap.
    Rows,
    /// The column dendrogram, drawn above the heatmap.
    Cols,
}

/// Drawing surface driven by [`ClusterGram::run`](crate::ClusterGram::run).
///
/// Calls arrive in a fixed order: one `draw_dendrogram` per clustered axis
/// (rows first), then `draw_heatmap`, then `draw_colorbar`, then `save`
/// when an output destination is configured. Implementations report
/// failures as [`Error::Render`](crate::Error::Render).
pub trait Canvas {
    /// Draw a dendrogram with its leaves along the given axis.
    ///
    /// `leaf_labels` are the axis labels in leaf order, each pre-tinted
    /// through the caller's label color hook; `branch_colors[i]` colors
    /// the branch created by merge `i`.
    fn draw_dendrogram(
        &mut self,
        orientation: Orientation,
        tree: &MergeTree,
        leaf_labels: &[(String, Color)],
        branch_colors: &[Color],
    ) -> Result<()>;

    /// Draw the heatmap of an already permuted matrix under `policy`.
    fn draw_heatmap(&mut self, matrix: &LabeledMatrix, policy: &ColorPolicy) -> Result<()>;

    /// Draw the colorbar anchored at the three tick values.
    fn draw_colorbar(&mut self, ticks: [f64; 3]) -> Result<()>;

    /// Persist the composed figure.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// A canvas that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw_dendrogram(
        &mut self,
        _orientation: Orientation,
        _tree: &MergeTree,
        _leaf_labels: &[(String, Color)],
        _branch_colors: &[Color],
    ) -> Result<()> {
        Ok(())
    }

    fn draw_heatmap(&mut self, _matrix: &LabeledMatrix, _policy: &ColorPolicy) -> Result<()> {
        Ok(())
    }

    fn draw_colorbar(&mut self, _ticks: [f64; 3]) -> Result<()> {
        Ok(())
    }

    fn save(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

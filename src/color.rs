//! Color tokens and the data-driven color policy.
//!
//! The policy reads the matrix's value distribution once, before any
//! reordering, and decides three things for the renderer:
//!
//! - **Colormap family** — single-signed data gets a [`Sequential`] scale;
//!   data spanning both signs gets a [`Diverging`] scale, whose neutral
//!   midpoint then marks a meaningful zero-crossing.
//! - **Normalization** — time-series data is normalized symmetric about
//!   zero so the scale midpoint maps to zero; otherwise the natural data
//!   range is used.
//! - **Colorbar ticks** — exactly `[min, mean, max]` of the matrix.
//!   Reordering permutes entries without changing these aggregates.
//!
//! [`Sequential`]: ColormapFamily::Sequential
//! [`Diverging`]: ColormapFamily::Diverging

use crate::error::{Error, Result};
use crate::matrix::LabeledMatrix;

/// An RGB color token handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Build a color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Near-black (`#262626`) used by default for labels and branches.
/// Softer than pure black against dense figures.
pub const ALMOST_BLACK: Color = Color::rgb(0x26, 0x26, 0x26);

/// ColorBrewer Set1 blue (`#377eb8`) for highlighted labels or branches.
pub const HIGHLIGHT: Color = Color::rgb(0x37, 0x7e, 0xb8);

/// Which colormap family the heatmap should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapFamily {
    /// Single-hue scale for one-signed data.
    Sequential,
    /// Two-hue scale centered at a neutral midpoint for signed data.
    Diverging,
}

/// How heatmap values map onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Symmetric about zero; the scale midpoint maps to zero.
    SymmetricAboutZero {
        /// Half-width of the scale, the maximum absolute value in the data.
        bound: f64,
    },
    /// The natural data range, no fixed center.
    NaturalRange {
        /// Smallest value in the data.
        min: f64,
        /// Largest value in the data.
        max: f64,
    },
}

/// Rendering parameters derived from a matrix's value distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPolicy {
    /// Colormap family.
    pub family: ColormapFamily,
    /// Value-to-color normalization.
    pub normalization: Normalization,
    /// Colorbar anchor values: `[min, mean, max]` of the pre-reorder matrix.
    pub ticks: [f64; 3],
}

impl ColorPolicy {
    /// Derive the policy from `matrix`'s values.
    ///
    /// Fails with [`Error::EmptyMatrix`] when the matrix has no elements.
    pub fn select(matrix: &LabeledMatrix, time_series: bool) -> Result<Self> {
        let values = matrix.values();
        let count = values.len();
        if count == 0 {
            return Err(Error::EmptyMatrix);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values.iter() {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = sum / count as f64;

        // Diverging needs both signs present; single-signed data has no
        // zero-crossing for the neutral midpoint to mark.
        let family = if min < 0.0 && max > 0.0 {
            ColormapFamily::Diverging
        } else {
            ColormapFamily::Sequential
        };

        let normalization = if time_series {
            Normalization::SymmetricAboutZero {
                bound: min.abs().max(max.abs()),
            }
        } else {
            Normalization::NaturalRange { min, max }
        };

        Ok(Self {
            family,
            normalization,
            ticks: [min, mean, max],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[Vec<f64>]) -> LabeledMatrix {
        LabeledMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_all_nonnegative_is_sequential() {
        let m = matrix(&[vec![0.0, 1.0], vec![2.0, 3.0]]);
        let policy = ColorPolicy::select(&m, false).unwrap();
        assert_eq!(policy.family, ColormapFamily::Sequential);
    }

    #[test]
    fn test_all_nonpositive_is_sequential() {
        let m = matrix(&[vec![-1.0, -2.0], vec![-3.0, 0.0]]);
        let policy = ColorPolicy::select(&m, false).unwrap();
        assert_eq!(policy.family, ColormapFamily::Sequential);
    }

    #[test]
    fn test_mixed_sign_is_diverging() {
        let m = matrix(&[vec![-1.0, 2.0], vec![1.0, -2.0]]);
        let policy = ColorPolicy::select(&m, false).unwrap();
        assert_eq!(policy.family, ColormapFamily::Diverging);
        assert_eq!(policy.ticks, [-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_time_series_normalizes_symmetric_about_zero() {
        let m = matrix(&[vec![-1.0, 2.0], vec![3.0, -5.0]]);
        let policy = ColorPolicy::select(&m, true).unwrap();
        assert_eq!(
            policy.normalization,
            Normalization::SymmetricAboutZero { bound: 5.0 }
        );
    }

    #[test]
    fn test_natural_range_by_default() {
        let m = matrix(&[vec![2.0, 4.0], vec![6.0, 8.0]]);
        let policy = ColorPolicy::select(&m, false).unwrap();
        assert_eq!(
            policy.normalization,
            Normalization::NaturalRange { min: 2.0, max: 8.0 }
        );
        assert_eq!(policy.ticks, [2.0, 5.0, 8.0]);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let m = matrix(&[]);
        assert_eq!(ColorPolicy::select(&m, false).unwrap_err(), Error::EmptyMatrix);
    }
}

use core::fmt;

/// Result alias for `clustergram`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering and layout pipeline.
///
/// Every failure is synchronous and aborts the whole call before any
/// rendering happens; the pipeline never produces partial output. The
/// computation is deterministic, so retrying with unchanged input cannot
/// succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid flag combination on the orchestrator.
    InvalidConfig {
        /// What was wrong with the configuration.
        message: &'static str,
    },

    /// Unrecognized distance metric name.
    InvalidMetric {
        /// The name that failed to parse.
        name: String,
    },

    /// Unrecognized linkage method name.
    InvalidLinkage {
        /// The name that failed to parse.
        name: String,
    },

    /// An axis requested for clustering has fewer than two observations.
    TooFewObservations {
        /// Which axis ("rows", "cols", or "observations").
        axis: &'static str,
        /// Number of observations found.
        found: usize,
    },

    /// A label sequence length does not match its matrix dimension.
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// A reorder sequence is not a permutation of its axis indices.
    InvalidPermutation {
        /// Which axis the bad sequence was supplied for.
        axis: &'static str,
    },

    /// The matrix has zero elements.
    EmptyMatrix,

    /// The rendering collaborator failed.
    Render {
        /// Message propagated from the renderer.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { message } => write!(f, "invalid configuration: {message}"),
            Error::InvalidMetric { name } => write!(f, "unknown distance metric '{name}'"),
            Error::InvalidLinkage { name } => write!(f, "unknown linkage method '{name}'"),
            Error::TooFewObservations { axis, found } => {
                write!(
                    f,
                    "cannot cluster {axis}: need at least 2 observations, found {found}"
                )
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidPermutation { axis } => {
                write!(
                    f,
                    "reorder sequence for {axis} is not a permutation of the axis indices"
                )
            }
            Error::EmptyMatrix => write!(f, "matrix has no elements"),
            Error::Render { message } => write!(f, "rendering failed: {message}"),
        }
    }
}

impl std::error::Error for Error {}

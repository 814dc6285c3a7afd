//! Error types for rustcoloc-core.

use thiserror::Error;

/// Result type alias for colocalization operations.
pub type Result<T> = std::result::Result<T, ColocalizationError>;

/// Errors raised by criterion and colocalizer construction or cancellation.
///
/// All configuration problems are detected eagerly when the offending value
/// is supplied; analysis over well-formed inputs never fails on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColocalizationError {
    /// Overlap ratio threshold outside `[0, 1]` or not a number.
    #[error("overlap threshold must be in [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Centroid distance bound is negative or non-finite.
    #[error("maximum centroid distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),

    /// Grid parameters collapse to a zero-sized bucket grid.
    #[error("degenerate bucket grid: bucket_side {bucket_side} over {width}x{height} image")]
    DegenerateGrid {
        /// Requested bucket edge length in pixels.
        bucket_side: usize,
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// Bucket edge shorter than the criterion's reach, so 3x3 neighborhood
    /// pruning could miss legal matches.
    #[error("bucket side {bucket_side} is smaller than the criterion's maximum overlap distance {max_distance}")]
    BucketSideTooSmall {
        /// Effective (clamped) bucket edge length in pixels.
        bucket_side: usize,
        /// Largest centroid distance at which the criterion can fire.
        max_distance: f64,
    },

    /// Cooperative cancellation was requested; no partial result exists.
    #[error("colocalization analysis cancelled")]
    Cancelled,
}

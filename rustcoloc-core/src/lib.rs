//! rustcoloc-core: Core types for colocalization analysis.
//!
//! This crate provides the value types shared by the colocalization
//! algorithms: segmented cell regions, the pluggable overlap criteria,
//! the analysis result, and the error type.
//!
#![warn(missing_docs)]

pub mod criteria;
pub mod error;
pub mod region;
pub mod result;

pub use criteria::{DistanceCriterion, OverlapCriterion, RatioCriterion, SubsetCriterion};
pub use error::{ColocalizationError, Result};
pub use region::{CellRegion, Centroid, PixelCoord};
pub use result::ColocalizationResult;

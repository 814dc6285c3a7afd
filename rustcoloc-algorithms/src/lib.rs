//! rustcoloc-algorithms: Colocalization algorithms for segmented cell regions.
//!
//! Two interchangeable colocalizers:
//! - **Reference** - brute-force pairwise comparison, the semantic ground truth
//! - **Bucketed** - grid-indexed candidate pruning with a rayon-parallel
//!   query phase, same observable contract
//!
#![warn(missing_docs)]

mod bucketed;
mod reference;
pub mod spatial;

pub use bucketed::{BucketedColocalizer, BucketedConfig};
pub use reference::ReferenceColocalizer;
pub use spatial::BucketGrid;

// Re-export core types so algorithm consumers need only one import root.
pub use rustcoloc_core::criteria::{
    DistanceCriterion, OverlapCriterion, RatioCriterion, SubsetCriterion,
};
pub use rustcoloc_core::error::{ColocalizationError, Result};
pub use rustcoloc_core::region::{CellRegion, Centroid, PixelCoord};
pub use rustcoloc_core::result::ColocalizationResult;

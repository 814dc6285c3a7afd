//! Colocalization result type.

use crate::region::CellRegion;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one colocalization analysis.
///
/// `matched_overlaid` and `unmatched_overlaid` are disjoint and together
/// contain every overlaid input region exactly once, both preserving the
/// overlaid input order. `matched_base` holds each base region that matched
/// at least one overlaid region, deduplicated, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColocalizationResult {
    /// Base regions that matched at least one overlaid region.
    pub matched_base: Vec<CellRegion>,
    /// Overlaid regions that matched at least one base region.
    pub matched_overlaid: Vec<CellRegion>,
    /// Overlaid regions with no base match.
    pub unmatched_overlaid: Vec<CellRegion>,
}

impl ColocalizationResult {
    /// Total number of overlaid regions covered by this result.
    pub fn overlaid_count(&self) -> usize {
        self.matched_overlaid.len() + self.unmatched_overlaid.len()
    }

    /// Returns true if all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.matched_base.is_empty()
            && self.matched_overlaid.is_empty()
            && self.unmatched_overlaid.is_empty()
    }

    /// Fraction of overlaid regions that found a base match.
    ///
    /// This is the efficiency statistic downstream reports are built on,
    /// e.g. the fraction of transduced cells among all detected cells.
    /// Returns 0.0 when there were no overlaid regions.
    pub fn overlaid_match_fraction(&self) -> f64 {
        let total = self.overlaid_count();
        if total == 0 {
            return 0.0;
        }
        self.matched_overlaid.len() as f64 / total as f64
    }
}

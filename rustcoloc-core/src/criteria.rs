//! Overlap criteria: pluggable pairwise predicates over cell regions.
//!
//! A colocalizer decides *which* region pairs to look at; a criterion
//! decides whether a given pair overlaps. The three variants cover the
//! common measurement styles: Jaccard ratio, containment of the smaller
//! region, and centroid distance.

use crate::error::{ColocalizationError, Result};
use crate::region::CellRegion;

/// Pairwise overlap predicate over two cell regions.
///
/// Implementations are pure and deterministic. All shipped criteria are
/// symmetric in their arguments.
pub trait OverlapCriterion: Send + Sync {
    /// Returns true if the two regions overlap under this criterion.
    fn overlaps(&self, a: &CellRegion, b: &CellRegion) -> bool;

    /// Criterion name for diagnostics.
    fn name(&self) -> &'static str;

    /// Largest centroid-to-centroid distance at which this criterion can
    /// still fire, when the criterion itself bounds it.
    ///
    /// Spatial accelerators use this to validate that their candidate
    /// pruning radius cannot miss a legal match. `None` means the reach is
    /// governed by region extent, which only the caller knows.
    fn max_overlap_distance(&self) -> Option<f64> {
        None
    }
}

fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_nan() || !(0.0..=1.0).contains(&threshold) {
        return Err(ColocalizationError::InvalidThreshold(threshold));
    }
    Ok(threshold)
}

/// Jaccard-style ratio criterion: `|A ∩ B| / |A ∪ B| > threshold`.
///
/// The threshold lives in `[0, 1]`; at exactly 1.0 the criterion never
/// fires since the ratio tops out at 1.0 and the comparison is strict.
/// Two empty regions have an empty union and never overlap.
#[derive(Debug, Clone, Copy)]
pub struct RatioCriterion {
    threshold: f64,
}

impl RatioCriterion {
    /// Creates a ratio criterion, rejecting thresholds outside `[0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl OverlapCriterion for RatioCriterion {
    fn overlaps(&self, a: &CellRegion, b: &CellRegion) -> bool {
        let union = a.union_count(b);
        if union == 0 {
            return false;
        }
        let intersection = a.intersection_count(b);
        intersection as f64 / union as f64 > self.threshold
    }

    fn name(&self) -> &'static str {
        "ratio"
    }
}

/// Containment criterion: `|A ∩ B| / |larger| > threshold`.
///
/// The original formulation expected the smaller region first and the
/// larger second, enforced by convention only. Here the larger operand is
/// picked internally, which makes the criterion symmetric and immune to
/// argument-order mistakes.
#[derive(Debug, Clone, Copy)]
pub struct SubsetCriterion {
    threshold: f64,
}

impl SubsetCriterion {
    /// Creates a subset criterion, rejecting thresholds outside `[0, 1]`.
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl OverlapCriterion for SubsetCriterion {
    fn overlaps(&self, a: &CellRegion, b: &CellRegion) -> bool {
        let larger = a.len().max(b.len());
        if larger == 0 {
            return false;
        }
        let intersection = a.intersection_count(b);
        intersection as f64 / larger as f64 > self.threshold
    }

    fn name(&self) -> &'static str {
        "subset"
    }
}

/// Centroid distance criterion: fires when the Euclidean distance between
/// the two centroids is at most `max_distance`.
///
/// A region without a centroid (empty) never overlaps anything.
#[derive(Debug, Clone, Copy)]
pub struct DistanceCriterion {
    max_distance: f64,
}

impl DistanceCriterion {
    /// Creates a distance criterion, rejecting negative or non-finite bounds.
    pub fn new(max_distance: f64) -> Result<Self> {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(ColocalizationError::InvalidDistance(max_distance));
        }
        Ok(Self { max_distance })
    }

    /// Configured distance bound.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}

impl OverlapCriterion for DistanceCriterion {
    fn overlaps(&self, a: &CellRegion, b: &CellRegion) -> bool {
        match (a.centroid(), b.centroid()) {
            (Some(ca), Some(cb)) => ca.distance(&cb) <= self.max_distance,
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        "distance"
    }

    fn max_overlap_distance(&self) -> Option<f64> {
        Some(self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: i32, y0: i32, side: i32) -> CellRegion {
        (x0..x0 + side)
            .flat_map(|x| (y0..y0 + side).map(move |y| (x, y)))
            .collect()
    }

    #[test]
    fn test_ratio_worked_example() {
        // |A ∩ B| = 1, |A ∪ B| = 7, ratio ≈ 0.143.
        let a = square(0, 0, 2);
        let b = square(1, 1, 2);
        assert!(RatioCriterion::new(0.1).unwrap().overlaps(&a, &b));
        assert!(!RatioCriterion::new(0.2).unwrap().overlaps(&a, &b));
    }

    #[test]
    fn test_ratio_identical_regions() {
        let a = square(3, 3, 4);
        for t in [0.0, 0.5, 0.99] {
            assert!(RatioCriterion::new(t).unwrap().overlaps(&a, &a));
        }
        // Ratio is exactly 1.0, never strictly greater.
        assert!(!RatioCriterion::new(1.0).unwrap().overlaps(&a, &a));
    }

    #[test]
    fn test_ratio_empty_union_is_false() {
        let empty = CellRegion::default();
        assert!(!RatioCriterion::new(0.0).unwrap().overlaps(&empty, &empty));
    }

    #[test]
    fn test_ratio_threshold_validation() {
        assert!(RatioCriterion::new(0.0).is_ok());
        assert!(RatioCriterion::new(1.0).is_ok());
        assert_eq!(
            RatioCriterion::new(-0.1).unwrap_err(),
            ColocalizationError::InvalidThreshold(-0.1)
        );
        assert!(RatioCriterion::new(1.5).is_err());
        assert!(RatioCriterion::new(f64::NAN).is_err());
    }

    #[test]
    fn test_subset_worked_example() {
        // |∩| = 1, |larger| = 4, ratio = 0.25.
        let small: CellRegion = [(0, 0)].into_iter().collect();
        let large = square(0, 0, 2);
        assert!(SubsetCriterion::new(0.2).unwrap().overlaps(&small, &large));
        assert!(!SubsetCriterion::new(0.3).unwrap().overlaps(&small, &large));
    }

    #[test]
    fn test_subset_is_argument_order_independent() {
        let small: CellRegion = [(0, 0)].into_iter().collect();
        let large = square(0, 0, 2);
        let criterion = SubsetCriterion::new(0.2).unwrap();
        assert_eq!(
            criterion.overlaps(&small, &large),
            criterion.overlaps(&large, &small)
        );
    }

    #[test]
    fn test_subset_empty_operands() {
        let empty = CellRegion::default();
        let criterion = SubsetCriterion::new(0.0).unwrap();
        assert!(!criterion.overlaps(&empty, &empty));
    }

    #[test]
    fn test_distance_criterion() {
        let a: CellRegion = [(0, 0)].into_iter().collect();
        let b: CellRegion = [(3, 4)].into_iter().collect();
        assert!(DistanceCriterion::new(5.0).unwrap().overlaps(&a, &b));
        assert!(!DistanceCriterion::new(4.9).unwrap().overlaps(&a, &b));
    }

    #[test]
    fn test_distance_empty_region_never_fires() {
        let a: CellRegion = [(0, 0)].into_iter().collect();
        let empty = CellRegion::default();
        assert!(!DistanceCriterion::new(100.0).unwrap().overlaps(&a, &empty));
    }

    #[test]
    fn test_distance_validation() {
        assert!(DistanceCriterion::new(0.0).is_ok());
        assert_eq!(
            DistanceCriterion::new(-1.0).unwrap_err(),
            ColocalizationError::InvalidDistance(-1.0)
        );
        assert!(DistanceCriterion::new(f64::INFINITY).is_err());
        assert!(DistanceCriterion::new(f64::NAN).is_err());
    }

    #[test]
    fn test_max_overlap_distance_reporting() {
        assert_eq!(RatioCriterion::new(0.5).unwrap().max_overlap_distance(), None);
        assert_eq!(
            DistanceCriterion::new(12.5).unwrap().max_overlap_distance(),
            Some(12.5)
        );
    }
}

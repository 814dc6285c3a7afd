//! Brute-force reference colocalizer.
//!
//! Compares every overlaid region against every base region. Quadratic in
//! the region counts, but it is the semantic ground truth: the bucketed
//! accelerator restricts *which* pairs are compared and defers the actual
//! overlap decision to this module.

use rustcoloc_core::criteria::OverlapCriterion;
use rustcoloc_core::region::CellRegion;
use rustcoloc_core::result::ColocalizationResult;

/// Pairwise brute-force colocalization.
#[derive(Debug, Clone)]
pub struct ReferenceColocalizer<C: OverlapCriterion> {
    criterion: C,
}

impl<C: OverlapCriterion> ReferenceColocalizer<C> {
    /// Creates a colocalizer using the given overlap criterion.
    pub fn new(criterion: C) -> Self {
        Self { criterion }
    }

    /// The configured criterion.
    pub fn criterion(&self) -> &C {
        &self.criterion
    }

    /// Categorizes every overlaid region against the base set.
    ///
    /// An overlaid region is matched when it overlaps at least one base
    /// region. Pure and total: empty inputs yield empty collections, and
    /// `analyze(&[], overlaid)` reports every overlaid region unmatched.
    ///
    /// Ordering is deterministic: matched/unmatched overlaid preserve the
    /// overlaid input order, matched base preserves first-encountered
    /// order (overlaid order outer, base order inner).
    pub fn analyze(&self, base: &[CellRegion], overlaid: &[CellRegion]) -> ColocalizationResult {
        let partials: Vec<Vec<usize>> = overlaid
            .iter()
            .map(|region| self.matching_base(region, base.iter().enumerate()))
            .collect();
        assemble_result(base, overlaid, &partials)
    }

    /// Indices of the candidate base regions that overlap `overlaid`.
    ///
    /// The single definition of "overlaps" in this crate; the bucketed
    /// colocalizer calls it with a pruned candidate set.
    pub(crate) fn matching_base<'a, I>(&self, overlaid: &CellRegion, candidates: I) -> Vec<usize>
    where
        I: IntoIterator<Item = (usize, &'a CellRegion)>,
    {
        candidates
            .into_iter()
            .filter(|(_, base)| self.criterion.overlaps(base, overlaid))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Merges per-overlaid match index lists into the final result.
///
/// `matched_indices[i]` holds the base indices matched by `overlaid[i]`.
/// Shared by the reference and bucketed colocalizers so both restore the
/// same deterministic ordering.
pub(crate) fn assemble_result(
    base: &[CellRegion],
    overlaid: &[CellRegion],
    matched_indices: &[Vec<usize>],
) -> ColocalizationResult {
    debug_assert_eq!(overlaid.len(), matched_indices.len());

    let mut base_seen = vec![false; base.len()];
    let mut matched_base = Vec::new();
    let mut matched_overlaid = Vec::new();
    let mut unmatched_overlaid = Vec::new();

    for (region, hits) in overlaid.iter().zip(matched_indices) {
        if hits.is_empty() {
            unmatched_overlaid.push(region.clone());
            continue;
        }
        matched_overlaid.push(region.clone());
        for &index in hits {
            if !base_seen[index] {
                base_seen[index] = true;
                matched_base.push(base[index].clone());
            }
        }
    }

    ColocalizationResult {
        matched_base,
        matched_overlaid,
        unmatched_overlaid,
    }
}

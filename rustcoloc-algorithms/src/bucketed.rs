//! Grid-accelerated colocalizer.
//!
//! Indexes the base regions in a [`BucketGrid`] and, for each overlaid
//! region, only evaluates the criterion against base regions found in the
//! 3x3 bucket neighborhood of the buckets the overlaid region touches.
//! Overlap semantics are delegated to [`ReferenceColocalizer`]; under the
//! bucket-size constraint checked at construction the result is identical
//! to the brute-force one.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use rustcoloc_core::criteria::OverlapCriterion;
use rustcoloc_core::error::{ColocalizationError, Result};
use rustcoloc_core::region::CellRegion;
use rustcoloc_core::result::ColocalizationResult;

use crate::reference::{assemble_result, ReferenceColocalizer};
use crate::spatial::BucketGrid;

/// Bucketed colocalizer configuration.
#[derive(Clone, Debug)]
pub struct BucketedConfig {
    /// Nominal bucket edge length in pixels. Intended to approximate a
    /// typical cell diameter; clamped to the image dimensions.
    pub bucket_side: usize,
    /// Image width in pixels.
    pub image_width: usize,
    /// Image height in pixels.
    pub image_height: usize,
    /// Whether to run the query phase on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BucketedConfig {
    fn default() -> Self {
        Self {
            bucket_side: 32,
            image_width: 512,
            image_height: 512,
            parallel: true,
        }
    }
}

/// Spatial-index accelerated colocalization.
///
/// Construction validates the grid parameters and, for criteria that bound
/// their own reach (centroid distance), that the effective bucket edge is
/// at least that reach — otherwise 3x3 neighborhood pruning could drop a
/// pair the criterion would have accepted. For extent-governed criteria
/// (ratio, subset) the caller must pick `bucket_side` at least as large as
/// the largest expected cell diameter.
#[derive(Debug)]
pub struct BucketedColocalizer<C: OverlapCriterion> {
    config: BucketedConfig,
    grid_template: BucketGrid,
    reference: ReferenceColocalizer<C>,
}

impl<C: OverlapCriterion> BucketedColocalizer<C> {
    /// Creates a bucketed colocalizer, validating grid and criterion reach.
    pub fn new(criterion: C, config: BucketedConfig) -> Result<Self> {
        let grid_template =
            BucketGrid::new(config.bucket_side, config.image_width, config.image_height)?;
        if let Some(max_distance) = criterion.max_overlap_distance() {
            if (grid_template.bucket_side() as f64) < max_distance {
                return Err(ColocalizationError::BucketSideTooSmall {
                    bucket_side: grid_template.bucket_side(),
                    max_distance,
                });
            }
        }
        Ok(Self {
            config,
            grid_template,
            reference: ReferenceColocalizer::new(criterion),
        })
    }

    /// The effective (clamped) bucket edge length in pixels.
    pub fn bucket_side(&self) -> usize {
        self.grid_template.bucket_side()
    }

    /// Disables or re-enables the parallel query phase.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Categorizes every overlaid region against the base set.
    ///
    /// Same observable contract as [`ReferenceColocalizer::analyze`],
    /// including the deterministic output ordering.
    pub fn analyze(&self, base: &[CellRegion], overlaid: &[CellRegion]) -> ColocalizationResult {
        let grid = self.build_index(base);
        let partials = self.query(base, overlaid, &grid, None);
        assemble_result(base, overlaid, &partials)
    }

    /// Like [`Self::analyze`], but checks `cancel` between overlaid
    /// regions. Once the flag is set the call returns
    /// [`ColocalizationError::Cancelled`] and discards all partial work;
    /// a half-populated result is never observable.
    pub fn analyze_with_cancel(
        &self,
        base: &[CellRegion],
        overlaid: &[CellRegion],
        cancel: &AtomicBool,
    ) -> Result<ColocalizationResult> {
        if cancel.load(Ordering::Relaxed) {
            return Err(ColocalizationError::Cancelled);
        }
        let grid = self.build_index(base);
        let partials = self.query(base, overlaid, &grid, Some(cancel));
        if cancel.load(Ordering::Relaxed) {
            return Err(ColocalizationError::Cancelled);
        }
        Ok(assemble_result(base, overlaid, &partials))
    }

    /// Index-build phase: register every base region before any query runs.
    fn build_index(&self, base: &[CellRegion]) -> BucketGrid {
        let mut grid = self.grid_template.clone();
        for (index, region) in base.iter().enumerate() {
            grid.insert(index, region);
        }
        grid
    }

    /// Query phase: per-overlaid matched base indices. Each overlaid region
    /// is independent; the grid is shared read-only, so with `parallel` the
    /// phase fans out across the rayon pool. A set cancel flag makes the
    /// remaining tasks return early with throwaway partials.
    fn query(
        &self,
        base: &[CellRegion],
        overlaid: &[CellRegion],
        grid: &BucketGrid,
        cancel: Option<&AtomicBool>,
    ) -> Vec<Vec<usize>> {
        let per_region = |region: &CellRegion| -> Vec<usize> {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Vec::new();
            }
            let candidates = grid.candidates(region);
            self.reference
                .matching_base(region, candidates.into_iter().map(|i| (i, &base[i])))
        };

        if self.config.parallel {
            overlaid.par_iter().map(per_region).collect()
        } else {
            overlaid.iter().map(per_region).collect()
        }
    }
}

//! Bucket grid for spatial candidate lookup.
//!
//! The image is divided into uniform square buckets; each bucket records
//! which base regions touch it. A query region then only needs to consider
//! base regions registered in the 3x3 neighborhood of its own buckets.

use std::collections::BTreeSet;

use rustcoloc_core::error::{ColocalizationError, Result};
use rustcoloc_core::region::{CellRegion, PixelCoord};

/// Uniform grid over the image, holding base-region indices per bucket.
///
/// The bucket edge is clamped to `min(bucket_side, width, height)` so the
/// grid always has at least one bucket per axis; a clamped edge of zero is
/// a configuration error.
#[derive(Debug, Clone)]
pub struct BucketGrid {
    bucket_side: usize,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
}

impl BucketGrid {
    /// Creates an empty grid for an image of the given pixel dimensions.
    pub fn new(bucket_side: usize, width: usize, height: usize) -> Result<Self> {
        let side = bucket_side.min(width).min(height);
        if side == 0 {
            return Err(ColocalizationError::DegenerateGrid {
                bucket_side,
                width,
                height,
            });
        }
        let cols = width.div_ceil(side);
        let rows = height.div_ceil(side);
        Ok(Self {
            bucket_side: side,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        })
    }

    /// Effective (clamped) bucket edge length in pixels.
    pub fn bucket_side(&self) -> usize {
        self.bucket_side
    }

    /// Grid dimensions as (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Flat bucket index for a pixel. Out-of-image pixels clamp to the
    /// border bucket so stray coordinates never panic.
    fn bucket_of(&self, point: &PixelCoord) -> usize {
        let side = self.bucket_side as i32;
        let col = point.x.div_euclid(side).clamp(0, self.cols as i32 - 1) as usize;
        let row = point.y.div_euclid(side).clamp(0, self.rows as i32 - 1) as usize;
        row * self.cols + col
    }

    /// Every bucket touched by at least one of the region's pixels, in
    /// ascending flat order.
    fn touched_buckets(&self, region: &CellRegion) -> BTreeSet<usize> {
        region.iter().map(|p| self.bucket_of(p)).collect()
    }

    /// Registers a base region under `index` in every bucket it touches.
    ///
    /// A region straddling a bucket boundary is registered in each bucket,
    /// once per bucket.
    pub fn insert(&mut self, index: usize, region: &CellRegion) {
        for bucket in self.touched_buckets(region) {
            self.buckets[bucket].push(index);
        }
    }

    /// Candidate base-region indices for a query region: the union of all
    /// registrations in the 3x3 Moore neighborhoods (clipped to the grid)
    /// of every bucket the query touches.
    ///
    /// Deduplicated and returned in ascending index order, which is the
    /// base input order, so downstream result ordering stays deterministic.
    pub fn candidates(&self, region: &CellRegion) -> Vec<usize> {
        let mut neighborhoods = BTreeSet::new();
        for bucket in self.touched_buckets(region) {
            let row = (bucket / self.cols) as i32;
            let col = (bucket % self.cols) as i32;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    let r = row + dr;
                    let c = col + dc;
                    if r >= 0 && r < self.rows as i32 && c >= 0 && c < self.cols as i32 {
                        neighborhoods.insert(r as usize * self.cols + c as usize);
                    }
                }
            }
        }
        let mut indices = BTreeSet::new();
        for bucket in neighborhoods {
            indices.extend(self.buckets[bucket].iter().copied());
        }
        indices.into_iter().collect()
    }
}

//! Cell region types: pixel coordinates, centroids, and segmented regions.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelCoord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl PixelCoord {
    /// Creates a new pixel coordinate.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Computes the squared Euclidean distance to another coordinate.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> u64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        (dx * dx + dy * dy) as u64
    }
}

impl From<(i32, i32)> for PixelCoord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Arithmetic mean of a region's pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Centroid {
    /// Mean x coordinate.
    pub x: f64,
    /// Mean y coordinate.
    pub y: f64,
}

impl Centroid {
    /// Euclidean distance to another centroid.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

/// One segmented cell region: an immutable set of unique pixel coordinates.
///
/// Equality and hashing are defined over the point-set contents, so two
/// regions built from the same coordinates in different orders compare
/// equal. The centroid is computed on first access and cached.
///
/// Regions are produced once by an upstream segmentation step and never
/// mutated afterward; an empty region is a degenerate input that callers
/// should avoid, but every operation stays total over it.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellRegion {
    points: HashSet<PixelCoord>,
    #[cfg_attr(feature = "serde", serde(skip))]
    centroid: OnceLock<Option<Centroid>>,
}

impl CellRegion {
    /// Creates a region from a point set.
    pub fn new(points: HashSet<PixelCoord>) -> Self {
        Self {
            points,
            centroid: OnceLock::new(),
        }
    }

    /// Number of pixels in the region.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the region contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point-set membership test.
    pub fn contains(&self, point: &PixelCoord) -> bool {
        self.points.contains(point)
    }

    /// Iterates over the region's pixels in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &PixelCoord> {
        self.points.iter()
    }

    /// Number of pixels shared with another region.
    pub fn intersection_count(&self, other: &Self) -> usize {
        // Probe the smaller set against the larger one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|p| large.contains(p)).count()
    }

    /// Number of pixels in the union with another region.
    pub fn union_count(&self, other: &Self) -> usize {
        self.len() + other.len() - self.intersection_count(other)
    }

    /// The region's centroid, or `None` for an empty region.
    ///
    /// Computed on first call and cached for the region's lifetime.
    pub fn centroid(&self) -> Option<Centroid> {
        *self.centroid.get_or_init(|| {
            if self.points.is_empty() {
                return None;
            }
            let (sx, sy) = self
                .points
                .iter()
                .fold((0i64, 0i64), |(sx, sy), p| (sx + i64::from(p.x), sy + i64::from(p.y)));
            let n = self.points.len() as f64;
            Some(Centroid {
                x: sx as f64 / n,
                y: sy as f64 / n,
            })
        })
    }
}

impl PartialEq for CellRegion {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for CellRegion {}

impl Hash for CellRegion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: XOR of per-point hashes.
        let mut acc = 0u64;
        for p in &self.points {
            let mut h = DefaultHasher::new();
            p.hash(&mut h);
            acc ^= h.finish();
        }
        state.write_usize(self.points.len());
        state.write_u64(acc);
    }
}

impl FromIterator<PixelCoord> for CellRegion {
    fn from_iter<I: IntoIterator<Item = PixelCoord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<(i32, i32)> for CellRegion {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        iter.into_iter().map(PixelCoord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_value_equality_ignores_insertion_order() {
        let a: CellRegion = [(0, 0), (1, 0), (0, 1)].into_iter().collect();
        let b: CellRegion = [(0, 1), (0, 0), (1, 0)].into_iter().collect();
        assert_eq!(a, b);

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn test_duplicates_collapse() {
        let region: CellRegion = [(2, 3), (2, 3), (4, 5)].into_iter().collect();
        assert_eq!(region.len(), 2);
        assert!(region.contains(&PixelCoord::new(2, 3)));
    }

    #[test]
    fn test_intersection_and_union_counts() {
        let a: CellRegion = [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().collect();
        let b: CellRegion = [(1, 1), (1, 2), (2, 1), (2, 2)].into_iter().collect();
        assert_eq!(a.intersection_count(&b), 1);
        assert_eq!(a.union_count(&b), 7);
        assert_eq!(b.intersection_count(&a), 1);
    }

    #[test]
    fn test_centroid() {
        let region: CellRegion = [(0, 0), (2, 0), (0, 2), (2, 2)].into_iter().collect();
        let c = region.centroid().unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn test_empty_region_has_no_centroid() {
        let region = CellRegion::default();
        assert!(region.is_empty());
        assert!(region.centroid().is_none());
    }

    #[test]
    fn test_centroid_distance() {
        let a = Centroid { x: 0.0, y: 0.0 };
        let b = Centroid { x: 3.0, y: 4.0 };
        assert_relative_eq!(a.distance(&b), 5.0);
    }
}

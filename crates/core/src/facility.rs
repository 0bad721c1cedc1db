//! Fire station locations and nearest-facility queries
//!
//! A [`FacilitySet`] is an ordered, non-empty list of station coordinates. Distances
//! are answered through the [`NearestFacility`] trait so the search strategy can be
//! swapped without touching the grid:
//!
//! - [`BruteForceQuery`] scans every facility (fine for a handful of stations)
//! - [`BucketIndex`] hashes facilities into square buckets and searches outward
//!   ring by ring (for many stations)
//!
//! Both break ties on the lowest facility index, i.e. the first one in set order.

use crate::error::CityError;
use nalgebra::Point2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty set of facility coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2<f64>>", into = "Vec<Point2<f64>>")]
pub struct FacilitySet {
    points: Vec<Point2<f64>>,
}

impl FacilitySet {
    /// Create a facility set from explicit points
    ///
    /// # Errors
    /// Returns [`CityError::EmptyFacilitySet`] if `points` is empty, or
    /// [`CityError::InvalidFacility`] if any coordinate is not finite.
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self, CityError> {
        if points.is_empty() {
            return Err(CityError::EmptyFacilitySet);
        }
        for (index, p) in points.iter().enumerate() {
            check_finite(index, p)?;
        }
        Ok(FacilitySet { points })
    }

    /// Create a facility set from `[x, y]` pairs
    ///
    /// # Errors
    /// Same as [`FacilitySet::new`].
    pub fn from_coords(coords: &[[f64; 2]]) -> Result<Self, CityError> {
        Self::new(coords.iter().map(|&[x, y]| Point2::new(x, y)).collect())
    }

    /// A single station at the geometric centre of a `city_size` grid
    pub fn centered(city_size: usize) -> Self {
        let half = city_size as f64 / 2.0;
        FacilitySet {
            points: vec![Point2::new(half, half)],
        }
    }

    /// Append a station
    ///
    /// # Errors
    /// Returns [`CityError::InvalidFacility`] if the point is not finite.
    pub fn push(&mut self, point: Point2<f64>) -> Result<(), CityError> {
        check_finite(self.points.len(), &point)?;
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed set
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point2<f64>> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Axis-aligned bounds `(min, max)` of all stations
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

impl TryFrom<Vec<Point2<f64>>> for FacilitySet {
    type Error = CityError;

    fn try_from(points: Vec<Point2<f64>>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<FacilitySet> for Vec<Point2<f64>> {
    fn from(set: FacilitySet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a FacilitySet {
    type Item = &'a Point2<f64>;
    type IntoIter = std::slice::Iter<'a, Point2<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn check_finite(index: usize, p: &Point2<f64>) -> Result<(), CityError> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(CityError::InvalidFacility {
            index,
            x: p.x,
            y: p.y,
        })
    }
}

/// Nearest-neighbour query over a fixed set of facilities
pub trait NearestFacility {
    /// Index and Euclidean distance of the facility closest to `point`.
    ///
    /// Ties resolve to the lowest index. `None` only when there are no facilities.
    fn nearest(&self, point: &Point2<f64>) -> Option<(usize, f64)>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Linear scan over every facility
#[derive(Debug, Clone, Copy)]
pub struct BruteForceQuery<'a> {
    facilities: &'a [Point2<f64>],
}

impl<'a> BruteForceQuery<'a> {
    pub fn new(facilities: &'a FacilitySet) -> Self {
        BruteForceQuery {
            facilities: facilities.as_slice(),
        }
    }
}

impl NearestFacility for BruteForceQuery<'_> {
    fn nearest(&self, point: &Point2<f64>) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, facility) in self.facilities.iter().enumerate() {
            let d = nalgebra::distance(point, facility);
            // Strict comparison keeps the first facility on ties
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((index, d));
            }
        }
        best
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}

/// Uniform bucket grid over facility positions
///
/// Facilities are hashed into square buckets of side `bucket_size`. A query visits
/// buckets in rings of growing Chebyshev radius around the query's bucket and
/// stops once no unvisited bucket can hold a facility at least as close as the
/// current best.
pub struct BucketIndex<'a> {
    facilities: &'a [Point2<f64>],
    buckets: FxHashMap<(i64, i64), Vec<usize>>,
    bucket_size: f64,
    /// Inclusive bucket-coordinate range covering every occupied bucket
    extent: ((i64, i64), (i64, i64)),
}

impl<'a> BucketIndex<'a> {
    /// Build an index with roughly one facility per bucket over the stations' bounds
    pub fn new(facilities: &'a FacilitySet) -> Self {
        let (min, max) = facilities.bounds();
        Self::sized_over(facilities, min, max)
    }

    /// Build an index whose buckets also span the query domain `[min, max]`.
    ///
    /// Any query inside the domain is then at most about `sqrt(n)` buckets from
    /// every station, however tightly the stations are clustered.
    pub fn covering(facilities: &'a FacilitySet, min: Point2<f64>, max: Point2<f64>) -> Self {
        let (fmin, fmax) = facilities.bounds();
        let lo = Point2::new(fmin.x.min(min.x), fmin.y.min(min.y));
        let hi = Point2::new(fmax.x.max(max.x), fmax.y.max(max.y));
        Self::sized_over(facilities, lo, hi)
    }

    fn sized_over(facilities: &'a FacilitySet, min: Point2<f64>, max: Point2<f64>) -> Self {
        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        let per_side = (facilities.len() as f64).sqrt().ceil().max(1.0);
        Self::with_bucket_size(facilities, span / per_side)
    }

    /// Build an index with an explicit bucket size (non-positive sizes fall back to 1.0)
    pub fn with_bucket_size(facilities: &'a FacilitySet, bucket_size: f64) -> Self {
        let bucket_size = if bucket_size.is_finite() && bucket_size > 0.0 {
            bucket_size
        } else {
            1.0
        };

        let mut index = BucketIndex {
            facilities: facilities.as_slice(),
            buckets: FxHashMap::default(),
            bucket_size,
            extent: ((i64::MAX, i64::MAX), (i64::MIN, i64::MIN)),
        };

        for (id, p) in facilities.iter().enumerate() {
            let key = index.bucket_of(p);
            index.buckets.entry(key).or_default().push(id);

            let ((min_bx, min_by), (max_bx, max_by)) = &mut index.extent;
            *min_bx = (*min_bx).min(key.0);
            *min_by = (*min_by).min(key.1);
            *max_bx = (*max_bx).max(key.0);
            *max_by = (*max_by).max(key.1);
        }

        index
    }

    /// Bucket coordinates containing `p`
    fn bucket_of(&self, p: &Point2<f64>) -> (i64, i64) {
        (
            (p.x / self.bucket_size).floor() as i64,
            (p.y / self.bucket_size).floor() as i64,
        )
    }

    /// Chebyshev ring before which no occupied bucket exists
    fn first_ring(&self, (bx, by): (i64, i64)) -> i64 {
        let ((min_bx, min_by), (max_bx, max_by)) = self.extent;
        (min_bx - bx)
            .max(bx - max_bx)
            .max(min_by - by)
            .max(by - max_by)
            .max(0)
    }

    /// Chebyshev ring beyond which no occupied bucket exists
    fn last_ring(&self, (bx, by): (i64, i64)) -> i64 {
        let ((min_bx, min_by), (max_bx, max_by)) = self.extent;
        (bx - min_bx)
            .abs()
            .max((max_bx - bx).abs())
            .max((by - min_by).abs())
            .max((max_by - by).abs())
    }

    fn visit_bucket(&self, key: (i64, i64), point: &Point2<f64>, best: &mut Option<(usize, f64)>) {
        let Some(ids) = self.buckets.get(&key) else {
            return;
        };
        for &id in ids {
            let d = nalgebra::distance(point, &self.facilities[id]);
            let better = match *best {
                None => true,
                Some((best_id, best_d)) => d < best_d || (d == best_d && id < best_id),
            };
            if better {
                *best = Some((id, d));
            }
        }
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    fn bucket_size(&self) -> f64 {
        self.bucket_size
    }
}

impl NearestFacility for BucketIndex<'_> {
    fn nearest(&self, point: &Point2<f64>) -> Option<(usize, f64)> {
        if self.facilities.is_empty() {
            return None;
        }

        let center = self.bucket_of(point);
        let last_ring = self.last_ring(center);
        let mut best: Option<(usize, f64)> = None;

        // Rings inside `first_ring` lie wholly outside the occupied extent
        for ring in self.first_ring(center)..=last_ring {
            if ring == 0 {
                self.visit_bucket(center, point, &mut best);
            } else {
                // Top and bottom rows of the ring, then the left and right columns
                for dx in -ring..=ring {
                    self.visit_bucket((center.0 + dx, center.1 - ring), point, &mut best);
                    self.visit_bucket((center.0 + dx, center.1 + ring), point, &mut best);
                }
                for dy in (-ring + 1)..ring {
                    self.visit_bucket((center.0 - ring, center.1 + dy), point, &mut best);
                    self.visit_bucket((center.0 + ring, center.1 + dy), point, &mut best);
                }
            }

            // Anything in ring + 1 or further is at least `ring` buckets away
            if let Some((_, best_d)) = best {
                if best_d < ring as f64 * self.bucket_size {
                    break;
                }
            }
        }

        best
    }

    fn name(&self) -> &'static str {
        "bucket-index"
    }
}

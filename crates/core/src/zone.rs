//! Land-use zones and per-cell risk weights
//!
//! Every grid cell carries a [`ZoneType`] tag plus a risk weight sampled once from
//! that zone's bounded normal distribution. Weights are clamped into the zone's
//! bounds rather than resampled, so tail draws saturate at `min`/`max`.

use nalgebra::Point2;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Distance assigned to a cell before any facility pass has run
pub const UNREACHED_DISTANCE: f64 = 10_000.0;

/// Land-use classification of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneType {
    /// Unzoned cell, weight fixed at 0.0
    Generic,
    /// Housing
    Residential,
    /// Shops and offices
    Commercial,
    /// Factories and warehouses
    Industrial,
}

impl ZoneType {
    /// All zone types in code order
    pub const ALL: [ZoneType; 4] = [
        ZoneType::Generic,
        ZoneType::Residential,
        ZoneType::Commercial,
        ZoneType::Industrial,
    ];

    /// Numeric code used in exported zone rasters
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            ZoneType::Generic => -1,
            ZoneType::Residential => 0,
            ZoneType::Commercial => 1,
            ZoneType::Industrial => 2,
        }
    }

    /// Inverse of [`ZoneType::code`]
    #[must_use]
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(ZoneType::Generic),
            0 => Some(ZoneType::Residential),
            1 => Some(ZoneType::Commercial),
            2 => Some(ZoneType::Industrial),
            _ => None,
        }
    }

    /// Weight distribution for this zone (`None` for unzoned cells)
    #[must_use]
    pub const fn weight_profile(self) -> Option<WeightProfile> {
        match self {
            ZoneType::Generic => None,
            ZoneType::Residential => Some(WeightProfile::RESIDENTIAL),
            ZoneType::Commercial => Some(WeightProfile::COMMERCIAL),
            ZoneType::Industrial => Some(WeightProfile::INDUSTRIAL),
        }
    }

    /// Closed interval every weight of this zone falls in
    #[must_use]
    pub const fn weight_bounds(self) -> (f64, f64) {
        match self.weight_profile() {
            Some(profile) => (profile.min, profile.max),
            None => (0.0, 0.0),
        }
    }

    /// Draw a weight for this zone
    pub fn sample_weight<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        self.weight_profile().map_or(0.0, |profile| profile.sample(rng))
    }
}

/// Bounded normal distribution of risk weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl WeightProfile {
    pub const RESIDENTIAL: WeightProfile = WeightProfile {
        mean: 0.25,
        std_dev: 0.25,
        min: 0.0,
        max: 0.5,
    };

    pub const COMMERCIAL: WeightProfile = WeightProfile {
        mean: 0.5,
        std_dev: 0.25,
        min: 0.25,
        max: 0.75,
    };

    pub const INDUSTRIAL: WeightProfile = WeightProfile {
        mean: 0.75,
        std_dev: 0.25,
        min: 0.5,
        max: 1.0,
    };

    /// Draw once from `Normal(mean, std_dev)` and clamp into `[min, max]`.
    ///
    /// A profile with an invalid standard deviation degenerates to its mean.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let raw = Normal::new(self.mean, self.std_dev).map_or(self.mean, |normal| normal.sample(rng));
        raw.clamp(self.min, self.max)
    }
}

/// One grid cell: position, zone, sampled weight and nearest-facility distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Row index
    pub(crate) x: usize,
    /// Column index
    pub(crate) y: usize,
    pub(crate) weight: f64,
    pub(crate) distance: f64,
    pub(crate) zone: ZoneType,
    pub(crate) nearest_facility: Option<usize>,
}

impl Cell {
    /// Create a cell, sampling its weight from the zone's distribution
    pub fn new<R: Rng + ?Sized>(zone: ZoneType, x: usize, y: usize, rng: &mut R) -> Self {
        Cell {
            x,
            y,
            weight: zone.sample_weight(rng),
            distance: UNREACHED_DISTANCE,
            zone,
            nearest_facility: None,
        }
    }

    /// Grid position as `(row, column)`
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Grid position as a point for distance queries
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Distance to the nearest facility, or [`UNREACHED_DISTANCE`]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn zone(&self) -> ZoneType {
        self.zone
    }

    /// Index of the facility that produced [`Cell::distance`]
    pub fn nearest_facility(&self) -> Option<usize> {
        self.nearest_facility
    }

    /// Has a facility pass reached this cell
    pub fn is_reached(&self) -> bool {
        self.nearest_facility.is_some()
    }

    /// Euclidean distance from this cell to `point`
    pub fn distance_to(&self, point: &Point2<f64>) -> f64 {
        nalgebra::distance(&self.point(), point)
    }

    /// Record the result of a nearest-facility query
    pub(crate) fn set_nearest(&mut self, facility: usize, distance: f64) {
        self.nearest_facility = Some(facility);
        self.distance = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zone_codes_round_trip() {
        for zone in ZoneType::ALL {
            assert_eq!(ZoneType::from_code(zone.code()), Some(zone));
        }
        assert_eq!(ZoneType::from_code(7), None);
    }

    #[test]
    fn test_weights_stay_within_zone_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for zone in ZoneType::ALL {
            let (lo, hi) = zone.weight_bounds();
            for _ in 0..2_000 {
                let w = zone.sample_weight(&mut rng);
                assert!(
                    (lo..=hi).contains(&w),
                    "{zone:?} weight {w} outside [{lo}, {hi}]"
                );
            }
        }
    }

    #[test]
    fn test_clamping_saturates_at_bounds() {
        // stddev equals the half-width of every bound, so roughly a third of
        // draws land exactly on one of the bounds
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let profile = WeightProfile::INDUSTRIAL;

        let draws: Vec<f64> = (0..1_000).map(|_| profile.sample(&mut rng)).collect();
        assert!(draws.iter().any(|&w| w == profile.max));
        assert!(draws.iter().any(|&w| w == profile.min));
    }

    #[test]
    fn test_generic_cell_has_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let cell = Cell::new(ZoneType::Generic, 3, 4, &mut rng);

        assert_eq!(cell.weight(), 0.0);
        assert_eq!(cell.position(), (3, 4));
    }

    #[test]
    fn test_new_cell_is_unreached() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let cell = Cell::new(ZoneType::Commercial, 0, 0, &mut rng);

        assert_eq!(cell.distance(), UNREACHED_DISTANCE);
        assert!(!cell.is_reached());
    }

    #[test]
    fn test_distance_to_is_euclidean() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let cell = Cell::new(ZoneType::Residential, 3, 0, &mut rng);

        assert!((cell.distance_to(&Point2::new(0.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}

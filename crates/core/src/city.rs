//! One-shot city pipeline
//!
//! [`City`] ties the pieces together in a fixed order:
//!
//! 1. Generate the zoned grid from the configured layout
//! 2. Install the station set (configured, or one at the centre)
//! 3. Compute every cell's nearest-station distance
//!
//! Rasters can be exported at any point afterwards. Changing the station set
//! recomputes all distances.

use crate::config::CityConfig;
use crate::error::CityError;
use crate::export::{CityRasters, Raster};
use crate::facility::FacilitySet;
use crate::grid::CityGrid;
use crate::layout::LayoutType;
use crate::zone::ZoneType;
use nalgebra::Point2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// A generated city with its fire stations and distance field
#[derive(Debug, Clone)]
pub struct City {
    grid: CityGrid,
    facilities: FacilitySet,
}

impl City {
    /// Build a city from `config`
    ///
    /// Weights are drawn from a `ChaCha8Rng` seeded with `config.seed`, or from a
    /// fresh seed when none is set.
    ///
    /// # Errors
    /// Returns [`CityError`] if the size is not positive or the station list is
    /// empty or non-finite.
    pub fn new(config: &CityConfig) -> Result<Self, CityError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Build a city drawing weights from an injected RNG (`config.seed` is ignored)
    ///
    /// # Errors
    /// Same as [`City::new`].
    pub fn with_rng<R: Rng + ?Sized>(config: &CityConfig, rng: &mut R) -> Result<Self, CityError> {
        let (size, facilities) = config.resolve()?;

        info!(
            "Building city: layout={:?}, size={}, stations={}",
            config.layout,
            size,
            facilities.len()
        );

        let mut grid = CityGrid::generate(config.layout, size, rng)?;
        grid.assign_distances(&facilities)?;

        Ok(Self { grid, facilities })
    }

    pub fn grid(&self) -> &CityGrid {
        &self.grid
    }

    pub fn facilities(&self) -> &FacilitySet {
        &self.facilities
    }

    pub fn layout(&self) -> LayoutType {
        self.grid.layout()
    }

    pub fn city_size(&self) -> usize {
        self.grid.city_size()
    }

    /// Replace the station set and recompute all distances
    ///
    /// # Errors
    /// Returns [`CityError::EmptyFacilitySet`] if the distance pass cannot run.
    pub fn set_facilities(&mut self, facilities: FacilitySet) -> Result<(), CityError> {
        self.grid.assign_distances(&facilities)?;
        self.facilities = facilities;
        Ok(())
    }

    /// Add one station and recompute all distances
    ///
    /// # Errors
    /// Returns [`CityError::InvalidFacility`] if `point` is not finite.
    pub fn add_facility(&mut self, point: Point2<f64>) -> Result<(), CityError> {
        let mut facilities = self.facilities.clone();
        facilities.push(point)?;
        self.set_facilities(facilities)
    }

    pub fn weights(&self) -> Raster {
        self.grid.weight_raster()
    }

    pub fn distances(&self) -> Raster {
        self.grid.distance_raster()
    }

    pub fn zones(&self) -> Raster {
        self.grid.zone_raster()
    }

    pub fn rasters(&self) -> CityRasters {
        self.grid.export_all()
    }

    /// Per-zone cell counts and mean weights
    pub fn census(&self) -> ZoneCensus {
        ZoneCensus::from_grid(&self.grid)
    }
}

/// Cell count and summed weight per zone
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneCensus {
    counts: [usize; 4],
    weight_sums: [f64; 4],
}

impl ZoneCensus {
    pub fn from_grid(grid: &CityGrid) -> Self {
        let mut census = Self::default();
        for cell in grid.cells() {
            let slot = Self::slot(cell.zone());
            census.counts[slot] += 1;
            census.weight_sums[slot] += cell.weight();
        }
        census
    }

    #[inline]
    fn slot(zone: ZoneType) -> usize {
        (zone.code() + 1) as usize
    }

    pub fn count(&self, zone: ZoneType) -> usize {
        self.counts[Self::slot(zone)]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Mean weight of the zone's cells, `None` if the zone is absent
    pub fn mean_weight(&self, zone: ZoneType) -> Option<f64> {
        let slot = Self::slot(zone);
        match self.counts[slot] {
            0 => None,
            n => Some(self.weight_sums[slot] / n as f64),
        }
    }
}

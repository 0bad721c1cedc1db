//! Square city grid filled by a layout rule
//!
//! The grid is built once in a single pass: every `(i, j)` is classified by the
//! selected [`LayoutType`] and given a freshly sampled [`Cell`]. Afterwards the
//! shape never changes; only the distance fields are rewritten by facility passes.

use crate::error::CityError;
use crate::facility::{BruteForceQuery, BucketIndex, FacilitySet, NearestFacility};
use crate::layout::LayoutType;
use crate::zone::{Cell, ZoneType};
use nalgebra::Point2;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Facility count above which the distance pass switches to a bucket index
pub const BRUTE_FORCE_LIMIT: usize = 32;

/// `city_size × city_size` grid of zoned cells
#[derive(Debug, Clone, Serialize)]
pub struct CityGrid {
    city_size: usize,
    layout: LayoutType,
    /// Cells in row-major order: [i * city_size + j]
    cells: Vec<Cell>,
}

impl CityGrid {
    /// Generate a grid with the given layout, drawing weights from `rng`
    ///
    /// # Errors
    /// Returns [`CityError::InvalidCitySize`] if `city_size` is zero.
    pub fn generate<R: Rng + ?Sized>(
        layout: LayoutType,
        city_size: usize,
        rng: &mut R,
    ) -> Result<Self, CityError> {
        if city_size == 0 {
            return Err(CityError::InvalidCitySize(0));
        }

        let total_cells = city_size
            .checked_mul(city_size)
            .ok_or_else(|| CityError::InvalidCitySize(i64::try_from(city_size).unwrap_or(i64::MAX)))?;
        let mut cells = Vec::with_capacity(total_cells);

        for i in 0..city_size {
            for j in 0..city_size {
                let zone = layout.zone_at(i, j, city_size);
                cells.push(Cell::new(zone, i, j, rng));
            }
        }

        let grid = CityGrid {
            city_size,
            layout,
            cells,
        };

        info!(
            "Generated {:?} city: {}x{} cells",
            layout, city_size, city_size
        );
        debug!(
            "Zone counts: residential={}, commercial={}, industrial={}, generic={}",
            grid.zone_count(ZoneType::Residential),
            grid.zone_count(ZoneType::Commercial),
            grid.zone_count(ZoneType::Industrial),
            grid.zone_count(ZoneType::Generic)
        );

        Ok(grid)
    }

    /// Side length in cells
    #[inline]
    pub fn city_size(&self) -> usize {
        self.city_size
    }

    pub fn layout(&self) -> LayoutType {
        self.layout
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a generated grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell index from (i, j) indices
    #[inline]
    pub fn cell_index(&self, i: usize, j: usize) -> usize {
        i * self.city_size + j
    }

    /// Get cell at grid indices (bounds-checked)
    pub fn cell_at(&self, i: usize, j: usize) -> Option<&Cell> {
        if i < self.city_size && j < self.city_size {
            Some(&self.cells[self.cell_index(i, j)])
        } else {
            None
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.city_size)
    }

    /// Number of cells of the given zone
    pub fn zone_count(&self, zone: ZoneType) -> usize {
        self.cells.iter().filter(|c| c.zone == zone).count()
    }

    /// Overwrite every cell's distance with its nearest facility.
    ///
    /// Small sets are scanned directly; larger ones go through a [`BucketIndex`]
    /// whose buckets span both the stations and the grid.
    ///
    /// # Errors
    /// Returns [`CityError::EmptyFacilitySet`] if `facilities` is empty.
    pub fn assign_distances(&mut self, facilities: &FacilitySet) -> Result<(), CityError> {
        if facilities.len() > BRUTE_FORCE_LIMIT {
            let far = (self.city_size - 1) as f64;
            let index = BucketIndex::covering(facilities, Point2::origin(), Point2::new(far, far));
            self.assign_distances_with(&index)
        } else {
            self.assign_distances_with(&BruteForceQuery::new(facilities))
        }
    }

    /// Overwrite every cell's distance using an explicit nearest-facility query.
    ///
    /// Cells are left untouched if the query cannot answer.
    ///
    /// # Errors
    /// Returns [`CityError::EmptyFacilitySet`] if the query has no facilities.
    pub fn assign_distances_with<Q: NearestFacility + ?Sized>(
        &mut self,
        query: &Q,
    ) -> Result<(), CityError> {
        let nearest: Vec<(usize, f64)> = self
            .cells
            .iter()
            .map(|cell| query.nearest(&cell.point()))
            .collect::<Option<_>>()
            .ok_or(CityError::EmptyFacilitySet)?;

        for (cell, (facility, distance)) in self.cells.iter_mut().zip(nearest) {
            cell.set_nearest(facility, distance);
        }

        debug_assert!(self.cells.iter().all(Cell::is_reached));

        info!(
            "Distance pass complete: {} cells, query={}, max distance={:.2}",
            self.cells.len(),
            query.name(),
            self.max_distance()
        );

        Ok(())
    }

    /// Largest recorded distance (the sentinel before any pass)
    pub fn max_distance(&self) -> f64 {
        self.cells.iter().map(Cell::distance).fold(0.0, f64::max)
    }
}

//! Raster export for visualization tools
//!
//! Provides dense `city_size × city_size` snapshots of the grid for plotting or
//! game-engine rendering:
//! - Risk weight (continuous scale)
//! - Nearest-station distance (divergent scale)
//! - Zone code (categorical scale)
//!
//! Every export re-reads all cells; the returned rasters are owned copies and do
//! not track later changes to the grid.

use crate::grid::CityGrid;
use crate::zone::Cell;
use serde::{Deserialize, Serialize};

/// How a consumer should map raster values to colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorScale {
    /// Discrete classes, one colour per value
    Categorical,
    /// Sequential low-to-high ramp
    Continuous,
    /// Two-sided ramp around a midpoint
    Divergent,
}

/// Which per-cell quantity a raster holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RasterLayer {
    Weight,
    Distance,
    Zone,
}

impl RasterLayer {
    pub const ALL: [RasterLayer; 3] = [RasterLayer::Weight, RasterLayer::Distance, RasterLayer::Zone];

    pub const fn scale(self) -> ColorScale {
        match self {
            RasterLayer::Weight => ColorScale::Continuous,
            RasterLayer::Distance => ColorScale::Divergent,
            RasterLayer::Zone => ColorScale::Categorical,
        }
    }

    /// Plot title
    pub const fn title(self) -> &'static str {
        match self {
            RasterLayer::Weight => "Risk(wij) Distribution",
            RasterLayer::Distance => "Distance(dij) Distribution",
            RasterLayer::Zone => "Layout Distribution",
        }
    }

    /// Matplotlib-style colormap name matching [`RasterLayer::scale`]
    pub const fn suggested_colormap(self) -> &'static str {
        match self {
            RasterLayer::Weight => "turbo",
            RasterLayer::Distance => "coolwarm",
            RasterLayer::Zone => "rainbow",
        }
    }

    fn value(self, cell: &Cell) -> f64 {
        match self {
            RasterLayer::Weight => cell.weight(),
            RasterLayer::Distance => cell.distance(),
            RasterLayer::Zone => f64::from(cell.zone().code()),
        }
    }
}

/// Dense square raster in row-major order: `values[i * size + j]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Raster {
    pub layer: RasterLayer,
    pub size: usize,
    pub values: Vec<f64>,
}

impl Raster {
    /// Value at `(i, j)`, `None` outside the grid
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Rows top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, f64> {
        self.values.chunks(self.size)
    }

    /// Nested `Vec` copy, for consumers that want `[[f64; size]; size]`-like data
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn scale(&self) -> ColorScale {
        self.layer.scale()
    }
}

/// The three rasters of one city, snapshotted together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRasters {
    pub weight: Raster,
    pub distance: Raster,
    pub zone: Raster,
}

impl CityRasters {
    pub fn get(&self, layer: RasterLayer) -> &Raster {
        match layer {
            RasterLayer::Weight => &self.weight,
            RasterLayer::Distance => &self.distance,
            RasterLayer::Zone => &self.zone,
        }
    }
}

impl CityGrid {
    /// Snapshot one layer
    pub fn export(&self, layer: RasterLayer) -> Raster {
        Raster {
            layer,
            size: self.city_size(),
            values: self.cells().iter().map(|cell| layer.value(cell)).collect(),
        }
    }

    pub fn weight_raster(&self) -> Raster {
        self.export(RasterLayer::Weight)
    }

    pub fn distance_raster(&self) -> Raster {
        self.export(RasterLayer::Distance)
    }

    pub fn zone_raster(&self) -> Raster {
        self.export(RasterLayer::Zone)
    }

    /// Snapshot all three layers
    pub fn export_all(&self) -> CityRasters {
        CityRasters {
            weight: self.weight_raster(),
            distance: self.distance_raster(),
            zone: self.zone_raster(),
        }
    }
}

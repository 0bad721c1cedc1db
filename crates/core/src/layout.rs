//! Geometric layout rules mapping grid coordinates to zones
//!
//! Three classic urban land-use models are supported:
//!
//! - **Concentric ring** (Burgess): commercial core, residential ring, industrial
//!   outskirts.
//! - **Sector** (Hoyt): wedges by bearing from the centre, mirrored across the
//!   horizontal midline.
//! - **Multiple nuclei** (Harris–Ullman): independent commercial and industrial
//!   centres embedded in a residential fabric.
//!
//! All rules are pure functions of `(i, j, city_size)`.

use crate::zone::ZoneType;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Norm floor used when the cell sits exactly on the centre in the sector rule
const SECTOR_MIN_NORM: f64 = 0.1;

/// Land-use layout model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutType {
    #[default]
    ConcentricRing,
    Sector,
    MultipleNuclei,
}

impl LayoutType {
    /// Numeric selector used across the FFI boundary
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            LayoutType::ConcentricRing => 0,
            LayoutType::Sector => 1,
            LayoutType::MultipleNuclei => 2,
        }
    }

    /// Resolve a numeric selector.
    ///
    /// Unknown codes are not an error: they fall back to [`LayoutType::ConcentricRing`].
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => LayoutType::ConcentricRing,
            1 => LayoutType::Sector,
            2 => LayoutType::MultipleNuclei,
            other => {
                warn!(
                    "Unknown layout code {}, falling back to concentric ring layout",
                    other
                );
                LayoutType::ConcentricRing
            }
        }
    }

    /// Zone of cell `(i, j)` in a `city_size × city_size` grid
    #[must_use]
    pub fn zone_at(self, i: usize, j: usize, city_size: usize) -> ZoneType {
        match self {
            LayoutType::ConcentricRing => concentric_ring_zone(i, j, city_size),
            LayoutType::Sector => sector_zone(i, j, city_size),
            LayoutType::MultipleNuclei => multiple_nuclei_zone(i, j, city_size),
        }
    }

    /// Commercial then industrial nuclei for the multiple-nuclei model.
    ///
    /// Empty for the other layouts.
    #[must_use]
    pub fn nuclei(self, city_size: usize) -> Vec<Nucleus> {
        match self {
            LayoutType::MultipleNuclei => multiple_nuclei(city_size).to_vec(),
            LayoutType::ConcentricRing | LayoutType::Sector => Vec::new(),
        }
    }
}

/// A commercial or industrial centre with a circular catchment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nucleus {
    pub zone: ZoneType,
    pub center: Point2<f64>,
    /// Catchment radius in cells (exclusive)
    pub radius: f64,
}

impl Nucleus {
    fn new(zone: ZoneType, x: f64, y: f64, radius: f64) -> Self {
        Nucleus {
            zone,
            center: Point2::new(x, y),
            radius,
        }
    }

    /// Is `point` strictly inside the catchment
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        nalgebra::distance(&self.center, point) < self.radius
    }
}

#[inline]
fn half_size(city_size: usize) -> f64 {
    city_size as f64 / 2.0
}

#[inline]
fn cell_point(i: usize, j: usize) -> Point2<f64> {
    Point2::new(i as f64, j as f64)
}

fn concentric_ring_zone(i: usize, j: usize, city_size: usize) -> ZoneType {
    let half = half_size(city_size);
    let center = Point2::new(half, half);
    let d = nalgebra::distance(&cell_point(i, j), &center);

    if d < half / 3.0 {
        ZoneType::Commercial
    } else if d < half * 2.0 / 3.0 {
        ZoneType::Residential
    } else {
        ZoneType::Industrial
    }
}

/// Bearing of the cell from the centre against the +x axis, in degrees `[0, 180]`.
///
/// NaN when rounding pushes the cosine outside `[-1, 1]`.
fn sector_angle(i: usize, j: usize, city_size: usize) -> f64 {
    let half = half_size(city_size);
    let v: Vector2<f64> = cell_point(i, j) - Point2::new(half, half);
    let axis = Vector2::new(1.0, 0.0);
    let cos = v.dot(&axis) / v.norm().max(SECTOR_MIN_NORM);
    cos.acos().to_degrees()
}

fn sector_zone(i: usize, j: usize, city_size: usize) -> ZoneType {
    let half = half_size(city_size);
    let angle = sector_angle(i, j, city_size);
    let upper = (j as f64) < half;
    let east = (0.0..60.0).contains(&angle);
    let west = (120.0..=180.0).contains(&angle);

    if (east && upper) || (west && !upper) {
        ZoneType::Residential
    } else if (60.0..120.0).contains(&angle) {
        ZoneType::Commercial
    } else if (east && !upper) || (west && upper) {
        ZoneType::Industrial
    } else {
        ZoneType::Generic
    }
}

fn multiple_nuclei(city_size: usize) -> [Nucleus; 6] {
    let size = city_size as f64;
    let half = half_size(city_size);

    [
        Nucleus::new(ZoneType::Commercial, half / 2.0, half / 2.0, 10.0),
        Nucleus::new(ZoneType::Commercial, half, half, 20.0),
        Nucleus::new(ZoneType::Commercial, size - half / 2.0, size - half / 5.0, 10.0),
        Nucleus::new(ZoneType::Industrial, size - half / 2.0, half / 2.0, 10.0),
        Nucleus::new(ZoneType::Industrial, half / 3.0, size - half / 3.0, 35.0),
        Nucleus::new(ZoneType::Industrial, size - half / 3.0, size - half / 3.0, 15.0),
    ]
}

fn multiple_nuclei_zone(i: usize, j: usize, city_size: usize) -> ZoneType {
    let point = cell_point(i, j);
    let nuclei = multiple_nuclei(city_size);

    // Commercial nuclei come first, so overlaps resolve to commercial
    nuclei
        .iter()
        .find(|nucleus| nucleus.contains(&point))
        .map_or(ZoneType::Residential, |nucleus| nucleus.zone)
}

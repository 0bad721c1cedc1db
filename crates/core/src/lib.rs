//! City Layout Core Library
//!
//! Generates synthetic square city grids under classic urban land-use models and
//! measures how far every cell is from the nearest fire station.
//!
//! ## Pipeline
//!
//! - Zone assignment by concentric-ring, sector or multiple-nuclei layout
//! - Per-cell risk weight sampled from a bounded normal distribution per zone
//! - Nearest fire-station distance for every cell (brute force or bucket index)
//! - Dense weight / distance / zone rasters for external visualization
//!
//! ```
//! use city_layout_core::{City, CityConfig, LayoutType};
//!
//! let city = City::new(&CityConfig::new(LayoutType::Sector).with_seed(7)).unwrap();
//! let distances = city.distances();
//! assert_eq!(distances.get(50, 50), Some(0.0));
//! ```

pub mod city;
pub mod config;
pub mod error;
pub mod export;
pub mod facility;
pub mod grid;
pub mod layout;
pub mod zone;

pub use city::{City, ZoneCensus};
pub use config::{CityConfig, DEFAULT_CITY_SIZE};
pub use error::CityError;
pub use export::{CityRasters, ColorScale, Raster, RasterLayer};
pub use facility::{BruteForceQuery, BucketIndex, FacilitySet, NearestFacility};
pub use grid::CityGrid;
pub use layout::{LayoutType, Nucleus};
pub use zone::{Cell, WeightProfile, ZoneType, UNREACHED_DISTANCE};

// Re-export the point type used throughout the public API
pub use nalgebra::Point2;

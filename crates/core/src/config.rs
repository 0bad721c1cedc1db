//! City generation settings
//!
//! `CityConfig` carries everything needed to build a [`crate::City`]: the layout
//! model, the grid size, an optional RNG seed and an optional station list.
//! The size is signed so that values coming from JSON or C callers can be
//! validated instead of silently wrapping.

use crate::error::{checked_city_size, CityError};
use crate::facility::FacilitySet;
use crate::layout::LayoutType;
use serde::{Deserialize, Serialize};

/// Grid side length used when none is given
pub const DEFAULT_CITY_SIZE: i64 = 100;

/// Settings for one generated city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub layout: LayoutType,
    pub city_size: i64,
    /// Seed for weight sampling; `None` draws one from the thread RNG
    pub seed: Option<u64>,
    /// Station coordinates; `None` places one at the grid centre
    pub facilities: Option<Vec<[f64; 2]>>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            layout: LayoutType::default(),
            city_size: DEFAULT_CITY_SIZE,
            seed: None,
            facilities: None,
        }
    }
}

impl CityConfig {
    pub fn new(layout: LayoutType) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, city_size: i64) -> Self {
        self.city_size = city_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_facilities(mut self, facilities: Vec<[f64; 2]>) -> Self {
        self.facilities = Some(facilities);
        self
    }

    /// Check the settings without generating anything
    ///
    /// # Errors
    /// Returns the same [`CityError`] that building a city from this config would.
    pub fn validate(&self) -> Result<(), CityError> {
        self.resolve().map(|_| ())
    }

    /// Validated grid size and station set
    pub(crate) fn resolve(&self) -> Result<(usize, FacilitySet), CityError> {
        let size = checked_city_size(self.city_size)?;
        let facilities = match &self.facilities {
            Some(coords) => FacilitySet::from_coords(coords)?,
            None => FacilitySet::centered(size),
        };
        Ok((size, facilities))
    }
}

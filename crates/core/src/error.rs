//! Errors raised while building a city or measuring facility distances

/// Errors that can occur when configuring or generating a city grid
#[derive(Debug, Clone, PartialEq)]
pub enum CityError {
    /// Grid size must be strictly positive
    InvalidCitySize(i64),
    /// Distances were requested against an empty facility set
    EmptyFacilitySet,
    /// A facility coordinate was NaN or infinite
    InvalidFacility {
        /// Position of the offending facility in the supplied list
        index: usize,
        /// Offending x coordinate
        x: f64,
        /// Offending y coordinate
        y: f64,
    },
}

impl std::fmt::Display for CityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityError::InvalidCitySize(size) => {
                write!(f, "City size must be positive, got {size}")
            }
            CityError::EmptyFacilitySet => {
                write!(f, "Facility set must contain at least one facility")
            }
            CityError::InvalidFacility { index, x, y } => {
                write!(f, "Facility {index} has non-finite coordinates ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for CityError {}

/// Validate a signed grid size coming from configuration or FFI callers.
///
/// # Errors
/// Returns [`CityError::InvalidCitySize`] if `size` is zero, negative, or does
/// not fit in `usize`.
pub fn checked_city_size(size: i64) -> Result<usize, CityError> {
    if size <= 0 {
        return Err(CityError::InvalidCitySize(size));
    }
    usize::try_from(size).map_err(|_| CityError::InvalidCitySize(size))
}

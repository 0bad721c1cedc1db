//! C ABI for the city layout generator
//!
//! Exposes city creation, fire station placement and raster copies so that a
//! non-Rust visualization host can render the weight, distance and zone grids.
//! Every function returns a `CityLayoutErrorCode`; details of the last failure
//! on the calling thread are available from `city_layout_get_last_error`.

pub mod error;
mod helpers;
pub mod instance;
pub mod queries;

pub use error::{city_layout_get_last_error, city_layout_get_last_error_code, CityLayoutErrorCode};
pub use instance::{
    city_layout_add_facility, city_layout_destroy, city_layout_new, city_layout_set_facilities,
    CityLayoutInstance,
};
pub use queries::{
    city_layout_copy_distances, city_layout_copy_weights, city_layout_copy_zones,
    city_layout_facility_count, city_layout_size,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn new_city(layout: u8, size: i32) -> *mut CityLayoutInstance {
        let mut instance = ptr::null_mut();
        let code = unsafe { city_layout_new(layout, size, 42, &mut instance) };
        assert_eq!(code, CityLayoutErrorCode::Ok);
        assert!(!instance.is_null());
        instance
    }

    #[test]
    fn test_create_copy_destroy() {
        let city = new_city(0, 100);

        let mut size = 0usize;
        assert_eq!(unsafe { city_layout_size(city, &mut size) }, CityLayoutErrorCode::Ok);
        assert_eq!(size, 100);

        let mut distances = vec![0.0; size * size];
        let code = unsafe { city_layout_copy_distances(city, distances.as_mut_ptr(), distances.len()) };
        assert_eq!(code, CityLayoutErrorCode::Ok);
        assert_eq!(distances[50 * size + 50], 0.0);
        assert!((distances[0] - 70.710_678).abs() < 1e-5);

        let mut zones = vec![0.0; size * size];
        let code = unsafe { city_layout_copy_zones(city, zones.as_mut_ptr(), zones.len()) };
        assert_eq!(code, CityLayoutErrorCode::Ok);
        assert_eq!(zones[50 * size + 50], 1.0);

        let mut weights = vec![-1.0; size * size];
        let code = unsafe { city_layout_copy_weights(city, weights.as_mut_ptr(), weights.len()) };
        assert_eq!(code, CityLayoutErrorCode::Ok);
        assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));

        unsafe { city_layout_destroy(city) };
    }

    #[test]
    fn test_invalid_size_sets_last_error() {
        for size in [0, -10] {
            let mut instance = ptr::NonNull::<CityLayoutInstance>::dangling().as_ptr();
            let code = unsafe { city_layout_new(0, size, 1, &mut instance) };

            assert_eq!(code, CityLayoutErrorCode::InvalidCitySize);
            assert!(instance.is_null());
            assert_eq!(city_layout_get_last_error_code(), CityLayoutErrorCode::InvalidCitySize);

            let msg = unsafe { CStr::from_ptr(city_layout_get_last_error()) };
            assert!(msg.to_string_lossy().contains(&size.to_string()));
        }
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let city = new_city(1, 10);
        let mut short = vec![0.0; 99];

        let code = unsafe { city_layout_copy_weights(city, short.as_mut_ptr(), short.len()) };
        assert_eq!(code, CityLayoutErrorCode::BufferSizeMismatch);

        unsafe { city_layout_destroy(city) };
    }

    #[test]
    fn test_set_facilities() {
        let city = new_city(2, 20);
        let xy = [0.0, 0.0, 19.0, 19.0];

        let code = unsafe { city_layout_set_facilities(city, xy.as_ptr(), 2) };
        assert_eq!(code, CityLayoutErrorCode::Ok);

        let mut count = 0usize;
        unsafe { city_layout_facility_count(city, &mut count) };
        assert_eq!(count, 2);

        let mut distances = vec![0.0; 400];
        unsafe { city_layout_copy_distances(city, distances.as_mut_ptr(), 400) };
        assert_eq!(distances[0], 0.0);
        assert_eq!(distances[19 * 20 + 19], 0.0);

        let code = unsafe { city_layout_set_facilities(city, xy.as_ptr(), 0) };
        assert_eq!(code, CityLayoutErrorCode::EmptyFacilitySet);

        let bad = [f64::NAN, 1.0];
        let code = unsafe { city_layout_set_facilities(city, bad.as_ptr(), 1) };
        assert_eq!(code, CityLayoutErrorCode::InvalidFacility);

        // Failed calls keep the previous stations
        unsafe { city_layout_facility_count(city, &mut count) };
        assert_eq!(count, 2);

        let code = unsafe { city_layout_add_facility(city, 10.0, 10.0) };
        assert_eq!(code, CityLayoutErrorCode::Ok);
        assert_eq!(city_layout_get_last_error_code(), CityLayoutErrorCode::Ok);
        assert!(city_layout_get_last_error().is_null());

        unsafe { city_layout_destroy(city) };
    }

    #[test]
    fn test_null_pointers_rejected() {
        let mut size = 0usize;
        let code = unsafe { city_layout_size(ptr::null(), &mut size) };
        assert_eq!(code, CityLayoutErrorCode::NullPointer);

        let code = unsafe { city_layout_new(0, 10, 0, ptr::null_mut()) };
        assert_eq!(code, CityLayoutErrorCode::NullPointer);

        unsafe { city_layout_destroy(ptr::null_mut()) };
    }
}

use city_layout_core::RasterLayer;
use std::slice;

use crate::error::{CityLayoutErrorCode, DefaultCityLayoutError};
use crate::helpers::{clear_last_error, track_error};
use crate::instance::{instance_ref, CityLayoutInstance};

/// Get the grid side length.
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `out_size` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn city_layout_size(
    instance: *const CityLayoutInstance,
    out_size: *mut usize,
) -> CityLayoutErrorCode {
    if out_size.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("out_size"));
    }
    let instance = match unsafe { instance_ref(instance) } {
        Ok(instance) => instance,
        Err(code) => return code,
    };

    unsafe {
        *out_size = instance.city.city_size();
    }
    clear_last_error()
}

/// Get the number of fire stations currently placed.
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `out_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn city_layout_facility_count(
    instance: *const CityLayoutInstance,
    out_count: *mut usize,
) -> CityLayoutErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("out_count"));
    }
    let instance = match unsafe { instance_ref(instance) } {
        Ok(instance) => instance,
        Err(code) => return code,
    };

    unsafe {
        *out_count = instance.city.facilities().len();
    }
    clear_last_error()
}

/// Copy one raster layer into a caller-owned buffer.
///
/// # Safety
/// `out` must be null or point to `len` writable `f64` values.
unsafe fn copy_layer(
    instance: *const CityLayoutInstance,
    layer: RasterLayer,
    out: *mut f64,
    len: usize,
) -> CityLayoutErrorCode {
    let instance = match unsafe { instance_ref(instance) } {
        Ok(instance) => instance,
        Err(code) => return code,
    };
    if out.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("out"));
    }

    let raster = instance.city.grid().export(layer);
    if raster.values.len() != len {
        return track_error(&DefaultCityLayoutError::buffer_size_mismatch(
            raster.values.len(),
            len,
        ));
    }

    let dst = unsafe { slice::from_raw_parts_mut(out, len) };
    dst.copy_from_slice(raster.as_slice());
    clear_last_error()
}

/// Copy the risk weight grid, row-major: `out[i * size + j]`.
///
/// `len` must equal `size * size` (see `city_layout_size`).
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `out` must point to `len` writable `f64` values.
#[no_mangle]
pub unsafe extern "C" fn city_layout_copy_weights(
    instance: *const CityLayoutInstance,
    out: *mut f64,
    len: usize,
) -> CityLayoutErrorCode {
    unsafe { copy_layer(instance, RasterLayer::Weight, out, len) }
}

/// Copy the nearest-station distance grid, row-major: `out[i * size + j]`.
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `out` must point to `len` writable `f64` values.
#[no_mangle]
pub unsafe extern "C" fn city_layout_copy_distances(
    instance: *const CityLayoutInstance,
    out: *mut f64,
    len: usize,
) -> CityLayoutErrorCode {
    unsafe { copy_layer(instance, RasterLayer::Distance, out, len) }
}

/// Copy the zone code grid, row-major: `out[i * size + j]`.
///
/// Codes: -1 unzoned, 0 residential, 1 commercial, 2 industrial.
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `out` must point to `len` writable `f64` values.
#[no_mangle]
pub unsafe extern "C" fn city_layout_copy_zones(
    instance: *const CityLayoutInstance,
    out: *mut f64,
    len: usize,
) -> CityLayoutErrorCode {
    unsafe { copy_layer(instance, RasterLayer::Zone, out, len) }
}

use city_layout_core::{City, CityConfig, FacilitySet, LayoutType, Point2};
use std::ptr;
use std::slice;

use crate::error::{CityLayoutErrorCode, DefaultCityLayoutError};
use crate::helpers::{clear_last_error, track_error, track_result};

/// A generated city owned by a C caller.
///
/// # Thread Safety
/// Not synchronized. Each instance must be used from one thread at a time;
/// callers sharing an instance across threads must provide their own locking.
pub struct CityLayoutInstance {
    pub(crate) city: City,
}

impl CityLayoutInstance {
    /// Builds a city with a single fire station at the grid centre.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCitySize` if `city_size` is zero or negative.
    pub(crate) fn new(
        layout_code: u8,
        city_size: i32,
        seed: u64,
    ) -> Result<Box<Self>, DefaultCityLayoutError> {
        let config = CityConfig::new(LayoutType::from_code(layout_code))
            .with_size(i64::from(city_size))
            .with_seed(seed);

        let city = City::new(&config)?;
        Ok(Box::new(Self { city }))
    }
}

/// Get a shared reference from a raw instance pointer, recording an error if null.
///
/// # Safety
/// `ptr` must be null or point to a live `CityLayoutInstance`.
pub(crate) unsafe fn instance_ref<'a>(
    ptr: *const CityLayoutInstance,
) -> Result<&'a CityLayoutInstance, CityLayoutErrorCode> {
    if ptr.is_null() {
        return Err(track_error(&DefaultCityLayoutError::null_pointer("instance")));
    }
    Ok(unsafe { &*ptr })
}

/// Create a new city and return it via out-parameter.
///
/// Parameters
/// - `layout_code`: 0 = concentric ring, 1 = sector, 2 = multiple nuclei.
///   Any other value builds a concentric ring city.
/// - `city_size`: grid side length in cells, must be positive.
/// - `seed`: seed for risk weight sampling; equal seeds give equal cities.
/// - `out_instance`: pointer to receive the created instance. Must be non-null.
///   Set to null on failure.
///
/// Returns
/// - `CityLayoutErrorCode::Ok` (0): success
/// - `CityLayoutErrorCode::NullPointer`: `out_instance` is null
/// - `CityLayoutErrorCode::InvalidCitySize`: `city_size <= 0`
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `city_layout_destroy` exactly once.
///
/// Example (C)
/// ```c
/// CityLayoutInstance* city = NULL;
/// if (city_layout_new(1, 100, 42, &city) != Ok) {
///     fprintf(stderr, "%s\n", city_layout_get_last_error());
///     return;
/// }
/// // ... use city ...
/// city_layout_destroy(city);
/// ```
#[no_mangle]
pub unsafe extern "C" fn city_layout_new(
    layout_code: u8,
    city_size: i32,
    seed: u64,
    out_instance: *mut *mut CityLayoutInstance,
) -> CityLayoutErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("out_instance"));
    }

    match track_result(CityLayoutInstance::new(layout_code, city_size, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            clear_last_error()
        }
        Err(code) => {
            unsafe {
                // Set to null on error
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `city_layout_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `city_layout_new` and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn city_layout_destroy(ptr: *mut CityLayoutInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `city_layout_new`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Replace the fire stations and recompute every cell's distance.
///
/// Parameters
/// - `xy`: interleaved coordinates `[x0, y0, x1, y1, ...]` of length `2 * count`.
/// - `count`: number of stations, must be at least 1.
///
/// Returns
/// - `Ok` on success
/// - `NullPointer` if `instance` or `xy` is null
/// - `EmptyFacilitySet` if `count` is zero
/// - `InvalidFacility` if any coordinate is NaN or infinite
///
/// On failure the previous stations and distances are kept.
///
/// # Safety
/// - `instance` must come from `city_layout_new`.
/// - `xy` must point to at least `2 * count` readable `f64` values.
#[no_mangle]
pub unsafe extern "C" fn city_layout_set_facilities(
    instance: *mut CityLayoutInstance,
    xy: *const f64,
    count: usize,
) -> CityLayoutErrorCode {
    if instance.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("instance"));
    }
    if count == 0 {
        return track_error(&DefaultCityLayoutError::from(
            city_layout_core::CityError::EmptyFacilitySet,
        ));
    }
    if xy.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("xy"));
    }

    // Safe: caller guarantees 2 * count readable values
    let coords = unsafe { slice::from_raw_parts(xy, count * 2) };
    let points = coords
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect();

    let instance = unsafe { &mut *instance };
    let result = FacilitySet::new(points).and_then(|set| instance.city.set_facilities(set));

    match track_result(result.map_err(DefaultCityLayoutError::from)) {
        Ok(()) => clear_last_error(),
        Err(code) => code,
    }
}

/// Add one fire station and recompute every cell's distance.
///
/// Returns `InvalidFacility` if `x` or `y` is not finite.
///
/// # Safety
/// `instance` must come from `city_layout_new`.
#[no_mangle]
pub unsafe extern "C" fn city_layout_add_facility(
    instance: *mut CityLayoutInstance,
    x: f64,
    y: f64,
) -> CityLayoutErrorCode {
    if instance.is_null() {
        return track_error(&DefaultCityLayoutError::null_pointer("instance"));
    }

    let instance = unsafe { &mut *instance };
    let result = instance.city.add_facility(Point2::new(x, y));

    match track_result(result.map_err(DefaultCityLayoutError::from)) {
        Ok(()) => clear_last_error(),
        Err(code) => code,
    }
}

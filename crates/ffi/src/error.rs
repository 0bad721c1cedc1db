use city_layout_core::CityError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait CityLayoutError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> CityLayoutErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `CityLayoutError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultCityLayoutError {
    code: CityLayoutErrorCode,
    msg: String,
}

impl DefaultCityLayoutError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"out_buffer"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: CityLayoutErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a caller buffer whose length does not match the grid.
    ///
    /// # Arguments
    /// * `expected` - Number of cells in the grid
    /// * `actual` - Length supplied by the caller
    pub fn buffer_size_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            code: CityLayoutErrorCode::BufferSizeMismatch,
            msg: format!("Output buffer must hold {expected} values, got {actual}"),
        }
    }
}

impl From<CityError> for DefaultCityLayoutError {
    fn from(error: CityError) -> Self {
        let code = match error {
            CityError::InvalidCitySize(_) => CityLayoutErrorCode::InvalidCitySize,
            CityError::EmptyFacilitySet => CityLayoutErrorCode::EmptyFacilitySet,
            CityError::InvalidFacility { .. } => CityLayoutErrorCode::InvalidFacility,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl CityLayoutError for DefaultCityLayoutError {
    fn code(&self) -> CityLayoutErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by city layout functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityLayoutErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// City size must be strictly positive.
    InvalidCitySize = 2,

    /// At least one facility is required to compute distances.
    EmptyFacilitySet = 3,

    /// A facility coordinate was NaN or infinite.
    InvalidFacility = 4,

    /// Output buffer length does not equal `city_size * city_size`.
    BufferSizeMismatch = 5,
}

impl From<DefaultCityLayoutError> for CityLayoutErrorCode {
    fn from(error: DefaultCityLayoutError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, CityLayoutErrorCode)> = const { RefCell::new((None, CityLayoutErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, CityLayoutErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, CityLayoutErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// CityLayoutInstance* city = NULL;
/// CityLayoutErrorCode err = city_layout_new(0, 100, 42, &city);
/// if (err != Ok) {
///     const char* error = city_layout_get_last_error();
///     if (error) {
///         printf("City creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn city_layout_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn city_layout_get_last_error_code() -> CityLayoutErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

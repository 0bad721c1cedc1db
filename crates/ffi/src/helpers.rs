use crate::error::{with_last_error_mut, CityLayoutError, CityLayoutErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `CityLayoutError` trait.
pub(crate) fn set_last_error(error: &impl CityLayoutError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl CityLayoutError) -> CityLayoutErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called by every FFI entry point that succeeds.
pub(crate) fn clear_last_error() -> CityLayoutErrorCode {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = CityLayoutErrorCode::Ok;
    });
    CityLayoutErrorCode::Ok
}

/// Convert a `Result` into an FFI code, recording the error if there is one.
pub(crate) fn track_result<T, E>(result: Result<T, E>) -> Result<T, CityLayoutErrorCode>
where
    E: CityLayoutError,
{
    result.map_err(|e| track_error(&e))
}

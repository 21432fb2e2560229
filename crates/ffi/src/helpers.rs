use crate::error::{with_last_error_mut, DefaultHearthError, HearthError, HearthErrorCode};
use crate::instance::HearthWorld;
use hearth_core::FireWorld;
use rand::rngs::StdRng;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl HearthError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = HearthErrorCode::Ok;
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &impl HearthError) -> HearthErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultHearthError>) -> Result<T, HearthErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and convert its outcome to an error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> HearthErrorCode
where
    F: FnOnce() -> Result<(), DefaultHearthError>,
{
    match track_result(f()) {
        Ok(()) => HearthErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the world behind a raw pointer.
pub(crate) fn world_from_ptr<'a>(
    ptr: *const HearthWorld,
) -> Result<&'a HearthWorld, DefaultHearthError> {
    // SAFETY: callers pass a pointer from `hearth_world_new` that has not been destroyed.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultHearthError::null_pointer("world"))
}

/// Run `f` with a read lock on the world.
pub(crate) fn with_world<F, R>(instance: &HearthWorld, f: F) -> Result<R, DefaultHearthError>
where
    F: FnOnce(&FireWorld) -> R,
{
    let world = instance
        .world
        .read()
        .map_err(|_| DefaultHearthError::lock_poisoned("world"))?;
    Ok(f(&world))
}

/// Run `f` with a write lock on the world.
pub(crate) fn with_world_mut<F, R>(instance: &HearthWorld, f: F) -> Result<R, DefaultHearthError>
where
    F: FnOnce(&mut FireWorld) -> R,
{
    let mut world = instance
        .world
        .write()
        .map_err(|_| DefaultHearthError::lock_poisoned("world"))?;
    Ok(f(&mut world))
}

/// Run `f` with a write lock on the world and the shared random stream.
///
/// The world lock is always taken first.
pub(crate) fn with_world_and_rng<F, R>(instance: &HearthWorld, f: F) -> Result<R, DefaultHearthError>
where
    F: FnOnce(&mut FireWorld, &mut StdRng) -> R,
{
    let mut world = instance
        .world
        .write()
        .map_err(|_| DefaultHearthError::lock_poisoned("world"))?;
    let mut rng = instance
        .rng
        .lock()
        .map_err(|_| DefaultHearthError::lock_poisoned("rng"))?;
    Ok(f(&mut world, &mut rng))
}

/// Reject NaN, infinities and negative values.
pub(crate) fn non_negative(param_name: &str, value: f32) -> Result<f32, DefaultHearthError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DefaultHearthError::invalid_parameter(param_name, value))
    }
}

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// `code()` is what the C caller receives as a return value, `msg()` is
/// stored in thread-local storage for `hearth_get_last_error`.
pub(crate) trait HearthError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> HearthErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Error code plus a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultHearthError {
    code: HearthErrorCode,
    msg: String,
}

impl DefaultHearthError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_world"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: HearthErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// A lock was poisoned by a panic on another thread.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"world"`, `"rng"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: HearthErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Non-finite or out-of-range numeric argument.
    pub fn invalid_parameter(param_name: &str, value: f32) -> Self {
        Self {
            code: HearthErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' must be finite and non-negative, got {value}"),
        }
    }

    /// No fire with this id exists in the world.
    pub fn unknown_fire(fire_id: u64) -> Self {
        Self {
            code: HearthErrorCode::UnknownFire,
            msg: format!("No fire with id {fire_id}"),
        }
    }
}

impl HearthError for DefaultHearthError {
    fn code(&self) -> HearthErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by hearth functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter passed to function.
    InvalidParameter = 3,

    /// The fire id does not name a fire in this world.
    UnknownFire = 4,
}

impl From<DefaultHearthError> for HearthErrorCode {
    fn from(error: DefaultHearthError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error (C string, code) for this thread.
    /// The CString is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, HearthErrorCode)> = const { RefCell::new((None, HearthErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, HearthErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, HearthErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns null if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next hearth call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// HearthWorld* world = nullptr;
/// if (hearth_world_new(42, &world) != HearthErrorCode::Ok) {
///     const char* error = hearth_get_last_error();
///     if (error) {
///         printf("World creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn hearth_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code for this thread.
#[no_mangle]
pub extern "C" fn hearth_get_last_error_code() -> HearthErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

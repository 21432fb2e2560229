use hearth_core::FireWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, RwLock};
use tracing::info;

use crate::error::{DefaultHearthError, HearthErrorCode};
use crate::helpers::track_error;

/// A world of fires driven from a game engine.
///
/// # Thread Safety
/// The world sits behind an `RwLock`: stat and warmth queries take a read
/// lock, while ticks and fire mutations take the write lock. The random
/// stream has its own `Mutex` and is only locked after the world lock, so
/// calls from several engine threads cannot deadlock.
///
/// ## Unreal Engine Example
/// ```cpp
/// HearthWorld* World = nullptr;
///
/// void AFireManager::BeginPlay() {
///     if (hearth_world_new(Seed, &World) != HearthErrorCode::Ok) {
///         UE_LOG(LogTemp, Error, TEXT("%s"), UTF8_TO_TCHAR(hearth_get_last_error()));
///     }
/// }
///
/// void AFireManager::Tick(float DeltaTime) {
///     hearth_world_advance(World, DeltaTime, Wind, Rain, nullptr);
/// }
///
/// void AFireManager::EndPlay(const EEndPlayReason::Type Reason) {
///     hearth_world_destroy(World);
///     World = nullptr;
/// }
/// ```
pub struct HearthWorld {
    pub(crate) world: RwLock<FireWorld>,
    pub(crate) rng: Mutex<StdRng>,
}

impl HearthWorld {
    pub(crate) fn new(seed: u64) -> Box<Self> {
        info!("Created hearth world with seed {}", seed);
        Box::new(HearthWorld {
            world: RwLock::new(FireWorld::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }
}

/// Create a new, empty fire world.
///
/// - `seed`: seeds the world's random stream. The same seed and the same
///   sequence of calls replay identically.
/// - `out_world`: receives the new world, or null on failure.
///
/// Returns
/// - `HearthErrorCode::Ok` (0) on success
/// - `HearthErrorCode::NullPointer` if `out_world` is null
///
/// # Safety
/// - `out_world` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned world and MUST call `hearth_world_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn hearth_world_new(
    seed: u64,
    out_world: *mut *mut HearthWorld,
) -> HearthErrorCode {
    if out_world.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_world"));
    }

    unsafe {
        *out_world = Box::into_raw(HearthWorld::new(seed));
    }
    HearthErrorCode::Ok
}

/// Destroy a world created by `hearth_world_new`.
///
/// A null pointer is a no-op.
///
/// # Safety
/// - `ptr` MUST have been created by `hearth_world_new` and not destroyed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn hearth_world_destroy(ptr: *mut HearthWorld) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `hearth_world_new`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

//! Bounds checks for clamped quantities (health, ammo).
//!
//! Callers clamp before storing; these checks catch the cases where they
//! did not. Debug builds panic, release builds log and clamp.

use std::fmt::Debug;

use arena_core::error::ArenaError;

/// Return `value` if it lies in `min..=max`. Otherwise report an
/// `InvariantViolation` and return the nearest bound.
pub fn enforce_range<T>(what: &'static str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + Debug,
{
    if value >= min && value <= max {
        return value;
    }

    let err = ArenaError::InvariantViolation {
        what,
        detail: format!("{value:?} outside {min:?}..={max:?}"),
    };
    debug_assert!(false, "{err}");
    log::error!("{err}; clamping");

    if value < min {
        min
    } else {
        max
    }
}

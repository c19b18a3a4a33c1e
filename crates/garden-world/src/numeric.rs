//! Float helpers for the growth and water arithmetic.
//!
//! Growth thresholds, irrigation targets, and cell water levels must match a
//! reference implementation bit-for-bit, so the engine never uses the naive
//! `(a / b).floor()` or `f64::round`:
//!
//! - [`floor_div`] reproduces floored float division computed from the
//!   remainder (so `1.0 // 0.1 == 9.0`, not `10.0`).
//! - [`round_half_even`] rounds ties to the even neighbour.
//! - [`to_cell_water`] stores water at single precision, the way grid cells
//!   hold it.
//!
//! The remaining helpers are the only places where the crate converts
//! between floats and integers.

/// Floored division of two floats, computed from the remainder.
///
/// Returns `NaN` when `b` is zero, like the underlying `a % b`.
pub fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }
    let mut floored = div.floor();
    if div - floored > 0.5 {
        floored += 1.0;
    }
    floored
}

/// Round to the nearest integer, ties to even.
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Narrow a water level to the single-precision value a cell stores.
#[allow(clippy::cast_possible_truncation)]
pub const fn to_cell_water(value: f64) -> f32 {
    value as f32
}

/// Convert a grid index or count to `f64`.
#[allow(clippy::cast_precision_loss)]
pub const fn index_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert an integral float to `i64`, saturating at the type bounds.
///
/// `NaN` maps to zero.
#[allow(clippy::cast_possible_truncation)]
pub const fn saturating_i64(value: f64) -> i64 {
    value as i64
}

/// Convert an integral float to `u64`, saturating at the type bounds.
///
/// Negative values and `NaN` map to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn saturating_u64(value: f64) -> u64 {
    value as u64
}

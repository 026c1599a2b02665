// =============================================================================
// Value Noise
// =============================================================================
// Random values at lattice corners, blended with a smoothing curve.
// Cheapest lattice kernel, with the most visible grid.

use super::Lattice;
use crate::hash::{unit_value_at, value_at};
use crate::interp::Interpolation;

/// Value noise.
///
/// Hashed corner scalars in `[-1, 1)` blended across the `2^d` corners of
/// the containing cell. At an integer lattice point the result is exactly
/// that corner's scalar.
pub fn value(seed: i32, p: &[f32], curve: Interpolation) -> f32 {
    Lattice::floor(p).blend(curve, |corner, _| value_at(corner, seed))
}

/// Value noise in `[0, 1]` with a fixed Hermite curve.
///
/// Building block for the foam, mutant and honey families.
pub fn value01(seed: i32, p: &[f32]) -> f32 {
    Lattice::floor(p).blend(Interpolation::Hermite, |corner, _| {
        unit_value_at(corner, seed)
    })
}

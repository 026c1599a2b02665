use super::{Lattice, dot, soft_clamp};
use crate::hash::{gradient_index, hash_all};
use crate::interp::Interpolation;
use crate::tables::gradient;

/// `sqrt(1.5)`: scales the rescale curve so a raw value of `sqrt(d) / 2`
/// maps to exactly 1 when `add = d / 8`.
const PERLIN_MUL: f32 = 1.224_744_9;

/// Classic gradient (Perlin) noise.
///
/// Blends the dot products of each corner's unit gradient with the offset
/// to the sample point, then rescales with `x·mul / sqrt(add + x²)` to widen
/// the range and soften the bias toward zero.
///
/// Returns exactly 0 at integer lattice points.
pub fn perlin(seed: i32, p: &[f32], curve: Interpolation) -> f32 {
    let dims = p.len();
    let raw = Lattice::floor(p).blend(curve, |corner, offset| {
        dot(gradient(dims, gradient_index(hash_all(corner, seed))), offset)
    });
    soft_clamp(raw, dims as f32 * 0.125, PERLIN_MUL)
}

// =============================================================================
// Composite Families
// =============================================================================
// Foam, mutant and taffy chain d + 1 differently oriented copies of a cheap
// primitive, each copy warped by the previous copy's output. Honey blends
// simplex with value noise.

use super::{dot, simplex, value, value01};
use crate::MAX_DIMENSIONS;
use crate::hash::{hash_all, unit_sample};
use crate::interp::Interpolation;
use crate::tables::{cos_turns, foam_direction, sin_turns};

/// Seed advance between chained copies.
const COPY_SEED_STEP: i32 = 0x9E37_79BD_u32 as i32;

/// Mixed into the seed of honey's value-noise half.
const HONEY_SALT: i32 = 0x2C9E_5A1B;

/// Turns per unit of input for taffy's sine primitive.
const TRILL_RATE: f32 = 0.25;

/// Share of the previous lookup fed into the next lookup's phase. Kept below
/// `1 / 2π` so the per-axis feedback contracts.
const TRILL_FEEDBACK: f32 = 0.05;

/// Share of the previous copy's output added to the next copy in taffy's
/// chain. Foam feeds its copies forward at full strength.
const TAFFY_WARP: f32 = 0.25;

/// Runs the projection-and-feedback chain shared by foam and taffy.
///
/// Projects `p` onto the `d + 1` vertex directions of a regular simplex;
/// copy `k` samples `primitive` at the `d` projections following `k`, with
/// the previous copy's output, scaled by `warp`, added to its first
/// coordinate. Returns the mean of all copies.
#[inline]
fn chain(seed: i32, p: &[f32], warp: f32, primitive: impl Fn(i32, &[f32]) -> f32) -> f32 {
    let dims = p.len();
    let copies = dims + 1;
    let mut projected = [0.0f32; MAX_DIMENSIONS + 1];
    for (k, v) in projected.iter_mut().enumerate().take(copies) {
        *v = dot(foam_direction(dims, k), p);
    }

    let mut q = [0.0f32; MAX_DIMENSIONS];
    let mut previous = 0.0f32;
    let mut sum = 0.0f32;
    for k in 0..copies {
        for (i, x) in q.iter_mut().enumerate().take(dims) {
            *x = projected[(k + 1 + i) % copies];
        }
        q[0] += previous * warp;
        let copy_seed = seed.wrapping_add(COPY_SEED_STEP.wrapping_mul(k as i32));
        previous = primitive(copy_seed, &q[..dims]);
        sum += previous;
    }
    sum / copies as f32
}

/// Maps `r` in `[0, 1]` to `[-1, 1]`, steepening the middle by `sharpness`.
///
/// The slope at `r = 0.5` is `2 · sharpness`; both halves are rational
/// curves mirrored through the center, selected by the sign bit of
/// `0.5 - r` rather than a branch.
#[inline]
fn foam_sharpen(r: f32, sharpness: f32) -> f32 {
    let diff = 0.5 - r;
    let sign = ((diff.to_bits() as i32) >> 31) as f32;
    let one = sign * 2.0 + 1.0;
    (r + sign) / (f32::MIN_POSITIVE - sign + (r + sharpness * diff) * one) - sign - sign - 1.0
}

/// Foam noise.
///
/// A feedback chain of rotated `[0, 1]` value noise copies, averaged and
/// sharpened. Smoother and less grid-aligned than plain value noise.
pub fn foam(seed: i32, p: &[f32], sharpness: f32) -> f32 {
    foam_sharpen(chain(seed, p, 1.0, value01), sharpness)
}

/// Mutant noise: foam with the mutation value as one extra axis.
///
/// Nudging `mutation` changes the output gradually, unlike a seed change.
/// A 6-axis `p` has no room for the extra axis, so the mutation offsets its
/// last axis instead.
pub fn mutant(seed: i32, p: &[f32], mutation: f32, sharpness: f32) -> f32 {
    let dims = p.len();
    let mut q = [0.0f32; MAX_DIMENSIONS];
    q[..dims].copy_from_slice(p);
    if dims < MAX_DIMENSIONS {
        q[dims] = mutation;
        foam(seed, &q[..dims + 1], sharpness)
    } else {
        q[dims - 1] += mutation;
        foam(seed, &q[..dims], sharpness)
    }
}

/// Honey noise: the midpoint of simplex and value noise, folded through
/// `b · (2 - |b|)` to push values away from zero.
pub fn honey(seed: i32, p: &[f32]) -> f32 {
    let b = (simplex(seed, p) + value(seed ^ HONEY_SALT, p, Interpolation::Hermite)) * 0.5;
    b * (2.0 - b.abs())
}

/// Taffy's primitive: one seeded sine or cosine lookup per axis, each
/// phase-shifted by a fraction of the previous lookup. Returns `[0, 1]`.
#[inline]
fn trill(seed: i32, q: &[f32]) -> f32 {
    let mut wave = 0.0f32;
    let mut h = seed;
    for (i, &x) in q.iter().enumerate() {
        h = hash_all(&[i as i32], h);
        let turns = x * TRILL_RATE + unit_sample(h) + wave * TRILL_FEEDBACK;
        wave = if i & 1 == 0 {
            sin_turns(turns)
        } else {
            cos_turns(turns)
        };
    }
    wave * 0.5 + 0.5
}

/// Taffy noise.
///
/// The foam chain with a handful of sine-table lookups standing in for
/// value noise: lower quality, but cheap enough for 5D and 6D. The mean
/// `r` is sharpened as `x / (|x| + (1 - |x|) / sharpness)` with `x = 2r - 1`.
pub fn taffy(seed: i32, p: &[f32], sharpness_inverse: f32) -> f32 {
    let x = chain(seed, p, TAFFY_WARP, trill) * 2.0 - 1.0;
    let ax = x.abs();
    (x / (ax + (1.0 - ax) * sharpness_inverse)).clamp(-1.0, 1.0)
}

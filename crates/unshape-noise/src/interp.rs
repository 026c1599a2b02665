//! Interpolation curves and blending helpers shared by the lattice kernels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Curve applied to fractional lattice offsets before blending corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interpolation {
    /// Straight blend; cheapest, visibly creased at cell borders.
    Linear,
    /// Cubic Hermite "smoothstep": `3t² - 2t³`.
    #[default]
    Hermite,
    /// Quintic "smootherstep": `6t⁵ - 15t⁴ + 10t³`.
    Quintic,
}

impl Interpolation {
    /// All curves in ordinal order.
    pub const ALL: [Interpolation; 3] = [Self::Linear, Self::Hermite, Self::Quintic];

    /// Applies the curve to `t` in `[0, 1]`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Interpolation::Linear => t,
            Interpolation::Hermite => hermite(t),
            Interpolation::Quintic => quintic(t),
        }
    }

    /// Stable integer used by the text encoding.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Inverse of [`ordinal`](Self::ordinal).
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(ordinal).ok()?).copied()
    }
}

/// Cubic Hermite smoothstep, `3t² - 2t³`.
#[inline]
pub fn hermite(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic smootherstep, `6t⁵ - 15t⁴ + 10t³`.
#[inline]
pub fn quintic(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear blend from `a` at `t = 0` to `b` at `t = 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Cubic blend through four evenly spaced samples, evaluated between `b` and `c`.
#[inline]
pub fn cubic_lerp(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let p = (d - c) - (a - b);
    t * t * t * p + t * t * ((a - b) - p) + t * (c - a) + b
}

/// Collapses `2^d` corner values (bit `i` of the index selects the upper
/// corner on axis `i`) into one value by blending along each axis in turn.
///
/// `corners[0]` is returned untouched when every weight is zero.
#[inline]
pub fn multilinear(corners: &mut [f32], weights: &[f32]) -> f32 {
    for axis in (0..weights.len()).rev() {
        let half = 1 << axis;
        let t = weights[axis];
        for j in 0..half {
            corners[j] = lerp(corners[j], corners[j + half], t);
        }
    }
    corners[0]
}

/// Collapses a `4^d` neighborhood (digit `i` in base 4 selects the offset
/// `-1..=2` on axis `i`) with [`cubic_lerp`] along each axis.
#[inline]
pub fn multicubic(samples: &mut [f32], weights: &[f32]) -> f32 {
    for axis in (0..weights.len()).rev() {
        let stride = 1 << (2 * axis);
        let t = weights[axis];
        for j in 0..stride {
            samples[j] = cubic_lerp(
                samples[j],
                samples[j + stride],
                samples[j + 2 * stride],
                samples[j + 3 * stride],
                t,
            );
        }
    }
    samples[0]
}

//! Octave combinators.
//!
//! Each combinator turns a single-octave kernel into multi-octave noise.
//! Octave `i` samples the kernel with seed `seed + i` at coordinates scaled
//! by `lacunarity^i`, optionally rotated by the fixed spiral matrix first.
//! With one octave every combinator returns the raw kernel output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_DIMENSIONS;
use crate::tables::{rotate, sin_turns};

/// How octaves are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FractalType {
    /// Fractal Brownian motion: `Σ kernel · gain^i`, scaled into `[-1, 1]`.
    #[default]
    Fbm,
    /// Like [`Fbm`](Self::Fbm) with each octave folded to `|v|·2 - 1`,
    /// giving puffy, rounded ridges.
    Billow,
    /// Sharp ridges: each octave adds `(1 - |v|)` with halving weights.
    RidgedMulti,
    /// Like [`Fbm`](Self::Fbm), but each octave's coordinates are pushed
    /// around by sine lookups driven by the previous octave's output.
    DomainWarp,
}

impl FractalType {
    /// All policies in ordinal order.
    pub const ALL: [FractalType; 4] = [
        Self::Fbm,
        Self::Billow,
        Self::RidgedMulti,
        Self::DomainWarp,
    ];

    /// Whether this policy is defined for `dims` dimensions.
    pub fn supports(self, dims: usize) -> bool {
        match self {
            FractalType::DomainWarp => (2..=4).contains(&dims),
            _ => (2..=MAX_DIMENSIONS).contains(&dims),
        }
    }

    /// Position in [`ALL`](Self::ALL), as stored in the text encoding.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` when out of range.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(ordinal).ok()?).copied()
    }
}

/// Octave parameters shared by every combinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octaves {
    /// Number of octaves, at least 1.
    pub count: u32,
    /// Coordinate multiplier between octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between octaves.
    pub gain: f32,
    /// `1 / Σ|gain|^i`, see [`fractal_bounding`].
    pub bounding: f32,
    /// Rotate coordinates by the spiral matrix before each rescale.
    pub spiral: bool,
}

impl Octaves {
    /// Octave parameters with the bounding factor computed and no spiral.
    pub fn new(count: u32, lacunarity: f32, gain: f32) -> Self {
        let count = count.max(1);
        Self {
            count,
            lacunarity,
            gain,
            bounding: fractal_bounding(count, gain),
            spiral: false,
        }
    }

    /// Moves `q` to the next octave's coordinates.
    #[inline]
    fn advance(&self, q: &mut [f32]) {
        if self.spiral {
            rotate(q);
        }
        for x in q.iter_mut() {
            *x *= self.lacunarity;
        }
    }
}

/// Reciprocal of the largest possible octave sum, `1 / Σ|gain|^i` for
/// `i` in `0..octaves`.
///
/// Using `|gain|` keeps negative gains bounded; for non-negative gains this
/// is the plain geometric sum.
pub fn fractal_bounding(octaves: u32, gain: f32) -> f32 {
    let gain = gain.abs();
    let mut amp = 1.0f32;
    let mut total = 1.0f32;
    for _ in 1..octaves.max(1) {
        amp *= gain;
        // Once a term no longer moves the sum, no later term will.
        if total + amp == total {
            break;
        }
        total += amp;
    }
    1.0 / total
}

#[inline]
fn copy_coords(p: &[f32]) -> [f32; MAX_DIMENSIONS] {
    let mut q = [0.0f32; MAX_DIMENSIONS];
    q[..p.len()].copy_from_slice(p);
    q
}

#[inline]
fn octave_seed(seed: i32, octave: u32) -> i32 {
    seed.wrapping_add(octave as i32)
}

/// Fractal Brownian motion.
pub fn fbm<F: Fn(i32, &[f32]) -> f32>(kernel: F, seed: i32, p: &[f32], octaves: &Octaves) -> f32 {
    if octaves.count <= 1 {
        return kernel(seed, p);
    }
    let dims = p.len();
    let mut q = copy_coords(p);
    let mut sum = kernel(seed, p);
    let mut amp = 1.0f32;
    for i in 1..octaves.count {
        octaves.advance(&mut q[..dims]);
        amp *= octaves.gain;
        sum += kernel(octave_seed(seed, i), &q[..dims]) * amp;
    }
    sum * octaves.bounding
}

/// Billow: fBm over `|v|·2 - 1`.
pub fn billow<F: Fn(i32, &[f32]) -> f32>(
    kernel: F,
    seed: i32,
    p: &[f32],
    octaves: &Octaves,
) -> f32 {
    if octaves.count <= 1 {
        return kernel(seed, p);
    }
    let dims = p.len();
    let mut q = copy_coords(p);
    let mut sum = kernel(seed, p).abs() * 2.0 - 1.0;
    let mut amp = 1.0f32;
    for i in 1..octaves.count {
        octaves.advance(&mut q[..dims]);
        amp *= octaves.gain;
        sum += (kernel(octave_seed(seed, i), &q[..dims]).abs() * 2.0 - 1.0) * amp;
    }
    sum * octaves.bounding
}

/// Ridged multifractal.
///
/// Ignores gain and the bounding factor: octave weights start at 1 and
/// halve, and the weighted sum of `1 - |v|` is renormalized to `[-1, 1]`.
pub fn ridged<F: Fn(i32, &[f32]) -> f32>(
    kernel: F,
    seed: i32,
    p: &[f32],
    octaves: &Octaves,
) -> f32 {
    if octaves.count <= 1 {
        return kernel(seed, p);
    }
    let dims = p.len();
    let mut q = copy_coords(p);
    let mut sum = 1.0 - kernel(seed, p).abs();
    let mut weight = 1.0f32;
    let mut total = 1.0f32;
    for i in 1..octaves.count {
        octaves.advance(&mut q[..dims]);
        weight *= 0.5;
        total += weight;
        sum += (1.0 - kernel(octave_seed(seed, i), &q[..dims]).abs()) * weight;
    }
    sum * 2.0 / total - 1.0
}

/// Domain warp.
///
/// fBm where, from the second octave on, axis `j` is offset by
/// `sin(j / d + v / 2)` turns, `v` being the previous octave's raw output.
/// The offsets accumulate across octaves.
pub fn domain_warp<F: Fn(i32, &[f32]) -> f32>(
    kernel: F,
    seed: i32,
    p: &[f32],
    octaves: &Octaves,
) -> f32 {
    if octaves.count <= 1 {
        return kernel(seed, p);
    }
    let dims = p.len();
    let phase_step = 1.0 / dims as f32;
    let mut q = copy_coords(p);
    let mut latest = kernel(seed, p);
    let mut sum = latest;
    let mut amp = 1.0f32;
    for i in 1..octaves.count {
        octaves.advance(&mut q[..dims]);
        for (j, x) in q[..dims].iter_mut().enumerate() {
            *x += sin_turns(j as f32 * phase_step + latest * 0.5);
        }
        amp *= octaves.gain;
        latest = kernel(octave_seed(seed, i), &q[..dims]);
        sum += latest * amp;
    }
    sum * octaves.bounding
}

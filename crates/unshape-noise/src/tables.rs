//! Process-wide lookup tables.
//!
//! Nothing here is a hand-copied constant list: gradient sets, spiral
//! rotations, simplex skew factors and foam projection directions are all
//! derived on first use and then shared read-only by every evaluation.

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::MAX_DIMENSIONS;

/// Number of vectors in each gradient table.
pub const GRADIENT_COUNT: usize = 256;

/// Entries in one full turn of the sine table.
pub const SIN_TABLE_SIZE: usize = 4096;
const SIN_MASK: i32 = SIN_TABLE_SIZE as i32 - 1;

/// Seed for the table-building generator. Changing it changes every kernel.
const TABLE_SEED: u64 = 0x5EED_0F_7AB1E5;

// =============================================================================
// Gradients
// =============================================================================

/// Unit gradient vectors, `GRADIENT_COUNT * d` floats for dimension `d`.
static GRADIENTS: Lazy<[Box<[f32]>; MAX_DIMENSIONS + 1]> =
    Lazy::new(|| std::array::from_fn(build_gradients));

fn build_gradients(dims: usize) -> Box<[f32]> {
    match dims {
        0 | 1 => Box::new([]),
        2 => (0..GRADIENT_COUNT)
            .flat_map(|i| {
                let angle = (i as f64 + 0.5) * TAU / GRADIENT_COUNT as f64;
                [angle.cos() as f32, angle.sin() as f32]
            })
            .collect(),
        _ => {
            // Normalized gaussian samples are uniform on the sphere.
            let mut rng = ChaCha8Rng::seed_from_u64(TABLE_SEED ^ dims as u64);
            let mut out = Vec::with_capacity(GRADIENT_COUNT * dims);
            for _ in 0..GRADIENT_COUNT {
                let v = unit_gaussian_vector(&mut rng, dims);
                out.extend(v.iter().map(|&c| c as f32));
            }
            out.into_boxed_slice()
        }
    }
}

fn gaussian(rng: &mut ChaCha8Rng) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn unit_gaussian_vector(rng: &mut ChaCha8Rng, dims: usize) -> Vec<f64> {
    loop {
        let v: Vec<f64> = (0..dims).map(|_| gaussian(rng)).collect();
        let len = v.iter().map(|c| c * c).sum::<f64>().sqrt();
        if len > 1e-6 {
            return v.into_iter().map(|c| c / len).collect();
        }
    }
}

/// Returns gradient `index` (masked to the table size) for `dims` dimensions.
#[inline]
pub fn gradient(dims: usize, index: usize) -> &'static [f32] {
    let start = (index & (GRADIENT_COUNT - 1)) * dims;
    &GRADIENTS[dims][start..start + dims]
}

// =============================================================================
// Sine table
// =============================================================================

static SIN_TABLE: Lazy<Box<[f32]>> = Lazy::new(|| {
    (0..SIN_TABLE_SIZE)
        .map(|i| (i as f64 * TAU / SIN_TABLE_SIZE as f64).sin() as f32)
        .collect()
});

/// Sine of `turns` full turns, linearly interpolated from the shared table.
#[inline]
pub fn sin_turns(turns: f32) -> f32 {
    let x = turns * SIN_TABLE_SIZE as f32;
    let floor = x.floor();
    let i = floor as i32;
    let frac = x - floor;
    let a = SIN_TABLE[(i & SIN_MASK) as usize];
    let b = SIN_TABLE[(i.wrapping_add(1) & SIN_MASK) as usize];
    a + (b - a) * frac
}

/// Cosine of `turns` full turns.
#[inline]
pub fn cos_turns(turns: f32) -> f32 {
    sin_turns(turns + 0.25)
}

// =============================================================================
// Simplex constants
// =============================================================================

/// Skew factors and falloff for one simplex dimensionality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexConstants {
    /// `(sqrt(d + 1) - 1) / d`, maps the input onto the simplex lattice.
    pub skew: f32,
    /// `(1 - 1 / sqrt(d + 1)) / d`, maps lattice points back.
    pub unskew: f32,
    /// Squared radius beyond which a corner contributes nothing.
    pub radius_sq: f32,
    /// Multiplier taking the raw corner sum to roughly `[-1, 1]`.
    pub scale: f32,
}

static SIMPLEX: Lazy<[SimplexConstants; MAX_DIMENSIONS + 1]> =
    Lazy::new(|| std::array::from_fn(simplex_constants_for));

fn simplex_constants_for(dims: usize) -> SimplexConstants {
    let d = dims.max(1) as f64;
    let root = (d + 1.0).sqrt();
    let radius_sq: f64 = if dims <= 2 { 0.5 } else { 0.6 };
    // A lone corner peaks where its distance is a third of the radius.
    let peak = (radius_sq * 8.0 / 9.0).powi(4) * radius_sq.sqrt() / 3.0;
    SimplexConstants {
        skew: ((root - 1.0) / d) as f32,
        unskew: ((1.0 - 1.0 / root) / d) as f32,
        radius_sq: radius_sq as f32,
        scale: (2.0 / (peak * (d + 1.0))) as f32,
    }
}

/// Simplex constants for `dims` dimensions.
#[inline]
pub fn simplex_constants(dims: usize) -> &'static SimplexConstants {
    &SIMPLEX[dims]
}

// =============================================================================
// Spiral rotations
// =============================================================================

/// Row-major orthonormal `d x d` matrices applied between fractal octaves.
static ROTATIONS: Lazy<[Box<[f32]>; MAX_DIMENSIONS + 1]> =
    Lazy::new(|| std::array::from_fn(build_rotation));

fn build_rotation(dims: usize) -> Box<[f32]> {
    let mut rng = ChaCha8Rng::seed_from_u64(TABLE_SEED.rotate_left(17) ^ dims as u64);
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(dims);
    while rows.len() < dims {
        let mut v: Vec<f64> = (0..dims).map(|_| rng.random_range(-1.0..1.0)).collect();
        for r in &rows {
            let dot: f64 = v.iter().zip(r).map(|(a, b)| a * b).sum();
            v.iter_mut().zip(r).for_each(|(a, b)| *a -= dot * b);
        }
        let len = v.iter().map(|c| c * c).sum::<f64>().sqrt();
        // Nearly dependent draws are discarded and redrawn.
        if len > 1e-3 {
            rows.push(v.into_iter().map(|c| c / len).collect());
        }
    }
    // Flipping one row turns a reflection into a proper rotation.
    if determinant(rows.iter().flatten().copied().collect(), dims) < 0.0 {
        rows[0].iter_mut().for_each(|c| *c = -*c);
    }
    rows.into_iter().flatten().map(|c| c as f32).collect()
}

/// Determinant of a row-major `dims x dims` matrix by partial pivoting.
fn determinant(mut m: Vec<f64>, dims: usize) -> f64 {
    let mut det = 1.0;
    for col in 0..dims {
        let pivot = (col..dims)
            .max_by(|&a, &b| m[a * dims + col].abs().total_cmp(&m[b * dims + col].abs()))
            .unwrap_or(col);
        if pivot != col {
            for k in 0..dims {
                m.swap(pivot * dims + k, col * dims + k);
            }
            det = -det;
        }
        let diag = m[col * dims + col];
        if diag == 0.0 {
            return 0.0;
        }
        det *= diag;
        for row in col + 1..dims {
            let factor = m[row * dims + col] / diag;
            for k in col..dims {
                m[row * dims + k] -= factor * m[col * dims + k];
            }
        }
    }
    det
}

/// Rotates `p` in place by the fixed spiral matrix for its dimension.
#[inline]
pub fn rotate(p: &mut [f32]) {
    let dims = p.len();
    let m = &ROTATIONS[dims];
    let mut out = [0.0f32; MAX_DIMENSIONS];
    for (i, o) in out.iter_mut().enumerate().take(dims) {
        let row = &m[i * dims..(i + 1) * dims];
        *o = row.iter().zip(p.iter()).map(|(a, b)| a * b).sum();
    }
    p.copy_from_slice(&out[..dims]);
}

// =============================================================================
// Foam projection directions
// =============================================================================

/// For each `d`, the `d + 1` unit vertex directions of a regular simplex
/// centered on the origin, stored as `(d + 1) * d` floats.
static FOAM_DIRECTIONS: Lazy<[Box<[f32]>; MAX_DIMENSIONS + 1]> =
    Lazy::new(|| std::array::from_fn(build_foam_directions));

fn build_foam_directions(dims: usize) -> Box<[f32]> {
    if dims < 2 {
        return Box::new([]);
    }
    let n = dims + 1;
    // Orthonormal basis of the hyperplane sum(x) = 0 in n dimensions.
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(dims);
    for j in 0..dims {
        let mut v = vec![0.0f64; n];
        v[j] = 1.0;
        v[j + 1] = -1.0;
        for b in &basis {
            let dot: f64 = v.iter().zip(b).map(|(a, b)| a * b).sum();
            v.iter_mut().zip(b).for_each(|(a, b)| *a -= dot * b);
        }
        let len = v.iter().map(|c| c * c).sum::<f64>().sqrt();
        basis.push(v.into_iter().map(|c| c / len).collect());
    }
    // Vertex k projects onto basis j as basis[j][k], since each basis vector
    // is orthogonal to the centroid.
    let mut out = Vec::with_capacity(n * dims);
    for k in 0..n {
        let v: Vec<f64> = basis.iter().map(|b| b[k]).collect();
        let len = v.iter().map(|c| c * c).sum::<f64>().sqrt();
        out.extend(v.iter().map(|c| (c / len) as f32));
    }
    out.into_boxed_slice()
}

/// Projection direction `k` (of `dims + 1`) for a `dims`-dimensional input.
#[inline]
pub fn foam_direction(dims: usize, k: usize) -> &'static [f32] {
    &FOAM_DIRECTIONS[dims][k * dims..(k + 1) * dims]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: &[f32]) -> f32 {
        v.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    #[test]
    fn test_gradients_are_unit_length() {
        for dims in 2..=MAX_DIMENSIONS {
            for i in 0..GRADIENT_COUNT {
                let g = gradient(dims, i);
                assert_eq!(g.len(), dims);
                assert!((length(g) - 1.0).abs() < 1e-5, "{}D gradient {}", dims, i);
            }
        }
    }

    #[test]
    fn test_gradients_are_spread() {
        // Mean of a well-spread unit set sits near the origin.
        for dims in 2..=MAX_DIMENSIONS {
            let mut mean = [0.0f32; MAX_DIMENSIONS];
            for i in 0..GRADIENT_COUNT {
                for (m, c) in mean.iter_mut().zip(gradient(dims, i)) {
                    *m += c / GRADIENT_COUNT as f32;
                }
            }
            assert!(length(&mean[..dims]) < 0.2, "{}D gradients biased", dims);
        }
    }

    #[test]
    fn test_sin_table() {
        assert!(sin_turns(0.0).abs() < 1e-6);
        assert!((sin_turns(0.25) - 1.0).abs() < 1e-6);
        assert!((sin_turns(0.75) + 1.0).abs() < 1e-6);
        assert!((cos_turns(0.0) - 1.0).abs() < 1e-6);
        assert!((sin_turns(-0.25) + 1.0).abs() < 1e-6);
        for i in 0..1000 {
            let t = i as f32 * 0.0137 - 5.0;
            let exact = (t * std::f32::consts::TAU).sin();
            assert!((sin_turns(t) - exact).abs() < 1e-3, "t = {}", t);
        }
    }

    #[test]
    fn test_simplex_2d_constants() {
        let c = simplex_constants(2);
        assert!((c.skew - 0.366_025_4).abs() < 1e-6);
        assert!((c.unskew - 0.211_324_87).abs() < 1e-6);
        let c3 = simplex_constants(3);
        assert!((c3.skew - 1.0 / 3.0).abs() < 1e-6);
        assert!((c3.unskew - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotations_are_orthonormal() {
        for dims in 2..=MAX_DIMENSIONS {
            let m = &ROTATIONS[dims];
            for i in 0..dims {
                for j in 0..dims {
                    let dot: f32 = (0..dims).map(|k| m[i * dims + k] * m[j * dims + k]).sum();
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!((dot - expected).abs() < 1e-5, "{}D rows {} {}", dims, i, j);
                }
            }
            let wide: Vec<f64> = m.iter().map(|&c| c as f64).collect();
            let det = determinant(wide, dims);
            assert!((det - 1.0).abs() < 1e-4, "{}D determinant {}", dims, det);
        }
    }

    #[test]
    fn test_determinant() {
        assert_eq!(determinant(vec![1.0, 0.0, 0.0, 1.0], 2), 1.0);
        assert_eq!(determinant(vec![0.0, 1.0, 1.0, 0.0], 2), -1.0);
        let m = vec![2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0];
        assert!((determinant(m, 3) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let mut p = [1.0, -2.0, 0.5, 3.0];
        let before = length(&p);
        rotate(&mut p);
        assert!((length(&p) - before).abs() < 1e-4);
    }

    #[test]
    fn test_foam_directions_form_regular_simplex() {
        for dims in 2..=MAX_DIMENSIONS {
            let n = dims + 1;
            let mut sum = [0.0f32; MAX_DIMENSIONS];
            for k in 0..n {
                let u = foam_direction(dims, k);
                assert!((length(u) - 1.0).abs() < 1e-5);
                for (s, c) in sum.iter_mut().zip(u) {
                    *s += c;
                }
                for other in 0..k {
                    let dot: f32 = u.iter().zip(foam_direction(dims, other)).map(|(a, b)| a * b).sum();
                    assert!((dot + 1.0 / dims as f32).abs() < 1e-5, "{}D pair {} {}", dims, k, other);
                }
            }
            assert!(length(&sum[..dims]) < 1e-5);
        }
    }
}

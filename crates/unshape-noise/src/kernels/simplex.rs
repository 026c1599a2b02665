use super::{dot, soft_clamp};
use crate::MAX_DIMENSIONS;
use crate::hash::{gradient_index, hash_all};
use crate::tables::{gradient, simplex_constants};

/// Simplex noise.
///
/// Skews the input onto the simplex lattice and sums
/// `(r² - |x|²)⁴ · (g · x)` over the `d + 1` corners of the containing
/// simplex. The corners are found by ranking the skewed fractional
/// coordinates against each other, so no per-dimension branch table is
/// needed.
pub fn simplex(seed: i32, p: &[f32]) -> f32 {
    let dims = p.len();
    let k = simplex_constants(dims);

    let s = p.iter().sum::<f32>() * k.skew;
    let mut cell = [0i32; MAX_DIMENSIONS];
    for (c, &x) in cell.iter_mut().zip(p) {
        *c = (x + s).floor() as i32;
    }
    let t = cell[..dims].iter().map(|&c| c as f32).sum::<f32>() * k.unskew;

    let mut origin = [0.0f32; MAX_DIMENSIONS];
    for i in 0..dims {
        origin[i] = p[i] - (cell[i] as f32 - t);
    }

    // rank[i] counts the axes whose offset is smaller than axis i's.
    let mut rank = [0usize; MAX_DIMENSIONS];
    for i in 0..dims {
        for j in i + 1..dims {
            if origin[i] > origin[j] {
                rank[i] += 1;
            } else {
                rank[j] += 1;
            }
        }
    }

    let mut sum = 0.0f32;
    let mut corner = [0i32; MAX_DIMENSIONS];
    let mut offset = [0.0f32; MAX_DIMENSIONS];
    for step in 0..=dims {
        let unskew = step as f32 * k.unskew;
        let mut dist_sq = 0.0f32;
        for i in 0..dims {
            // The step-th corner advances the `step` highest-ranked axes.
            let advance = (rank[i] + step >= dims) as i32;
            corner[i] = cell[i].wrapping_add(advance);
            offset[i] = origin[i] - advance as f32 + unskew;
            dist_sq += offset[i] * offset[i];
        }
        let falloff = k.radius_sq - dist_sq;
        if falloff > 0.0 {
            let g = gradient(dims, gradient_index(hash_all(&corner[..dims], seed)));
            let f2 = falloff * falloff;
            sum += f2 * f2 * dot(g, &offset[..dims]);
        }
    }

    soft_clamp(sum * k.scale, 1.0, std::f32::consts::SQRT_2)
}

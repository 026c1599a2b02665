use crate::MAX_DIMENSIONS;
use crate::hash::{PointHash, signed_sample};
use crate::interp::multicubic;

/// Largest `4^d` neighborhood.
const MAX_NEIGHBORHOOD: usize = 1 << (2 * MAX_DIMENSIONS);

/// Per-axis bound on cubic overshoot.
const CUBIC_BOUND: f32 = 2.0 / 3.0;

/// Cubic noise.
///
/// Reads the `4^d` lattice neighborhood through `hasher`, blends it with a
/// cubic curve along each axis in turn, and squashes the result with
/// `e / (1 + |e|)`, where `sharpness` scales `e` beforehand.
pub fn cubic(seed: i32, p: &[f32], hasher: &dyn PointHash, sharpness: f32) -> f32 {
    let dims = p.len();
    let mut cell = [0i32; MAX_DIMENSIONS];
    let mut weights = [0.0f32; MAX_DIMENSIONS];
    for i in 0..dims {
        let f = p[i].floor();
        cell[i] = f as i32;
        weights[i] = p[i] - f;
    }

    let count = 1 << (2 * dims);
    let mut samples = [0.0f32; MAX_NEIGHBORHOOD];
    let mut corner = [0i32; MAX_DIMENSIONS];
    for (index, sample) in samples.iter_mut().enumerate().take(count) {
        for i in 0..dims {
            let digit = ((index >> (2 * i)) & 3) as i32;
            corner[i] = cell[i].wrapping_add(digit - 1);
        }
        *sample = signed_sample(hasher.hash(&corner[..dims], seed));
    }

    let raw = multicubic(&mut samples[..count], &weights[..dims]);
    let e = raw * CUBIC_BOUND.powi(dims as i32) * sharpness * 2.0;
    e / (1.0 + e.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DefaultPointHash;

    /// Ignores the y axis, producing stripes.
    #[derive(Debug)]
    struct StripeHash;

    impl PointHash for StripeHash {
        fn hash(&self, coords: &[i32], seed: i32) -> i32 {
            crate::hash::hash_all(&coords[..1], seed)
        }
    }

    #[test]
    fn test_cubic_range() {
        for dims in 2..=4 {
            let mut p = [0.0f32; 6];
            for i in 0..1500 {
                for (axis, x) in p.iter_mut().enumerate().take(dims) {
                    *x = i as f32 * (0.113 + 0.029 * axis as f32) - 30.0;
                }
                let v = cubic(5, &p[..dims], &DefaultPointHash, 1.0);
                assert!(v > -1.0 && v < 1.0, "{}D cubic {}", dims, v);
            }
        }
    }

    #[test]
    fn test_cubic_uses_point_hash() {
        let a = cubic(5, &[1.3, 0.2], &StripeHash, 1.0);
        let b = cubic(5, &[1.3, 9.7], &StripeHash, 1.0);
        assert_eq!(a, b);
        assert_ne!(
            cubic(5, &[1.3, 0.2], &DefaultPointHash, 1.0),
            cubic(5, &[1.3, 9.7], &DefaultPointHash, 1.0)
        );
    }

    #[test]
    fn test_cubic_sharpness_steepens() {
        let p = [4.4, 1.7];
        let soft = cubic(1, &p, &DefaultPointHash, 0.5);
        let sharp = cubic(1, &p, &DefaultPointHash, 4.0);
        assert!(sharp.abs() >= soft.abs());
        assert_eq!(soft.signum(), sharp.signum());
    }
}

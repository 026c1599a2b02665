use crate::MAX_DIMENSIONS;
use crate::hash::value_at;

/// White noise: an independent hashed value for every distinct coordinate.
///
/// Hashes the raw float bit patterns, so even adjacent representable
/// inputs are uncorrelated. Returns values in `[-1, 1)`.
pub fn white(seed: i32, p: &[f32]) -> f32 {
    let mut bits = [0i32; MAX_DIMENSIONS];
    for (b, &x) in bits.iter_mut().zip(p) {
        let raw = x.to_bits();
        *b = (raw ^ (raw >> 16)) as i32;
    }
    value_at(&bits[..p.len()], seed)
}

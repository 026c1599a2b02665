//! Integer hashes over lattice coordinates.
//!
//! Every kernel reduces a lattice corner plus a seed to a 32-bit hash with
//! [`hash_all`], then narrows it:
//!
//! - [`signed_sample`] keeps the top 10 bits as a value in `[-1, 1)`
//! - [`unit_sample`] keeps the top 10 bits as a value in `[0, 1)`
//! - [`gradient_index`] keeps the top 8 bits as an index into a gradient table
//!
//! All arithmetic wraps on `i32` so bit patterns are reproducible.

use std::fmt::Debug;

/// Per-axis multipliers, one per supported dimension.
const AXIS_MULTIPLIERS: [i32; 6] = [0x1827F5, 0x123C21, 0x1B983B, 0x1E6F21, 0x1957A7, 0x1ABB09];

const AVALANCHE_XOR: i32 = 0xD1B5_4A35_u32 as i32;
const AVALANCHE_MUL: i32 = 0x125493;

/// Hashes lattice coordinates (up to six axes) together with a seed.
///
/// Adjacent lattice points produce uncorrelated hashes.
#[inline]
pub fn hash_all(coords: &[i32], seed: i32) -> i32 {
    let mut s = seed;
    for (&c, &m) in coords.iter().zip(AXIS_MULTIPLIERS.iter()) {
        s ^= c.wrapping_mul(m);
    }
    avalanche(s)
}

#[inline]
fn avalanche(s: i32) -> i32 {
    let s = (s ^ s.rotate_left(19) ^ s.rotate_left(5) ^ AVALANCHE_XOR).wrapping_mul(AVALANCHE_MUL);
    s ^ ((s as u32) >> 11) as i32
}

/// Maps a hash to `[-1, 1)` using its top 10 bits.
#[inline]
pub fn signed_sample(hash: i32) -> f32 {
    (hash >> 22) as f32 * (1.0 / 512.0)
}

/// Maps a hash to `[0, 1)` using its top 10 bits.
#[inline]
pub fn unit_sample(hash: i32) -> f32 {
    ((hash as u32) >> 22) as f32 * (1.0 / 1024.0)
}

/// Narrows a hash to an index into a 256-entry gradient table.
#[inline]
pub fn gradient_index(hash: i32) -> usize {
    ((hash as u32) >> 24) as usize
}

/// Hashed scalar in `[-1, 1)` for a lattice point.
#[inline]
pub fn value_at(coords: &[i32], seed: i32) -> f32 {
    signed_sample(hash_all(coords, seed))
}

/// Hashed scalar in `[0, 1)` for a lattice point.
#[inline]
pub fn unit_value_at(coords: &[i32], seed: i32) -> f32 {
    unit_sample(hash_all(coords, seed))
}

/// A swappable lattice hash.
///
/// Only the cubic family routes its corner lookups through this trait,
/// which lets callers substitute deliberately flawed grids for effect.
/// Implementations must return a full-width hash; the cubic kernel reads
/// its top bits through [`signed_sample`].
pub trait PointHash: Debug + Send + Sync {
    /// Hashes `coords` (2 to 6 axes) with `seed`.
    fn hash(&self, coords: &[i32], seed: i32) -> i32;
}

/// The standard avalanche hash, identical to [`hash_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultPointHash;

impl PointHash for DefaultPointHash {
    #[inline]
    fn hash(&self, coords: &[i32], seed: i32) -> i32 {
        hash_all(coords, seed)
    }
}

// =============================================================================
// Cellular / Voronoi Noise
// =============================================================================
// Distances to jittered feature points, one per lattice cell.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::simplex;
use crate::MAX_DIMENSIONS;
use crate::hash::{gradient_index, hash_all, signed_sample};
use crate::tables::gradient;

/// How far a feature point may sit from its cell center.
const JITTER: f32 = 0.43;

/// Gain applied to the merged sum before squashing.
const MERGE_GAIN: f32 = 2.0;

/// Distance metric between a sample and a feature point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellularDistance {
    /// Squared Euclidean distance; round cells.
    #[default]
    Euclidean,
    /// Sum of absolute differences; diamond-shaped cells.
    Manhattan,
    /// Euclidean plus Manhattan; rounded diamonds.
    Natural,
}

impl CellularDistance {
    /// All metrics in ordinal order.
    pub const ALL: [CellularDistance; 3] = [Self::Euclidean, Self::Manhattan, Self::Natural];

    /// Distance for the offset `delta`. Euclidean is left squared.
    #[inline]
    pub fn measure(self, delta: &[f32]) -> f32 {
        match self {
            CellularDistance::Euclidean => delta.iter().map(|d| d * d).sum(),
            CellularDistance::Manhattan => delta.iter().map(|d| d.abs()).sum(),
            CellularDistance::Natural => delta.iter().map(|d| d.abs() + d * d).sum(),
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

/// What a cellular evaluation reports.
///
/// The `Distance2*` modes combine the nearest (`d0`) and second-nearest
/// (`d1`) distances and highlight cell edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellularReturn {
    /// Hashed scalar of the owning cell; flat-shaded cells.
    #[default]
    CellValue,
    /// Simplex noise sampled at the owning cell's feature point.
    NoiseLookup,
    /// `d0 - 1`.
    Distance,
    /// `d1 - 1`.
    Distance2,
    /// `(d0 + d1) / 2 - 1`.
    Distance2Add,
    /// `d1 - d0 - 1`.
    Distance2Sub,
    /// `d0 · d1 / 2 - 1`.
    Distance2Mul,
    /// `d0 / d1 - 1`.
    Distance2Div,
    /// Smooth sum over nearby cells of `(1 - d)³` times each cell's signed
    /// value, so neighboring cells merge into blobs.
    Merge,
}

impl CellularReturn {
    /// All modes in ordinal order.
    pub const ALL: [CellularReturn; 9] = [
        Self::CellValue,
        Self::NoiseLookup,
        Self::Distance,
        Self::Distance2,
        Self::Distance2Add,
        Self::Distance2Sub,
        Self::Distance2Mul,
        Self::Distance2Div,
        Self::Merge,
    ];

    /// Position in [`ALL`](Self::ALL), as stored in the text encoding.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` when out of range.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(ordinal).ok()?).copied()
    }
}

/// Cellular (Voronoi) noise.
///
/// Visits the `3^d` cells around the nearest lattice point. Each cell holds
/// one feature point, offset from the cell center by a hashed unit vector
/// scaled by a fixed jitter.
pub fn cellular(
    seed: i32,
    p: &[f32],
    distance: CellularDistance,
    mode: CellularReturn,
) -> f32 {
    let dims = p.len();
    let mut center = [0i32; MAX_DIMENSIONS];
    for (c, &x) in center.iter_mut().zip(p) {
        *c = x.round() as i32;
    }

    let mut d0 = f32::MAX;
    let mut d1 = f32::MAX;
    let mut owner_hash = 0i32;
    let mut owner_point = [0.0f32; MAX_DIMENSIONS];
    let mut merged = 0.0f32;

    let mut cell = [0i32; MAX_DIMENSIONS];
    let mut point = [0.0f32; MAX_DIMENSIONS];
    let mut delta = [0.0f32; MAX_DIMENSIONS];
    for n in 0..3usize.pow(dims as u32) {
        let mut rest = n;
        for i in 0..dims {
            cell[i] = center[i].wrapping_add((rest % 3) as i32 - 1);
            rest /= 3;
        }
        let h = hash_all(&cell[..dims], seed);
        let jitter = gradient(dims, gradient_index(h));
        for i in 0..dims {
            point[i] = cell[i] as f32 + jitter[i] * JITTER;
            delta[i] = point[i] - p[i];
        }
        let dist = distance.measure(&delta[..dims]);

        if mode == CellularReturn::Merge {
            let falloff = (1.0 - dist).max(0.0);
            merged += falloff * falloff * falloff * cell_value(h);
        }
        if dist < d0 {
            d1 = d0;
            d0 = dist;
            owner_hash = h;
            owner_point = point;
        } else if dist < d1 {
            d1 = dist;
        }
    }

    let out = match mode {
        CellularReturn::CellValue => cell_value(owner_hash),
        CellularReturn::NoiseLookup => simplex(seed, &owner_point[..dims]),
        CellularReturn::Distance => d0 - 1.0,
        CellularReturn::Distance2 => d1 - 1.0,
        CellularReturn::Distance2Add => (d1 + d0) * 0.5 - 1.0,
        CellularReturn::Distance2Sub => d1 - d0 - 1.0,
        CellularReturn::Distance2Mul => d1 * d0 * 0.5 - 1.0,
        CellularReturn::Distance2Div => d0 / d1.max(f32::MIN_POSITIVE) - 1.0,
        CellularReturn::Merge => {
            let m = merged * MERGE_GAIN;
            m / (1.0 + m.abs())
        }
    };
    out.clamp(-1.0, 1.0)
}

/// Signed cell scalar from the hash bits below the gradient index.
#[inline]
fn cell_value(hash: i32) -> f32 {
    signed_sample(hash << 8)
}

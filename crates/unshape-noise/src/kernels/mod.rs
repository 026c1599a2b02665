//! Single-octave noise kernels.
//!
//! Every kernel is a pure function of a seed and a coordinate slice of 2 to
//! 6 axes, already scaled by frequency. Outputs stay within `[-1, 1]`
//! except [`value01`], which stays within `[0, 1]`.
//!
//! The [`Noise`](crate::Noise) dispatcher picks which kernel applies and
//! restricts some of them to fewer dimensions; calling them directly with
//! any slice length in `2..=6` is still well defined.

mod cellular;
mod composite;
mod cubic;
mod perlin;
mod simplex;
mod value;
mod white;

pub use cellular::{CellularDistance, CellularReturn, cellular};
pub use composite::{foam, honey, mutant, taffy};
pub use cubic::cubic;
pub use perlin::perlin;
pub use simplex::simplex;
pub use value::{value, value01};
pub use white::white;

use crate::MAX_DIMENSIONS;
use crate::interp::{Interpolation, multilinear};

/// A point split into its lattice cell and the fractional offset inside it.
pub(crate) struct Lattice {
    dims: usize,
    cell: [i32; MAX_DIMENSIONS],
    frac: [f32; MAX_DIMENSIONS],
}

impl Lattice {
    /// Floors every axis of `p`.
    #[inline]
    pub(crate) fn floor(p: &[f32]) -> Self {
        let mut cell = [0; MAX_DIMENSIONS];
        let mut frac = [0.0; MAX_DIMENSIONS];
        for (i, &x) in p.iter().enumerate() {
            let f = x.floor();
            cell[i] = f as i32;
            frac[i] = x - f;
        }
        Self {
            dims: p.len(),
            cell,
            frac,
        }
    }

    #[inline]
    pub(crate) fn frac(&self) -> &[f32] {
        &self.frac[..self.dims]
    }

    /// Evaluates `corner` at each of the `2^d` cell corners and blends the
    /// results with `curve` applied to the fractional offsets.
    ///
    /// `corner` receives the corner's lattice coordinates and the offset
    /// from that corner to the sample point.
    #[inline]
    pub(crate) fn blend(
        &self,
        curve: Interpolation,
        mut corner: impl FnMut(&[i32], &[f32]) -> f32,
    ) -> f32 {
        let dims = self.dims;
        let mut weights = [0.0; MAX_DIMENSIONS];
        for (w, &t) in weights.iter_mut().zip(self.frac()) {
            *w = curve.apply(t);
        }

        let mut values = [0.0; 1 << MAX_DIMENSIONS];
        let mut coords = [0; MAX_DIMENSIONS];
        let mut offset = [0.0; MAX_DIMENSIONS];
        for (mask, v) in values.iter_mut().enumerate().take(1 << dims) {
            for i in 0..dims {
                let bit = (mask >> i) & 1;
                coords[i] = self.cell[i].wrapping_add(bit as i32);
                offset[i] = self.frac[i] - bit as f32;
            }
            *v = corner(&coords[..dims], &offset[..dims]);
        }
        multilinear(&mut values[..1 << dims], &weights[..dims])
    }
}

#[inline]
pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `x * mul / sqrt(add + x²)`, clamped to `[-1, 1]`.
///
/// Chosen constants put the theoretical extreme of `x` at exactly 1.
#[inline]
pub(crate) fn soft_clamp(x: f32, add: f32, mul: f32) -> f32 {
    (x * mul / (add + x * x).sqrt()).clamp(-1.0, 1.0)
}

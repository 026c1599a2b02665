//! Gradient perturbation: warps coordinates before they are sampled.
//!
//! Each axis is pushed by the matching component of a lattice gradient
//! vector, blended across the cell with the configured interpolation curve.
//! Feeding the warped point into [`Noise::noise`] gives swirled, organic
//! distortion of any family.

use glam::{Vec2, Vec3};

use crate::hash::{gradient_index, hash_all};
use crate::interp::Interpolation;
use crate::kernels::Lattice;
use crate::noise::Noise;
use crate::tables::gradient;
use crate::{MAX_DIMENSIONS, MIN_DIMENSIONS};

/// Offsets `p` in place by one octave of gradient perturbation.
fn perturb_octave(
    seed: i32,
    amplitude: f32,
    frequency: f32,
    curve: Interpolation,
    p: &mut [f32],
) {
    let dims = p.len();
    let mut scaled = [0.0f32; MAX_DIMENSIONS];
    for (s, &x) in scaled.iter_mut().zip(p.iter()) {
        *s = x * frequency;
    }
    let lattice = Lattice::floor(&scaled[..dims]);
    for (axis, x) in p.iter_mut().enumerate() {
        let offset = lattice.blend(curve, |corner, _| {
            gradient(dims, gradient_index(hash_all(corner, seed)))[axis]
        });
        *x += offset * amplitude;
    }
}

fn dims_supported(p: &[f32]) -> bool {
    let ok = (MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&p.len());
    if !ok {
        tracing::trace!(dimensions = p.len(), "perturbation skipped");
    }
    ok
}

impl Noise {
    /// Warps `p` (2 to 6 axes) in place by up to
    /// [`perturb_amplitude`](Self::perturb_amplitude) along each axis.
    ///
    /// Slices outside `2..=6` are left unchanged.
    pub fn perturb(&self, p: &mut [f32]) {
        if dims_supported(p) {
            perturb_octave(
                self.seed(),
                self.perturb_amplitude(),
                self.frequency(),
                self.interpolation(),
                p,
            );
        }
    }

    /// Fractal perturbation: one warp per octave, each applied to the
    /// output of the last.
    ///
    /// Octave `i` uses seed `seed + i`, frequency `frequency · lacunarity^i`
    /// and amplitude `perturb_amplitude · bounding · gain^i`.
    pub fn perturb_fractal(&self, p: &mut [f32]) {
        if !dims_supported(p) {
            return;
        }
        let mut amplitude = self.perturb_amplitude() * self.fractal_bounding();
        let mut frequency = self.frequency();
        for i in 0..self.octaves() {
            perturb_octave(
                self.seed().wrapping_add(i as i32),
                amplitude,
                frequency,
                self.interpolation(),
                p,
            );
            frequency *= self.lacunarity();
            amplitude *= self.gain();
        }
    }

    /// Returns `p` warped by [`perturb`](Self::perturb).
    pub fn perturb2(&self, p: Vec2) -> Vec2 {
        let mut a = p.to_array();
        self.perturb(&mut a);
        Vec2::from_array(a)
    }

    /// Returns `p` warped by [`perturb`](Self::perturb).
    pub fn perturb3(&self, p: Vec3) -> Vec3 {
        let mut a = p.to_array();
        self.perturb(&mut a);
        Vec3::from_array(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amplitude_is_identity() {
        let n = Noise::new(3).with_perturb_amplitude(0.0);
        let mut p = [12.5, -4.25, 7.0];
        n.perturb(&mut p);
        assert_eq!(p, [12.5, -4.25, 7.0]);
    }

    #[test]
    fn test_offsets_bounded_by_amplitude() {
        let n = Noise::new(3).with_perturb_amplitude(2.5).with_frequency(0.1);
        for i in 0..500 {
            let start = [i as f32 * 0.73, i as f32 * -0.41, 3.0, i as f32];
            let mut p = start;
            n.perturb(&mut p);
            for (a, b) in p.iter().zip(&start) {
                assert!((a - b).abs() <= 2.5 + 1e-4);
            }
        }
    }

    #[test]
    fn test_perturb_is_continuous() {
        let n = Noise::new(9).with_perturb_amplitude(5.0).with_frequency(0.05);
        for i in 0..500 {
            let a = n.perturb2(Vec2::new(i as f32 * 0.37, 1.0));
            let b = n.perturb2(Vec2::new(i as f32 * 0.37 + 1e-3, 1.0));
            assert!((a - b).length() < 0.01);
        }
    }

    #[test]
    fn test_single_octave_fractal_matches_plain() {
        let n = Noise::new(4).with_perturb_amplitude(3.0);
        let mut a = [40.0, 17.0, -3.0];
        let mut b = a;
        n.perturb(&mut a);
        n.perturb_fractal(&mut b);
        assert_eq!(a, b);
        assert_eq!(n.perturb3(Vec3::new(40.0, 17.0, -3.0)).to_array(), a);
    }

    #[test]
    fn test_unsupported_dimensions_untouched() {
        let n = Noise::default();
        let mut p = [1.0; 7];
        n.perturb(&mut p);
        n.perturb_fractal(&mut p);
        assert_eq!(p, [1.0; 7]);
    }
}

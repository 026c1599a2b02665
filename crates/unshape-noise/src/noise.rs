//! The [`Noise`] configuration and its evaluation entry points.

use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::fractal::{self, FractalType, Octaves, fractal_bounding};
use crate::hash::{DefaultPointHash, PointHash};
use crate::interp::Interpolation;
use crate::kernels::{self, CellularDistance, CellularReturn};
use crate::route::{self, Combinator, Kernel, Route};
use crate::{MAX_DIMENSIONS, MIN_DIMENSIONS};

/// Smallest accepted frequency.
pub const MIN_FREQUENCY: f32 = 1e-6;

/// Smallest accepted sharpness.
pub const MIN_SHARPNESS: f32 = 1e-6;

/// Largest accepted octave count, the largest the text encoding can hold.
pub const MAX_OCTAVES: u32 = i32::MAX as u32;

/// Noise family selector.
///
/// `*Fractal` variants run their kernel through the configured
/// [`FractalType`]; the others always evaluate a single octave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoiseType {
    Value,
    ValueFractal,
    Perlin,
    PerlinFractal,
    Simplex,
    #[default]
    SimplexFractal,
    /// Voronoi cells; 2D and 3D only.
    Cellular,
    WhiteNoise,
    Cubic,
    CubicFractal,
    Foam,
    FoamFractal,
    Honey,
    HoneyFractal,
    /// Foam with an extra mutation axis; 2D to 5D.
    Mutant,
    MutantFractal,
    Taffy,
    TaffyFractal,
}

impl NoiseType {
    /// All families in ordinal order.
    pub const ALL: [NoiseType; 18] = [
        Self::Value,
        Self::ValueFractal,
        Self::Perlin,
        Self::PerlinFractal,
        Self::Simplex,
        Self::SimplexFractal,
        Self::Cellular,
        Self::WhiteNoise,
        Self::Cubic,
        Self::CubicFractal,
        Self::Foam,
        Self::FoamFractal,
        Self::Honey,
        Self::HoneyFractal,
        Self::Mutant,
        Self::MutantFractal,
        Self::Taffy,
        Self::TaffyFractal,
    ];

    /// The single-octave kernel behind this family.
    pub fn kernel(self) -> Kernel {
        match self {
            NoiseType::Value | NoiseType::ValueFractal => Kernel::Value,
            NoiseType::Perlin | NoiseType::PerlinFractal => Kernel::Perlin,
            NoiseType::Simplex | NoiseType::SimplexFractal => Kernel::Simplex,
            NoiseType::Cellular => Kernel::Cellular,
            NoiseType::WhiteNoise => Kernel::White,
            NoiseType::Cubic | NoiseType::CubicFractal => Kernel::Cubic,
            NoiseType::Foam | NoiseType::FoamFractal => Kernel::Foam,
            NoiseType::Honey | NoiseType::HoneyFractal => Kernel::Honey,
            NoiseType::Mutant | NoiseType::MutantFractal => Kernel::Mutant,
            NoiseType::Taffy | NoiseType::TaffyFractal => Kernel::Taffy,
        }
    }

    /// Whether the family runs through the fractal combinator.
    pub fn is_fractal(self) -> bool {
        matches!(
            self,
            NoiseType::ValueFractal
                | NoiseType::PerlinFractal
                | NoiseType::SimplexFractal
                | NoiseType::CubicFractal
                | NoiseType::FoamFractal
                | NoiseType::HoneyFractal
                | NoiseType::MutantFractal
                | NoiseType::TaffyFractal
        )
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

/// Noise configuration and evaluator.
///
/// Holds every parameter the kernels and combinators read. Setters validate
/// on every call, so a `Noise` is always in a usable state. Evaluation
/// takes `&self`; the `*_with_seed` variants override the seed for one call
/// without touching the configuration, so a shared `Noise` can be sampled
/// from several threads at once.
///
/// # Example
///
/// ```
/// use unshape_noise::{FractalType, Noise, NoiseType};
///
/// let noise = Noise::new(42)
///     .with_noise_type(NoiseType::PerlinFractal)
///     .with_fractal_type(FractalType::RidgedMulti)
///     .with_octaves(4);
///
/// let v = noise.noise3(10.0, 20.0, 30.0);
/// assert!((-1.0..=1.0).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct Noise {
    seed: i32,
    frequency: f32,
    noise_type: NoiseType,
    fractal_type: FractalType,
    octaves: u32,
    lacunarity: f32,
    gain: f32,
    interpolation: Interpolation,
    cellular_distance: CellularDistance,
    cellular_return: CellularReturn,
    perturb_amplitude: f32,
    sharpness: f32,
    sharpness_inverse: f32,
    mutation: f32,
    spiral: bool,
    fractal_bounding: f32,
    point_hash: Arc<dyn PointHash>,
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            seed: 1337,
            frequency: 1.0 / 32.0,
            noise_type: NoiseType::default(),
            fractal_type: FractalType::default(),
            octaves: 1,
            lacunarity: 2.0,
            gain: 0.5,
            interpolation: Interpolation::default(),
            cellular_distance: CellularDistance::default(),
            cellular_return: CellularReturn::default(),
            perturb_amplitude: 1.0,
            sharpness: 1.0,
            sharpness_inverse: 1.0,
            mutation: 0.0,
            spiral: false,
            fractal_bounding: 1.0,
            point_hash: Arc::new(DefaultPointHash),
        }
    }
}

impl Noise {
    /// Creates a default configuration with the given seed.
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Seed of the first octave.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Multiplier applied to input coordinates.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Selected noise family.
    pub fn noise_type(&self) -> NoiseType {
        self.noise_type
    }

    /// Combination policy for the fractal families.
    pub fn fractal_type(&self) -> FractalType {
        self.fractal_type
    }

    /// Number of octaves in a fractal evaluation.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Frequency multiplier between octaves.
    pub fn lacunarity(&self) -> f32 {
        self.lacunarity
    }

    /// Amplitude multiplier between octaves.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Curve used by value and perlin noise.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Metric used by cellular noise.
    pub fn cellular_distance(&self) -> CellularDistance {
        self.cellular_distance
    }

    /// What cellular noise reports.
    pub fn cellular_return(&self) -> CellularReturn {
        self.cellular_return
    }

    /// Scale of the offsets applied by [`perturb`](Self::perturb).
    pub fn perturb_amplitude(&self) -> f32 {
        self.perturb_amplitude
    }

    /// Sharpness used by cubic, foam, mutant and taffy.
    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    /// Extra axis coordinate fed to mutant noise.
    pub fn mutation(&self) -> f32 {
        self.mutation
    }

    /// Whether octaves rotate before each rescale.
    pub fn spiral(&self) -> bool {
        self.spiral
    }

    /// `1 / Σ|gain|^i` over the configured octaves.
    pub fn fractal_bounding(&self) -> f32 {
        self.fractal_bounding
    }

    /// Lattice hash used by the cubic family.
    pub fn point_hash(&self) -> &Arc<dyn PointHash> {
        &self.point_hash
    }

    /// Sets the seed.
    pub fn set_seed(&mut self, seed: i32) {
        self.seed = seed;
    }

    /// Sets the frequency, flooring it to [`MIN_FREQUENCY`].
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = if frequency >= MIN_FREQUENCY {
            frequency
        } else {
            tracing::debug!(frequency, floor = MIN_FREQUENCY, "frequency floored");
            MIN_FREQUENCY
        };
    }

    /// Sets the noise family.
    pub fn set_noise_type(&mut self, noise_type: NoiseType) {
        self.noise_type = noise_type;
    }

    /// Sets the combination policy.
    pub fn set_fractal_type(&mut self, fractal_type: FractalType) {
        self.fractal_type = fractal_type;
    }

    /// Sets the octave count, clamping it to `1..=`[`MAX_OCTAVES`].
    pub fn set_octaves(&mut self, octaves: u32) {
        if octaves == 0 {
            tracing::debug!("octave count floored to 1");
        } else if octaves > MAX_OCTAVES {
            tracing::debug!(octaves, ceiling = MAX_OCTAVES, "octave count clamped");
        }
        self.octaves = octaves.clamp(1, MAX_OCTAVES);
        self.update_bounding();
    }

    /// Sets the frequency multiplier between octaves.
    pub fn set_lacunarity(&mut self, lacunarity: f32) {
        self.lacunarity = lacunarity;
    }

    /// Sets the amplitude multiplier between octaves and refreshes the bounding factor.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        self.update_bounding();
    }

    /// Sets the curve used by value and perlin noise.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Sets the cellular metric.
    pub fn set_cellular_distance(&mut self, distance: CellularDistance) {
        self.cellular_distance = distance;
    }

    /// Sets the cellular return mode.
    pub fn set_cellular_return(&mut self, mode: CellularReturn) {
        self.cellular_return = mode;
    }

    /// Sets the scale of perturbation offsets.
    pub fn set_perturb_amplitude(&mut self, amplitude: f32) {
        self.perturb_amplitude = amplitude;
    }

    /// Sets the sharpness used by cubic, foam, mutant and taffy, flooring
    /// it to [`MIN_SHARPNESS`].
    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = if sharpness >= MIN_SHARPNESS {
            sharpness
        } else {
            tracing::debug!(sharpness, floor = MIN_SHARPNESS, "sharpness floored");
            MIN_SHARPNESS
        };
        self.sharpness_inverse = 1.0 / self.sharpness;
    }

    /// Sets the mutant noise extra axis.
    pub fn set_mutation(&mut self, mutation: f32) {
        self.mutation = mutation;
    }

    /// Enables rotation between octaves.
    pub fn set_spiral(&mut self, spiral: bool) {
        self.spiral = spiral;
    }

    /// Replaces the lattice hash used by the cubic family.
    pub fn set_point_hash(&mut self, point_hash: Arc<dyn PointHash>) {
        self.point_hash = point_hash;
    }

    fn update_bounding(&mut self) {
        self.fractal_bounding = fractal_bounding(self.octaves, self.gain);
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Builder form of [`set_seed`](Self::set_seed).
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.set_seed(seed);
        self
    }

    /// Builder form of [`set_frequency`](Self::set_frequency).
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.set_frequency(frequency);
        self
    }

    /// Builder form of [`set_noise_type`](Self::set_noise_type).
    pub fn with_noise_type(mut self, noise_type: NoiseType) -> Self {
        self.set_noise_type(noise_type);
        self
    }

    /// Builder form of [`set_fractal_type`](Self::set_fractal_type).
    pub fn with_fractal_type(mut self, fractal_type: FractalType) -> Self {
        self.set_fractal_type(fractal_type);
        self
    }

    /// Builder form of [`set_octaves`](Self::set_octaves).
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.set_octaves(octaves);
        self
    }

    /// Builder form of [`set_lacunarity`](Self::set_lacunarity).
    pub fn with_lacunarity(mut self, lacunarity: f32) -> Self {
        self.set_lacunarity(lacunarity);
        self
    }

    /// Builder form of [`set_gain`](Self::set_gain).
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.set_gain(gain);
        self
    }

    /// Builder form of [`set_interpolation`](Self::set_interpolation).
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.set_interpolation(interpolation);
        self
    }

    /// Builder form of [`set_cellular_distance`](Self::set_cellular_distance).
    pub fn with_cellular_distance(mut self, distance: CellularDistance) -> Self {
        self.set_cellular_distance(distance);
        self
    }

    /// Builder form of [`set_cellular_return`](Self::set_cellular_return).
    pub fn with_cellular_return(mut self, mode: CellularReturn) -> Self {
        self.set_cellular_return(mode);
        self
    }

    /// Builder form of [`set_perturb_amplitude`](Self::set_perturb_amplitude).
    pub fn with_perturb_amplitude(mut self, amplitude: f32) -> Self {
        self.set_perturb_amplitude(amplitude);
        self
    }

    /// Builder form of [`set_sharpness`](Self::set_sharpness).
    pub fn with_sharpness(mut self, sharpness: f32) -> Self {
        self.set_sharpness(sharpness);
        self
    }

    /// Builder form of [`set_mutation`](Self::set_mutation).
    pub fn with_mutation(mut self, mutation: f32) -> Self {
        self.set_mutation(mutation);
        self
    }

    /// Builder form of [`set_spiral`](Self::set_spiral).
    pub fn with_spiral(mut self, spiral: bool) -> Self {
        self.set_spiral(spiral);
        self
    }

    /// Builder form of [`set_point_hash`](Self::set_point_hash).
    pub fn with_point_hash(mut self, point_hash: Arc<dyn PointHash>) -> Self {
        self.set_point_hash(point_hash);
        self
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// The route this configuration takes in `dims` dimensions, or `None`
    /// outside `2..=6`.
    pub fn route(&self, dims: usize) -> Option<Route> {
        route::lookup(self.noise_type, self.fractal_type, dims)
    }

    /// Evaluates noise at `p` (2 to 6 axes).
    ///
    /// Never fails: unsupported combinations take the fallback route
    /// described in [`route`](crate::route), and slices outside `2..=6`
    /// evaluate to `0.0`.
    pub fn noise(&self, p: &[f32]) -> f32 {
        self.noise_with_seed(p, self.seed)
    }

    /// Like [`noise`](Self::noise) with `seed` in place of the configured seed.
    pub fn noise_with_seed(&self, p: &[f32], seed: i32) -> f32 {
        let Some(route) = self.route(p.len()) else {
            tracing::trace!(dimensions = p.len(), "noise evaluated outside 2..=6 dimensions");
            return 0.0;
        };
        if !route.exact {
            tracing::trace!(
                noise_type = ?self.noise_type,
                fractal_type = ?self.fractal_type,
                dimensions = p.len(),
                kernel = ?route.kernel,
                combinator = ?route.combinator,
                "noise fell back"
            );
        }
        self.run(route, seed, p)
    }

    /// Evaluates noise at `p`, refusing combinations that would fall back.
    pub fn try_noise(&self, p: &[f32]) -> Result<f32, NoiseError> {
        let route = self
            .route(p.len())
            .ok_or(NoiseError::InvalidDimensions(p.len()))?;
        if !route.exact {
            return Err(NoiseError::Unsupported {
                noise_type: self.noise_type,
                fractal_type: self.fractal_type,
                dimensions: p.len(),
            });
        }
        Ok(self.run(route, self.seed, p))
    }

    /// Evaluates a 2D point.
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        self.noise(&[x, y])
    }

    /// Evaluates a 3D point.
    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise(&[x, y, z])
    }

    /// Evaluates a 4D point.
    pub fn noise4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.noise(&[x, y, z, w])
    }

    /// Evaluates a 5D point.
    pub fn noise5(&self, x: f32, y: f32, z: f32, w: f32, u: f32) -> f32 {
        self.noise(&[x, y, z, w, u])
    }

    /// Evaluates a 6D point.
    pub fn noise6(&self, x: f32, y: f32, z: f32, w: f32, u: f32, v: f32) -> f32 {
        self.noise(&[x, y, z, w, u, v])
    }

    /// [`noise2`](Self::noise2) with `seed` in place of the configured seed.
    pub fn noise2_with_seed(&self, x: f32, y: f32, seed: i32) -> f32 {
        self.noise_with_seed(&[x, y], seed)
    }

    /// [`noise3`](Self::noise3) with `seed` in place of the configured seed.
    pub fn noise3_with_seed(&self, x: f32, y: f32, z: f32, seed: i32) -> f32 {
        self.noise_with_seed(&[x, y, z], seed)
    }

    /// [`noise4`](Self::noise4) with `seed` in place of the configured seed.
    pub fn noise4_with_seed(&self, x: f32, y: f32, z: f32, w: f32, seed: i32) -> f32 {
        self.noise_with_seed(&[x, y, z, w], seed)
    }

    /// [`noise5`](Self::noise5) with `seed` in place of the configured seed.
    pub fn noise5_with_seed(&self, x: f32, y: f32, z: f32, w: f32, u: f32, seed: i32) -> f32 {
        self.noise_with_seed(&[x, y, z, w, u], seed)
    }

    /// [`noise6`](Self::noise6) with `seed` in place of the configured seed.
    #[allow(clippy::too_many_arguments)]
    pub fn noise6_with_seed(
        &self,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
        u: f32,
        v: f32,
        seed: i32,
    ) -> f32 {
        self.noise_with_seed(&[x, y, z, w, u, v], seed)
    }

    /// 2D noise from a vector.
    pub fn noise2v(&self, p: Vec2) -> f32 {
        self.noise(&p.to_array())
    }

    /// 3D noise from a vector.
    pub fn noise3v(&self, p: Vec3) -> f32 {
        self.noise(&p.to_array())
    }

    /// 4D noise from a vector.
    pub fn noise4v(&self, p: Vec4) -> f32 {
        self.noise(&p.to_array())
    }

    fn octave_params(&self, kernel: Kernel) -> Octaves {
        Octaves {
            count: self.octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            bounding: self.fractal_bounding,
            spiral: self.spiral && kernel.spirals(),
        }
    }

    fn run(&self, route: Route, seed: i32, p: &[f32]) -> f32 {
        debug_assert!((MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&p.len()));
        let dims = p.len();
        let mut scaled = [0.0f32; MAX_DIMENSIONS];
        for (s, &x) in scaled.iter_mut().zip(p) {
            *s = x * self.frequency;
        }
        let q = &scaled[..dims];

        let kernel = route.kernel;
        let octaves = self.octave_params(kernel);
        let sample = |s: i32, q: &[f32]| self.single(kernel, s, q);
        match route.combinator {
            Combinator::Single => self.single(kernel, seed, q),
            Combinator::Fbm => fractal::fbm(sample, seed, q, &octaves),
            Combinator::Billow => fractal::billow(sample, seed, q, &octaves),
            Combinator::RidgedMulti => fractal::ridged(sample, seed, q, &octaves),
            Combinator::DomainWarp => fractal::domain_warp(sample, seed, q, &octaves),
            Combinator::Zero => 0.0,
        }
    }

    /// One octave of `kernel` at already frequency-scaled coordinates.
    fn single(&self, kernel: Kernel, seed: i32, p: &[f32]) -> f32 {
        match kernel {
            Kernel::Value => kernels::value(seed, p, self.interpolation),
            Kernel::Perlin => kernels::perlin(seed, p, self.interpolation),
            Kernel::Simplex => kernels::simplex(seed, p),
            Kernel::Cubic => kernels::cubic(seed, p, self.point_hash.as_ref(), self.sharpness),
            Kernel::Cellular => {
                kernels::cellular(seed, p, self.cellular_distance, self.cellular_return)
            }
            Kernel::White => kernels::white(seed, p),
            Kernel::Foam => kernels::foam(seed, p, self.sharpness),
            Kernel::Mutant => kernels::mutant(seed, p, self.mutation, self.sharpness),
            Kernel::Honey => kernels::honey(seed, p),
            Kernel::Taffy => kernels::taffy(seed, p, self.sharpness_inverse),
        }
    }
}

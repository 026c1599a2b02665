//! Static routing from (noise type, fractal type, dimensions) to a kernel
//! and the combinator that drives it.
//!
//! The table is resolved once on first use. Combinations that are not
//! defined degrade the same way every time:
//!
//! - a kernel that does not exist in `d` dimensions is replaced by simplex,
//!   keeping the fractal policy;
//! - a fractal policy that does not exist in `d` dimensions evaluates to a
//!   constant `0.0`.
//!
//! Such routes are marked inexact; [`Noise::try_noise`](crate::Noise::try_noise)
//! refuses them.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;

use crate::fractal::FractalType;
use crate::noise::NoiseType;
use crate::{MAX_DIMENSIONS, MIN_DIMENSIONS};

/// A single-octave kernel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Value,
    Perlin,
    Simplex,
    Cubic,
    Cellular,
    White,
    Foam,
    Mutant,
    Honey,
    Taffy,
}

impl Kernel {
    /// Dimension counts this kernel is defined for.
    pub fn dimensions(self) -> RangeInclusive<usize> {
        match self {
            Kernel::Cellular => 2..=3,
            Kernel::Mutant => 2..=5,
            _ => MIN_DIMENSIONS..=MAX_DIMENSIONS,
        }
    }

    /// Whether the kernel is defined for `dims` dimensions.
    pub fn supports(self, dims: usize) -> bool {
        self.dimensions().contains(&dims)
    }

    /// Whether fractal octaves of this kernel are rotated when spiral mode
    /// is on. The composite families are left unrotated.
    pub fn spirals(self) -> bool {
        matches!(
            self,
            Kernel::Value | Kernel::Perlin | Kernel::Simplex | Kernel::Cubic | Kernel::Cellular
        )
    }
}

/// How the kernel's octaves are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// One direct kernel call.
    Single,
    Fbm,
    Billow,
    RidgedMulti,
    DomainWarp,
    /// Always `0.0`.
    Zero,
}

impl From<FractalType> for Combinator {
    fn from(fractal_type: FractalType) -> Self {
        match fractal_type {
            FractalType::Fbm => Combinator::Fbm,
            FractalType::Billow => Combinator::Billow,
            FractalType::RidgedMulti => Combinator::RidgedMulti,
            FractalType::DomainWarp => Combinator::DomainWarp,
        }
    }
}

/// A resolved table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub kernel: Kernel,
    pub combinator: Combinator,
    /// `false` when a fallback replaced the requested kernel or policy.
    pub exact: bool,
}

const DIMENSION_SLOTS: usize = MAX_DIMENSIONS - MIN_DIMENSIONS + 1;

type RouteTable = [[[Route; DIMENSION_SLOTS]; 4]; 18];

static ROUTES: Lazy<RouteTable> = Lazy::new(|| {
    let table: RouteTable = std::array::from_fn(|n| {
        std::array::from_fn(|f| {
            std::array::from_fn(|d| {
                resolve(
                    NoiseType::ALL[n],
                    FractalType::ALL[f],
                    d + MIN_DIMENSIONS,
                )
            })
        })
    });
    let inexact = table.iter().flatten().flatten().filter(|r| !r.exact).count();
    tracing::debug!(
        routes = 18 * 4 * DIMENSION_SLOTS,
        fallbacks = inexact,
        "noise routing table built"
    );
    table
});

fn resolve(noise_type: NoiseType, fractal_type: FractalType, dims: usize) -> Route {
    let requested = noise_type.kernel();
    let (kernel, kernel_exact) = if requested.supports(dims) {
        (requested, true)
    } else {
        (Kernel::Simplex, false)
    };

    let (combinator, combinator_exact) = if !noise_type.is_fractal() {
        (Combinator::Single, true)
    } else if fractal_type.supports(dims) {
        (fractal_type.into(), true)
    } else {
        (Combinator::Zero, false)
    };

    Route {
        kernel,
        combinator,
        exact: kernel_exact && combinator_exact,
    }
}

/// Looks up the route for a combination, or `None` when `dims` is outside
/// `2..=6`.
pub fn lookup(noise_type: NoiseType, fractal_type: FractalType, dims: usize) -> Option<Route> {
    if !(MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&dims) {
        return None;
    }
    Some(ROUTES[noise_type.ordinal() as usize][fractal_type.ordinal() as usize][dims - MIN_DIMENSIONS])
}

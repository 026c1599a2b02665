//! Noise functions for procedural generation.
//!
//! Deterministic, continuous pseudo-random fields over 2 to 6 dimensions:
//! value, Perlin, simplex, cubic, cellular and white noise, the composite
//! foam, mutant, honey and taffy families, and four fractal combinators
//! that layer octaves of any of them.
//!
//! [`Noise`] is the entry point. It holds the configuration and evaluates
//! points through a routing table resolved once per process:
//!
//! ```
//! use unshape_noise::{CellularReturn, Noise, NoiseType};
//!
//! let terrain = Noise::new(1337)
//!     .with_noise_type(NoiseType::SimplexFractal)
//!     .with_octaves(5)
//!     .with_frequency(0.01);
//! let height = terrain.noise2(120.0, 64.0);
//!
//! let cells = Noise::new(7)
//!     .with_noise_type(NoiseType::Cellular)
//!     .with_cellular_return(CellularReturn::Distance2Sub);
//! let edge = cells.noise3(1.0, 2.0, 3.0);
//!
//! assert!(height.abs() <= 1.0 && edge.abs() <= 1.0);
//!
//! // Configurations round-trip through a compact string.
//! let restored: Noise = terrain.encode().parse().unwrap();
//! assert_eq!(restored.noise2(120.0, 64.0), height);
//! ```
//!
//! The single-octave kernels are also available directly in [`kernels`],
//! taking a seed and coordinates that are already frequency-scaled.

mod codec;
mod error;
pub mod fractal;
pub mod hash;
pub mod interp;
pub mod kernels;
mod noise;
mod perturb;
pub mod route;
pub mod tables;

pub use error::NoiseError;
pub use fractal::FractalType;
pub use hash::{DefaultPointHash, PointHash};
pub use interp::Interpolation;
pub use kernels::{CellularDistance, CellularReturn};
pub use noise::{MAX_OCTAVES, MIN_FREQUENCY, MIN_SHARPNESS, Noise, NoiseType};
pub use route::{Combinator, Kernel, Route};

/// Fewest axes any kernel accepts.
pub const MIN_DIMENSIONS: usize = 2;

/// Most axes any kernel accepts.
pub const MAX_DIMENSIONS: usize = 6;

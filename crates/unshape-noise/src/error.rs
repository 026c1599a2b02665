//! Error types for unshape-noise.

use crate::fractal::FractalType;
use crate::noise::NoiseType;
use thiserror::Error;

/// Errors reported by the strict evaluation entry points and by decoding.
///
/// Plain evaluation never fails; it degrades through the documented
/// fallback routes instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("unsupported combination: {noise_type:?} with {fractal_type:?} in {dimensions}D")]
    Unsupported {
        noise_type: NoiseType,
        fractal_type: FractalType,
        dimensions: usize,
    },

    #[error("noise is defined for 2 to 6 dimensions, got {0}")]
    InvalidDimensions(usize),

    #[error("encoded noise must be wrapped in '`' sentinels")]
    MissingSentinel,

    #[error("encoded noise has {got} fields, expected {expected}")]
    FieldCount { expected: usize, got: usize },

    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

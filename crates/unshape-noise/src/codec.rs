//! Text encoding of a [`Noise`] configuration.
//!
//! The encoding is a single line: fourteen fields joined by `~` and wrapped
//! in backticks. The integer settings come first (seed, noise type, octaves,
//! fractal type, interpolation, cellular return, cellular distance, spiral),
//! followed by the IEEE-754 bit patterns of the float settings written as
//! signed decimal integers (frequency, lacunarity, gain, perturbation
//! amplitude, sharpness, mutation). Bit patterns make the round trip exact.
//!
//! The point hash is not encoded; decoded configurations use
//! [`DefaultPointHash`](crate::DefaultPointHash).

use std::fmt;
use std::str::FromStr;

use crate::error::NoiseError;
use crate::fractal::FractalType;
use crate::interp::Interpolation;
use crate::kernels::{CellularDistance, CellularReturn};
use crate::noise::{Noise, NoiseType};

const SENTINEL: char = '`';
const SEPARATOR: &str = "~";
const FIELD_COUNT: usize = 14;

fn float_field(v: f32) -> i32 {
    v.to_bits() as i32
}

impl Noise {
    /// Encodes every setting except the point hash.
    pub fn encode(&self) -> String {
        let ints = [
            self.seed(),
            self.noise_type().ordinal(),
            self.octaves() as i32,
            self.fractal_type().ordinal(),
            self.interpolation().ordinal(),
            self.cellular_return().ordinal(),
            self.cellular_distance().ordinal(),
            self.spiral() as i32,
            float_field(self.frequency()),
            float_field(self.lacunarity()),
            float_field(self.gain()),
            float_field(self.perturb_amplitude()),
            float_field(self.sharpness()),
            float_field(self.mutation()),
        ];
        let body = ints
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        format!("{SENTINEL}{body}{SENTINEL}")
    }

    /// Parses a string produced by [`encode`](Self::encode).
    ///
    /// Surrounding whitespace is ignored. Float fields accept both signed
    /// and unsigned renderings of their bit patterns. Decoded values pass
    /// through the setters, so out-of-range values are floored as usual.
    pub fn decode(encoded: &str) -> Result<Self, NoiseError> {
        decode_fields(encoded).inspect_err(|err| {
            tracing::debug!(%err, "failed to decode noise configuration");
        })
    }
}

fn decode_fields(encoded: &str) -> Result<Noise, NoiseError> {
    let body = encoded
        .trim()
        .strip_prefix(SENTINEL)
        .and_then(|s| s.strip_suffix(SENTINEL))
        .ok_or(NoiseError::MissingSentinel)?;

    let fields: Vec<&str> = body.split(SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(NoiseError::FieldCount {
            expected: FIELD_COUNT,
            got: fields.len(),
        });
    }

    let int = |index: usize, name: &'static str| -> Result<i32, NoiseError> {
        fields[index].parse::<i32>().map_err(|_| invalid(name, fields[index]))
    };
    let float = |index: usize, name: &'static str| -> Result<f32, NoiseError> {
        let raw = fields[index];
        raw.parse::<i32>()
            .map(|bits| bits as u32)
            .or_else(|_| raw.parse::<u32>())
            .map(f32::from_bits)
            .map_err(|_| invalid(name, raw))
    };

    let noise_type = NoiseType::from_ordinal(int(1, "noise_type")?)
        .ok_or_else(|| invalid("noise_type", fields[1]))?;
    let octaves = u32::try_from(int(2, "octaves")?).map_err(|_| invalid("octaves", fields[2]))?;
    let fractal_type = FractalType::from_ordinal(int(3, "fractal_type")?)
        .ok_or_else(|| invalid("fractal_type", fields[3]))?;
    let interpolation = Interpolation::from_ordinal(int(4, "interpolation")?)
        .ok_or_else(|| invalid("interpolation", fields[4]))?;
    let cellular_return = CellularReturn::from_ordinal(int(5, "cellular_return")?)
        .ok_or_else(|| invalid("cellular_return", fields[5]))?;
    let cellular_distance = CellularDistance::from_ordinal(int(6, "cellular_distance")?)
        .ok_or_else(|| invalid("cellular_distance", fields[6]))?;
    let spiral = match int(7, "spiral")? {
        0 => false,
        1 => true,
        _ => return Err(invalid("spiral", fields[7])),
    };

    Ok(Noise::new(int(0, "seed")?)
        .with_noise_type(noise_type)
        .with_octaves(octaves)
        .with_fractal_type(fractal_type)
        .with_interpolation(interpolation)
        .with_cellular_return(cellular_return)
        .with_cellular_distance(cellular_distance)
        .with_spiral(spiral)
        .with_frequency(float(8, "frequency")?)
        .with_lacunarity(float(9, "lacunarity")?)
        .with_gain(float(10, "gain")?)
        .with_perturb_amplitude(float(11, "perturb_amplitude")?)
        .with_sharpness(float(12, "sharpness")?)
        .with_mutation(float(13, "mutation")?))
}

fn invalid(field: &'static str, value: &str) -> NoiseError {
    NoiseError::InvalidField {
        field,
        value: value.to_string(),
    }
}

impl FromStr for Noise {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Noise::decode(s)
    }
}

impl fmt::Display for Noise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::noise::Noise;

    impl Serialize for Noise {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.encode())
        }
    }

    impl<'de> Deserialize<'de> for Noise {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let encoded = String::deserialize(deserializer)?;
            Noise::decode(&encoded).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encoding() {
        let encoded = Noise::default().encode();
        assert!(encoded.starts_with("`1337~5~1~0~1~0~0~0~"));
        assert!(encoded.ends_with('`'));
        assert_eq!(encoded.matches(SEPARATOR).count(), FIELD_COUNT - 1);
    }

    #[test]
    fn test_round_trip_keeps_every_field() {
        let n = Noise::new(-77)
            .with_noise_type(NoiseType::CubicFractal)
            .with_fractal_type(FractalType::DomainWarp)
            .with_octaves(6)
            .with_lacunarity(-2.5)
            .with_gain(0.33)
            .with_frequency(0.013)
            .with_interpolation(Interpolation::Quintic)
            .with_cellular_distance(CellularDistance::Natural)
            .with_cellular_return(CellularReturn::Merge)
            .with_perturb_amplitude(4.0)
            .with_sharpness(2.75)
            .with_mutation(-0.5)
            .with_spiral(true);
        let back: Noise = n.encode().parse().unwrap();
        assert_eq!(back.encode(), n.encode());
        assert_eq!(back.seed(), -77);
        assert_eq!(back.octaves(), 6);
        assert_eq!(back.gain(), 0.33);
        assert_eq!(back.lacunarity(), -2.5);
        assert_eq!(back.fractal_bounding(), n.fractal_bounding());
        assert!(back.spiral());
        assert_eq!(back.to_string(), n.encode());
    }

    #[test]
    fn test_largest_octave_count_round_trips() {
        let n = Noise::default().with_octaves(3_000_000_000);
        assert_eq!(n.octaves(), crate::noise::MAX_OCTAVES);
        let back = Noise::decode(&n.encode()).unwrap();
        assert_eq!(back.octaves(), crate::noise::MAX_OCTAVES);
        assert_eq!(back.fractal_bounding(), n.fractal_bounding());
    }

    #[test]
    fn test_unsigned_bits_accepted() {
        // -2.5 has its sign bit set, so its unsigned rendering overflows i32.
        let signed = Noise::default().with_mutation(-2.5).encode();
        let bits = (-2.5f32).to_bits();
        let unsigned = signed.replace(&(bits as i32).to_string(), &bits.to_string());
        assert_ne!(signed, unsigned);
        assert_eq!(Noise::decode(&unsigned).unwrap().mutation(), -2.5);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            Noise::decode("1~2~3").unwrap_err(),
            NoiseError::MissingSentinel
        );
        assert_eq!(
            Noise::decode("`1~2~3`").unwrap_err(),
            NoiseError::FieldCount {
                expected: FIELD_COUNT,
                got: 3
            }
        );
        let bad_type = Noise::default().encode().replacen("~5~", "~42~", 1);
        assert!(matches!(
            Noise::decode(&bad_type),
            Err(NoiseError::InvalidField {
                field: "noise_type",
                ..
            })
        ));
        let bad_seed = Noise::default().encode().replacen("1337", "x", 1);
        assert!(matches!(
            Noise::decode(&bad_seed),
            Err(NoiseError::InvalidField { field: "seed", .. })
        ));
    }

    #[test]
    fn test_decode_floors_through_setters() {
        let zero_freq = Noise::default().encode().replacen(
            &float_field(1.0 / 32.0).to_string(),
            "0",
            1,
        );
        assert_eq!(
            Noise::decode(&zero_freq).unwrap().frequency(),
            crate::noise::MIN_FREQUENCY
        );
    }
}

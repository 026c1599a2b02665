//! Behavioral properties of the public evaluation API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unshape_noise::kernels;
use unshape_noise::{
    FractalType, Interpolation, Noise, NoiseError, NoiseType, hash::value_at,
};

const SAMPLES: usize = 2000;

fn random_point(rng: &mut StdRng, dims: usize) -> Vec<f32> {
    (0..dims).map(|_| rng.random_range(-500.0..500.0)).collect()
}

#[test]
fn test_golden_simplex_fixture() {
    // (32, 32) at frequency 1/32 lands on the lattice point (1, 1).
    let noise = Noise::default();
    assert_eq!(noise.seed(), 1337);
    assert_eq!(noise.noise_type(), NoiseType::SimplexFractal);
    let v = noise.noise2(32.0, 32.0);
    assert!((v - 0.790_930_8).abs() < 1e-5, "golden value drifted: {}", v);
}

#[test]
fn test_deterministic_for_every_supported_pair() {
    let mut rng = StdRng::seed_from_u64(1);
    for noise_type in NoiseType::ALL {
        let noise = Noise::new(rng.random())
            .with_noise_type(noise_type)
            .with_octaves(3);
        for dims in noise_type.kernel().dimensions() {
            for _ in 0..50 {
                let p = random_point(&mut rng, dims);
                let a = noise.noise(&p);
                let b = noise.clone().noise(&p);
                assert_eq!(a.to_bits(), b.to_bits(), "{:?} {}D", noise_type, dims);
            }
        }
    }
}

#[test]
fn test_outputs_in_range() {
    let mut rng = StdRng::seed_from_u64(2);
    for noise_type in NoiseType::ALL {
        for fractal_type in FractalType::ALL {
            for dims in noise_type.kernel().dimensions() {
                let noise = Noise::new(rng.random())
                    .with_noise_type(noise_type)
                    .with_fractal_type(fractal_type)
                    .with_octaves(rng.random_range(1..5))
                    .with_gain(rng.random_range(-1.0..1.0))
                    .with_spiral(rng.random());
                for _ in 0..SAMPLES / 20 {
                    let p = random_point(&mut rng, dims);
                    let v = noise.noise(&p);
                    assert!(
                        (-1.01..=1.01).contains(&v),
                        "{:?}/{:?} {}D gave {}",
                        noise_type,
                        fractal_type,
                        dims,
                        v
                    );
                }
            }
        }
    }
}

#[test]
fn test_continuous_families_are_smooth() {
    let continuous = [
        NoiseType::Value,
        NoiseType::Perlin,
        NoiseType::Simplex,
        NoiseType::Cubic,
        NoiseType::Foam,
        NoiseType::Mutant,
        NoiseType::Honey,
        NoiseType::Taffy,
    ];
    let mut rng = StdRng::seed_from_u64(3);
    for noise_type in continuous {
        let noise = Noise::new(rng.random()).with_noise_type(noise_type);
        for dims in 2..=4 {
            for _ in 0..SAMPLES / 10 {
                let p = random_point(&mut rng, dims);
                let mut q = p.clone();
                q[0] += 1e-4;
                let step = (noise.noise(&p) - noise.noise(&q)).abs();
                assert!(step < 0.05, "{:?} {}D stepped {}", noise_type, dims, step);
            }
        }
    }
}

#[test]
fn test_white_noise_is_chaotic() {
    let noise = Noise::new(5).with_noise_type(NoiseType::WhiteNoise);
    let mut rng = StdRng::seed_from_u64(4);
    let mut jumps = 0;
    for _ in 0..SAMPLES {
        let x = rng.random_range(1.0..1000.0);
        let a = noise.noise2(x, 10.0);
        let b = noise.noise2(x + 1e-4, 10.0);
        if (a - b).abs() > 0.05 {
            jumps += 1;
        }
    }
    assert!(jumps > SAMPLES * 3 / 4, "only {} of {} jumps", jumps, SAMPLES);
}

#[test]
fn test_lattice_corner_exactness() {
    let value = Noise::new(21)
        .with_noise_type(NoiseType::Value)
        .with_frequency(1.0)
        .with_interpolation(Interpolation::Quintic);
    let perlin = value.clone().with_noise_type(NoiseType::Perlin);
    for x in -6..6 {
        for y in -6..6 {
            let p = [x as f32, y as f32, (x - y) as f32];
            assert_eq!(value.noise(&p), value_at(&[x, y, x - y], 21));
            assert_eq!(perlin.noise(&p), 0.0);
        }
    }
}

#[test]
fn test_single_octave_identity() {
    let mut rng = StdRng::seed_from_u64(5);
    for fractal_type in FractalType::ALL {
        let fractal = Noise::new(77)
            .with_noise_type(NoiseType::PerlinFractal)
            .with_fractal_type(fractal_type)
            .with_frequency(1.0);
        for _ in 0..200 {
            let p = random_point(&mut rng, 3);
            let raw = kernels::perlin(77, &p, Interpolation::Hermite);
            assert_eq!(fractal.noise(&p), raw, "{:?}", fractal_type);
        }
    }
}

#[test]
fn test_fallback_and_strict_paths_agree_on_supported() {
    let mut rng = StdRng::seed_from_u64(6);
    for noise_type in NoiseType::ALL {
        let noise = Noise::new(3).with_noise_type(noise_type).with_octaves(2);
        for dims in 2..=6 {
            let p = random_point(&mut rng, dims);
            match noise.try_noise(&p) {
                Ok(v) => assert_eq!(v, noise.noise(&p)),
                Err(NoiseError::Unsupported { dimensions, .. }) => {
                    assert_eq!(dimensions, dims);
                    assert!(!noise_type.kernel().supports(dims));
                }
                Err(other) => panic!("unexpected error {other}"),
            }
        }
    }
}

#[test]
fn test_domain_warp_zero_beyond_4d() {
    let noise = Noise::new(1)
        .with_noise_type(NoiseType::ValueFractal)
        .with_fractal_type(FractalType::DomainWarp)
        .with_octaves(3);
    assert_eq!(noise.noise5(10.0, 20.0, 30.0, 40.0, 50.0), 0.0);
    assert_eq!(noise.noise6(10.0, 20.0, 30.0, 40.0, 50.0, 60.0), 0.0);
    assert_ne!(noise.noise4(10.0, 20.0, 30.0, 40.0), 0.0);
}

#[test]
fn test_shared_noise_across_threads() {
    let noise = std::sync::Arc::new(Noise::new(12).with_octaves(4));
    let expected: Vec<f32> = (0..100).map(|i| noise.noise2(i as f32, 3.0)).collect();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let noise = noise.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|i| noise.noise2(i as f32, 3.0))
                    .collect::<Vec<f32>>()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

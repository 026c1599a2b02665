//! Benchmarks for noise evaluation.
//!
//! Run with: cargo bench -p unshape-noise

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use unshape_noise::{FractalType, Noise, NoiseType};

const GRID: usize = 64;

fn sample_grid(noise: &Noise, dims: usize) -> f32 {
    let mut acc = 0.0;
    let mut p = [0.0f32; 6];
    for i in 0..GRID * GRID {
        p[0] = (i % GRID) as f32;
        p[1] = (i / GRID) as f32;
        for (axis, x) in p.iter_mut().enumerate().take(dims).skip(2) {
            *x = (i + axis) as f32 * 0.5;
        }
        acc += noise.noise(&p[..dims]);
    }
    acc
}

fn bench_families_2d(c: &mut Criterion) {
    for noise_type in [
        NoiseType::Value,
        NoiseType::Perlin,
        NoiseType::Simplex,
        NoiseType::Cubic,
        NoiseType::Cellular,
        NoiseType::WhiteNoise,
        NoiseType::Foam,
        NoiseType::Honey,
        NoiseType::Mutant,
        NoiseType::Taffy,
    ] {
        let noise = Noise::new(1337).with_noise_type(noise_type);
        c.bench_function(&format!("{:?}_2d_64x64", noise_type), |b| {
            b.iter(|| black_box(sample_grid(&noise, 2)));
        });
    }
}

fn bench_dimensions(c: &mut Criterion) {
    let noise = Noise::new(1337).with_noise_type(NoiseType::Simplex);
    for dims in 2..=6 {
        c.bench_function(&format!("simplex_{}d_64x64", dims), |b| {
            b.iter(|| black_box(sample_grid(&noise, dims)));
        });
    }
}

fn bench_fractals(c: &mut Criterion) {
    for fractal_type in FractalType::ALL {
        let noise = Noise::new(1337)
            .with_noise_type(NoiseType::PerlinFractal)
            .with_fractal_type(fractal_type)
            .with_octaves(5);
        c.bench_function(&format!("perlin_{:?}_5oct_3d", fractal_type), |b| {
            b.iter(|| black_box(sample_grid(&noise, 3)));
        });
    }
}

fn bench_perturb(c: &mut Criterion) {
    let noise = Noise::new(1337).with_perturb_amplitude(30.0).with_octaves(3);
    c.bench_function("perturb_fractal_3d", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..GRID * GRID {
                let mut p = [(i % GRID) as f32, (i / GRID) as f32, 0.5];
                noise.perturb_fractal(&mut p);
                acc += p[0];
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_families_2d,
    bench_dimensions,
    bench_fractals,
    bench_perturb,
);
criterion_main!(benches);

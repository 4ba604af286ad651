//! Benchmarks for the interpolation strategies.
//!
//! Run with: cargo bench --package spectrum-map

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spectrum_map::{GridSpec, InterpolationMethod, SamplePoint};

/// Scattered pseudo-random samples over the survey area.
fn make_samples(count: usize) -> Vec<SamplePoint> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let x = -50.0 + 100.0 * ((t * 0.618).fract());
            let y = -50.0 + 100.0 * ((t * 0.382 + 0.17).fract());
            let value = -30.0 - 0.4 * (x.powi(2) + y.powi(2)).sqrt();
            SamplePoint::new(x, y, value)
        })
        .collect()
}

fn bench_interpolation(c: &mut Criterion) {
    let grid = GridSpec::new(-50.0, 50.0, -50.0, 50.0, 25, 25).unwrap();

    let mut group = c.benchmark_group("interpolate_25x25");
    for &count in &[10usize, 50, 150] {
        let samples = make_samples(count);
        for method in InterpolationMethod::ALL {
            group.bench_with_input(
                BenchmarkId::new(method.token(), count),
                &samples,
                |b, samples| {
                    b.iter(|| {
                        let out = method.interpolate(black_box(samples), black_box(&grid));
                        black_box(out)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_interpolation);
criterion_main!(benches);

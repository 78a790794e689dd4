use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use igrfsyn::{CoefficientTable, CoordinateSystem, Igrf, SpatialPoint};

/// Axial dipole plus a little structure in every slot, for every epoch. Only the table's
/// shape matters for timing.
fn bench_model() -> Igrf {
    let values = (0..3645).map(|i| ((i % 195) as f64 * 0.37).sin() * 100.0).collect();
    Igrf::new(CoefficientTable::from_values(values))
}

fn points(count: usize) -> Vec<SpatialPoint> {
    (0..count)
        .map(|i| {
            let f = i as f64;
            SpatialPoint::new(
                1900.0 + (f * 7.3) % 130.0,
                CoordinateSystem::Geodetic,
                (f * 13.1) % 500.0,
                (f * 17.9) % 180.0 - 90.0,
                (f * 31.7) % 360.0,
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let model = bench_model();
    c.bench_function("Scalar synthesis", |b| {
        b.iter(|| model.synthesize(1999.0, CoordinateSystem::Geodetic, 300.0, 40.0, 116.0))
    });

    for count in [1_000, 10_000] {
        let input = points(count);
        c.bench_with_input(BenchmarkId::new("Sequential batch", count), &input, |b, p| {
            b.iter(|| model.synthesize_batch(p))
        });
        c.bench_with_input(BenchmarkId::new("Parallel batch", count), &input, |b, p| {
            b.iter(|| model.par_synthesize_batch(p))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

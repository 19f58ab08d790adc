use criterion::{Criterion, black_box, criterion_group, criterion_main};
use galaxy_generator::{GalaxyParameters, generate, generate_parallel};
use rand::{SeedableRng, rngs::StdRng};

fn bench_generate(c: &mut Criterion) {
    let params = GalaxyParameters {
        count: 100_000,
        ..Default::default()
    };

    c.bench_function("generate_100k", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| generate(black_box(&params), &mut rng))
    });

    c.bench_function("generate_parallel_100k", |b| {
        b.iter(|| generate_parallel(black_box(&params), 0))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);

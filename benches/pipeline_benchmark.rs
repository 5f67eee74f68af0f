use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rsvm_select::evaluation::classification;
use rsvm_select::search::expand_grid;
use rsvm_select::{Dataset, KernelType, NormalizationParams, ReductionParams, SvmConfig, SvmType};

fn random_dataset(n_rows: usize, n_cols: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(42);
    Dataset::from_pairs((0..n_rows).map(|i| {
        let features: Vec<f64> = (0..n_cols).map(|_| rng.gen()).collect();
        (features, (i % 3) as f64)
    }))
    .unwrap()
}

fn bench_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");

    for n_rows in [1000, 10000].iter() {
        let dataset = random_dataset(*n_rows, 20);

        group.bench_with_input(
            BenchmarkId::new("normalize", n_rows),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    let params = NormalizationParams::fit(black_box(dataset)).unwrap();
                    params.apply(dataset).unwrap()
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("pca", n_rows), &dataset, |b, dataset| {
            b.iter(|| ReductionParams::fit(black_box(dataset), 0.99).unwrap())
        });
    }

    group.finish();
}

fn bench_grid_expansion(c: &mut Criterion) {
    let config = SvmConfig::new(SvmType::EpsilonSvr, KernelType::Poly);
    c.bench_function("expand_poly_grid", |b| {
        b.iter(|| expand_grid(black_box(&config)).unwrap())
    });
}

fn bench_classification_report(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pairs: Vec<(f64, f64)> = (0..10000)
        .map(|_| (rng.gen_range(0..5) as f64, rng.gen_range(0..5) as f64))
        .collect();

    c.bench_function("classification_report", |b| {
        b.iter(|| classification::compute(black_box(&pairs)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_preprocessing,
    bench_grid_expansion,
    bench_classification_report
);
criterion_main!(benches);

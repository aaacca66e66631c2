use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use throughputlib::config::ModelConfig;
use throughputlib::io::{write_points, OutputFormat};
use throughputlib::model::ThroughputModel;
use throughputlib::util::get_cases;

/// Sweeps every fixture, with and without formatting the output
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fixtures");

    get_cases()
        .unwrap()
        .iter()
        .for_each(|case| {
            let config = ModelConfig::from_path(&case.config).unwrap();
            let model = ThroughputModel::new(&config.parameters).unwrap();
            group.bench_with_input(BenchmarkId::new("Sweep", &case.name), &(&model, &config), |bench, (model, config)| {
                bench.iter(|| model.sweep(&config.sweep).unwrap().map(|p| p.throughput_mpps).sum::<f64>());
            });
            group.bench_with_input(BenchmarkId::new("Sweep and format", &case.name), &(&model, &config), |bench, (model, config)| {
                bench.iter(|| {
                    let mut out = Vec::with_capacity(config.sweep.point_count() as usize * 16);
                    write_points(&mut out, model.sweep(&config.sweep).unwrap(), OutputFormat::Csv).unwrap();
                    out
                });
            });
        });
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);

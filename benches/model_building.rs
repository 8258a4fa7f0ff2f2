//! Benchmarks for planning model construction and solving
//!
//! Model building is measured on horizons from the nine-week default forecast
//! up to a full year; solving is measured on the shorter horizons only.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lineplan::lp_solver::SolverOptions;
use lineplan::{DemandSeries, PolicyConstants, Product, schedule};

/// Planning horizons in weeks
const HORIZONS: &[usize] = &[9, 18, 26, 52];

/// Largest horizon that is also solved
const MAX_SOLVED_HORIZON: usize = 18;

/// Repeat the default forecast at half volume, so long horizons stay feasible
fn synthetic_demand(weeks: usize) -> DemandSeries {
    let base = DemandSeries::default_forecast();
    let pattern = |product: Product| {
        let series = &base.series(product)[1..];
        std::iter::once(0)
            .chain(series.iter().cycle().take(weeks).map(|d| d / 2))
            .collect::<Vec<_>>()
    };
    DemandSeries::new(pattern(Product::A), pattern(Product::B))
}

fn bench_model_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_building");
    let policy = PolicyConstants::default();

    for &weeks in HORIZONS {
        let demand = synthetic_demand(weeks);
        group.throughput(Throughput::Elements(weeks as u64));

        group.bench_with_input(BenchmarkId::new("build", weeks), &demand, |b, demand| {
            b.iter(|| black_box(schedule::build(black_box(demand), black_box(&policy))))
        });
    }

    group.finish();
}

fn bench_solving(c: &mut Criterion) {
    let mut group = c.benchmark_group("solving");
    group.sample_size(10);
    let options = SolverOptions::default();

    let mut cases = vec![("default", DemandSeries::default_forecast())];
    cases.extend(
        HORIZONS
            .iter()
            .filter(|&&weeks| weeks <= MAX_SOLVED_HORIZON)
            .map(|&weeks| ("synthetic", synthetic_demand(weeks))),
    );

    for (name, demand) in cases {
        for (label, policy) in [
            ("big_m", PolicyConstants::default()),
            ("tight_big_m", PolicyConstants::default().tight_big_m()),
        ] {
            let model = match schedule::build(&demand, &policy) {
                Ok(model) => model,
                Err(e) => {
                    eprintln!(
                        "Warning: Could not build {} ({} weeks): {}. Skipping benchmark.",
                        name,
                        demand.weeks(),
                        e
                    );
                    continue;
                }
            };

            group.bench_with_input(
                BenchmarkId::new(format!("{}/{}", name, label), demand.weeks()),
                &model,
                |b, model| {
                    b.iter(|| {
                        let solution = schedule::solve(black_box(model), &options);
                        black_box(solution.map(|s| s.objective_value()))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_model_building, bench_solving);
criterion_main!(benches);

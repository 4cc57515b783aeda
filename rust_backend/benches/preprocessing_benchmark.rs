use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
use transport_prep::parsing::connections_to_dataframe;
use transport_prep::transformations::{adjust_imbalance, eliminate_provider, strip_columns};

fn dense_problem(providers: usize, clients: usize) -> (CapacityTable, ConnectionTable) {
    let capacity: CapacityTable = (0..providers)
        .map(|p| format!("P{p}"))
        .chain((0..clients).map(|c| format!("C{c}")))
        .enumerate()
        .map(|(i, name)| NodeRecord::new(i as i64, name, 100.0))
        .collect();

    let connections: ConnectionTable = (0..providers)
        .flat_map(|p| {
            (0..clients).map(move |c| {
                EdgeRecord::new(format!(" P{p} "), format!("C{c} "), (p + c) as f64, 1.0)
            })
        })
        .collect();

    (capacity, connections)
}

fn bench_elimination(c: &mut Criterion) {
    let mut group = c.benchmark_group("elimination");

    for size in [10usize, 50, 200] {
        let (capacity, connections) = dense_problem(size, size);
        let excluded: Vec<String> = (0..size / 2).map(|p| format!("P{p}")).collect();

        group.bench_with_input(BenchmarkId::new("half_providers", size), &excluded, |b, excluded| {
            b.iter(|| eliminate_provider(black_box(&capacity), black_box(&connections), excluded));
        });
    }

    group.finish();
}

fn bench_balancing(c: &mut Criterion) {
    let mut group = c.benchmark_group("balancing");

    for size in [10usize, 50, 200] {
        let (capacity, connections) = dense_problem(size, size);

        group.bench_with_input(BenchmarkId::new("supply_surplus", size), &size, |b, _| {
            b.iter(|| {
                adjust_imbalance(black_box(&capacity), black_box(&connections), 1000.0, 10.0)
            });
        });
    }

    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip_columns");

    let (_, connections) = dense_problem(100, 100);
    let df = connections_to_dataframe(&connections).unwrap();

    group.bench_function("start_and_end", |b| {
        b.iter(|| strip_columns(black_box(&df), &["StartNode", "EndNode"]).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_elimination, bench_balancing, bench_strip);
criterion_main!(benches);

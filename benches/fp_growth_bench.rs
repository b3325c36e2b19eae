use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use patmine::{find_frequent_itemsets, find_frequent_itemsets_par, MinerParams};

/// Generate synthetic labeled transaction records.
///
/// Parameters:
/// - num_transactions: Number of records
/// - num_items: Total number of possible item codes
/// - avg_transaction_size: Average items per record
fn generate_records(
    num_transactions: usize,
    num_items: u32,
    avg_transaction_size: usize,
) -> Vec<Vec<u32>> {
    let mut rng = rand::thread_rng();
    let mut records = Vec::with_capacity(num_transactions);

    for id in 0..num_transactions {
        let random_factor: f64 = rng.gen();
        let size = ((avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize).max(1);

        // Identifier token first, label token last.
        let mut record = Vec::with_capacity(size + 2);
        record.push(id as u32);
        for _ in 0..size {
            record.push(rng.gen_range(0..num_items));
        }
        record.push(u32::from(rng.gen_bool(0.3)));
        records.push(record);
    }
    records
}

fn params(minimum_support: usize) -> MinerParams {
    MinerParams {
        minimum_support,
        minimum_confidence: 0.2,
        include_statistics: true,
    }
}

fn bench_mining_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("mining_scaling");

    let configs = vec![
        ("small_100tx", 100, 20, 5),
        ("medium_500tx", 500, 50, 10),
        ("large_1000tx", 1000, 100, 15),
        ("xlarge_5000tx", 5000, 100, 20),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        let records = generate_records(num_tx, num_items, avg_size);
        let minimum_support = (num_tx / 20).max(2);

        group.bench_with_input(BenchmarkId::from_parameter(name), &records, |b, records| {
            b.iter(|| {
                let patterns: Vec<_> =
                    find_frequent_itemsets(black_box(records.clone()), &params(minimum_support), |&l| l == 1)
                        .unwrap()
                        .collect();
                black_box(patterns)
            })
        });
    }

    group.finish();
}

fn bench_parallel_vs_lazy(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_vs_lazy");
    let records = generate_records(2000, 60, 12);
    let minimum_support = 50;

    group.bench_function("lazy", |b| {
        b.iter(|| {
            let patterns: Vec<_> =
                find_frequent_itemsets(black_box(records.clone()), &params(minimum_support), |&l| l == 1)
                    .unwrap()
                    .collect();
            black_box(patterns)
        })
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            let patterns =
                find_frequent_itemsets_par(black_box(records.clone()), &params(minimum_support), |&l| l == 1)
                    .unwrap();
            black_box(patterns)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_mining_scaling, bench_parallel_vs_lazy);
criterion_main!(benches);

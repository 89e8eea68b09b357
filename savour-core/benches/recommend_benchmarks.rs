//! Criterion benchmarks for the recommender.
//!
//! Measures query latency across dataset sizes for a strict query and for a
//! query that exhausts every fallback stage.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package savour-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use savour_core::{CostCategory, Dataset, Preferences, Query, Recommend, Recommender, Restaurant};

/// Seed for deterministic dataset generation.
const BENCHMARK_SEED: u64 = 42;

/// Dataset sizes to benchmark.
const DATASET_SIZES: &[usize] = &[1_000, 10_000, 50_000];

const CITIES: [&str; 6] = ["new delhi", "mumbai", "pune", "bengaluru", "chennai", "kolkata"];
const CUISINES: [&str; 6] = ["north indian", "chinese", "cafe", "south indian", "thai", "seafood"];

fn generate_dataset(size: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Dataset::new((0..size).map(|index| {
        let city = CITIES.choose(&mut rng).copied().unwrap_or("pune");
        let cuisine = CUISINES.choose(&mut rng).copied().unwrap_or("cafe");
        let cost = CostCategory::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(CostCategory::Medium);
        Restaurant::new(
            format!("Restaurant {index}"),
            city,
            cuisine,
            cost,
            rng.gen_range(1.0..=5.0),
            rng.gen_range(0..10_000),
        )
    }))
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    let strict = Query::new(
        Preferences::new()
            .with_cuisines(["Chinese"])
            .with_budget("low", "medium")
            .with_location("Mumbai"),
    );
    let exhausted = Query::new(
        Preferences::new()
            .with_cuisines(["Korean"])
            .with_budget("high", "high")
            .with_location("Reykjavik"),
    );

    for &size in DATASET_SIZES {
        let recommender = Recommender::new(generate_dataset(size, BENCHMARK_SEED));

        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("strict", size), &strict, |b, query| {
            b.iter(|| black_box(recommender.recommend(query)));
        });
        group.bench_with_input(BenchmarkId::new("exhausted", size), &exhausted, |b, query| {
            b.iter(|| black_box(recommender.recommend(query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);

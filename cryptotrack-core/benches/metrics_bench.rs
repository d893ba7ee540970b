//! Criterion benchmarks for the snapshot transform.
//!
//! Benchmarks:
//! 1. `to_table` on a full 50-asset snapshot
//! 2. `summarize` on the same snapshot

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cryptotrack_core::domain::AssetRecord;
use cryptotrack_core::{summarize, to_table};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_records(n: usize) -> Vec<AssetRecord> {
    (0..n)
        .map(|i| {
            let cap = 1.0e12 / (i as f64 + 1.0);
            AssetRecord {
                symbol: format!("c{i}"),
                name: format!("Coin {i}"),
                current_price: 10.0 + (i as f64 * 0.7).sin() * 5.0,
                market_cap: cap,
                total_volume: cap * 0.03,
                price_change_percentage_24h: (i as f64 * 0.3).cos() * 4.0,
                circulating_supply: 1.0e7,
            }
        })
        .collect()
}

fn bench_snapshot(c: &mut Criterion) {
    let records = make_records(50);
    let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    c.bench_function("to_table_50", |b| {
        b.iter(|| to_table(black_box(&records), ts))
    });
    c.bench_function("summarize_50", |b| {
        b.iter(|| summarize(black_box(&records), ts))
    });
}

criterion_group!(benches, bench_snapshot);
criterion_main!(benches);

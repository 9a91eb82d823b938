//! Scenario evaluation throughput: rows resolved and summed per second over
//! tables of different sizes.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cityplan::data::table::{DataTable, Record};
use cityplan::planner::scenario::{evaluate_scenario, ScenarioRow};
use cityplan::planner::sizing::buildings_needed;

fn fixture_table(services: u32, buildings: u32, levels: u32) -> DataTable {
    let mut records = Vec::new();
    for s in 0..services {
        for b in 0..buildings {
            for level in 1..=levels {
                records.push(Record {
                    service: format!("Service {s}"),
                    building: format!("Building {b}"),
                    level,
                    capacity: 50.0 + level as f64 * 25.0,
                    cum_cost: 100.0 * level as f64,
                    max_level: levels,
                });
            }
        }
    }
    DataTable::from_records(records)
}

fn fixture_rows(table_levels: u32, count: usize) -> Vec<ScenarioRow> {
    (0..count)
        .map(|i| ScenarioRow {
            service: format!("Service {}", i % 4),
            building: format!("Building {}", i % 6),
            // Every few rows miss the table to exercise the Not-found path.
            level: 1 + (i as u32 % (table_levels + 1)),
            quantity: (i % 9) as u64,
        })
        .collect()
}

fn bench_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");
    group.sample_size(100);

    let small_table = fixture_table(4, 6, 10);
    let small_rows = fixture_rows(10, 8);
    group.throughput(Throughput::Elements(small_rows.len() as u64));
    group.bench_function("evaluate_8_rows_240_records", |b| {
        b.iter(|| black_box(evaluate_scenario(&small_table, &small_rows)));
    });

    let large_table = fixture_table(8, 12, 20);
    let large_rows = fixture_rows(20, 64);
    group.throughput(Throughput::Elements(large_rows.len() as u64));
    group.bench_function("evaluate_64_rows_1920_records", |b| {
        b.iter(|| black_box(evaluate_scenario(&large_table, &large_rows)));
    });

    group.finish();
}

fn bench_sizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sizing");
    group.throughput(Throughput::Elements(1));
    group.bench_function("buildings_needed", |b| {
        b.iter(|| black_box(buildings_needed(black_box(123456.75), black_box(433.25))));
    });
    group.finish();
}

criterion_group!(benches, bench_scenario, bench_sizing);
criterion_main!(benches);

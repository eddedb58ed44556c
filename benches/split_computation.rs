//! Benchmarks for split table computation
//!
//! Covers goal time parsing and full table computation for standard and long
//! distances. Recomputation happens on every configuration change, so it should stay
//! well below a millisecond for race distances.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use paceband::types::{DistanceUnit, GoalTime, RaceDistance, StandardDistance};
use paceband::{SplitCalculator, SplitTable};
use std::hint::black_box;

fn bench_goal_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("goal_time_parse");

    for input in ["3:00:00", "01:45", "4", "abc"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| black_box(GoalTime::parse(black_box(input))))
        });
    }

    group.finish();
}

fn bench_split_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_table");

    let distances = [
        ("half_km", StandardDistance::HalfMarathon, DistanceUnit::Kilometers),
        ("marathon_km", StandardDistance::Marathon, DistanceUnit::Kilometers),
        ("marathon_mi", StandardDistance::Marathon, DistanceUnit::Miles),
    ]
    .map(|(name, standard, unit)| (name, RaceDistance::standard(standard, unit)));

    for (name, distance) in distances {
        group.throughput(Throughput::Elements(u64::from(distance.whole_units()) + 1));
        group.bench_with_input(BenchmarkId::new("compute", name), &distance, |b, distance| {
            b.iter(|| black_box(SplitCalculator::compute(black_box("3:00:00"), distance)))
        });
    }

    let ultra = RaceDistance::new(1_000.0, DistanceUnit::Kilometers).expect("valid distance");
    group.throughput(Throughput::Elements(1_001));
    group.bench_function("compute/1000km", |b| {
        b.iter(|| black_box(SplitCalculator::compute(black_box("200:00:00"), &ultra)))
    });

    group.finish();
}

fn bench_table_update(c: &mut Criterion) {
    let marathon = RaceDistance::standard(StandardDistance::Marathon, DistanceUnit::Kilometers);
    let mut table = SplitTable::new();

    c.bench_function("split_table_update_alternating", |b| {
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            let goal = if toggle { "3:00:00" } else { "3:30:00" };
            black_box(table.update(black_box(goal), &marathon))
        })
    });
}

criterion_group!(benches, bench_goal_parsing, bench_split_tables, bench_table_update);
criterion_main!(benches);

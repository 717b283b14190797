use criterion::{Criterion, criterion_group, criterion_main};
use salary_dash::api::{ParallelChart, ParallelConfig, remote_ratio_palette};
use salary_dash::core::{
    EXPERIENCE_LEVELS, Record, aggregate_counts, aggregate_means, experience_levels,
    salary_thresholds, stack_bins,
};
use std::hint::black_box;

fn synthetic_records(count: usize) -> Vec<Record> {
    const SIZES: [&str; 3] = ["S", "M", "L"];
    const COUNTRIES: [&str; 5] = ["US", "DE", "GB", "IN", "JP"];
    (0..count)
        .map(|i| {
            let salary = 20_000.0 + ((i * 7_919) % 380_000) as f64;
            Record::new(
                salary,
                2020 + (i % 4) as i32,
                EXPERIENCE_LEVELS[i % 4],
                SIZES[i % 3],
            )
            .with_location(COUNTRIES[i % 5], COUNTRIES[(i / 5) % 5])
            .with_remote_ratio(((i % 3) * 50) as f64)
        })
        .collect()
}

fn bench_histogram_binning_10k(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let max = records.iter().map(|r| r.salary_in_usd).fold(0.0, f64::max);
    let thresholds = salary_thresholds(max, 20);

    c.bench_function("histogram_binning_10k", |b| {
        b.iter(|| {
            let bins = aggregate_counts(black_box(&records), (0.0, max), black_box(&thresholds));
            let levels = experience_levels(&records);
            let _ = stack_bins(&bins, &levels);
        })
    });
}

fn bench_year_means_10k(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    c.bench_function("year_means_10k", |b| {
        b.iter(|| {
            let _ = aggregate_means(black_box(&records));
        })
    });
}

fn bench_parallel_brush_10k(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let palette = remote_ratio_palette(&records).expect("palette");
    let mut chart = ParallelChart::new(&records, palette, ParallelConfig::default());

    c.bench_function("parallel_brush_10k", |b| {
        b.iter(|| {
            chart.set_brush(0, Some(black_box((100.0, 250.0))));
            chart.set_brush(3, Some(black_box((0.0, 300.0))));
            let _ = chart.visible_count();
            chart.clear_all_brushes();
        })
    });
}

criterion_group!(
    benches,
    bench_histogram_binning_10k,
    bench_year_means_10k,
    bench_parallel_brush_10k
);
criterion_main!(benches);

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Record;
use crate::core::ticks::ticks;

/// Default number of salary buckets requested from the tick ladder.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// One salary bucket `[x0, x1)` with counts per experience level.
///
/// Levels without records in the bucket are absent rather than stored as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub counts: IndexMap<String, usize>,
}

impl Bin {
    #[must_use]
    pub fn count(&self, level: &str) -> usize {
        self.counts.get(level).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Round bucket edges for the salary domain `[0, max_salary]`.
#[must_use]
pub fn salary_thresholds(max_salary: f64, bin_count: usize) -> Vec<f64> {
    ticks(0.0, max_salary, bin_count)
}

/// Partitions records into salary buckets and counts experience levels.
///
/// Thresholds at or below `domain.0` and above `domain.1` are discarded. The
/// remaining `m` thresholds produce `m + 1` buckets whose outer edges are the
/// domain ends. A salary equal to a threshold belongs to the bucket starting
/// at that threshold; salaries outside the domain are ignored.
#[must_use]
pub fn aggregate_counts(records: &[Record], domain: (f64, f64), thresholds: &[f64]) -> Vec<Bin> {
    let (x0, x1) = domain;
    if !x0.is_finite() || !x1.is_finite() {
        return Vec::new();
    }

    let mut edges: Vec<f64> = thresholds
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > x0 && *t <= x1)
        .collect();
    edges.sort_by(f64::total_cmp);

    let mut bins: Vec<Bin> = (0..=edges.len())
        .map(|index| Bin {
            x0: if index == 0 { x0 } else { edges[index - 1] },
            x1: if index < edges.len() { edges[index] } else { x1 },
            counts: IndexMap::new(),
        })
        .collect();

    for record in records {
        let salary = record.salary_in_usd;
        if !(x0..=x1).contains(&salary) {
            continue;
        }
        let index = edges.partition_point(|edge| *edge <= salary);
        *bins[index]
            .counts
            .entry(record.experience_level.clone())
            .or_insert(0) += 1;
    }

    trace!(bins = bins.len(), records = records.len(), "aggregated salary bins");
    bins
}

/// Distinct experience levels in first-seen order.
#[must_use]
pub fn experience_levels(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.experience_level.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// One stacked bar segment: bin `bin_index`, level `level`, occupying
/// `[y0, y1)` in count units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSegment {
    pub level: String,
    pub bin_index: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl StackedSegment {
    #[must_use]
    pub fn count(&self) -> usize {
        (self.y1 - self.y0).round() as usize
    }
}

/// Stacks every bin bottom-up in `levels` order.
///
/// Zero-count levels still produce (empty) segments so each layer spans every
/// bin, which keeps segment identity stable across redraws.
#[must_use]
pub fn stack_bins(bins: &[Bin], levels: &[String]) -> Vec<StackedSegment> {
    let mut baselines = vec![0.0_f64; bins.len()];
    let mut segments = Vec::with_capacity(bins.len() * levels.len());
    for level in levels {
        for (bin_index, bin) in bins.iter().enumerate() {
            let y0 = baselines[bin_index];
            let y1 = y0 + bin.count(level) as f64;
            baselines[bin_index] = y1;
            segments.push(StackedSegment {
                level: level.clone(),
                bin_index,
                x0: bin.x0,
                x1: bin.x1,
                y0,
                y1,
            });
        }
    }
    segments
}

/// One `(work_year, mean salary)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub work_year: i32,
    pub mean_salary: f64,
}

/// Chronological mean-salary series for one company size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup {
    pub company_size: String,
    pub points: Vec<YearPoint>,
}

impl YearGroup {
    /// Points with `work_year <= year`.
    #[must_use]
    pub fn prefix(&self, year: i32) -> &[YearPoint] {
        let end = self.points.partition_point(|point| point.work_year <= year);
        &self.points[..end]
    }
}

/// Groups by company size (first-seen order) then work year, averaging salary.
///
/// Records without a year are skipped, and so are groups whose mean is not
/// finite: they mean "no data point", never zero.
#[must_use]
pub fn aggregate_means(records: &[Record]) -> Vec<YearGroup> {
    let mut groups: IndexMap<&str, BTreeMap<i32, (f64, usize)>> = IndexMap::new();
    for record in records {
        let Some(year) = record.work_year else {
            continue;
        };
        let entry = groups
            .entry(record.company_size.as_str())
            .or_default()
            .entry(year)
            .or_insert((0.0, 0));
        entry.0 += record.salary_in_usd;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(company_size, years)| YearGroup {
            company_size: company_size.to_owned(),
            points: years
                .into_iter()
                .filter_map(|(work_year, (sum, count))| {
                    let mean_salary = sum / count as f64;
                    mean_salary.is_finite().then_some(YearPoint {
                        work_year,
                        mean_salary,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Sorted distinct work years.
#[must_use]
pub fn distinct_years(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(|record| record.work_year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

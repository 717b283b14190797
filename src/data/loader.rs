use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Record;
use crate::error::{DashError, DashResult};

/// Relative location of the salary dataset used by the dashboard binary.
pub const DEFAULT_DATASET_PATH: &str = "data/ds_salaries.csv";

/// Raw CSV row. Every column is optional so a missing column degrades into
/// missing values instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    salary_in_usd: String,
    #[serde(default)]
    work_year: String,
    #[serde(default)]
    experience_level: String,
    #[serde(default)]
    company_size: String,
    #[serde(default)]
    company_location: String,
    #[serde(default)]
    employee_residence: String,
    #[serde(default)]
    remote_ratio: String,
}

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub missing_salary: usize,
    pub missing_experience_level: usize,
}

/// Loaded, filtered dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

/// Coerces a CSV cell to a number. Blank, malformed or infinite cells become NaN.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

fn coerce_year(raw: &str) -> Option<i32> {
    let value = coerce_number(raw);
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> DashResult<Dataset> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading salary dataset");
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)?;
    read_rows(reader)
}

pub fn load_dataset_from_reader(input: impl Read) -> DashResult<Dataset> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(input);
    read_rows(reader)
}

pub fn parse_dataset(input: &str) -> DashResult<Dataset> {
    load_dataset_from_reader(input.as_bytes())
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> DashResult<Dataset> {
    let headers = reader.headers()?.clone();
    if !headers.iter().any(|header| header == "salary_in_usd") {
        warn!(?headers, "dataset has no `salary_in_usd` column; every row will be dropped");
    }

    let mut report = LoadReport::default();
    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row.map_err(|err| match err.position() {
            Some(position) => DashError::InvalidData(format!(
                "malformed csv row at line {}: {err}",
                position.line()
            )),
            None => DashError::Csv(err),
        })?;
        report.rows_read += 1;

        let salary_in_usd = coerce_number(&row.salary_in_usd);
        if salary_in_usd.is_nan() {
            report.missing_salary += 1;
            continue;
        }
        if row.experience_level.is_empty() {
            report.missing_experience_level += 1;
            continue;
        }

        records.push(Record {
            salary_in_usd,
            work_year: coerce_year(&row.work_year),
            experience_level: row.experience_level,
            company_size: row.company_size,
            company_location: row.company_location,
            employee_residence: row.employee_residence,
            remote_ratio: coerce_number(&row.remote_ratio),
        });
    }
    report.rows_kept = records.len();

    debug!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        missing_salary = report.missing_salary,
        missing_experience_level = report.missing_experience_level,
        "loaded salary dataset"
    );
    Ok(Dataset { records, report })
}

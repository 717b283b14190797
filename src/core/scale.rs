use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::ticks::{nice_domain, tick_step, ticks};
use crate::error::{DashError, DashResult};

/// Continuous mapping from a numeric domain onto a pixel range.
///
/// Values outside the domain extrapolate linearly; nothing is clamped.
/// A degenerate domain (`start == end`) maps every value to the middle of the
/// range, and a NaN domain yields NaN pixels instead of an error so a broken
/// dataset degrades to an empty-looking chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    /// Fits the domain to `[min, max]` of `values`, ignoring non-finite entries.
    ///
    /// Returns a NaN domain when no finite value exists.
    #[must_use]
    pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let (min, max) = extent(values).unwrap_or((f64::NAN, f64::NAN));
        Self::new((min, max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain to round boundaries for roughly `count` ticks.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (start, end) = nice_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start: start,
            domain_end: end,
            ..self
        }
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }

    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }
}

/// Discrete mapping from categories onto evenly spaced pixel positions.
///
/// Categories keep first-seen order. `padding` is the outer padding expressed
/// in steps, so `0.5` leaves half a step before the first and after the last
/// category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointScale {
    name: String,
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
    step: f64,
    positions: Vec<f64>,
}

impl PointScale {
    /// Builds a point scale named `name` (used in lookup errors).
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, categories: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        let mut scale = Self {
            name: name.into(),
            domain,
            range_start: range.0,
            range_end: range.1,
            padding,
            step: 0.0,
            positions: Vec::new(),
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let count = self.domain.len() as f64;
        let reverse = self.range_end < self.range_start;
        let (low, high) = if reverse {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };

        let step = (high - low) / (count - 1.0 + self.padding * 2.0).max(1.0);
        let start = low + (high - low - step * (count - 1.0)) * 0.5;

        let mut positions: Vec<f64> = (0..self.domain.len())
            .map(|index| start + step * index as f64)
            .collect();
        if reverse {
            positions.reverse();
        }
        self.step = step;
        self.positions = positions;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.domain
            .get_index_of(category)
            .and_then(|index| self.positions.get(index).copied())
    }

    /// Looks up `category`, reporting a category outside the fitted domain.
    pub fn try_position(&self, category: &str) -> DashResult<f64> {
        self.position(category)
            .ok_or_else(|| DashError::UnknownCategory {
                dimension: self.name.clone(),
                category: category.to_owned(),
            })
    }

    /// `(category, pixel)` pairs in domain order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, f64)> {
        self.domain
            .iter()
            .map(String::as_str)
            .zip(self.positions.iter().copied())
    }
}

/// Finite `(min, max)` of `values`, or `None` when nothing finite is present.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

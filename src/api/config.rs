use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_BIN_COUNT, Margins, RecordField, Viewport};
use crate::error::{DashError, DashResult};

/// Upper bound on the requested histogram bucket count.
pub const MAX_BIN_COUNT: usize = 1_000;

/// Canvas size plus the margins reserved around the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margins: Margins,
}

impl ChartLayout {
    #[must_use]
    pub fn new(viewport: Viewport, margins: Margins) -> Self {
        Self { viewport, margins }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub layout: ChartLayout,
    /// Requested bucket count; actual edges snap to round salary values.
    pub bin_count: usize,
    /// Exponent passed to `Color::brighter` on hover.
    pub hover_brighten: f64,
    pub label_font_px: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::new(
                Viewport::new(700, 450),
                Margins::new(20.0, 100.0, 95.0, 60.0),
            ),
            bin_count: DEFAULT_BIN_COUNT,
            hover_brighten: 0.5,
            label_font_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub layout: ChartLayout,
    pub play_interval_ms: u64,
    pub transition_ms: u64,
    pub point_radius: f64,
    pub line_width: f64,
    /// Tooltip offset from the click position, `(dx, dy)`.
    pub tooltip_offset: (f64, f64),
    pub y_tick_count: usize,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::new(
                Viewport::new(700, 450),
                Margins::new(20.0, 100.0, 45.0, 60.0),
            ),
            play_interval_ms: 2_000,
            transition_ms: 800,
            point_radius: 4.0,
            line_width: 2.0,
            tooltip_offset: (10.0, -28.0),
            y_tick_count: 10,
        }
    }
}

impl LineChartConfig {
    #[must_use]
    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.play_interval_ms)
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// How a parallel-coordinates dimension maps values onto its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Linear,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub field: RecordField,
    pub kind: DimensionKind,
}

impl DimensionSpec {
    #[must_use]
    pub const fn linear(field: RecordField) -> Self {
        Self {
            field,
            kind: DimensionKind::Linear,
        }
    }

    #[must_use]
    pub const fn point(field: RecordField) -> Self {
        Self {
            field,
            kind: DimensionKind::Point,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    pub layout: ChartLayout,
    pub dimensions: Vec<DimensionSpec>,
    /// Brush drag area reaches this far left and right of each axis.
    pub brush_half_width: f64,
    pub line_opacity: f64,
    pub category_padding: f64,
    pub axis_padding: f64,
    pub legend_size: (f64, f64),
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::new(
                Viewport::new(1400, 500),
                Margins::new(50.0, 0.0, 50.0, 0.0),
            ),
            dimensions: vec![
                DimensionSpec::linear(RecordField::SalaryInUsd),
                DimensionSpec::point(RecordField::CompanyLocation),
                DimensionSpec::point(RecordField::EmployeeResidence),
                DimensionSpec::point(RecordField::CompanySize),
            ],
            brush_half_width: 10.0,
            line_opacity: 0.3,
            category_padding: 0.5,
            axis_padding: 1.0,
            legend_size: (200.0, 10.0),
        }
    }
}

/// Complete dashboard setup, serializable so hosts can keep it next to the
/// dataset instead of hard-coding sizes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub histogram: HistogramConfig,
    pub line: LineChartConfig,
    pub parallel: ParallelConfig,
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashError::InvalidData(format!("failed to parse dashboard config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DashResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> DashResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashError::InvalidData(format!("failed to serialize dashboard config: {e}"))
        })
    }

    pub fn validate(&self) -> DashResult<()> {
        for layout in [
            self.histogram.layout,
            self.line.layout,
            self.parallel.layout,
        ] {
            layout.viewport.validate()?;
            let margins = layout.margins;
            for (name, value) in [
                ("top", margins.top),
                ("right", margins.right),
                ("bottom", margins.bottom),
                ("left", margins.left),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(DashError::InvalidData(format!(
                        "margin `{name}` must be finite and >= 0"
                    )));
                }
            }
        }

        if self.histogram.bin_count == 0 || self.histogram.bin_count > MAX_BIN_COUNT {
            return Err(DashError::InvalidData(format!(
                "histogram bin count must be in 1..={MAX_BIN_COUNT}"
            )));
        }
        for (name, value) in [
            ("histogram.hover_brighten", self.histogram.hover_brighten),
            ("histogram.label_font_px", self.histogram.label_font_px),
            ("line.point_radius", self.line.point_radius),
            ("line.line_width", self.line.line_width),
            ("parallel.brush_half_width", self.parallel.brush_half_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DashError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        if self.line.play_interval_ms == 0 {
            return Err(DashError::InvalidData(
                "playback interval must be > 0 ms".to_owned(),
            ));
        }
        if !(self.parallel.line_opacity > 0.0 && self.parallel.line_opacity <= 1.0) {
            return Err(DashError::InvalidData(
                "parallel line opacity must be in (0, 1]".to_owned(),
            ));
        }
        if self.parallel.dimensions.is_empty() {
            return Err(DashError::InvalidData(
                "parallel plot needs at least one dimension".to_owned(),
            ));
        }
        for spec in &self.parallel.dimensions {
            let numeric = matches!(
                spec.field,
                RecordField::SalaryInUsd | RecordField::WorkYear | RecordField::RemoteRatio
            );
            if spec.kind == DimensionKind::Linear && !numeric {
                return Err(DashError::InvalidData(format!(
                    "dimension `{}` is categorical and cannot use a linear axis",
                    spec.field.column_name()
                )));
            }
        }
        Ok(())
    }
}

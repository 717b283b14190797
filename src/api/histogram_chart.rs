use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::HistogramConfig;
use crate::core::{
    Bin, EXPERIENCE_LEVELS, LinearScale, PlotArea, Record, StackedSegment, aggregate_counts,
    experience_levels, extent, salary_thresholds, stack_bins,
};
use crate::interaction::{HoverChange, HoverState};
use crate::render::annotations::{push_axis_title, push_title};
use crate::render::axis::{self, AxisStyle};
use crate::render::{
    CategoryPalette, Color, RectPrimitive, RenderFrame, SwatchLegend, TextHAlign, TextPrimitive,
};

pub const HISTOGRAM_TITLE: &str = "Histogram of Salaries by Experience Level";

/// Count label revealed by clicking a segment, canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLabel {
    pub segment: usize,
    pub count: usize,
    pub x: f64,
    pub y: f64,
}

/// Stacked salary histogram split by experience level.
///
/// Segments are addressed by their index in [`HistogramChart::segments`].
#[derive(Debug, Clone)]
pub struct HistogramChart {
    config: HistogramConfig,
    palette: CategoryPalette,
    area: PlotArea,
    x: LinearScale,
    y: LinearScale,
    bins: Vec<Bin>,
    levels: Vec<String>,
    segments: Vec<StackedSegment>,
    fills: Vec<Color>,
    hover: HoverState<usize>,
    label: Option<BarLabel>,
}

impl HistogramChart {
    #[must_use]
    pub fn new(records: &[Record], palette: CategoryPalette, config: HistogramConfig) -> Self {
        let area = config.layout.margins.plot_area(config.layout.viewport);
        let max_salary = extent(records.iter().map(|r| r.salary_in_usd))
            .map_or(0.0, |(_, max)| max);
        let x = LinearScale::new((0.0, max_salary), (0.0, area.width));

        let bins = aggregate_counts(
            records,
            x.domain(),
            &salary_thresholds(max_salary, config.bin_count),
        );
        let levels = experience_levels(records);
        let segments = stack_bins(&bins, &levels);
        let max_total = bins.iter().map(Bin::total).max().unwrap_or(0);
        let y = LinearScale::new((0.0, max_total as f64), (area.height, 0.0));
        let fills = segments
            .iter()
            .map(|segment| palette.color(&segment.level))
            .collect();

        debug!(
            bins = bins.len(),
            levels = levels.len(),
            segments = segments.len(),
            "histogram built"
        );

        Self {
            config,
            palette,
            area,
            x,
            y,
            bins,
            levels,
            segments,
            fills,
            hover: HoverState::default(),
            label: None,
        }
    }

    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    #[must_use]
    pub fn segments(&self) -> &[StackedSegment] {
        &self.segments
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn label(&self) -> Option<&BarLabel> {
        self.label.as_ref()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered().copied()
    }

    /// Current fill of `segment`, hover highlight included.
    #[must_use]
    pub fn fill(&self, segment: usize) -> Option<Color> {
        self.fills.get(segment).copied()
    }

    /// Stable key used for the segment's rect, `"<level>-<bin>"`.
    #[must_use]
    pub fn segment_key(&self, segment: usize) -> Option<String> {
        self.segments
            .get(segment)
            .map(|s| format!("{}-{}", s.level, s.bin_index))
    }

    /// Plot-local `(x, y, width, height)` of `segment`. Bars keep a 1 px gap
    /// on their left edge.
    #[must_use]
    pub fn segment_rect(&self, segment: usize) -> Option<(f64, f64, f64, f64)> {
        let s = self.segments.get(segment)?;
        let left = self.x.map(s.x0);
        let right = self.x.map(s.x1);
        let top = self.y.map(s.y1);
        let bottom = self.y.map(s.y0);
        Some((left + 1.0, top, (right - left - 1.0).max(0.0), bottom - top))
    }

    /// Segment under canvas point `(x, y)`. Empty segments are never hit.
    #[must_use]
    pub fn segment_at(&self, x: f64, y: f64) -> Option<usize> {
        let (x, y) = self.area.to_local(x, y);
        (0..self.segments.len()).find(|&index| {
            self.segments[index].count() > 0
                && self.segment_rect(index).is_some_and(|(left, top, width, height)| {
                    x >= left && x <= left + width && y >= top && y <= top + height
                })
        })
    }

    /// Shows the exact count of `segment`, replacing any previous label.
    pub fn reveal_count(&mut self, segment: usize) -> Option<&BarLabel> {
        let s = self.segments.get(segment)?;
        let center_x = (self.x.map(s.x0) + self.x.map(s.x1)) / 2.0;
        let center_y = self.y.map((s.y0 + s.y1) / 2.0);
        let (x, y) = self.area.to_canvas(center_x, center_y);
        self.label = Some(BarLabel {
            segment,
            count: s.count(),
            x,
            y,
        });
        self.label.as_ref()
    }

    /// Click at canvas `(x, y)`. Clicks that miss every bar leave the current
    /// label in place.
    pub fn click(&mut self, x: f64, y: f64) -> Option<&BarLabel> {
        let segment = self.segment_at(x, y)?;
        self.reveal_count(segment)
    }

    /// Pointer move at canvas `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> HoverChange<usize> {
        let target = self.segment_at(x, y);
        self.set_hovered(target)
    }

    pub fn pointer_leave(&mut self) -> HoverChange<usize> {
        self.set_hovered(None)
    }

    /// Entering brightens the segment's current fill; leaving restores the
    /// palette color of its level.
    pub fn set_hovered(&mut self, segment: Option<usize>) -> HoverChange<usize> {
        let segment = segment.filter(|&index| index < self.segments.len());
        let change = self.hover.update(segment);
        if let Some(left) = change.left {
            self.fills[left] = self.palette.color(&self.segments[left].level);
        }
        if let Some(entered) = change.entered {
            self.fills[entered] = self.fills[entered].brighter(self.config.hover_brighten);
        }
        change
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let area = self.area;
        let mut frame = RenderFrame::new(self.config.layout.viewport);

        for (index, segment) in self.segments.iter().enumerate() {
            if segment.count() == 0 {
                continue;
            }
            let (Some((x, y, width, height)), Some(key)) =
                (self.segment_rect(index), self.segment_key(index))
            else {
                continue;
            };
            let (x, y) = area.to_canvas(x, y);
            frame.rects.push(
                RectPrimitive::new(x, y, width, height, self.fills[index]).with_key(key),
            );
        }

        let style = AxisStyle::default();
        axis::draw_bottom_axis(
            &mut frame,
            area,
            area.height,
            (0.0, area.width),
            &axis::linear_ticks(self.x, 10),
            style,
        );
        axis::draw_left_axis(
            &mut frame,
            area,
            0.0,
            (area.height, 0.0),
            &axis::linear_ticks(self.y, 10),
            style,
        );
        push_axis_title(
            &mut frame,
            "Salary in USD",
            area.left + area.width / 2.0,
            area.top + area.height + 40.0,
            false,
        );
        push_axis_title(
            &mut frame,
            "Count",
            area.left - 45.0,
            area.top + area.height / 2.0,
            true,
        );

        SwatchLegend {
            x: area.left + area.width + 10.0,
            y: area.top,
            row_height: 25.0,
            swatch_size: 15.0,
            label_gap: 5.0,
        }
        .draw(
            &mut frame,
            EXPERIENCE_LEVELS
                .iter()
                .map(|level| (*level, self.palette.color(level))),
        );

        push_title(
            &mut frame,
            HISTOGRAM_TITLE,
            area.left + area.width / 2.0,
            area.top / 1.5,
        );

        if let Some(label) = &self.label {
            frame.texts.push(
                TextPrimitive::new(
                    label.count.to_string(),
                    label.x,
                    label.y,
                    self.config.label_font_px,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }
        frame
    }
}

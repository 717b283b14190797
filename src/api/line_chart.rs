use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::LineChartConfig;
use crate::api::playback::{Playback, PlaybackControls, PlaybackState};
use crate::api::transition::{AnimatedMarks, ExitAction, KeyDiff, MarkPhase};
use crate::core::ticks::format_integer;
use crate::core::{
    COMPANY_SIZES, LinearScale, PlotArea, Record, YearGroup, YearPoint, aggregate_means,
    company_size_label, distinct_years, extent,
};
use crate::error::{DashError, DashResult};
use crate::interaction::{HoverChange, HoverState, Tooltip};
use crate::render::annotations::{LABEL_FONT_PX, push_axis_title, push_title};
use crate::render::axis::{self, AxisStyle};
use crate::render::{
    CategoryPalette, CirclePrimitive, Color, PolylinePrimitive, RectPrimitive, RenderFrame,
    SwatchLegend, TextHAlign, TextPrimitive,
};

pub const LINE_CHART_TITLE: &str = "Average Salary by Work Year and Company Size";

/// Identity of one `(company size, year)` point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointKey {
    pub company_size: String,
    pub work_year: i32,
}

impl PointKey {
    #[must_use]
    pub fn new(company_size: impl Into<String>, work_year: i32) -> Self {
        Self {
            company_size: company_size.into(),
            work_year,
        }
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.company_size, self.work_year)
    }
}

/// Sampled point mark, plot-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMark {
    pub key: PointKey,
    pub x: f64,
    pub y: f64,
    pub exiting: bool,
}

/// Mean salary per work year and company size, revealed year by year.
///
/// The view owns its clock. Hosts drive it with [`LineChart::advance`]; playback
/// ticks fire at their scheduled times inside that call and every transition
/// is sampled from the same clock.
#[derive(Debug, Clone)]
pub struct LineChart {
    config: LineChartConfig,
    palette: CategoryPalette,
    area: PlotArea,
    x: LinearScale,
    y: LinearScale,
    groups: Vec<YearGroup>,
    years: Vec<i32>,
    playback: Playback,
    clock: Duration,
    current_year: Option<i32>,
    lines: AnimatedMarks<String, Vec<(f64, f64)>>,
    points: AnimatedMarks<PointKey, (f64, f64)>,
    hover: HoverState<PointKey>,
    tooltip: Tooltip,
}

impl LineChart {
    /// Builds the view and draws the first year.
    #[must_use]
    pub fn new(records: &[Record], palette: CategoryPalette, config: LineChartConfig) -> Self {
        let area = config.layout.margins.plot_area(config.layout.viewport);
        let groups = aggregate_means(records);
        let years = distinct_years(records);

        let x = LinearScale::from_extent(years.iter().map(|&year| f64::from(year)), (0.0, area.width));
        let max_mean = extent(
            groups
                .iter()
                .flat_map(|group| group.points.iter().map(|point| point.mean_salary)),
        )
        .map_or(0.0, |(_, max)| max);
        let y = LinearScale::new((0.0, max_mean), (area.height, 0.0)).nice(10);

        let duration = config.transition_duration();
        let mut chart = Self {
            playback: Playback::new(years.len(), config.play_interval()),
            config,
            palette,
            area,
            x,
            y,
            groups,
            years,
            clock: Duration::ZERO,
            current_year: None,
            lines: AnimatedMarks::new(duration),
            points: AnimatedMarks::new(duration),
            hover: HoverState::default(),
            tooltip: Tooltip::default(),
        };
        if let Some(&first) = chart.years.first() {
            chart.update(first);
        }
        chart
    }

    #[must_use]
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    #[must_use]
    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
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
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn current_year(&self) -> Option<i32> {
        self.current_year
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    #[must_use]
    pub fn year_index(&self) -> usize {
        self.playback.year_index()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    #[must_use]
    pub fn controls(&self) -> PlaybackControls {
        self.playback.controls()
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&PointKey> {
        self.hover.hovered()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.lines.is_animating() || self.points.is_animating()
    }

    pub fn play(&mut self) -> bool {
        self.playback.play(self.clock)
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    /// Cancels playback for good. In-flight transitions still finish.
    pub fn dispose(&mut self) {
        self.playback.dispose();
        self.tooltip.hide();
    }

    /// Jumps to `year` and redraws; the playback cursor follows.
    pub fn show_year(&mut self, year: i32) -> DashResult<KeyDiff<PointKey>> {
        let index = self
            .years
            .iter()
            .position(|&known| known == year)
            .ok_or_else(|| DashError::InvalidData(format!("no records for work year {year}")))?;
        self.playback.seek(index);
        Ok(self.update(year))
    }

    /// Redraws the prefix of every series up to `year`.
    ///
    /// New points rise from the zero baseline, removed points sink back to it
    /// and disappear, new lines appear in place and removed lines vanish at
    /// once. Everything else moves from where it currently is.
    pub fn update(&mut self, year: i32) -> KeyDiff<PointKey> {
        let (x, y) = (self.x, self.y);
        let position = |point: &YearPoint| (x.map(f64::from(point.work_year)), y.map(point.mean_salary));

        let mut line_targets = Vec::with_capacity(self.groups.len());
        let mut point_targets = Vec::new();
        for group in &self.groups {
            let prefix = group.prefix(year);
            line_targets.push((
                group.company_size.clone(),
                prefix.iter().map(position).collect::<Vec<_>>(),
            ));
            point_targets.extend(
                prefix
                    .iter()
                    .map(|point| (PointKey::new(&group.company_size, point.work_year), position(point))),
            );
        }

        let baseline = y.map(0.0);
        self.lines
            .reconcile(line_targets, |_, target| target.clone(), |_, _| ExitAction::Remove);
        let diff = self.points.reconcile(
            point_targets,
            |_, &(px, _)| (px, baseline),
            |_, &(px, _)| ExitAction::AnimateTo((px, baseline)),
        );
        if self
            .hover
            .hovered()
            .is_some_and(|hovered| diff.exited.contains(hovered))
        {
            self.hover.leave();
        }
        self.current_year = Some(year);

        debug!(
            year,
            entered = diff.entered.len(),
            retained = diff.retained.len(),
            exited = diff.exited.len(),
            "line chart updated"
        );
        diff
    }

    /// Moves the view clock forward by `dt`.
    ///
    /// Due playback ticks fire in order at their exact due times, so the year
    /// cursor never skips regardless of how coarse `dt` is. Returns the number
    /// of ticks fired.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let end = self.clock + dt;
        let mut fired = 0;
        while let Some((due, index)) = self.playback.fire_due(end) {
            self.step_marks(due.saturating_sub(self.clock));
            self.clock = due;
            if let Some(&year) = self.years.get(index) {
                trace!(year, index, "playback tick");
                self.update(year);
            }
            fired += 1;
        }
        self.step_marks(end.saturating_sub(self.clock));
        self.clock = end;
        fired
    }

    /// Completes running transitions without moving the clock or firing
    /// ticks. Used for static exports.
    pub fn settle(&mut self) {
        let duration = self.lines.duration().max(self.points.duration());
        self.step_marks(duration);
    }

    fn step_marks(&mut self, dt: Duration) {
        if dt.is_zero() {
            return;
        }
        self.lines.advance(dt);
        self.points.advance(dt);
    }

    /// Currently sampled point marks, exiting ones included.
    #[must_use]
    pub fn point_marks(&self) -> Vec<PointMark> {
        self.points
            .iter()
            .map(|(key, (x, y), phase)| PointMark {
                key: key.clone(),
                x,
                y,
                exiting: phase == MarkPhase::Exiting,
            })
            .collect()
    }

    /// Currently sampled path of the `company_size` line, plot-local.
    #[must_use]
    pub fn line_path(&self, company_size: &str) -> Option<Vec<(f64, f64)>> {
        self.lines.value(&company_size.to_owned())
    }

    #[must_use]
    pub fn mean_salary(&self, key: &PointKey) -> Option<f64> {
        self.groups
            .iter()
            .find(|group| group.company_size == key.company_size)?
            .points
            .iter()
            .find(|point| point.work_year == key.work_year)
            .map(|point| point.mean_salary)
    }

    /// Topmost point whose circle contains canvas `(x, y)`.
    #[must_use]
    pub fn point_at(&self, x: f64, y: f64) -> Option<PointKey> {
        let (x, y) = self.area.to_local(x, y);
        let radius = self.config.point_radius;
        self.points
            .iter()
            .filter(|(_, (px, py), _)| (px - x).hypot(py - y) <= radius)
            .last()
            .map(|(key, _, _)| key.clone())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> HoverChange<PointKey> {
        let target = self.point_at(x, y);
        self.hover.update(target)
    }

    pub fn pointer_leave(&mut self) -> HoverChange<PointKey> {
        self.hover.leave()
    }

    /// Clicking a point shows its mean next to the pointer; clicking anywhere
    /// else hides the tooltip. Returns whether a point was hit.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let hit = self
            .point_at(x, y)
            .and_then(|key| self.mean_salary(&key));
        match hit {
            Some(mean) => {
                let (dx, dy) = self.config.tooltip_offset;
                self.tooltip.show(format_salary(mean), x + dx, y + dy);
                true
            }
            None => {
                self.tooltip.hide();
                false
            }
        }
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let area = self.area;
        let mut frame = RenderFrame::new(self.config.layout.viewport);

        for (company_size, path, _) in self.lines.iter() {
            if path.len() < 2 {
                continue;
            }
            let points = path.iter().map(|&(x, y)| area.to_canvas(x, y)).collect();
            frame.polylines.push(
                PolylinePrimitive::new(points, self.config.line_width, self.palette.color(company_size))
                    .with_key(company_size.clone()),
            );
        }

        let hovered = self.hover.hovered();
        for (key, (x, y), _) in self.points.iter() {
            let (cx, cy) = area.to_canvas(x, y);
            let mut circle = CirclePrimitive::new(
                cx,
                cy,
                self.config.point_radius,
                self.palette.color(&key.company_size),
            )
            .with_key(key.to_string());
            if hovered == Some(key) {
                circle = circle.with_stroke(Color::WHITE, 2.0);
            }
            frame.circles.push(circle);
        }

        let style = AxisStyle::default();
        let year_ticks: Vec<_> = axis::linear_ticks_with(self.x, 10, format_integer)
            .into_iter()
            .filter(|tick| {
                let value = self.x.invert(tick.position);
                (value - value.round()).abs() < 1e-6
            })
            .collect();
        axis::draw_bottom_axis(&mut frame, area, area.height, (0.0, area.width), &year_ticks, style);
        axis::draw_left_axis(
            &mut frame,
            area,
            0.0,
            (area.height, 0.0),
            &axis::linear_ticks(self.y, self.config.y_tick_count),
            style,
        );
        push_axis_title(
            &mut frame,
            "Work Year",
            area.left + area.width / 2.0,
            area.top + area.height + 40.0,
            false,
        );
        push_axis_title(
            &mut frame,
            "Average Salary (USD)",
            area.left - 45.0,
            area.top + area.height / 2.0,
            true,
        );

        SwatchLegend {
            x: area.left + area.width + 20.0,
            y: area.top,
            row_height: 20.0,
            swatch_size: 15.0,
            label_gap: 5.0,
        }
        .draw(
            &mut frame,
            COMPANY_SIZES
                .iter()
                .map(|size| (company_size_label(size), self.palette.color(size))),
        );
        push_title(&mut frame, LINE_CHART_TITLE, area.left + area.width / 2.0, area.top / 1.5);

        if self.tooltip.visible {
            let width = self.tooltip.text.len() as f64 * LABEL_FONT_PX * 0.6 + 20.0;
            frame.rects.push(
                RectPrimitive::new(self.tooltip.x, self.tooltip.y, width, LABEL_FONT_PX + 10.0, Color::WHITE)
                    .with_border(1.0, Color::from_rgb8(0xcc, 0xcc, 0xcc))
                    .with_key("tooltip"),
            );
            frame.texts.push(TextPrimitive::new(
                self.tooltip.text.clone(),
                self.tooltip.x + 10.0,
                self.tooltip.y + LABEL_FONT_PX + 2.0,
                LABEL_FONT_PX,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
        frame
    }
}

/// `$` followed by the value with two decimals, e.g. `$150000.00`.
#[must_use]
pub fn format_salary(value: f64) -> String {
    format!("${value:.2}")
}

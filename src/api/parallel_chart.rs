use tracing::{debug, trace};

use crate::api::{DimensionKind, DimensionSpec, ParallelConfig};
use crate::core::{LinearScale, PlotArea, PointScale, Record, RecordField};
use crate::interaction::{BrushSelection, BrushSet};
use crate::render::annotations::{LABEL_FONT_PX, push_title};
use crate::render::axis::{self, AxisStyle};
use crate::render::{
    Color, PolylinePrimitive, RectPrimitive, RenderFrame, SequentialPalette, TextHAlign,
    TextPrimitive,
};

pub const PARALLEL_TITLE: &str = "Parallel Coordinates Plot of Salary, Location, Company Size";
pub const LEGEND_TITLE: &str = "Remote Ratio";

/// Vertical mapping of one parallel axis.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionScale {
    Linear(LinearScale),
    Point(PointScale),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub field: RecordField,
    pub scale: DimensionScale,
}

impl Dimension {
    /// Fits a scale for `spec` to `records` over plot height `height`.
    #[must_use]
    pub fn fit(spec: DimensionSpec, records: &[Record], height: f64, padding: f64) -> Self {
        let field = spec.field;
        let scale = match spec.kind {
            DimensionKind::Linear => DimensionScale::Linear(LinearScale::from_extent(
                records.iter().filter_map(|record| record.numeric(field)),
                (height, 0.0),
            )),
            DimensionKind::Point => DimensionScale::Point(PointScale::new(
                field.column_name(),
                records.iter().map(|record| record.category(field)),
                (height, 0.0),
                padding,
            )),
        };
        Self { field, scale }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.field.column_name()
    }

    /// Plot-local y of `record` on this axis; NaN when the value is missing.
    #[must_use]
    pub fn pixel(&self, record: &Record) -> f64 {
        match &self.scale {
            DimensionScale::Linear(scale) => record
                .numeric(self.field)
                .map_or(f64::NAN, |value| scale.map(value)),
            DimensionScale::Point(scale) => scale
                .position(&record.category(self.field))
                .unwrap_or(f64::NAN),
        }
    }

    /// Value a brush on this axis tests `record` by: the data value on
    /// linear axes, the category's pixel position on point axes. NaN when
    /// missing.
    #[must_use]
    pub fn brush_key(&self, record: &Record) -> f64 {
        match &self.scale {
            DimensionScale::Linear(_) => record.numeric(self.field).unwrap_or(f64::NAN),
            DimensionScale::Point(_) => self.pixel(record),
        }
    }

    /// Whether `record` passes `selection`, both ends inclusive.
    #[must_use]
    pub fn selects(&self, record: &Record, selection: BrushSelection) -> bool {
        self.key_selected(self.brush_key(record), selection)
    }

    fn key_selected(&self, key: f64, selection: BrushSelection) -> bool {
        if key.is_nan() {
            return false;
        }
        match &self.scale {
            DimensionScale::Linear(scale) => {
                let (a, b) = (scale.invert(selection.y0), scale.invert(selection.y1));
                key >= a.min(b) && key <= a.max(b)
            }
            DimensionScale::Point(_) => selection.contains(key),
        }
    }
}

/// What the chart keeps per record: vertices, brush keys and base color.
#[derive(Debug, Clone, PartialEq)]
struct ParallelLine {
    path: Vec<(f64, f64)>,
    keys: Vec<f64>,
    color: Color,
}

/// One polyline per record across ordered dimensions, filtered by brushes.
#[derive(Debug, Clone)]
pub struct ParallelChart {
    config: ParallelConfig,
    palette: SequentialPalette,
    area: PlotArea,
    axes: PointScale,
    dimensions: Vec<Dimension>,
    lines: Vec<ParallelLine>,
    brushes: BrushSet,
    visible: Vec<bool>,
}

impl ParallelChart {
    #[must_use]
    pub fn new(records: &[Record], palette: SequentialPalette, config: ParallelConfig) -> Self {
        let area = config.layout.margins.plot_area(config.layout.viewport);
        let dimensions: Vec<Dimension> = config
            .dimensions
            .iter()
            .map(|&spec| Dimension::fit(spec, records, area.height, config.category_padding))
            .collect();
        let axes = PointScale::new(
            "dimension",
            dimensions.iter().map(Dimension::name),
            (0.0, area.width),
            config.axis_padding,
        );
        debug!(
            records = records.len(),
            dimensions = dimensions.len(),
            "parallel coordinates built"
        );
        let lines = records
            .iter()
            .map(|record| ParallelLine {
                path: dimensions
                    .iter()
                    .map(|dimension| {
                        let x = axes.position(dimension.name()).unwrap_or(f64::NAN);
                        (x, dimension.pixel(record))
                    })
                    .collect(),
                keys: dimensions.iter().map(|dimension| dimension.brush_key(record)).collect(),
                color: palette.color(record.remote_ratio),
            })
            .collect();
        Self {
            brushes: BrushSet::new(dimensions.len(), (0.0, area.height)),
            visible: vec![true; records.len()],
            lines,
            config,
            palette,
            area,
            axes,
            dimensions,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn palette(&self) -> &SequentialPalette {
        &self.palette
    }

    #[must_use]
    pub fn brushes(&self) -> &BrushSet {
        &self.brushes
    }

    /// Plot-local x of axis `axis`.
    #[must_use]
    pub fn axis_x(&self, axis: usize) -> Option<f64> {
        self.axes.position(self.dimensions.get(axis)?.name())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_visible(&self, line: usize) -> bool {
        self.visible.get(line).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&visible| visible).count()
    }

    /// Plot-local vertices of `line` in axis order.
    #[must_use]
    pub fn line_path(&self, line: usize) -> Option<Vec<(f64, f64)>> {
        self.lines.get(line).map(|line| line.path.clone())
    }

    #[must_use]
    pub fn line_color(&self, line: usize) -> Option<Color> {
        self.lines.get(line).map(|line| line.color)
    }

    /// Sets or clears the brush on `axis` in plot-local pixels.
    pub fn set_brush(&mut self, axis: usize, range: Option<(f64, f64)>) -> bool {
        let changed = self.brushes.set(axis, range);
        if changed {
            self.refresh_visibility();
        }
        changed
    }

    pub fn clear_brush(&mut self, axis: usize) -> bool {
        self.set_brush(axis, None)
    }

    pub fn clear_all_brushes(&mut self) {
        self.brushes.clear_all();
        self.refresh_visibility();
    }

    /// Axis whose brush area contains canvas `(x, y)`.
    #[must_use]
    pub fn brush_axis_at(&self, x: f64, y: f64) -> Option<usize> {
        let (x, y) = self.area.to_local(x, y);
        if !(0.0..=self.area.height).contains(&y) {
            return None;
        }
        let half = self.config.brush_half_width;
        (0..self.dimensions.len())
            .find(|&axis| self.axis_x(axis).is_some_and(|ax| (x - ax).abs() <= half))
    }

    /// Pointer press at canvas `(x, y)`. Returns the axis a drag started on.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<usize> {
        let axis = self.brush_axis_at(x, y)?;
        let (_, local_y) = self.area.to_local(x, y);
        self.brushes.begin_drag(axis, local_y).then_some(axis)
    }

    /// Pointer move during a drag; visibility follows the brush live.
    pub fn pointer_drag(&mut self, y: f64) -> Option<usize> {
        let axis = self.brushes.drag_to(y - self.area.top)?;
        self.refresh_visibility();
        Some(axis)
    }

    pub fn pointer_up(&mut self, y: f64) -> Option<usize> {
        let axis = self.brushes.end_drag(y - self.area.top)?;
        self.refresh_visibility();
        Some(axis)
    }

    fn refresh_visibility(&mut self) {
        let active: Vec<(usize, BrushSelection)> = self.brushes.active().collect();
        for (line, visible) in self.lines.iter().zip(self.visible.iter_mut()) {
            *visible = active.iter().all(|&(axis, selection)| {
                match (self.dimensions.get(axis), line.keys.get(axis)) {
                    (Some(dimension), Some(&key)) => dimension.key_selected(key, selection),
                    _ => false,
                }
            });
        }
        trace!(
            brushes = active.len(),
            visible = self.visible_count(),
            "brush visibility refreshed"
        );
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let area = self.area;
        let viewport = self.config.layout.viewport;
        let mut frame = RenderFrame::new(viewport);

        for (index, line) in self.lines.iter().enumerate() {
            if line.path.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
                continue;
            }
            frame.polylines.push(
                PolylinePrimitive::new(
                    line.path.iter().map(|&(x, y)| area.to_canvas(x, y)).collect(),
                    1.0,
                    line.color.with_alpha(self.config.line_opacity),
                )
                .with_visibility(self.visible[index])
                .with_key(format!("record-{index}")),
            );
        }

        let style = AxisStyle::default();
        for (axis, dimension) in self.dimensions.iter().enumerate() {
            let Some(x) = self.axis_x(axis) else {
                continue;
            };
            let ticks = match &dimension.scale {
                DimensionScale::Linear(scale) => axis::linear_ticks(*scale, 10),
                DimensionScale::Point(scale) => axis::point_ticks(scale),
            };
            axis::draw_left_axis(&mut frame, area, x, (area.height, 0.0), &ticks, style);
            let (title_x, title_y) = area.to_canvas(x, -10.0);
            frame.texts.push(TextPrimitive::new(
                dimension.name(),
                title_x,
                title_y,
                LABEL_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            ));

            if let Some(selection) = self.brushes.selection(axis) {
                let half = self.config.brush_half_width;
                let (left, top) = area.to_canvas(x - half, selection.y0);
                frame.rects.push(
                    RectPrimitive::new(
                        left,
                        top,
                        half * 2.0,
                        selection.height(),
                        Color::from_rgb8(0x77, 0x77, 0x77).with_alpha(0.3),
                    )
                    .with_border(1.0, Color::WHITE)
                    .with_key(format!("brush-{axis}")),
                );
            }
        }

        self.draw_legend(&mut frame);
        push_title(&mut frame, PARALLEL_TITLE, f64::from(viewport.width) / 2.0, 25.0);
        frame
    }

    fn draw_legend(&self, frame: &mut RenderFrame) {
        let viewport = self.config.layout.viewport;
        let (width, height) = self.config.legend_size;
        let legend = PlotArea {
            left: f64::from(viewport.width) / 2.0 - width / 2.0,
            top: f64::from(viewport.height) - 30.0,
            width,
            height,
        };

        frame.rects.push(
            RectPrimitive::new(legend.left, legend.top, width, height, Color::WHITE)
                .with_gradient(self.palette.gradient_stops(10))
                .with_border(1.0, Color::BLACK)
                .with_key("legend-gradient"),
        );
        let scale = LinearScale::new(self.palette.domain(), (0.0, width));
        let ticks = axis::linear_ticks_with(scale, 5, |value| format!("{value:.2}"));
        axis::draw_bottom_axis(frame, legend, height, (0.0, width), &ticks, AxisStyle::default());
        frame.texts.push(
            TextPrimitive::new(
                LEGEND_TITLE,
                legend.left + width / 2.0,
                legend.top - 6.0,
                LABEL_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
}

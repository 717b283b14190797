use crate::core::ticks::format_tick;
use crate::core::{LinearScale, PlotArea, PointScale};
use crate::render::{Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// Axis stroke and label styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub tick_size_px: f64,
    pub label_gap_px: f64,
    pub font_size_px: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 1.0,
            tick_size_px: 6.0,
            label_gap_px: 3.0,
            font_size_px: 10.0,
        }
    }
}

/// One tick in plot-local pixels with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Ticks for a linear scale, labelled with grouped decimals.
#[must_use]
pub fn linear_ticks(scale: LinearScale, count: usize) -> Vec<AxisTick> {
    let step = scale.tick_step(count);
    linear_ticks_with(scale, count, |value| format_tick(value, step))
}

/// Ticks for a linear scale with a caller-provided label format.
#[must_use]
pub fn linear_ticks_with(
    scale: LinearScale,
    count: usize,
    format: impl Fn(f64) -> String,
) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            position: scale.map(value),
            label: format(value),
        })
        .filter(|tick| tick.position.is_finite())
        .collect()
}

/// One tick per category of a point scale.
#[must_use]
pub fn point_ticks(scale: &PointScale) -> Vec<AxisTick> {
    scale
        .positions()
        .map(|(category, position)| AxisTick {
            position,
            label: category.to_owned(),
        })
        .collect()
}

/// Horizontal axis at plot-local `y`, ticks hanging downwards.
pub fn draw_bottom_axis(
    frame: &mut RenderFrame,
    area: PlotArea,
    y: f64,
    span: (f64, f64),
    ticks: &[AxisTick],
    style: AxisStyle,
) {
    let (x0, y0) = area.to_canvas(span.0, y);
    let (x1, _) = area.to_canvas(span.1, y);
    push_line(frame, (x0, y0), (x1, y0), style);

    for tick in ticks {
        let (x, y) = area.to_canvas(tick.position, y);
        push_line(frame, (x, y), (x, y + style.tick_size_px), style);
        push_text(
            frame,
            TextPrimitive::new(
                tick.label.clone(),
                x,
                y + style.tick_size_px + style.label_gap_px + style.font_size_px,
                style.font_size_px,
                style.color,
                TextHAlign::Center,
            ),
        );
    }
}

/// Vertical axis at plot-local `x`, ticks pointing left.
pub fn draw_left_axis(
    frame: &mut RenderFrame,
    area: PlotArea,
    x: f64,
    span: (f64, f64),
    ticks: &[AxisTick],
    style: AxisStyle,
) {
    let (x0, y0) = area.to_canvas(x, span.0);
    let (_, y1) = area.to_canvas(x, span.1);
    push_line(frame, (x0, y0), (x0, y1), style);

    for tick in ticks {
        let (x, y) = area.to_canvas(x, tick.position);
        push_line(frame, (x - style.tick_size_px, y), (x, y), style);
        push_text(
            frame,
            TextPrimitive::new(
                tick.label.clone(),
                x - style.tick_size_px - style.label_gap_px,
                y + style.font_size_px * 0.32,
                style.font_size_px,
                style.color,
                TextHAlign::Right,
            ),
        );
    }
}

fn push_line(frame: &mut RenderFrame, from: (f64, f64), to: (f64, f64), style: AxisStyle) {
    let line = LinePrimitive::new(from.0, from.1, to.0, to.1, style.stroke_width, style.color);
    if line.validate().is_ok() {
        frame.lines.push(line);
    }
}

fn push_text(frame: &mut RenderFrame, text: TextPrimitive) {
    if text.validate().is_ok() {
        frame.texts.push(text);
    }
}

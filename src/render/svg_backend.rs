use std::fmt::{self, Write};

use crate::error::{DashError, DashResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectFill, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Serializes frames into standalone SVG documents.
///
/// Keyed primitives carry their key as `data-key` so hosts can bind pointer
/// events back to chart elements.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    gradient_count: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document, empty before the first `render`.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_document(&mut self, frame: &RenderFrame) -> fmt::Result {
        let mut out = String::new();
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;

        self.gradient_count = 0;
        let mut defs = String::new();
        let mut body = String::new();

        for polyline in &frame.polylines {
            write_polyline(&mut body, polyline)?;
        }
        for rect in &frame.rects {
            let fill = match &rect.fill {
                RectFill::Solid(color) => fill_attrs(*color),
                RectFill::HorizontalGradient(stops) => {
                    let id = format!("gradient-{}", self.gradient_count);
                    self.gradient_count += 1;
                    write_gradient(&mut defs, &id, stops)?;
                    format!(r#"fill="url(#{id})""#)
                }
            };
            write_rect(&mut body, rect, &fill)?;
        }
        for line in &frame.lines {
            write_line(&mut body, line)?;
        }
        for circle in &frame.circles {
            write_circle(&mut body, circle)?;
        }
        for text in &frame.texts {
            write_text(&mut body, text)?;
        }

        if !defs.is_empty() {
            write!(out, "<defs>{defs}</defs>")?;
        }
        out.push_str(&body);
        out.push_str("</svg>");
        self.document = out;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()> {
        frame.validate()?;
        self.write_document(frame)
            .map_err(|err| DashError::InvalidData(format!("failed to write svg: {err}")))
    }
}

fn fill_attrs(color: Color) -> String {
    let mut attrs = format!(r#"fill="{}""#, color.to_hex());
    if color.alpha < 1.0 {
        attrs.push_str(&format!(r#" fill-opacity="{}""#, trim_number(color.alpha)));
    }
    attrs
}

fn stroke_attrs(color: Color, width: f64) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{}""#,
        color.to_hex(),
        trim_number(width)
    );
    if color.alpha < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, trim_number(color.alpha)));
    }
    attrs
}

fn key_attr(key: Option<&str>) -> String {
    key.map(|key| format!(r#" data-key="{}""#, escape(key)))
        .unwrap_or_default()
}

fn write_polyline(out: &mut String, polyline: &PolylinePrimitive) -> fmt::Result {
    let mut path = String::new();
    for (index, (x, y)) in polyline.points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        write!(path, "{command}{},{}", trim_number(*x), trim_number(*y))?;
    }
    let display = if polyline.visible {
        ""
    } else {
        r#" style="display:none""#
    };
    write!(
        out,
        r#"<path d="{path}" fill="none" {}{}{display}/>"#,
        stroke_attrs(polyline.color, polyline.stroke_width),
        key_attr(polyline.key.as_deref()),
    )
}

fn write_rect(out: &mut String, rect: &RectPrimitive, fill: &str) -> fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" {fill}"#,
        trim_number(rect.x),
        trim_number(rect.y),
        trim_number(rect.width),
        trim_number(rect.height),
    )?;
    if rect.border_width > 0.0 {
        write!(out, " {}", stroke_attrs(rect.border_color, rect.border_width))?;
    }
    write!(out, "{}/>", key_attr(rect.key.as_deref()))
}

fn write_gradient(out: &mut String, id: &str, stops: &[Color]) -> fmt::Result {
    write!(out, r#"<linearGradient id="{id}" x1="0%" x2="100%">"#)?;
    let last = stops.len().saturating_sub(1).max(1) as f64;
    for (index, stop) in stops.iter().enumerate() {
        write!(
            out,
            r#"<stop offset="{}%" stop-color="{}"/>"#,
            trim_number(index as f64 / last * 100.0),
            stop.to_hex()
        )?;
    }
    out.push_str("</linearGradient>");
    Ok(())
}

fn write_line(out: &mut String, line: &LinePrimitive) -> fmt::Result {
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
        trim_number(line.x1),
        trim_number(line.y1),
        trim_number(line.x2),
        trim_number(line.y2),
        stroke_attrs(line.color, line.stroke_width),
    )
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> fmt::Result {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" {}"#,
        trim_number(circle.cx),
        trim_number(circle.cy),
        trim_number(circle.radius),
        fill_attrs(circle.fill),
    )?;
    if let Some((color, width)) = circle.stroke {
        write!(out, " {}", stroke_attrs(color, width))?;
    }
    write!(out, "{}/>", key_attr(circle.key.as_deref()))
}

fn write_text(out: &mut String, text: &TextPrimitive) -> fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let (x, y) = (trim_number(text.x), trim_number(text.y));
    write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{}" {} text-anchor="{anchor}""#,
        trim_number(text.font_size_px),
        fill_attrs(text.color),
    )?;
    if text.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {x} {y})""#,
            trim_number(text.rotation_deg)
        )?;
    }
    write!(out, ">{}</text>", escape(&text.text))
}

/// Fixed three-decimal formatting with trailing zeros removed.
fn trim_number(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

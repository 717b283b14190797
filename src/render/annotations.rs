use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub const TITLE_FONT_PX: f64 = 16.0;
pub const LABEL_FONT_PX: f64 = 12.0;

/// Bold centered chart title at canvas `(x, y)`.
pub fn push_title(frame: &mut RenderFrame, text: &str, x: f64, y: f64) {
    frame.texts.push(
        TextPrimitive::new(text, x, y, TITLE_FONT_PX, Color::BLACK, TextHAlign::Center).bold(),
    );
}

/// Centered axis title; vertical titles read bottom to top.
pub fn push_axis_title(frame: &mut RenderFrame, text: &str, x: f64, y: f64, vertical: bool) {
    let label = TextPrimitive::new(text, x, y, LABEL_FONT_PX, Color::BLACK, TextHAlign::Center);
    frame
        .texts
        .push(if vertical { label.rotated(-90.0) } else { label });
}

/// Column of color swatches with labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchLegend {
    pub x: f64,
    pub y: f64,
    pub row_height: f64,
    pub swatch_size: f64,
    pub label_gap: f64,
}

impl SwatchLegend {
    pub fn draw<'a>(self, frame: &mut RenderFrame, entries: impl IntoIterator<Item = (&'a str, Color)>) {
        for (row, (label, color)) in entries.into_iter().enumerate() {
            let top = self.y + row as f64 * self.row_height;
            frame.rects.push(
                RectPrimitive::new(self.x, top, self.swatch_size, self.swatch_size, color)
                    .with_key(format!("legend-{label}")),
            );
            frame.texts.push(TextPrimitive::new(
                label,
                self.x + self.swatch_size + self.label_gap,
                top + self.swatch_size * 0.8,
                LABEL_FONT_PX,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
    }
}

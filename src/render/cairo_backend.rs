use std::path::Path;

use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;

use crate::error::{DashError, DashResult};
use crate::render::{Color, RectFill, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango offscreen renderer, used for PNG export of chart frames.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> DashResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(DashError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> DashResult<()> {
        let mut file = std::fs::File::create(path)?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| DashError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> DashResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for polyline in frame.polylines.iter().filter(|p| p.visible) {
            let mut points = polyline.points.iter();
            let Some(&(x, y)) = points.next() else {
                continue;
            };
            context.move_to(x, y);
            for &(x, y) in points {
                context.line_to(x, y);
            }
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context
                .stroke()
                .map_err(|err| backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            match &rect.fill {
                RectFill::Solid(color) => apply_color(context, *color),
                RectFill::HorizontalGradient(stops) => {
                    let gradient =
                        LinearGradient::new(rect.x, rect.y, rect.x + rect.width, rect.y);
                    let last = stops.len().saturating_sub(1).max(1) as f64;
                    for (index, stop) in stops.iter().enumerate() {
                        gradient.add_color_stop_rgba(
                            index as f64 / last,
                            stop.red,
                            stop.green,
                            stop.blue,
                            stop.alpha,
                        );
                    }
                    context
                        .set_source(&gradient)
                        .map_err(|err| backend_error("failed to set gradient source", err))?;
                }
            }
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for circle in &frame.circles {
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, std::f64::consts::TAU);
            apply_color(context, circle.fill);
            match circle.stroke {
                Some((color, width)) => {
                    context
                        .fill_preserve()
                        .map_err(|err| backend_error("failed to fill circle", err))?;
                    apply_color(context, color);
                    context.set_line_width(width);
                    context
                        .stroke()
                        .map_err(|err| backend_error("failed to stroke circle", err))?;
                }
                None => context
                    .fill()
                    .map_err(|err| backend_error("failed to fill circle", err))?,
            }
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let weight = if text.bold { "Bold " } else { "" };
            let font_description =
                FontDescription::from_string(&format!("Sans {weight}{}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let offset_x = match text.h_align {
                TextHAlign::Left => 0.0,
                TextHAlign::Center => -f64::from(text_width) / 2.0,
                TextHAlign::Right => -f64::from(text_width),
            };

            context.save().map_err(|err| backend_error("failed to save context", err))?;
            context.translate(text.x, text.y);
            context.rotate(text.rotation_deg.to_radians());
            apply_color(context, text.color);
            // SVG anchors text on the baseline; pango lays out from the top.
            context.move_to(offset_x, -f64::from(text_height) * 0.8);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| backend_error("failed to restore context", err))?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| backend_error("failed to create cairo context", err))?;
        self.draw(&context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn backend_error(context: &str, err: cairo::Error) -> DashError {
    DashError::InvalidData(format!("{context}: {err}"))
}

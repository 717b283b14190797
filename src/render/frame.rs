use crate::core::Viewport;
use crate::error::DashResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// Backend-agnostic scene for one chart canvas.
///
/// Backends paint in a fixed order: polylines, rects, lines, circles, texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            polylines: Vec::new(),
            rects: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> DashResult<()> {
        self.viewport.validate()?;

        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn find_rect(&self, key: &str) -> Option<&RectPrimitive> {
        self.rects.iter().find(|rect| rect.key.as_deref() == Some(key))
    }

    #[must_use]
    pub fn find_circle(&self, key: &str) -> Option<&CirclePrimitive> {
        self.circles
            .iter()
            .find(|circle| circle.key.as_deref() == Some(key))
    }

    #[must_use]
    pub fn find_polyline(&self, key: &str) -> Option<&PolylinePrimitive> {
        self.polylines
            .iter()
            .find(|polyline| polyline.key.as_deref() == Some(key))
    }

    #[must_use]
    pub fn visible_polyline_count(&self) -> usize {
        self.polylines.iter().filter(|p| p.visible).count()
    }
}

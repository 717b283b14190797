pub mod annotations;
pub mod axis;
mod frame;
mod null_renderer;
mod palette;
mod primitives;
mod svg_backend;

pub use annotations::SwatchLegend;
pub use axis::{AxisStyle, AxisTick};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use palette::{CategoryPalette, SequentialPalette};
pub use primitives::{
    BRIGHTER_FACTOR, CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectFill,
    RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_backend::SvgRenderer;

use crate::error::DashResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully built `RenderFrame`; chart state, scales and
/// interaction never leak into drawing code.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};

use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};

/// Pixel size of one drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> DashResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DashError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Space reserved around the plot for axes, labels and legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Inner plot rectangle for `viewport`.
    ///
    /// Width and height never go below zero; an oversized margin produces a
    /// degenerate plot rather than an error.
    #[must_use]
    pub fn plot_area(self, viewport: Viewport) -> PlotArea {
        PlotArea {
            left: self.left,
            top: self.top,
            width: (f64::from(viewport.width) - self.left - self.right).max(0.0),
            height: (f64::from(viewport.height) - self.top - self.bottom).max(0.0),
        }
    }
}

/// Plot rectangle in canvas pixels. Chart geometry is computed in plot-local
/// coordinates and translated by `(left, top)` when frames are built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn to_canvas(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.left, y + self.top)
    }

    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.left, y - self.top)
    }
}

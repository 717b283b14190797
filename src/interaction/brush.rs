use serde::{Deserialize, Serialize};
use tracing::trace;

/// Active vertical range on one axis, plot-local pixels, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub y0: f64,
    pub y1: f64,
}

impl BrushSelection {
    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        y >= self.y0 && y <= self.y1
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    /// Drawing a fresh selection from `anchor`.
    Create { anchor: f64 },
    /// Moving an existing selection; `grab` is the pointer offset from `y0`.
    Move { grab: f64, height: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    axis: usize,
    mode: DragMode,
}

/// Per-axis brush selections plus the drag gesture in progress.
///
/// Selections are clamped to the brush extent `[min_y, max_y]`. A selection
/// that collapses to zero height clears the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSet {
    selections: Vec<Option<BrushSelection>>,
    extent: (f64, f64),
    drag: Option<Drag>,
}

impl BrushSet {
    #[must_use]
    pub fn new(axis_count: usize, extent: (f64, f64)) -> Self {
        let extent = if extent.1 < extent.0 {
            (extent.1, extent.0)
        } else {
            extent
        };
        Self {
            selections: vec![None; axis_count],
            extent,
            drag: None,
        }
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn selection(&self, axis: usize) -> Option<BrushSelection> {
        self.selections.get(axis).copied().flatten()
    }

    /// `(axis, selection)` for every non-empty brush.
    pub fn active(&self) -> impl Iterator<Item = (usize, BrushSelection)> + '_ {
        self.selections
            .iter()
            .enumerate()
            .filter_map(|(axis, selection)| selection.map(|s| (axis, s)))
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Sets or clears `axis`. Returns `false` for an unknown axis.
    pub fn set(&mut self, axis: usize, range: Option<(f64, f64)>) -> bool {
        let Some(slot) = self.selections.get_mut(axis) else {
            return false;
        };
        *slot = range.and_then(|(a, b)| normalize(a, b, self.extent));
        trace!(axis, selection = ?*slot, "brush updated");
        true
    }

    pub fn clear(&mut self, axis: usize) -> bool {
        self.set(axis, None)
    }

    pub fn clear_all(&mut self) {
        self.selections.iter_mut().for_each(|slot| *slot = None);
        self.drag = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag on `axis` at plot-local `y`.
    ///
    /// Pressing inside the current selection moves it; pressing elsewhere
    /// starts a new selection (the old one is replaced once the pointer moves).
    pub fn begin_drag(&mut self, axis: usize, y: f64) -> bool {
        if axis >= self.selections.len() || !y.is_finite() {
            return false;
        }
        let mode = match self.selection(axis) {
            Some(selection) if selection.contains(y) => DragMode::Move {
                grab: y - selection.y0,
                height: selection.height(),
            },
            _ => DragMode::Create { anchor: self.clamp(y) },
        };
        self.drag = Some(Drag { axis, mode });
        true
    }

    /// Updates the dragged selection. Returns the axis whose brush changed.
    pub fn drag_to(&mut self, y: f64) -> Option<usize> {
        let drag = self.drag?;
        if !y.is_finite() {
            return None;
        }
        let range = match drag.mode {
            DragMode::Create { anchor } => (anchor, self.clamp(y)),
            DragMode::Move { grab, height } => {
                let upper = (self.extent.1 - height).max(self.extent.0);
                let top = (y - grab).clamp(self.extent.0, upper);
                (top, top + height)
            }
        };
        self.set(drag.axis, Some(range));
        Some(drag.axis)
    }

    /// Finishes the gesture. A zero-height result clears the axis.
    pub fn end_drag(&mut self, y: f64) -> Option<usize> {
        let axis = self.drag_to(y);
        self.drag = None;
        axis
    }

    fn clamp(&self, y: f64) -> f64 {
        y.clamp(self.extent.0, self.extent.1)
    }
}

fn normalize(a: f64, b: f64, extent: (f64, f64)) -> Option<BrushSelection> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let y0 = a.min(b).clamp(extent.0, extent.1);
    let y1 = a.max(b).clamp(extent.0, extent.1);
    (y1 > y0).then_some(BrushSelection { y0, y1 })
}

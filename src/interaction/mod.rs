mod brush;

pub use brush::{BrushSelection, BrushSet};

use serde::{Deserialize, Serialize};

/// Hover enter/leave pair produced by one pointer move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverChange<K> {
    pub left: Option<K>,
    pub entered: Option<K>,
}

impl<K> HoverChange<K> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Tracks which keyed element is under the pointer.
///
/// Holds no styling; charts react to the reported enter/leave pairs the same
/// way mouseover/mouseout handlers would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverState<K> {
    hovered: Option<K>,
}

impl<K> Default for HoverState<K> {
    fn default() -> Self {
        Self { hovered: None }
    }
}

impl<K: Clone + PartialEq> HoverState<K> {
    #[must_use]
    pub fn hovered(&self) -> Option<&K> {
        self.hovered.as_ref()
    }

    pub fn update(&mut self, target: Option<K>) -> HoverChange<K> {
        if self.hovered == target {
            return HoverChange {
                left: None,
                entered: None,
            };
        }
        let left = self.hovered.take();
        self.hovered = target.clone();
        HoverChange {
            left,
            entered: target,
        }
    }

    pub fn leave(&mut self) -> HoverChange<K> {
        self.update(None)
    }
}

/// Transient value popup anchored near the pointer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl Tooltip {
    pub fn show(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.visible = true;
        self.text = text.into();
        self.x = x;
        self.y = y;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

//! Viewport-space geometry primitives. All values are CSS pixels.

use serde::{Deserialize, Serialize};

/// Bounding box in viewport coordinates, shaped like `DOMRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inner dimensions of the window at the moment of measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Absolute `{left, top}` of a menu panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Never starts above or left of the viewport origin.
    pub fn clamped(self) -> Self {
        Self {
            left: self.left.max(0.0),
            top: self.top.max(0.0),
        }
    }

    /// Inline style fragment for a fixed-position panel.
    pub fn to_css(&self) -> String {
        format!("left: {}px; top: {}px;", self.left, self.top)
    }
}

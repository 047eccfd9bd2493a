//! Placement calculator: picks where a menu panel goes relative to its trigger.
//!
//! Every strategy measures the free space around the anchor and never guesses.
//! Results are clamped to the viewport origin but may still run past the
//! bottom/right edge when no branch finds room.

use crate::geometry::{Position, Rect, Size, Viewport};
use serde::{Deserialize, Serialize};

/// Side/corner of the trigger a menu attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacementMode {
    /// Below (or above) the trigger, left or right edges aligned.
    #[default]
    Default,
    /// Below (or above) the trigger, right edges aligned.
    Right,
    /// Flyout beside the trigger, top edges aligned.
    TopRight,
    /// Flyout to the left of the trigger.
    TopLeft,
}

impl PlacementMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementMode::Default => "default",
            PlacementMode::Right => "right",
            PlacementMode::TopRight => "top-right",
            PlacementMode::TopLeft => "top-left",
        }
    }

    /// Lenient parse: anything unrecognized falls back to [`PlacementMode::Default`].
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "right" => PlacementMode::Right,
            "top-right" => PlacementMode::TopRight,
            "top-left" => PlacementMode::TopLeft,
            "" | "default" | "bottom" => PlacementMode::Default,
            other => {
                log::warn!("unknown dropdown placement '{}', using default", other);
                PlacementMode::Default
            }
        }
    }

    /// Modes whose open state may be driven by an external "active" flag.
    pub fn follows_external_active(&self) -> bool {
        matches!(self, PlacementMode::Right | PlacementMode::TopRight)
    }

    fn strategy(&self) -> &'static dyn PlacementStrategy {
        match self {
            PlacementMode::Default => &BelowAligned,
            PlacementMode::Right => &BelowRightAligned,
            PlacementMode::TopRight => &FlyoutBeside,
            PlacementMode::TopLeft => &FlyoutLeft,
        }
    }
}

impl From<&str> for PlacementMode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for PlacementMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PlacementMode> for String {
    fn from(mode: PlacementMode) -> Self {
        mode.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// One placement rule. Implementations return unclamped coordinates.
pub trait PlacementStrategy {
    fn place(&self, anchor: &Rect, menu: Size, viewport: Viewport, direction: TextDirection)
        -> Position;
}

struct BelowAligned;
struct BelowRightAligned;
struct FlyoutBeside;
struct FlyoutLeft;

/// Below if it fits, else above if it fits, else `None`.
fn vertical_below_or_above(anchor: &Rect, menu: Size, viewport: Viewport) -> Option<f64> {
    if viewport.height - anchor.bottom >= menu.height {
        Some(anchor.bottom)
    } else if anchor.top >= menu.height {
        Some(anchor.top - menu.height)
    } else {
        None
    }
}

/// Flush right of the trigger, else flush left, else flush right anyway.
fn beside(anchor: &Rect, menu: Size, space_right: f64, space_left: f64) -> f64 {
    if space_right >= menu.width {
        anchor.right
    } else if space_left >= menu.width {
        anchor.left - menu.width
    } else {
        anchor.right
    }
}

impl PlacementStrategy for BelowAligned {
    fn place(&self, anchor: &Rect, menu: Size, viewport: Viewport, _: TextDirection) -> Position {
        let space_right = viewport.width - anchor.left;
        let space_left = anchor.left;

        let left = if space_right >= menu.width {
            anchor.left
        } else {
            anchor.right - menu.width
        };

        match vertical_below_or_above(anchor, menu, viewport) {
            Some(top) => Position::new(left, top),
            None => Position::new(beside(anchor, menu, space_right, space_left), anchor.top),
        }
    }
}

impl PlacementStrategy for BelowRightAligned {
    fn place(
        &self,
        anchor: &Rect,
        menu: Size,
        viewport: Viewport,
        direction: TextDirection,
    ) -> Position {
        let rtl = direction.is_rtl();
        // Room between the viewport's left edge and the trigger's right edge.
        let space_left = anchor.right;

        let left = if rtl || space_left < menu.width {
            anchor.left
        } else {
            anchor.right - menu.width
        };

        match vertical_below_or_above(anchor, menu, viewport) {
            Some(top) => Position::new(left, top),
            None if rtl => Position::new(left, anchor.top),
            None => {
                let left = if space_left - anchor.width > menu.width {
                    anchor.left - menu.width
                } else {
                    anchor.right
                };
                Position::new(left, anchor.top)
            }
        }
    }
}

impl PlacementStrategy for FlyoutBeside {
    fn place(&self, anchor: &Rect, menu: Size, viewport: Viewport, _: TextDirection) -> Position {
        let space_down = viewport.height - anchor.top;
        let space_up = anchor.bottom;

        let top = if space_down >= menu.height {
            anchor.top
        } else if space_up >= menu.height {
            anchor.bottom - menu.height
        } else {
            anchor.top
        };

        let left = beside(anchor, menu, viewport.width - anchor.right, anchor.left);
        Position::new(left, top)
    }
}

impl PlacementStrategy for FlyoutLeft {
    fn place(&self, anchor: &Rect, menu: Size, viewport: Viewport, _: TextDirection) -> Position {
        let mut position = Position::new(anchor.left - menu.width, anchor.top);

        // Each axis is corrected on its own; a vertical overflow overrides
        // the horizontal correction rather than combining with it.
        if anchor.left - menu.width < 0.0 {
            position = Position::new(anchor.left, anchor.bottom);
        }
        if viewport.height < anchor.top + menu.height {
            position = Position::new(anchor.left, anchor.top - menu.height);
        }
        position
    }
}

/// Position for `menu` around `anchor`, clamped to non-negative coordinates.
pub fn compute_position(
    anchor: &Rect,
    menu: Size,
    viewport: Viewport,
    mode: PlacementMode,
    direction: TextDirection,
) -> Position {
    mode.strategy()
        .place(anchor, menu, viewport, direction)
        .clamped()
}

/// Like [`compute_position`], but skips the computation when either element
/// could not be measured.
pub fn try_compute_position(
    anchor: Option<Rect>,
    menu: Option<Size>,
    viewport: Viewport,
    mode: PlacementMode,
    direction: TextDirection,
) -> Option<Position> {
    match (anchor, menu) {
        (Some(anchor), Some(menu)) => {
            Some(compute_position(&anchor, menu, viewport, mode, direction))
        }
        (anchor, menu) => {
            log::debug!(
                "skipping placement: anchor measured={}, menu measured={}",
                anchor.is_some(),
                menu.is_some()
            );
            None
        }
    }
}

//! Read-only layout signals owned by the surrounding application store.

use crate::placement::TextDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    #[serde(alias = "default")]
    Vertical,
    Horizontal,
    Semibox,
    Modern,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Vertical => "vertical",
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Semibox => "semibox",
            LayoutMode::Modern => "modern",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Vertical => "Vertical",
            LayoutMode::Horizontal => "Horizontal",
            LayoutMode::Semibox => "Semibox",
            LayoutMode::Modern => "Modern",
        }
    }

    pub fn all() -> [LayoutMode; 4] {
        [
            LayoutMode::Vertical,
            LayoutMode::Horizontal,
            LayoutMode::Semibox,
            LayoutMode::Modern,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSize {
    #[default]
    #[serde(alias = "default")]
    Large,
    Medium,
    Small,
}

impl SidebarSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarSize::Large => "large",
            SidebarSize::Medium => "medium",
            SidebarSize::Small => "small",
        }
    }
}

/// Snapshot of the layout flags the dropdown engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSignals {
    pub mode: LayoutMode,
    pub sidebar_size: SidebarSize,
    pub direction: TextDirection,
    /// Mobile drawer visibility; only meaningful on narrow viewports.
    pub sidebar_open: bool,
}

impl LayoutSignals {
    /// Horizontal top navigation or an icon-collapsed sidebar.
    pub fn is_constrained(&self) -> bool {
        self.mode == LayoutMode::Horizontal || self.sidebar_size == SidebarSize::Small
    }

    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar_open
    }

    /// True when moving from `previous` to `self` switched to horizontal
    /// layout or collapsed the sidebar to small.
    pub fn collapses_from(&self, previous: &LayoutSignals) -> bool {
        let became_horizontal =
            self.mode == LayoutMode::Horizontal && previous.mode != LayoutMode::Horizontal;
        let became_small =
            self.sidebar_size == SidebarSize::Small && previous.sidebar_size != SidebarSize::Small;
        became_horizontal || became_small
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_when_horizontal_or_small() {
        let mut signals = LayoutSignals::default();
        assert!(!signals.is_constrained());

        signals.mode = LayoutMode::Horizontal;
        assert!(signals.is_constrained());

        signals.mode = LayoutMode::Vertical;
        signals.sidebar_size = SidebarSize::Small;
        assert!(signals.is_constrained());

        signals.sidebar_size = SidebarSize::Medium;
        assert!(!signals.is_constrained());
    }

    #[test]
    fn collapse_edge_is_detected_once() {
        let vertical = LayoutSignals::default();
        let horizontal = LayoutSignals {
            mode: LayoutMode::Horizontal,
            ..vertical
        };
        assert!(horizontal.collapses_from(&vertical));
        assert!(!horizontal.collapses_from(&horizontal));
        assert!(!vertical.collapses_from(&horizontal));

        let small = LayoutSignals {
            sidebar_size: SidebarSize::Small,
            ..vertical
        };
        assert!(small.collapses_from(&vertical));
    }

    #[test]
    fn legacy_default_names_are_accepted() {
        #[derive(Deserialize)]
        struct Doc {
            layout: LayoutSignals,
        }
        let doc: Doc = toml::from_str(
            r#"
[layout]
mode = "default"
sidebar_size = "default"
direction = "rtl"
"#,
        )
        .unwrap();
        assert_eq!(doc.layout.mode, LayoutMode::Vertical);
        assert_eq!(doc.layout.sidebar_size, SidebarSize::Large);
        assert!(doc.layout.direction.is_rtl());
        assert!(!doc.layout.sidebar_open);
    }
}

//! Open/closed state machine of a single dropdown.
//!
//! The machine only decides. Side effects (eviction, repositioning, callbacks)
//! are described by the returned [`Transition`] and carried out by
//! [`crate::OverlayController`].

use crate::geometry::{Position, Rect, Size};
use crate::layout::LayoutSignals;
use crate::placement::PlacementMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    #[default]
    Click,
    Hover,
}

impl TriggerMode {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "hover" => TriggerMode::Hover,
            "click" | "" => TriggerMode::Click,
            other => {
                log::warn!("unknown dropdown trigger '{}', using click", other);
                TriggerMode::Click
            }
        }
    }
}

impl From<&str> for TriggerMode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Construction-time configuration of one dropdown. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownOptions {
    pub placement: PlacementMode,
    pub trigger: TriggerMode,
    pub close_on_outside_click: bool,
    pub close_on_outside_click_sidebar: bool,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            placement: PlacementMode::Default,
            trigger: TriggerMode::Click,
            close_on_outside_click: true,
            close_on_outside_click_sidebar: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent<'a> {
    /// Click on the trigger.
    TriggerActivated,
    PointerEntered,
    PointerLeft,
    /// Document click whose target lies outside the dropdown subtree.
    OutsideClick,
    /// Click inside the sidebar container but outside the dropdown subtree.
    SidebarClick,
    KeyDown(&'a str),
    RouteChanged {
        path: &'a str,
        signals: LayoutSignals,
        narrow_viewport: bool,
        can_collapse_sidebar: bool,
    },
    /// Externally supplied "active" flag of the owning navigation row.
    ExternalActive(Option<bool>),
    LayoutChanged(LayoutSignals),
    /// Programmatic open through the controller API.
    Open,
    /// Programmatic close: API calls and peer eviction.
    Close,
}

/// Effects requested by one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub opened: bool,
    pub closed: bool,
    /// Open was user-initiated; the eviction policy must run.
    pub check_registry: bool,
    pub collapse_sidebar: bool,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.opened || self.closed
    }

    fn merge(self, other: Transition) -> Transition {
        Transition {
            opened: self.opened || other.opened,
            closed: self.closed || other.closed,
            check_registry: self.check_registry || other.check_registry,
            collapse_sidebar: self.collapse_sidebar || other.collapse_sidebar,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverlayMachine {
    options: DropdownOptions,
    is_open: bool,
    last_path: Option<String>,
    last_signals: LayoutSignals,
    anchor_rect: Option<Rect>,
    menu_size: Option<Size>,
    computed_position: Option<Position>,
}

impl OverlayMachine {
    pub fn new(options: DropdownOptions, signals: LayoutSignals) -> Self {
        Self {
            options,
            is_open: false,
            last_path: None,
            last_signals: signals,
            anchor_rect: None,
            menu_size: None,
            computed_position: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    pub fn placement(&self) -> PlacementMode {
        self.options.placement
    }

    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor_rect
    }

    pub fn menu_size(&self) -> Option<Size> {
        self.menu_size
    }

    pub fn computed_position(&self) -> Option<Position> {
        self.computed_position
    }

    pub fn record_placement(&mut self, anchor: Rect, menu: Size, position: Position) {
        self.anchor_rect = Some(anchor);
        self.menu_size = Some(menu);
        self.computed_position = Some(position);
    }

    fn set_open(&mut self, open: bool) -> Transition {
        if self.is_open == open {
            return Transition::default();
        }
        self.is_open = open;
        if open {
            Transition {
                opened: true,
                ..Default::default()
            }
        } else {
            // A position is only valid for the open it was computed for.
            self.computed_position = None;
            Transition {
                closed: true,
                ..Default::default()
            }
        }
    }

    fn user_open(&mut self, open: bool) -> Transition {
        let mut transition = self.set_open(open);
        transition.check_registry = transition.opened;
        transition
    }

    pub fn handle(&mut self, event: OverlayEvent<'_>) -> Transition {
        match event {
            OverlayEvent::TriggerActivated => match self.options.trigger {
                TriggerMode::Click => self.user_open(!self.is_open),
                TriggerMode::Hover => Transition::default(),
            },
            OverlayEvent::PointerEntered => match self.options.trigger {
                TriggerMode::Hover => self.set_open(true),
                TriggerMode::Click => Transition::default(),
            },
            OverlayEvent::PointerLeft => match self.options.trigger {
                TriggerMode::Hover => self.set_open(false),
                TriggerMode::Click => Transition::default(),
            },
            OverlayEvent::OutsideClick if self.options.close_on_outside_click => {
                self.set_open(false)
            }
            OverlayEvent::SidebarClick if self.options.close_on_outside_click_sidebar => {
                self.set_open(false)
            }
            OverlayEvent::OutsideClick | OverlayEvent::SidebarClick => Transition::default(),
            OverlayEvent::KeyDown(key) if key == "Escape" || key == "Esc" => self.set_open(false),
            OverlayEvent::KeyDown(_) => Transition::default(),
            OverlayEvent::RouteChanged {
                path,
                signals,
                narrow_viewport,
                can_collapse_sidebar,
            } => self.route_changed(path, signals, narrow_viewport, can_collapse_sidebar),
            OverlayEvent::ExternalActive(flag) => {
                if self.options.placement.follows_external_active() {
                    self.set_open(flag.unwrap_or(false))
                } else {
                    Transition::default()
                }
            }
            OverlayEvent::LayoutChanged(signals) => {
                let previous = std::mem::replace(&mut self.last_signals, signals);
                if signals.collapses_from(&previous) {
                    self.set_open(false)
                } else {
                    Transition::default()
                }
            }
            OverlayEvent::Open => self.user_open(true),
            OverlayEvent::Close => self.set_open(false),
        }
    }

    fn route_changed(
        &mut self,
        path: &str,
        signals: LayoutSignals,
        narrow_viewport: bool,
        can_collapse_sidebar: bool,
    ) -> Transition {
        let previous = self.last_path.replace(path.to_string());
        match previous {
            // First observation at mount is not a navigation.
            None => return Transition::default(),
            Some(prev) if prev == path => return Transition::default(),
            Some(_) => {}
        }

        let mut transition = Transition::default();
        if signals.is_constrained() {
            transition = transition.merge(self.set_open(false));
        }
        if narrow_viewport && can_collapse_sidebar && signals.sidebar_expanded() {
            transition = transition.merge(self.set_open(false));
            transition.collapse_sidebar = true;
        }
        transition
    }
}

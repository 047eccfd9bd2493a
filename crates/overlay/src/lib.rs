//! Dropdown positioning and open-state coordination.
//!
//! The crate is framework-agnostic: a UI layer implements [`OverlayElement`] and
//! [`OverlayHost`] over its own node type and drives [`OverlayController`]s from
//! its event handlers. Everything here runs on one thread and never blocks.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod machine;
pub mod placement;
pub mod registry;

pub use config::{DropdownSettings, OverlayConfig};
pub use controller::{Coordinator, OverlayController};
pub use error::OverlayError;
pub use geometry::{Position, Rect, Size, Viewport};
pub use host::{ClickHandler, ListenerGuard, ListenerId, OverlayElement, OverlayHost};
pub use layout::{LayoutMode, LayoutSignals, SidebarSize};
pub use machine::{DropdownOptions, OverlayEvent, OverlayMachine, Transition, TriggerMode};
pub use placement::{compute_position, try_compute_position, PlacementMode, TextDirection};
pub use registry::{OpenInstanceRegistry, OverlayId, Tracked};

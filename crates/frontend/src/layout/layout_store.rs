//! Application layout state: layout mode, sidebar size, text direction and
//! the mobile drawer flag.
//!
//! The store owns the signals. Dropdowns read them through
//! [`LayoutStore::signals`] and never write them. The preference (without the
//! drawer flag) is persisted in localStorage.

use leptos::prelude::*;
use overlay::{LayoutMode, LayoutSignals, SidebarSize, TextDirection};
use web_sys::window;

const LAYOUT_STORAGE_KEY: &str = "app-layout";

/// Below this width the sidebar is an off-canvas drawer.
pub const LARGE_SCREEN_PX: f64 = 1000.0;

fn load_layout_from_storage() -> Option<LayoutSignals> {
    let raw = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LAYOUT_STORAGE_KEY).ok().flatten())?;
    match serde_json::from_str::<LayoutSignals>(&raw) {
        Ok(signals) => Some(signals),
        Err(err) => {
            log::warn!("ignoring stored layout: {}", err);
            None
        }
    }
}

fn save_layout_to_storage(signals: LayoutSignals) {
    let stored = LayoutSignals {
        sidebar_open: false,
        ..signals
    };
    if let (Some(storage), Ok(json)) = (
        window().and_then(|w| w.local_storage().ok().flatten()),
        serde_json::to_string(&stored),
    ) {
        let _ = storage.set_item(LAYOUT_STORAGE_KEY, &json);
    }
}

/// Mirror the layout onto `<html>` so stylesheets can react to it.
fn apply_layout_attributes(signals: LayoutSignals) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("data-layout", signals.mode.as_str());
    let _ = root.set_attribute("data-sidebar-size", signals.sidebar_size.as_str());
    let _ = root.set_attribute("dir", signals.direction.as_str());
    let _ = root.set_attribute(
        "data-sidebar-open",
        if signals.sidebar_open { "true" } else { "false" },
    );
}

fn is_large_screen() -> bool {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|width| width >= LARGE_SCREEN_PX)
        .unwrap_or(true)
}

/// Desktop sidebar size after a toggle.
pub fn next_sidebar_size(mode: LayoutMode, current: SidebarSize) -> SidebarSize {
    if mode == LayoutMode::Horizontal {
        return SidebarSize::Large;
    }
    match current {
        SidebarSize::Small => SidebarSize::Large,
        SidebarSize::Large | SidebarSize::Medium => SidebarSize::Small,
    }
}

#[derive(Clone, Copy)]
pub struct LayoutStore {
    pub mode: RwSignal<LayoutMode>,
    pub sidebar_size: RwSignal<SidebarSize>,
    pub direction: RwSignal<TextDirection>,
    pub sidebar_open: RwSignal<bool>,
}

impl LayoutStore {
    /// Stored preference wins over `defaults`.
    pub fn new(defaults: LayoutSignals) -> Self {
        let initial = load_layout_from_storage().unwrap_or(defaults);
        let store = Self {
            mode: RwSignal::new(initial.mode),
            sidebar_size: RwSignal::new(initial.sidebar_size),
            direction: RwSignal::new(initial.direction),
            sidebar_open: RwSignal::new(false),
        };

        Effect::new(move |_| {
            let signals = store.signals();
            apply_layout_attributes(signals);
            save_layout_to_storage(signals);
        });

        store
    }

    /// Tracked snapshot.
    pub fn signals(&self) -> LayoutSignals {
        LayoutSignals {
            mode: self.mode.get(),
            sidebar_size: self.sidebar_size.get(),
            direction: self.direction.get(),
            sidebar_open: self.sidebar_open.get(),
        }
    }

    pub fn signals_untracked(&self) -> LayoutSignals {
        LayoutSignals {
            mode: self.mode.get_untracked(),
            sidebar_size: self.sidebar_size.get_untracked(),
            direction: self.direction.get_untracked(),
            sidebar_open: self.sidebar_open.get_untracked(),
        }
    }

    pub fn set_mode(&self, mode: LayoutMode) {
        self.mode.set(mode);
        if mode == LayoutMode::Horizontal {
            self.sidebar_size.set(SidebarSize::Large);
        }
    }

    pub fn set_sidebar_size(&self, size: SidebarSize) {
        if self.mode.get_untracked() == LayoutMode::Horizontal {
            return;
        }
        self.sidebar_size.set(size);
    }

    pub fn set_direction(&self, direction: TextDirection) {
        self.direction.set(direction);
    }

    /// Hamburger button: opens/closes the drawer on small screens, otherwise
    /// switches between the full and icon-only sidebar.
    pub fn toggle_sidebar(&self) {
        if is_large_screen() {
            let next = next_sidebar_size(
                self.mode.get_untracked(),
                self.sidebar_size.get_untracked(),
            );
            self.sidebar_size.set(next);
        } else {
            self.sidebar_open.update(|open| *open = !*open);
        }
    }

    /// Close the mobile drawer. Idempotent.
    pub fn collapse_mobile_sidebar(&self) {
        if self.sidebar_open.get_untracked() {
            self.sidebar_open.set(false);
        }
    }
}

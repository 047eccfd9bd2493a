use super::menu::{MenuEntry, MENU};
use crate::layout::layout_store::LayoutStore;
use crate::shared::dropdown::{Dropdown, DropdownButton, DropdownItem, DropdownMenu};
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use overlay::{LayoutMode, PlacementMode, SidebarSize};

/// Placement of a group's menu for the current layout.
fn group_placement(mode: LayoutMode, depth: usize) -> PlacementMode {
    if depth > 0 {
        PlacementMode::TopRight
    } else if mode == LayoutMode::Horizontal {
        PlacementMode::Default
    } else {
        PlacementMode::TopRight
    }
}

/// External "active" flag of a group. An icon-only sidebar never pre-opens.
fn group_is_active(entry: &MenuEntry, path: &str, size: SidebarSize) -> bool {
    size != SidebarSize::Small && entry.is_active(path)
}

fn nav_entry(entry: &'static MenuEntry, depth: usize) -> AnyView {
    if !entry.has_children() {
        let href = entry.link.unwrap_or("#");
        return if depth == 0 {
            view! {
                <a class="nav-link" href=href>
                    {icon(entry.icon)}
                    <span class="nav-label">{entry.label}</span>
                </a>
            }
            .into_any()
        } else {
            view! { <DropdownItem href=href>{entry.label}</DropdownItem> }.into_any()
        };
    }

    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");
    let location = use_location();
    // Flags are fixed per dropdown; the sidebar remounts its groups when the
    // layout changes.
    let signals = layout.signals_untracked();
    let constrained = signals.is_constrained();
    let horizontal = signals.mode == LayoutMode::Horizontal;

    // Memoized: the dropdown reacts to changes of the flag, not to every navigation.
    let active = Memo::new(move |_| {
        let path = location.pathname.get();
        Some(group_is_active(entry, &path, layout.sidebar_size.get()))
    });
    let collapse = Callback::new(move |_: ()| layout.collapse_mobile_sidebar());

    view! {
        <Dropdown
            position=group_placement(signals.mode, depth)
            class="nav-group"
            is_active={Signal::<Option<bool>>::from(active)}
            toggle_sidebar=collapse
            close_on_outside_click=constrained
            close_on_outside_click_sidebar=!horizontal
        >
            <DropdownButton class="nav-link" arrow=true>
                {(depth == 0).then(|| icon(entry.icon))}
                <span class="nav-label">{entry.label}</span>
            </DropdownButton>
            <DropdownMenu sidebar=!constrained>
                {entry.children.iter().map(|child| nav_entry(child, depth + 1)).collect_view()}
            </DropdownMenu>
        </Dropdown>
    }
    .into_any()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");

    view! {
        <aside
            id="main-sidebar"
            class=move || {
                let mut class = format!("sidebar sidebar--{}", layout.sidebar_size.get().as_str());
                if layout.sidebar_open.get() {
                    class.push_str(" sidebar--open");
                }
                class
            }
        >
            <nav class="sidebar-nav">
                {move || {
                    // Remount every group on layout change.
                    let _ = (layout.mode.get(), layout.sidebar_size.get());
                    MENU.iter().map(|entry| nav_entry(entry, 0)).collect_view()
                }}
            </nav>
        </aside>
    }
}

//! Layout settings menu: layout mode, sidebar size and text direction.

use crate::layout::layout_store::LayoutStore;
use crate::shared::dropdown::{use_dropdown, Dropdown, DropdownButton, DropdownMenu};
use crate::shared::icons::icon;
use leptos::prelude::*;
use overlay::{LayoutMode, SidebarSize, TextDirection};

/// A menu row that changes a layout setting. The click also reaches the
/// enclosing dropdown, which closes the menu.
#[component]
fn SettingOption(
    label: &'static str,
    #[prop(into)] selected: Signal<bool>,
    on_select: Callback<()>,
) -> impl IntoView {
    let _ = use_dropdown("SettingOption");

    view! {
        <li role="none">
            <button
                type="button"
                role="menuitemradio"
                class=move || {
                    if selected.get() { "dropdown-item dropdown-item--active" } else { "dropdown-item" }
                }
                aria-checked=move || selected.get().to_string()
                on:click=move |_| on_select.run(())
            >
                {label}
            </button>
        </li>
    }
}

#[component]
pub fn LayoutDropdown() -> impl IntoView {
    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");

    view! {
        <Dropdown position="right" class="layout-settings">
            <DropdownButton class="top-header__icon-btn">{icon("settings")}</DropdownButton>
            <DropdownMenu class="layout-settings__menu">
                <li class="dropdown-header">"Layout"</li>
                {LayoutMode::all()
                    .into_iter()
                    .map(|mode| view! {
                        <SettingOption
                            label=mode.display_name()
                            selected=Signal::derive(move || layout.mode.get() == mode)
                            on_select=Callback::new(move |_| layout.set_mode(mode))
                        />
                    })
                    .collect_view()}
                <li class="dropdown-header">"Sidebar"</li>
                <SettingOption
                    label="Full"
                    selected=Signal::derive(move || layout.sidebar_size.get() != SidebarSize::Small)
                    on_select=Callback::new(move |_| layout.set_sidebar_size(SidebarSize::Large))
                />
                <SettingOption
                    label="Icons only"
                    selected=Signal::derive(move || layout.sidebar_size.get() == SidebarSize::Small)
                    on_select=Callback::new(move |_| layout.set_sidebar_size(SidebarSize::Small))
                />
                <li class="dropdown-header">"Direction"</li>
                <SettingOption
                    label="Left to right"
                    selected=Signal::derive(move || !layout.direction.get().is_rtl())
                    on_select=Callback::new(move |_| layout.set_direction(TextDirection::Ltr))
                />
                <SettingOption
                    label="Right to left"
                    selected=Signal::derive(move || layout.direction.get().is_rtl())
                    on_select=Callback::new(move |_| layout.set_direction(TextDirection::Rtl))
                />
            </DropdownMenu>
        </Dropdown>
    }
}

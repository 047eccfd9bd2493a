pub mod layout_dropdown;

use crate::layout::layout_store::LayoutStore;
use crate::shared::dropdown::{Dropdown, DropdownButton, DropdownItem, DropdownMenu};
use crate::shared::icons::icon;
use layout_dropdown::LayoutDropdown;
use leptos::prelude::*;

const NOTIFICATIONS: &[(&str, &str)] = &[
    ("New lead assigned", "2 min ago"),
    ("Invoice #1042 paid", "1 hour ago"),
    ("Dr. Hale added a note", "Yesterday"),
];

/// Top bar: sidebar toggle, layout settings, notifications and profile.
#[component]
pub fn TopHeader() -> impl IntoView {
    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");

    view! {
        <header class="top-header">
            <div class="top-header__left">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| layout.toggle_sidebar()
                    title="Toggle sidebar"
                >
                    {icon("menu")}
                </button>
                <span class="top-header__brand">"Admin"</span>
            </div>

            <div class="top-header__right">
                <LayoutDropdown />

                <Dropdown trigger="hover" class="notifications">
                    <DropdownButton class="top-header__icon-btn">{icon("bell")}</DropdownButton>
                    <DropdownMenu class="notifications__menu">
                        {NOTIFICATIONS
                            .iter()
                            .map(|(title, when)| view! {
                                <DropdownItem>
                                    <span class="notifications__title">{*title}</span>
                                    <span class="notifications__time">{*when}</span>
                                </DropdownItem>
                            })
                            .collect_view()}
                    </DropdownMenu>
                </Dropdown>

                <Dropdown position="right" class="profile">
                    <DropdownButton class="top-header__profile" arrow=true>
                        <span>"Jane Cooper"</span>
                    </DropdownButton>
                    <DropdownMenu>
                        <DropdownItem href="/">"Dashboard"</DropdownItem>
                        <DropdownItem href="/events">"My events"</DropdownItem>
                        <DropdownItem href="#">"Sign out"</DropdownItem>
                    </DropdownMenu>
                </Dropdown>
            </div>
        </header>
    }
}

pub mod layout_store;
pub mod left;
pub mod top_header;

use layout_store::LayoutStore;
use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::sidebar::Sidebar />
                // Drawer backdrop on small screens
                <Show when=move || layout.sidebar_open.get()>
                    <div class="sidebar-backdrop" on:click=move |_| layout.collapse_mobile_sidebar()></div>
                </Show>
                <main class="app-main">{children()}</main>
            </div>
        </div>
    }
}

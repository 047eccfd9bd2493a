//! Positioned dropdown menus for the admin shell.
//!
//! ```text
//! <Dropdown position="right">
//!     <DropdownButton>..</DropdownButton>
//!     <DropdownMenu>
//!         <DropdownItem href="/crm">"CRM"</DropdownItem>
//!     </DropdownMenu>
//! </Dropdown>
//! ```
//!
//! All state lives in an [`overlay::OverlayController`]; the components only
//! forward DOM events to it and mirror its open flag into a signal.

pub mod context;
pub mod dom;

pub use context::{try_use_dropdown, use_dropdown, DropdownContext};

use crate::layout::layout_store::LayoutStore;
use dom::DomHost;
use leptos::context::Provider;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use overlay::{
    Coordinator, DropdownOptions, DropdownSettings, OverlayController, OverlayHost, OverlayId,
    PlacementMode, TriggerMode,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::Node;

const DROPDOWN_ID_ATTR: &str = "data-dropdown-id";
const DROPDOWN_SELECTOR: &str = "[data-dropdown-id]";

/// App-wide dropdown coordinator, provided once in `App`.
#[derive(Clone, Copy)]
pub struct DropdownService {
    coordinator: StoredValue<Coordinator<Node>, LocalStorage>,
    menu_panel_class: StoredValue<String>,
}

impl DropdownService {
    pub fn new(settings: DropdownSettings, layout: LayoutStore) -> Self {
        let menu_panel_class = settings.menu_panel_class.clone();
        let host: Rc<dyn OverlayHost<Node>> =
            Rc::new(DomHost::new(settings.sidebar_selector.clone()));
        let coordinator = Coordinator::new(host, settings, move || layout.signals_untracked());
        Self {
            coordinator: StoredValue::new_local(coordinator),
            menu_panel_class: StoredValue::new(menu_panel_class),
        }
    }

    fn mount(&self, options: DropdownOptions) -> OverlayController<Node> {
        self.coordinator.with_value(|c| c.mount(options))
    }
}

pub fn use_dropdown_service() -> DropdownService {
    use_context::<DropdownService>().expect("DropdownService not found")
}

/// Whether the click belongs to dropdown `id` itself rather than to a
/// dropdown nested inside its menu.
fn owns_click(event: &ev::MouseEvent, id: OverlayId) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(DROPDOWN_SELECTOR).ok().flatten())
        .and_then(|wrapper| wrapper.get_attribute(DROPDOWN_ID_ATTR))
        .map(|value| value == id.0.to_string())
        .unwrap_or(false)
}

/// Container of one dropdown: trigger and menu are its children.
///
/// `position`, `trigger` and the outside-click flags are read once at mount.
/// `is_active` lets a navigation row hold a `right`/`top-right` menu open.
/// `toggle_sidebar` is run after navigation on narrow viewports while the
/// mobile sidebar is open; it must close the sidebar, not toggle it.
#[component]
pub fn Dropdown(
    #[prop(optional, into)] position: PlacementMode,
    #[prop(optional, into)] trigger: TriggerMode,
    #[prop(optional, into)] class: String,
    #[prop(default = true)] close_on_outside_click: bool,
    #[prop(default = true)] close_on_outside_click_sidebar: bool,
    #[prop(optional, into)] is_active: MaybeProp<bool>,
    #[prop(optional)] toggle_sidebar: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let service = use_dropdown_service();
    let layout = use_context::<LayoutStore>().expect("LayoutStore not found");
    let location = use_location();

    let controller = service.mount(DropdownOptions {
        placement: position,
        trigger,
        close_on_outside_click,
        close_on_outside_click_sidebar,
    });
    let id = controller.id();

    let is_open = RwSignal::new(false);
    controller.on_change(move |open| is_open.set(open));
    if let Some(callback) = toggle_sidebar {
        controller.on_request_sidebar_collapse(move || callback.run(()));
    }

    let ctx = DropdownContext {
        controller: StoredValue::new_local(controller),
        is_open,
        id,
    };

    let wrapper_ref = NodeRef::<html::Div>::new();
    Effect::new(move |_| {
        if let Some(el) = wrapper_ref.get() {
            ctx.register_trigger(Some(el.into()));
        }
    });

    Effect::new(move |_| {
        let path = location.pathname.get();
        ctx.controller.with_value(|c| {
            c.route_changed(&path);
        });
    });

    Effect::new(move |_| {
        let signals = layout.signals();
        ctx.controller.with_value(|c| {
            c.apply_layout(signals);
        });
    });

    // Re-applied only when the flag itself changes.
    let is_active = Memo::new(move |_| is_active.get());
    Effect::new(move |_| {
        let active = is_active.get();
        ctx.controller.with_value(|c| {
            c.apply_external_active(active);
        });
    });

    on_cleanup(move || {
        ctx.controller.try_with_value(|c| c.unmount());
    });

    view! {
        <div
            node_ref=wrapper_ref
            class=format!("dropdown relative {}", class)
            data-dropdown-id=id.0.to_string()
            on:click=move |event: ev::MouseEvent| {
                if owns_click(&event, id) {
                    ctx.activate_trigger();
                }
            }
            on:mouseenter=move |_| ctx.pointer_entered()
            on:mouseleave=move |_| ctx.pointer_left()
            on:keydown=move |event: ev::KeyboardEvent| ctx.key_down(&event.key())
        >
            // Scoped so a nested dropdown shadows this one only for its own children.
            <Provider value=ctx>{children()}</Provider>
        </div>
    }
}

/// Trigger button. Clicks are handled by the enclosing `Dropdown`.
#[component]
pub fn DropdownButton(
    #[prop(optional, into)] class: String,
    /// Show a chevron that flips while the menu is open.
    #[prop(optional)]
    arrow: bool,
    children: Children,
) -> impl IntoView {
    let ctx = use_dropdown("DropdownButton");

    view! {
        <button
            type="button"
            class=format!("dropdown-toggle {}", class)
            aria-haspopup="menu"
            aria-expanded=move || ctx.is_open().to_string()
        >
            {children()}
            {arrow.then(|| view! {
                <span class=move || {
                    if ctx.is_open() { "dropdown-arrow rotate-180" } else { "dropdown-arrow" }
                }>
                    {crate::shared::icons::icon("chevron-down")}
                </span>
            })}
        </button>
    }
}

/// Menu panel, rendered only while open.
///
/// Floating panels are `position: fixed` and placed by the engine. With
/// `sidebar` set the panel stays in document flow, used for the expanded
/// vertical sidebar.
#[component]
pub fn DropdownMenu(
    #[prop(optional, into)] class: String,
    #[prop(optional)] sidebar: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_dropdown("DropdownMenu");
    let service = use_dropdown_service();
    let class = StoredValue::new(class);
    let children = StoredValue::new(children);

    move || {
        ctx.is_open().then(|| {
            let panel_class = format!(
                "{} {} {}",
                service.menu_panel_class.get_value(),
                if sidebar { "static" } else { "fixed z-50" },
                class.get_value()
            );
            menu_panel(ctx, panel_class, children.get_value())
        })
    }
}

fn menu_panel(ctx: DropdownContext, class: String, children: ChildrenFn) -> impl IntoView {
    let menu_ref = NodeRef::<html::Div>::new();

    // Mounted, then measured, then positioned.
    Effect::new(move |_| {
        if let Some(el) = menu_ref.get() {
            ctx.register_menu(Some(el.into()));
        }
    });
    on_cleanup(move || ctx.register_menu(None));

    view! {
        <div node_ref=menu_ref class=class role="menu">
            <ul>{children()}</ul>
        </div>
    }
}

/// One entry of a `DropdownMenu`. Renders a router link.
#[component]
pub fn DropdownItem(
    #[prop(optional, into)] href: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let _ = use_dropdown("DropdownItem");
    let href = href.unwrap_or_else(|| "#".to_string());

    view! {
        <li role="none">
            <a role="menuitem" href=href class=format!("dropdown-item {}", class)>
                {children()}
            </a>
        </li>
    }
}

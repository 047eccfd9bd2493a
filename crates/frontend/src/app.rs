use crate::layout::layout_store::LayoutStore;
use crate::routes::routes::AppRoutes;
use crate::shared::dropdown::DropdownService;
use leptos::prelude::*;
use leptos_router::components::Router;
use overlay::OverlayConfig;

/// Optional TOML overrides injected by the host page as
/// `<script type="text/toml" id="overlay-config">`.
const CONFIG_ELEMENT_ID: &str = "overlay-config";

fn page_config_overrides() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
}

fn load_config() -> OverlayConfig {
    let overrides = page_config_overrides();
    match OverlayConfig::load(overrides.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid overlay config, using defaults: {:#}", err);
            OverlayConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    // Layout flags are owned by the store; dropdowns only read them.
    let layout = LayoutStore::new(config.layout);
    provide_context(layout);

    // One coordinator (document listeners + open registry) for the whole app.
    provide_context(DropdownService::new(config.dropdown, layout));

    view! {
        <Router>
            <AppRoutes />
        </Router>
    }
}

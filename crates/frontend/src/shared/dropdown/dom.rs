//! web-sys bindings for the overlay engine.

use gloo_timers::future::TimeoutFuture;
use overlay::{ClickHandler, ListenerId, OverlayElement, OverlayHost, Position, Rect, Viewport};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, Node};

type DocumentListener = Closure<dyn FnMut(Event)>;

/// A live DOM element used as trigger or menu panel.
pub struct DomElement {
    element: Element,
}

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl OverlayElement<Node> for DomElement {
    fn bounding_rect(&self) -> Option<Rect> {
        // Detached nodes report an all-zero rect.
        if !self.element.is_connected() {
            return None;
        }
        let r = self.element.get_bounding_client_rect();
        Some(Rect {
            top: r.top(),
            bottom: r.bottom(),
            left: r.left(),
            right: r.right(),
            width: r.width(),
            height: r.height(),
        })
    }

    fn contains(&self, target: &Node) -> bool {
        self.element.contains(Some(target))
    }

    fn node(&self) -> Node {
        self.element.clone().into()
    }

    fn set_position(&self, position: Position) {
        if let Some(html) = self.element.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("left", &format!("{}px", position.left));
            let _ = style.set_property("top", &format!("{}px", position.top));
        }
    }
}

/// Document-level click listeners plus viewport and sidebar queries.
pub struct DomHost {
    sidebar_selector: String,
    listeners: RefCell<HashMap<u64, DocumentListener>>,
    next_id: Cell<u64>,
}

impl DomHost {
    pub fn new(sidebar_selector: impl Into<String>) -> Self {
        Self {
            sidebar_selector: sidebar_selector.into(),
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

fn dimension(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl OverlayHost<Node> for DomHost {
    fn viewport(&self) -> Viewport {
        match web_sys::window() {
            Some(w) => Viewport::new(dimension(w.inner_width()), dimension(w.inner_height())),
            None => Viewport::new(0.0, 0.0),
        }
    }

    fn sidebar_contains(&self, target: &Node) -> bool {
        document()
            .and_then(|doc| doc.query_selector(&self.sidebar_selector).ok().flatten())
            .map(|sidebar| sidebar.contains(Some(target)))
            .unwrap_or(false)
    }

    fn add_click_listener(&self, handler: ClickHandler<Node>) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) {
                handler(&node);
            }
        }) as Box<dyn FnMut(_)>);

        match document() {
            Some(doc) => {
                if let Err(err) =
                    doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                {
                    log::warn!("failed to attach document click listener: {:?}", err);
                }
            }
            None => log::warn!("no document; click listener {} is inert", id),
        }

        self.listeners.borrow_mut().insert(id, closure);
        log::debug!("document click listeners: {}", self.listener_count());
        ListenerId(id)
    }

    fn remove_click_listener(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id.0) else {
            return;
        };
        if let Some(doc) = document() {
            let _ = doc
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        // The listener may be the one currently dispatching; free it on the next tick.
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(0).await;
            drop(closure);
        });
        log::debug!("document click listeners: {}", self.listener_count());
    }
}

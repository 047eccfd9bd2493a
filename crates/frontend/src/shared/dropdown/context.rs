use super::dom::DomElement;
use leptos::prelude::*;
use overlay::{OverlayController, OverlayElement, OverlayError, OverlayId};
use std::rc::Rc;
use web_sys::{Element, Node};

/// Handle shared by a `Dropdown` with its button, menu and items.
#[derive(Clone, Copy)]
pub struct DropdownContext {
    pub(super) controller: StoredValue<OverlayController<Node>, LocalStorage>,
    pub(super) is_open: RwSignal<bool>,
    pub(super) id: OverlayId,
}

impl DropdownContext {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Reactive open flag.
    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    pub fn open(&self) {
        self.controller.with_value(|c| {
            c.open();
        });
    }

    pub fn close(&self) {
        self.controller.with_value(|c| {
            c.close();
        });
    }

    pub fn toggle(&self) {
        self.controller.with_value(|c| {
            c.toggle();
        });
    }

    pub(super) fn activate_trigger(&self) {
        self.controller.with_value(|c| {
            c.activate_trigger();
        });
    }

    pub(super) fn pointer_entered(&self) {
        self.controller.with_value(|c| {
            c.pointer_entered();
        });
    }

    pub(super) fn pointer_left(&self) {
        self.controller.with_value(|c| {
            c.pointer_left();
        });
    }

    pub(super) fn key_down(&self, key: &str) {
        self.controller.with_value(|c| {
            c.key_down(key);
        });
    }

    pub(super) fn register_trigger(&self, element: Option<Element>) {
        self.controller.try_with_value(|c| {
            c.register_trigger_element(element.map(dom_element))
        });
    }

    pub(super) fn register_menu(&self, element: Option<Element>) {
        self.controller.try_with_value(|c| {
            c.register_menu_element(element.map(dom_element))
        });
    }
}

fn dom_element(element: Element) -> Rc<dyn OverlayElement<Node>> {
    Rc::new(DomElement::new(element))
}

/// Context of the enclosing `Dropdown`.
///
/// Panics when called outside one; rendering a trigger, menu or item without
/// its dropdown is a programming error.
pub fn use_dropdown(component: &'static str) -> DropdownContext {
    try_use_dropdown(component).unwrap_or_else(|err| panic!("{}", err))
}

pub fn try_use_dropdown(component: &'static str) -> Result<DropdownContext, OverlayError> {
    use_context::<DropdownContext>().ok_or_else(|| OverlayError::missing_context(component))
}

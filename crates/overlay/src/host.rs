//! Seams between the engine and a concrete UI layer.
//!
//! `T` is the UI layer's event-target type (a DOM node in the browser).

use crate::geometry::{Position, Rect, Viewport};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Document-level click listener callback.
pub type ClickHandler<T> = Rc<dyn Fn(&T)>;

/// A mounted element taking part in a dropdown: the trigger container or the
/// menu panel.
pub trait OverlayElement<T> {
    /// Current bounding box, or `None` when the element cannot be measured.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Whether `target` is this element or one of its descendants.
    fn contains(&self, target: &T) -> bool;

    /// The element as an event target, for containment checks by other dropdowns.
    fn node(&self) -> T;

    /// Moves the element. Only meaningful for menu panels.
    fn set_position(&self, _position: Position) {}
}

/// Window/document services shared by all dropdowns.
pub trait OverlayHost<T> {
    fn viewport(&self) -> Viewport;

    /// Whether `target` lies inside the application's sidebar container.
    fn sidebar_contains(&self, target: &T) -> bool;

    fn add_click_listener(&self, handler: ClickHandler<T>) -> ListenerId;

    fn remove_click_listener(&self, id: ListenerId);
}

/// Owns one document-level listener and removes it when dropped.
pub struct ListenerGuard<T: 'static> {
    host: Rc<dyn OverlayHost<T>>,
    id: Option<ListenerId>,
}

impl<T: 'static> ListenerGuard<T> {
    pub fn acquire(host: &Rc<dyn OverlayHost<T>>, handler: ClickHandler<T>) -> Self {
        let id = host.add_click_listener(handler);
        Self {
            host: Rc::clone(host),
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Removes the listener now. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.host.remove_click_listener(id);
        }
    }
}

impl<T: 'static> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        self.release();
    }
}

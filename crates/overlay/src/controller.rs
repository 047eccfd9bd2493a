//! Per-dropdown controllers and the application-wide coordinator.

use crate::config::DropdownSettings;
use crate::geometry::Position;
use crate::host::{ClickHandler, ListenerGuard, OverlayElement, OverlayHost};
use crate::layout::LayoutSignals;
use crate::machine::{DropdownOptions, OverlayEvent, OverlayMachine, Transition};
use crate::placement::{try_compute_position, PlacementMode};
use crate::registry::{OpenInstanceRegistry, OverlayId, Tracked};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct RegistryEntry<T: 'static> {
    id: OverlayId,
    instance: Weak<Instance<T>>,
}

impl<T: 'static> Tracked for RegistryEntry<T> {
    fn overlay_id(&self) -> OverlayId {
        self.id
    }
}

struct CoordinatorInner<T: 'static> {
    host: Rc<dyn OverlayHost<T>>,
    settings: DropdownSettings,
    signals: Box<dyn Fn() -> LayoutSignals>,
    registry: RefCell<OpenInstanceRegistry<RegistryEntry<T>>>,
    next_id: Cell<u64>,
}

/// Shared state of every dropdown in one application: the host services,
/// the layout-signal source and the open-instance registry.
///
/// Created once at startup and cloned into each dropdown.
pub struct Coordinator<T: 'static> {
    inner: Rc<CoordinatorInner<T>>,
}

impl<T: 'static> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Coordinator<T> {
    pub fn new(
        host: Rc<dyn OverlayHost<T>>,
        settings: DropdownSettings,
        signals: impl Fn() -> LayoutSignals + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(CoordinatorInner {
                host,
                settings,
                signals: Box::new(signals),
                registry: RefCell::new(OpenInstanceRegistry::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn settings(&self) -> &DropdownSettings {
        &self.inner.settings
    }

    /// Current layout flags, read at the moment of the call.
    pub fn signals(&self) -> LayoutSignals {
        (self.inner.signals)()
    }

    /// Ids of the tracked open menus, oldest first.
    pub fn open_ids(&self) -> Vec<OverlayId> {
        self.inner.registry.borrow().ids()
    }

    /// Create the controller for a newly mounted dropdown. Acquires its two
    /// document click listeners; they are released by
    /// [`OverlayController::unmount`] or when the last clone is dropped.
    pub fn mount(&self, options: DropdownOptions) -> OverlayController<T> {
        let id = OverlayId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let instance = Rc::new(Instance {
            id,
            coordinator: self.clone(),
            machine: RefCell::new(OverlayMachine::new(options, self.signals())),
            trigger: RefCell::new(None),
            menu: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            on_change: RefCell::new(None),
            on_request_sidebar_collapse: RefCell::new(None),
            mounted: Cell::new(true),
        });

        let weak = Rc::downgrade(&instance);
        let outside: ClickHandler<T> = Rc::new(move |target: &T| {
            if let Some(instance) = weak.upgrade() {
                OverlayController { inner: instance }.outside_click(target);
            }
        });
        let weak = Rc::downgrade(&instance);
        let sidebar: ClickHandler<T> = Rc::new(move |target: &T| {
            if let Some(instance) = weak.upgrade() {
                OverlayController { inner: instance }.sidebar_click(target);
            }
        });

        instance.listeners.borrow_mut().extend([
            ListenerGuard::acquire(&self.inner.host, outside),
            ListenerGuard::acquire(&self.inner.host, sidebar),
        ]);

        log::debug!("{} mounted", id);
        OverlayController { inner: instance }
    }

    /// Whether `node` sits inside the menu panel of a tracked open dropdown.
    fn is_nested(&self, node: &T) -> bool {
        self.inner.registry.borrow().iter().any(|entry| {
            entry
                .instance
                .upgrade()
                .map(|instance| instance.menu_contains(node))
                .unwrap_or(false)
        })
    }
}

struct Instance<T: 'static> {
    id: OverlayId,
    coordinator: Coordinator<T>,
    machine: RefCell<OverlayMachine>,
    trigger: RefCell<Option<Rc<dyn OverlayElement<T>>>>,
    menu: RefCell<Option<Rc<dyn OverlayElement<T>>>>,
    listeners: RefCell<Vec<ListenerGuard<T>>>,
    on_change: RefCell<Option<Rc<dyn Fn(bool)>>>,
    on_request_sidebar_collapse: RefCell<Option<Rc<dyn Fn()>>>,
    mounted: Cell<bool>,
}

impl<T: 'static> Instance<T> {
    fn menu_contains(&self, node: &T) -> bool {
        self.menu
            .borrow()
            .as_ref()
            .map(|menu| menu.contains(node))
            .unwrap_or(false)
    }
}

impl<T: 'static> Drop for Instance<T> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.coordinator.inner.registry.try_borrow_mut() {
            registry.remove(self.id);
        }
    }
}

/// Handle to one mounted dropdown. Cheap to clone; all clones share state.
///
/// A controller only ever changes its own state. Peers are closed through
/// their own [`OverlayController::close`].
pub struct OverlayController<T: 'static> {
    inner: Rc<Instance<T>>,
}

impl<T: 'static> Clone for OverlayController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> OverlayController<T> {
    pub fn id(&self) -> OverlayId {
        self.inner.id
    }

    pub fn is_open(&self) -> bool {
        self.inner.machine.borrow().is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    pub fn placement(&self) -> PlacementMode {
        self.inner.machine.borrow().placement()
    }

    pub fn options(&self) -> DropdownOptions {
        self.inner.machine.borrow().options().clone()
    }

    /// Position applied by the latest reposition of the current open.
    pub fn computed_position(&self) -> Option<Position> {
        self.inner.machine.borrow().computed_position()
    }

    /// Called with the new open state after every change.
    pub fn on_change(&self, callback: impl Fn(bool) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn on_request_sidebar_collapse(&self, callback: impl Fn() + 'static) {
        *self.inner.on_request_sidebar_collapse.borrow_mut() = Some(Rc::new(callback));
    }

    /// Register (or, with `None`, forget) the trigger container element.
    pub fn register_trigger_element(&self, element: Option<Rc<dyn OverlayElement<T>>>) {
        *self.inner.trigger.borrow_mut() = element;
    }

    /// Register the menu panel once it is mounted. An open menu is positioned
    /// right away, so mounting, measuring and positioning happen in order.
    pub fn register_menu_element(&self, element: Option<Rc<dyn OverlayElement<T>>>) {
        let mounted = element.is_some();
        *self.inner.menu.borrow_mut() = element;
        if mounted && self.is_open() {
            self.reposition();
        }
    }

    pub fn open(&self) -> Transition {
        self.dispatch(OverlayEvent::Open)
    }

    /// Idempotent.
    pub fn close(&self) -> Transition {
        self.dispatch(OverlayEvent::Close)
    }

    pub fn toggle(&self) -> Transition {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn activate_trigger(&self) -> Transition {
        self.dispatch(OverlayEvent::TriggerActivated)
    }

    pub fn pointer_entered(&self) -> Transition {
        self.dispatch(OverlayEvent::PointerEntered)
    }

    pub fn pointer_left(&self) -> Transition {
        self.dispatch(OverlayEvent::PointerLeft)
    }

    pub fn key_down(&self, key: &str) -> Transition {
        self.dispatch(OverlayEvent::KeyDown(key))
    }

    /// Report the current route path. The first report only records it.
    pub fn route_changed(&self, path: &str) -> Transition {
        let coordinator = &self.inner.coordinator;
        let narrow_viewport =
            coordinator.inner.host.viewport().width <= coordinator.settings().narrow_viewport_px;
        let can_collapse_sidebar = self.inner.on_request_sidebar_collapse.borrow().is_some();
        self.dispatch(OverlayEvent::RouteChanged {
            path,
            signals: coordinator.signals(),
            narrow_viewport,
            can_collapse_sidebar,
        })
    }

    pub fn apply_external_active(&self, active: Option<bool>) -> Transition {
        self.dispatch(OverlayEvent::ExternalActive(active))
    }

    pub fn apply_layout(&self, signals: LayoutSignals) -> Transition {
        self.dispatch(OverlayEvent::LayoutChanged(signals))
    }

    /// Measure trigger and menu and move the menu. Skipped while closed or
    /// when either element cannot be measured.
    pub fn reposition(&self) -> Option<Position> {
        if !self.is_open() {
            return None;
        }
        let trigger = self.inner.trigger.borrow().clone();
        let menu = self.inner.menu.borrow().clone();

        let anchor = trigger.as_ref().and_then(|t| t.bounding_rect());
        let menu_size = menu
            .as_ref()
            .and_then(|m| m.bounding_rect())
            .map(|r| r.size());
        let coordinator = &self.inner.coordinator;
        let viewport = coordinator.inner.host.viewport();
        let direction = coordinator.signals().direction;

        let position =
            try_compute_position(anchor, menu_size, viewport, self.placement(), direction)?;
        if let (Some(anchor), Some(menu_size)) = (anchor, menu_size) {
            self.inner
                .machine
                .borrow_mut()
                .record_placement(anchor, menu_size, position);
        }
        if let Some(menu) = menu {
            menu.set_position(position);
        }
        log::debug!(
            "{} placed at ({}, {}) using {}",
            self.inner.id,
            position.left,
            position.top,
            self.placement().as_str()
        );
        Some(position)
    }

    /// Release listeners, leave the registry and drop element references.
    /// Safe to call more than once.
    pub fn unmount(&self) {
        if !self.inner.mounted.replace(false) {
            return;
        }
        for mut guard in self.inner.listeners.borrow_mut().drain(..) {
            guard.release();
        }
        self.inner
            .coordinator
            .inner
            .registry
            .borrow_mut()
            .remove(self.inner.id);
        *self.inner.trigger.borrow_mut() = None;
        *self.inner.menu.borrow_mut() = None;
        *self.inner.on_change.borrow_mut() = None;
        *self.inner.on_request_sidebar_collapse.borrow_mut() = None;
        log::debug!("{} unmounted", self.inner.id);
    }

    fn outside_click(&self, target: &T) {
        let inside = self.inner.trigger.borrow().as_ref().map(|t| t.contains(target));
        if inside == Some(false) {
            self.dispatch(OverlayEvent::OutsideClick);
        }
    }

    fn sidebar_click(&self, target: &T) {
        let host = &self.inner.coordinator.inner.host;
        if !host.sidebar_contains(target) {
            return;
        }
        let inside = self.inner.trigger.borrow().as_ref().map(|t| t.contains(target));
        if inside == Some(false) {
            self.dispatch(OverlayEvent::SidebarClick);
        }
    }

    fn dispatch(&self, event: OverlayEvent<'_>) -> Transition {
        if !self.is_mounted() {
            return Transition::default();
        }
        let transition = self.inner.machine.borrow_mut().handle(event);
        self.apply(transition);
        transition
    }

    fn apply(&self, transition: Transition) {
        let id = self.inner.id;
        if transition.closed {
            self.inner
                .coordinator
                .inner
                .registry
                .borrow_mut()
                .remove(id);
            log::debug!("{} closed", id);
            self.notify(false);
        }
        if transition.opened {
            if transition.check_registry {
                self.enforce_open_limit();
            }
            log::debug!("{} opened", id);
            self.notify(true);
            self.reposition();
        }
        if transition.collapse_sidebar {
            let callback = self.inner.on_request_sidebar_collapse.borrow().clone();
            if let Some(callback) = callback {
                log::debug!("{} requested sidebar collapse", id);
                callback();
            }
        }
    }

    fn notify(&self, open: bool) {
        let callback = self.inner.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback(open);
        }
    }

    /// Eviction policy for constrained layouts: at most
    /// `max_open_menus` open, oldest closed first.
    fn enforce_open_limit(&self) {
        let coordinator = &self.inner.coordinator;
        if !coordinator.signals().is_constrained() {
            return;
        }

        let trigger_node = self.inner.trigger.borrow().as_ref().map(|t| t.node());
        let nested = trigger_node
            .as_ref()
            .map(|node| coordinator.is_nested(node))
            .unwrap_or(false);
        let limit = coordinator.settings().max_open_menus;

        let entry = RegistryEntry {
            id: self.inner.id,
            instance: Rc::downgrade(&self.inner),
        };
        // Panels hosting the new menu stay open; closing one would unmount it.
        let is_ancestor = |entry: &RegistryEntry<T>| {
            match (&trigger_node, entry.instance.upgrade()) {
                (Some(node), Some(instance)) => instance.menu_contains(node),
                _ => false,
            }
        };
        let evicted = coordinator
            .inner
            .registry
            .borrow_mut()
            .track_open(entry, nested, limit, is_ancestor);

        for entry in evicted {
            if entry.id == self.inner.id {
                continue;
            }
            if let Some(instance) = entry.instance.upgrade() {
                log::debug!("{} evicted by {}", entry.id, self.inner.id);
                OverlayController { inner: instance }.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Viewport};
    use crate::host::ListenerId;
    use crate::layout::{LayoutMode, SidebarSize};
    use crate::machine::TriggerMode;
    use std::collections::{BTreeMap, HashSet};

    type Node = u32;

    const SIDEBAR: Node = 1000;

    struct FakeHost {
        viewport: Cell<Viewport>,
        sidebar: RefCell<HashSet<Node>>,
        listeners: RefCell<BTreeMap<u64, ClickHandler<Node>>>,
        next: Cell<u64>,
    }

    impl FakeHost {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                viewport: Cell::new(Viewport::new(1280.0, 800.0)),
                sidebar: RefCell::new(HashSet::from([SIDEBAR])),
                listeners: RefCell::new(BTreeMap::new()),
                next: Cell::new(0),
            })
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }

        fn click(&self, target: Node) {
            let handlers: Vec<_> = self.listeners.borrow().values().cloned().collect();
            for handler in handlers {
                handler(&target);
            }
        }
    }

    impl OverlayHost<Node> for FakeHost {
        fn viewport(&self) -> Viewport {
            self.viewport.get()
        }

        fn sidebar_contains(&self, target: &Node) -> bool {
            self.sidebar.borrow().contains(target)
        }

        fn add_click_listener(&self, handler: ClickHandler<Node>) -> ListenerId {
            let id = self.next.get();
            self.next.set(id + 1);
            self.listeners.borrow_mut().insert(id, handler);
            ListenerId(id)
        }

        fn remove_click_listener(&self, id: ListenerId) {
            self.listeners.borrow_mut().remove(&id.0);
        }
    }

    struct FakeElement {
        node: Node,
        subtree: RefCell<HashSet<Node>>,
        rect: Cell<Option<Rect>>,
        applied: Cell<Option<Position>>,
    }

    impl FakeElement {
        fn new(node: Node, rect: Option<Rect>) -> Rc<Self> {
            Rc::new(Self {
                node,
                subtree: RefCell::new(HashSet::from([node])),
                rect: Cell::new(rect),
                applied: Cell::new(None),
            })
        }

        fn adopt(&self, child: Node) {
            self.subtree.borrow_mut().insert(child);
        }
    }

    impl OverlayElement<Node> for FakeElement {
        fn bounding_rect(&self) -> Option<Rect> {
            self.rect.get()
        }

        fn contains(&self, target: &Node) -> bool {
            self.subtree.borrow().contains(target)
        }

        fn node(&self) -> Node {
            self.node
        }

        fn set_position(&self, position: Position) {
            self.applied.set(Some(position));
        }
    }

    struct Fixture {
        host: Rc<FakeHost>,
        signals: Rc<Cell<LayoutSignals>>,
        coordinator: Coordinator<Node>,
    }

    fn fixture(signals: LayoutSignals) -> Fixture {
        let host = FakeHost::new();
        let signals = Rc::new(Cell::new(signals));
        let source = Rc::clone(&signals);
        let dyn_host: Rc<dyn OverlayHost<Node>> = host.clone();
        let coordinator =
            Coordinator::new(dyn_host, DropdownSettings::default(), move || source.get());
        Fixture {
            host,
            signals,
            coordinator,
        }
    }

    fn horizontal() -> LayoutSignals {
        LayoutSignals {
            mode: LayoutMode::Horizontal,
            ..Default::default()
        }
    }

    /// Mount a dropdown whose trigger container is `node` and whose menu
    /// panel is `node + 1`.
    fn mount(
        f: &Fixture,
        node: Node,
        options: DropdownOptions,
    ) -> (OverlayController<Node>, Rc<FakeElement>, Rc<FakeElement>) {
        let controller = f.coordinator.mount(options);
        let trigger = FakeElement::new(node, Some(Rect::new(100.0, 40.0, 80.0, 30.0)));
        let menu = FakeElement::new(node + 1, Some(Rect::new(0.0, 0.0, 200.0, 120.0)));
        trigger.adopt(node + 1);
        controller.register_trigger_element(Some(trigger.clone()));
        controller.register_menu_element(Some(menu.clone()));
        (controller, trigger, menu)
    }

    #[test]
    fn mount_acquires_two_listeners_and_unmount_releases_them() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        assert_eq!(f.host.listener_count(), 2);
        controller.unmount();
        assert_eq!(f.host.listener_count(), 0);
        controller.unmount();
        assert_eq!(f.host.listener_count(), 0);
    }

    #[test]
    fn hundred_mount_cycles_leave_no_listeners() {
        let f = fixture(LayoutSignals::default());
        for i in 0..100 {
            let (controller, _, _) = mount(&f, i * 10, DropdownOptions::default());
            controller.open();
            controller.unmount();
        }
        assert_eq!(f.host.listener_count(), 0);

        // Dropping without an explicit unmount also releases.
        for i in 0..100 {
            let _ = f.coordinator.mount(DropdownOptions::default());
            assert_eq!(f.host.listener_count(), 0, "iteration {i}");
        }
        assert!(f.coordinator.open_ids().is_empty());
    }

    #[test]
    fn click_on_own_trigger_is_not_outside() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());

        // Same native click: toggle handler first, then document listeners.
        controller.activate_trigger();
        f.host.click(10);
        assert!(controller.is_open());

        // Clicks inside the menu panel are inside the subtree too.
        f.host.click(11);
        assert!(controller.is_open());

        f.host.click(500);
        assert!(!controller.is_open());
    }

    #[test]
    fn outside_click_flag_is_honoured() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(
            &f,
            10,
            DropdownOptions {
                close_on_outside_click: false,
                ..Default::default()
            },
        );
        controller.open();
        f.host.click(500);
        assert!(controller.is_open());

        // A click in the sidebar still closes it.
        f.host.click(SIDEBAR);
        assert!(!controller.is_open());
    }

    #[test]
    fn escape_dismisses_once() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        controller.open();
        assert!(controller.key_down("Escape").closed);
        assert!(!controller.is_open());
        assert_eq!(controller.key_down("Escape"), Transition::default());
        assert!(!controller.close().changed());
    }

    #[test]
    fn open_positions_the_menu() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, menu) = mount(&f, 10, DropdownOptions::default());
        controller.open();
        let expected = Position::new(100.0, 70.0);
        assert_eq!(controller.computed_position(), Some(expected));
        assert_eq!(menu.applied.get(), Some(expected));
    }

    #[test]
    fn reopen_after_anchor_moved_recomputes() {
        let f = fixture(LayoutSignals::default());
        let (controller, trigger, _) = mount(&f, 10, DropdownOptions::default());
        controller.open();
        let first = controller.computed_position();
        controller.close();
        assert_eq!(controller.computed_position(), None);

        trigger.rect.set(Some(Rect::new(1200.0, 700.0, 60.0, 30.0)));
        controller.open();
        let second = controller.computed_position();
        assert_ne!(first, second);
        assert_eq!(second, Some(Position::new(1060.0, 580.0)));
    }

    #[test]
    fn menu_mounted_after_open_is_positioned_on_registration() {
        let f = fixture(LayoutSignals::default());
        let controller = f.coordinator.mount(DropdownOptions::default());
        let trigger = FakeElement::new(10, Some(Rect::new(100.0, 40.0, 80.0, 30.0)));
        controller.register_trigger_element(Some(trigger));

        controller.open();
        assert_eq!(controller.computed_position(), None);

        let menu = FakeElement::new(11, Some(Rect::new(0.0, 0.0, 200.0, 120.0)));
        controller.register_menu_element(Some(menu.clone()));
        assert_eq!(menu.applied.get(), Some(Position::new(100.0, 70.0)));
    }

    #[test]
    fn unmeasurable_menu_skips_reposition() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, menu) = mount(&f, 10, DropdownOptions::default());
        menu.rect.set(None);
        controller.open();
        assert!(controller.is_open());
        assert_eq!(menu.applied.get(), None);
        assert_eq!(controller.computed_position(), None);
    }

    #[test]
    fn constrained_layout_keeps_at_most_two_open() {
        let f = fixture(horizontal());
        let mut chain = Vec::new();
        let mut parent_menu: Option<Rc<FakeElement>> = None;
        for i in 0..5u32 {
            let node = 10 * (i + 1);
            let (controller, _, menu) = mount(&f, node, DropdownOptions::default());
            // Each trigger lives inside the previous menu panel.
            if let Some(parent) = &parent_menu {
                parent.adopt(node);
            }
            controller.activate_trigger();
            chain.push(controller);
            parent_menu = Some(menu);
        }

        let open: Vec<bool> = chain.iter().map(|c| c.is_open()).collect();
        assert_eq!(open, vec![false, false, false, true, true]);
        assert_eq!(
            f.coordinator.open_ids(),
            vec![chain[3].id(), chain[4].id()]
        );
    }

    #[test]
    fn eviction_closes_oldest_first() {
        let f = fixture(horizontal());
        let closed_order = Rc::new(RefCell::new(Vec::new()));
        let mut chain = Vec::new();
        let mut parent_menu: Option<Rc<FakeElement>> = None;
        for i in 0..4u32 {
            let node = 10 * (i + 1);
            let (controller, _, menu) = mount(&f, node, DropdownOptions::default());
            if let Some(parent) = &parent_menu {
                parent.adopt(node);
            }
            let log = Rc::clone(&closed_order);
            let id = controller.id();
            controller.on_change(move |open| {
                if !open {
                    log.borrow_mut().push(id);
                }
            });
            controller.activate_trigger();
            chain.push(controller);
            parent_menu = Some(menu);
        }
        assert_eq!(*closed_order.borrow(), vec![chain[0].id(), chain[1].id()]);
    }

    #[test]
    fn eviction_spares_the_panel_hosting_the_new_submenu() {
        let f = fixture(horizontal());
        let (apps, _, apps_menu) = mount(&f, 10, DropdownOptions::default());
        let (crm, _, _) = mount(&f, 20, DropdownOptions::default());
        let (hospital, _, _) = mount(&f, 30, DropdownOptions::default());
        apps_menu.adopt(20);
        apps_menu.adopt(30);

        apps.activate_trigger();
        crm.activate_trigger();
        hospital.activate_trigger();

        assert!(apps.is_open());
        assert!(!crm.is_open());
        assert!(hospital.is_open());
        assert_eq!(f.coordinator.open_ids(), vec![apps.id(), hospital.id()]);
    }

    #[test]
    fn unrelated_top_level_open_resets_the_registry() {
        let f = fixture(horizontal());
        let (a, _, _) = mount(&f, 10, DropdownOptions::default());
        let (b, _, _) = mount(&f, 20, DropdownOptions::default());
        a.activate_trigger();
        b.activate_trigger();
        assert_eq!(f.coordinator.open_ids(), vec![b.id()]);
        // `a` is closed by its own outside-click listener, not by eviction.
        f.host.click(20);
        assert!(!a.is_open());
        assert!(b.is_open());
    }

    #[test]
    fn registry_is_inert_in_vertical_layout() {
        let f = fixture(LayoutSignals::default());
        let mut parent_menu: Option<Rc<FakeElement>> = None;
        let mut chain = Vec::new();
        for i in 0..4u32 {
            let node = 10 * (i + 1);
            let (controller, _, menu) = mount(&f, node, DropdownOptions::default());
            if let Some(parent) = &parent_menu {
                parent.adopt(node);
            }
            controller.activate_trigger();
            chain.push(controller);
            parent_menu = Some(menu);
        }
        assert!(chain.iter().all(|c| c.is_open()));
        assert!(f.coordinator.open_ids().is_empty());
    }

    #[test]
    fn closing_leaves_the_registry() {
        let f = fixture(horizontal());
        let (a, _, _) = mount(&f, 10, DropdownOptions::default());
        a.activate_trigger();
        assert_eq!(f.coordinator.open_ids(), vec![a.id()]);
        a.key_down("Escape");
        assert!(f.coordinator.open_ids().is_empty());
    }

    #[test]
    fn route_change_in_constrained_layout_closes() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        controller.route_changed("/");
        controller.open();
        controller.route_changed("/crm/leads");
        assert!(controller.is_open());

        f.signals.set(LayoutSignals {
            sidebar_size: SidebarSize::Small,
            ..Default::default()
        });
        controller.route_changed("/crm/deals");
        assert!(!controller.is_open());
    }

    #[test]
    fn narrow_route_change_invokes_collapse_callback_once() {
        let f = fixture(LayoutSignals {
            sidebar_open: true,
            ..Default::default()
        });
        f.host.viewport.set(Viewport::new(600.0, 900.0));
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        controller.on_request_sidebar_collapse(move || counter.set(counter.get() + 1));

        controller.route_changed("/");
        controller.open();
        controller.route_changed("/hospital/patients");
        assert_eq!(calls.get(), 1);
        assert!(!controller.is_open());

        // Wide viewport: no collapse request.
        f.host.viewport.set(Viewport::new(1400.0, 900.0));
        controller.route_changed("/hospital/doctors");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn hover_trigger_opens_and_closes_with_pointer() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, menu) = mount(
            &f,
            10,
            DropdownOptions {
                trigger: TriggerMode::Hover,
                ..Default::default()
            },
        );
        controller.pointer_entered();
        assert!(controller.is_open());
        assert!(menu.applied.get().is_some());
        controller.pointer_left();
        assert!(!controller.is_open());
    }

    #[test]
    fn external_active_preopens_side_flyouts() {
        let f = fixture(LayoutSignals::default());
        let (flyout, _, _) = mount(
            &f,
            10,
            DropdownOptions {
                placement: PlacementMode::TopRight,
                ..Default::default()
            },
        );
        flyout.apply_external_active(Some(true));
        assert!(flyout.is_open());
        assert!(flyout.computed_position().is_some());

        let (plain, _, _) = mount(&f, 20, DropdownOptions::default());
        plain.apply_external_active(Some(true));
        assert!(!plain.is_open());
    }

    #[test]
    fn layout_collapse_closes_open_menus() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        controller.open();
        controller.apply_layout(horizontal());
        assert!(!controller.is_open());
    }

    #[test]
    fn rtl_signal_reaches_the_calculator() {
        let f = fixture(LayoutSignals {
            direction: crate::placement::TextDirection::Rtl,
            ..Default::default()
        });
        let (controller, trigger, _) = mount(
            &f,
            10,
            DropdownOptions {
                placement: PlacementMode::Right,
                ..Default::default()
            },
        );
        trigger.rect.set(Some(Rect::new(600.0, 40.0, 80.0, 30.0)));
        controller.open();
        assert_eq!(controller.computed_position().map(|p| p.left), Some(600.0));
    }

    #[test]
    fn unmounted_controller_ignores_events() {
        let f = fixture(LayoutSignals::default());
        let (controller, _, _) = mount(&f, 10, DropdownOptions::default());
        controller.unmount();
        assert!(!controller.open().changed());
        assert!(!controller.is_open());
    }
}

//! Responsive navigation bar widget.
//!
//! The bar renders a brand, top-level links and one level of dropdowns into a
//! container element. It collapses below a viewport breakpoint, tracks the
//! active top-level item and keeps at most one dropdown open.
//!
//! Clicks are handled by one delegated listener on the container, plus a
//! document listener that closes the open dropdown on outside clicks or
//! Escape. All listeners hold weak references, so dropping the last
//! [`NavBar`] handle tears the widget down.
//!
//! # Example
//!
//! ```rust,ignore
//! use kickstart_core::navbar::{NavBar, NavBarConfig, Brand, MenuItem};
//!
//! let config = NavBarConfig::new(
//!     Brand::new("Kickstart", "./"),
//!     vec![MenuItem::link("Home", "/").active()],
//! );
//! let nav = NavBar::create(dom.clone(), container, config)?;
//! nav.set_active(0)?;
//! nav.destroy()?;
//! ```

pub mod config;
pub mod render;
pub mod state;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, error, info, warn};

pub use config::{Brand, DEFAULT_COLLAPSE_AT, MenuItem, NavBarConfig, Variant};
pub use state::{NavBarState, Presentation, Toggle};

use crate::dom::{Dom, DomEvent, EventKind, EventTarget, ListenerId};
use crate::error::{ConfigError, Error, Result};
use crate::markup::Markup;

/// What a click on a menu item resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The host was asked to navigate to this url.
    Navigated(String),
    /// A dropdown opened.
    DropdownOpened(usize),
    /// A dropdown closed.
    DropdownClosed(usize),
}

struct Inner<D: Dom> {
    dom: D,
    container: D::Node,
    config: NavBarConfig,
    state: Cell<NavBarState>,
    listeners: RefCell<Vec<ListenerId>>,
    destroyed: Cell<bool>,
}

/// A live navigation bar bound to a container element.
///
/// Cloning yields another handle to the same widget.
pub struct NavBar<D: Dom> {
    inner: Rc<Inner<D>>,
}

impl<D: Dom> Clone for NavBar<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: Dom> std::fmt::Debug for NavBar<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavBar")
            .field("container", &self.inner.container)
            .field("state", &self.inner.state.get())
            .field("destroyed", &self.inner.destroyed.get())
            .finish_non_exhaustive()
    }
}

impl<D: Dom> NavBar<D> {
    /// Validate `config`, render into `container` and register listeners.
    pub fn create(dom: D, container: D::Node, config: NavBarConfig) -> Result<Self> {
        config.validate()?;

        let width = dom.viewport_width();
        let state = NavBarState::initial(&config, width);
        let inner = Rc::new(Inner {
            dom,
            container,
            config,
            state: Cell::new(state),
            listeners: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        });
        inner.paint();

        let weak = Rc::downgrade(&inner);
        let ids = vec![
            inner.dom.add_listener(
                EventTarget::Window,
                EventKind::Resize,
                handler(&weak, |inner, event| {
                    if let Some(width) = event.viewport_width {
                        inner.apply_resize(width);
                    }
                }),
            ),
            inner.dom.add_listener(
                EventTarget::Element(inner.container.clone()),
                EventKind::Click,
                handler(&weak, Inner::<D>::on_container_click),
            ),
            inner.dom.add_listener(
                EventTarget::Document,
                EventKind::Click,
                handler(&weak, |inner, event| {
                    if !event.is_within(&inner.container) {
                        inner.close_open_dropdown();
                    }
                }),
            ),
            inner.dom.add_listener(
                EventTarget::Document,
                EventKind::KeyDown,
                handler(&weak, |inner, event| {
                    if event.key.as_deref() == Some("Escape") {
                        inner.close_open_dropdown();
                    }
                }),
            ),
        ];
        *inner.listeners.borrow_mut() = ids;

        info!(
            items = inner.config.items.len(),
            variant = %inner.config.variant,
            collapsed = state.collapsed,
            "Navigation bar created"
        );
        Ok(Self { inner })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> Result<NavBarState> {
        self.ensure_alive()?;
        Ok(self.inner.state.get())
    }

    /// The configuration this bar was built from.
    pub fn config(&self) -> Result<&NavBarConfig> {
        self.ensure_alive()?;
        Ok(&self.inner.config)
    }

    /// Markup for the current state.
    pub fn render(&self) -> Result<Markup> {
        self.ensure_alive()?;
        Ok(render::render(&self.inner.config, &self.inner.state.get()).into())
    }

    /// Make top-level item `index` active, clearing the previous one.
    pub fn set_active(&self, index: usize) -> Result<()> {
        self.ensure_alive()?;
        self.inner.check_index(index)?;
        let state = self.inner.state.get();
        self.inner.commit(state.activated(index));
        Ok(())
    }

    /// Flip between expanded and collapsed.
    pub fn toggle_collapse(&self) -> Result<Toggle> {
        self.ensure_alive()?;
        Ok(self.inner.toggle())
    }

    /// Open dropdown `index`, closing any other.
    pub fn open_dropdown(&self, index: usize) -> Result<()> {
        self.ensure_alive()?;
        self.inner.check_dropdown(index)?;
        let state = self.inner.state.get();
        self.inner.commit(state.dropdown_opened(index));
        Ok(())
    }

    /// Close the open dropdown. No-op when none is open.
    pub fn close_dropdown(&self) -> Result<()> {
        self.ensure_alive()?;
        self.inner.close_open_dropdown();
        Ok(())
    }

    /// Feed a viewport width, as a resize notification would.
    pub fn resize(&self, width: u32) -> Result<()> {
        self.ensure_alive()?;
        self.inner.apply_resize(width);
        Ok(())
    }

    /// Click top-level item `index`: dropdown triggers open or close, leaves navigate.
    pub fn activate(&self, index: usize) -> Result<Activation> {
        self.ensure_alive()?;
        self.inner.activate(index, None)
    }

    /// Click child `child` of dropdown `parent`.
    pub fn activate_child(&self, parent: usize, child: usize) -> Result<Activation> {
        self.ensure_alive()?;
        let item = self.inner.check_dropdown(parent)?;
        if child >= item.items.len() {
            return Err(Error::Range {
                index: child,
                len: item.items.len(),
            });
        }
        self.inner.activate(parent, Some(child))
    }

    /// Remove every listener and clear the container.
    ///
    /// Safe to call from inside one of the bar's own handlers.
    pub fn destroy(&self) -> Result<()> {
        self.ensure_alive()?;
        self.inner.teardown();
        self.inner.dom.replace_content(&self.inner.container, &[]);
        info!("Navigation bar destroyed");
        Ok(())
    }

    /// Whether [`NavBar::destroy`] has been called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.inner.destroyed.get() {
            Err(Error::State)
        } else {
            Ok(())
        }
    }
}

/// Wrap a handler so it only runs while the widget is alive.
fn handler<D, F>(weak: &Weak<Inner<D>>, f: F) -> crate::dom::Listener<D::Node>
where
    D: Dom,
    F: Fn(&Inner<D>, &DomEvent<D::Node>) + 'static,
{
    let weak = Weak::clone(weak);
    Rc::new(move |event: &DomEvent<D::Node>| {
        if let Some(inner) = weak.upgrade()
            && !inner.destroyed.get()
        {
            f(&inner, event);
        }
    })
}

impl<D: Dom> Inner<D> {
    fn paint(&self) {
        let markup: Markup = render::render(&self.config, &self.state.get()).into();
        self.dom.replace_content(&self.container, &[markup]);
    }

    /// Swap in `next` and repaint when it differs.
    fn commit(&self, next: NavBarState) {
        if self.destroyed.get() || self.state.get() == next {
            return;
        }
        self.state.set(next);
        self.paint();
    }

    fn check_index(&self, index: usize) -> Result<&config::MenuItem> {
        self.config.items.get(index).ok_or(Error::Range {
            index,
            len: self.config.items.len(),
        })
    }

    fn check_dropdown(&self, index: usize) -> Result<&config::MenuItem> {
        let item = self.check_index(index)?;
        if item.is_dropdown() {
            Ok(item)
        } else {
            Err(Error::NotADropdown(index))
        }
    }

    fn apply_resize(&self, width: u32) {
        let state = self.state.get();
        let next = state.resized(&self.config, width);
        if next.collapsed != state.collapsed {
            debug!(width, collapsed = next.collapsed, "Breakpoint crossed");
        }
        self.commit(next);
    }

    fn toggle(&self) -> Toggle {
        match self.state.get().toggled(&self.config) {
            Some(next) => {
                self.commit(next);
                Toggle::Changed(next.presentation())
            }
            None => Toggle::Ignored,
        }
    }

    fn close_open_dropdown(&self) {
        let state = self.state.get();
        if state.open_dropdown.is_some() {
            self.commit(state.dropdown_closed());
        }
    }

    fn activate(&self, index: usize, child: Option<usize>) -> Result<Activation> {
        let item = self.check_index(index)?;
        let state = self.state.get();

        let target = match child {
            None if item.is_dropdown() => {
                return Ok(if state.is_open(index) {
                    self.commit(state.dropdown_closed());
                    Activation::DropdownClosed(index)
                } else {
                    self.commit(state.dropdown_opened(index));
                    Activation::DropdownOpened(index)
                });
            }
            None => item,
            Some(child) => item.items.get(child).ok_or(Error::Range {
                index: child,
                len: item.items.len(),
            })?,
        };
        let url = target
            .href()
            .ok_or_else(|| ConfigError::MissingUrl(target.text.clone()))?
            .to_string();

        let mut next = state.dropdown_closed();
        if child.is_none() {
            next = next.activated(index);
        }
        self.commit(next);
        debug!(url = %url, "Navigating");
        self.dom.navigate(&url);
        Ok(Activation::Navigated(url))
    }

    /// Route a click that bubbled to the container.
    ///
    /// Anything that is not a trigger, a link or part of a dropdown counts
    /// as a click elsewhere and closes the open dropdown.
    fn on_container_click(&self, event: &DomEvent<D::Node>) {
        for node in &event.path {
            if node == &self.container {
                break;
            }
            if self.dom.attr(node, render::ATTR_TOGGLE).is_some() {
                self.close_open_dropdown();
                self.toggle();
                return;
            }
            if let Some(index) = self.index_attr(node, render::ATTR_DROPDOWN) {
                if self.check_dropdown(index).is_ok() {
                    self.log_failed(&self.activate(index, None));
                }
                return;
            }
            if let Some(index) = self.index_attr(node, render::ATTR_ITEM) {
                let child = self.index_attr(node, render::ATTR_CHILD);
                let valid = match child {
                    Some(c) => self
                        .check_dropdown(index)
                        .is_ok_and(|item| c < item.items.len()),
                    None => self.check_index(index).is_ok(),
                };
                if valid {
                    event.prevent_default();
                    self.log_failed(&self.activate(index, child));
                } else {
                    warn!(index, ?child, "Click on unknown menu item ignored");
                }
                return;
            }
            if self.dom.has_class(node, render::CLASS_DROPDOWN) {
                return;
            }
        }
        self.close_open_dropdown();
    }

    fn log_failed(&self, result: &Result<Activation>) {
        if let Err(e) = result {
            error!(error = %e, state = ?self.state.get(), "Menu click failed");
        }
    }

    fn index_attr(&self, node: &D::Node, name: &str) -> Option<usize> {
        self.dom.attr(node, name).and_then(|v| v.parse().ok())
    }

    fn teardown(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        let ids = std::mem::take(&mut *self.listeners.borrow_mut());
        for id in ids {
            self.dom.remove_listener(id);
        }
    }
}

impl<D: Dom> Drop for Inner<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dom::Selector;
    use crate::dom::memory::MemoryDom;
    use crate::markup::Element;

    fn scenario_config() -> NavBarConfig {
        NavBarConfig::new(
            Brand::new("X", "/"),
            vec![
                MenuItem::link("A", "/a").active(),
                MenuItem::dropdown("B", vec![MenuItem::link("B1", "/b1")]),
            ],
        )
        .with_variant(Variant::Dark)
        .with_collapse_at(768)
    }

    fn setup(width: u32) -> (MemoryDom, crate::dom::memory::NodeId) {
        let dom = MemoryDom::with_body(
            width,
            &[Element::new("div").attr("id", "main-nav").into()],
        );
        let container = dom.find(&Selector::id("main-nav")).unwrap();
        (dom, container)
    }

    fn node(dom: &MemoryDom, selector: &str) -> crate::dom::memory::NodeId {
        dom.find(&Selector::parse(selector).unwrap()).unwrap()
    }

    #[test]
    fn test_scenario_from_resize_to_child_navigation() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();

        let state = nav.state().unwrap();
        assert_eq!(state.presentation(), Presentation::Expanded);
        assert_eq!(state.active_item, Some(0));

        dom.resize(500);
        assert_eq!(nav.state().unwrap().presentation(), Presentation::Collapsed);

        dom.click(node(&dom, "[data-nav-dropdown]"));
        assert_eq!(nav.state().unwrap().open_dropdown, Some(1));

        let prevented = dom.click(node(&dom, "[data-nav-child]"));
        assert!(prevented);
        assert_eq!(dom.navigations(), vec!["/b1".to_string()]);
        let state = nav.state().unwrap();
        assert_eq!(state.open_dropdown, None);
        assert_eq!(state.active_item, Some(0));
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let (dom, container) = setup(1024);
        let mut config = scenario_config();
        config.items.push(MenuItem::link("C", "/c").active());
        let err = NavBar::create(dom.clone(), container, config).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MultipleActive { count: 2 })
        ));
        assert_eq!(dom.listener_count(), 0);
        assert_eq!(dom.inner_html(container), "");
    }

    #[test]
    fn test_leaf_click_sets_active_and_navigates() {
        let (dom, container) = setup(1024);
        let config = NavBarConfig::new(
            Brand::new("X", "/"),
            vec![MenuItem::link("A", "/a").active(), MenuItem::link("C", "/c")],
        );
        let nav = NavBar::create(dom.clone(), container, config).unwrap();

        dom.click(node(&dom, "[data-nav-item=\"1\"]"));
        assert_eq!(nav.state().unwrap().active_item, Some(1));
        assert_eq!(dom.navigations(), vec!["/c".to_string()]);

        let active = dom.query_all(&container, &Selector::class("active"));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_set_active_range_and_idempotence() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        let before = dom.inner_html(container);

        nav.set_active(0).unwrap();
        assert_eq!(dom.inner_html(container), before);

        nav.set_active(1).unwrap();
        assert_eq!(nav.state().unwrap().active_item, Some(1));

        let err = nav.set_active(2).unwrap_err();
        assert!(matches!(err, Error::Range { index: 2, len: 2 }));
    }

    #[test]
    fn test_toggle_collapse() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        assert_eq!(
            nav.toggle_collapse().unwrap(),
            Toggle::Changed(Presentation::Collapsed)
        );

        dom.click(node(&dom, "[data-nav-toggle]"));
        assert!(!nav.state().unwrap().collapsed);

        let (dom, container) = setup(1024);
        let fixed = NavBar::create(
            dom.clone(),
            container,
            scenario_config().with_collapsible(false),
        )
        .unwrap();
        assert_eq!(fixed.toggle_collapse().unwrap(), Toggle::Ignored);
    }

    #[test]
    fn test_manual_override_until_crossing() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        nav.toggle_collapse().unwrap();
        dom.resize(900);
        assert!(nav.state().unwrap().collapsed);
        dom.resize(600);
        assert!(nav.state().unwrap().collapsed);
        dom.resize(1000);
        assert!(!nav.state().unwrap().collapsed);
    }

    #[test]
    fn test_dropdown_exclusive_and_dismissal() {
        let (dom, container) = setup(1024);
        let config = NavBarConfig::new(
            Brand::new("X", "/"),
            vec![
                MenuItem::dropdown("B", vec![MenuItem::link("B1", "/b1")]),
                MenuItem::dropdown("C", vec![MenuItem::link("C1", "/c1")]),
            ],
        );
        let nav = NavBar::create(dom.clone(), container, config).unwrap();

        nav.open_dropdown(0).unwrap();
        nav.open_dropdown(1).unwrap();
        assert_eq!(nav.state().unwrap().open_dropdown, Some(1));
        assert_eq!(dom.query_all(&container, &Selector::class("open")).len(), 1);

        dom.key_down("Escape");
        assert_eq!(nav.state().unwrap().open_dropdown, None);

        nav.close_dropdown().unwrap();
        assert_eq!(nav.state().unwrap().open_dropdown, None);

        dom.click(node(&dom, "[data-nav-dropdown=\"0\"]"));
        assert_eq!(nav.state().unwrap().open_dropdown, Some(0));
        dom.click(dom.body().unwrap());
        assert_eq!(nav.state().unwrap().open_dropdown, None);
    }

    #[test]
    fn test_trigger_click_toggles_same_dropdown() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        dom.click(node(&dom, "[data-nav-dropdown]"));
        assert_eq!(nav.state().unwrap().open_dropdown, Some(1));
        dom.click(node(&dom, "[data-nav-dropdown]"));
        assert_eq!(nav.state().unwrap().open_dropdown, None);
    }

    #[test]
    fn test_click_elsewhere_in_bar_closes_dropdown() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();

        for target in [".navbar-brand-text", "nav", "[data-nav-toggle]"] {
            nav.open_dropdown(1).unwrap();
            dom.click(node(&dom, target));
            assert_eq!(nav.state().unwrap().open_dropdown, None, "{target}");
            assert!(dom.query_all(&container, &Selector::class("open")).is_empty());
        }
        assert!(dom.navigations().is_empty());
    }

    #[test]
    fn test_hamburger_click_closes_dropdown_and_toggles() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        nav.open_dropdown(1).unwrap();

        dom.click(node(&dom, "[data-nav-toggle]"));
        let state = nav.state().unwrap();
        assert_eq!(state.open_dropdown, None);
        assert!(state.collapsed);
    }

    #[test]
    fn test_click_inside_open_menu_keeps_it_open() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        nav.open_dropdown(1).unwrap();

        dom.click(node(&dom, ".navbar-dropdown-menu"));
        assert_eq!(nav.state().unwrap().open_dropdown, Some(1));
    }

    #[test]
    fn test_activate_reports_unknown_targets() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();

        let err = nav.inner.activate(5, None).unwrap_err();
        assert!(matches!(err, Error::Range { index: 5, len: 2 }));
        let err = nav.inner.activate(1, Some(4)).unwrap_err();
        assert!(matches!(err, Error::Range { index: 4, len: 1 }));
        let err = nav.inner.activate(0, Some(0)).unwrap_err();
        assert!(matches!(err, Error::Range { index: 0, len: 0 }));

        assert!(dom.navigations().is_empty());
        assert_eq!(nav.state().unwrap().active_item, Some(0));
    }

    #[test]
    fn test_open_dropdown_on_leaf_is_error() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom, container, scenario_config()).unwrap();
        assert!(matches!(nav.open_dropdown(0), Err(Error::NotADropdown(0))));
        assert!(matches!(nav.open_dropdown(7), Err(Error::Range { .. })));
    }

    #[test]
    fn test_every_operation_fails_after_destroy() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        nav.destroy().unwrap();
        assert_eq!(dom.listener_count(), 0);
        assert!(nav.is_destroyed());

        assert!(nav.state().unwrap_err().is_state());
        assert!(nav.config().unwrap_err().is_state());
        assert!(nav.render().unwrap_err().is_state());
        assert!(nav.set_active(0).unwrap_err().is_state());
        assert!(nav.toggle_collapse().unwrap_err().is_state());
        assert!(nav.open_dropdown(1).unwrap_err().is_state());
        assert!(nav.close_dropdown().unwrap_err().is_state());
        assert!(nav.resize(100).unwrap_err().is_state());
        assert!(nav.activate(0).unwrap_err().is_state());
        assert!(nav.activate_child(1, 0).unwrap_err().is_state());
        assert!(nav.destroy().unwrap_err().is_state());
    }

    #[test]
    fn test_destroy_from_inside_handler() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();

        let handle = nav.clone();
        dom.add_listener(
            EventTarget::Window,
            EventKind::Resize,
            Rc::new(move |_: &DomEvent<crate::dom::memory::NodeId>| {
                let _ = handle.destroy();
            }),
        );
        // The bar's own resize listener runs first, then ours destroys it.
        dom.resize(500);
        assert!(nav.is_destroyed());

        dom.resize(1200);
        dom.key_down("Escape");
        assert!(nav.state().is_err());
        assert_eq!(dom.listener_count(), 1);
    }

    #[test]
    fn test_reentrant_set_active_from_handler() {
        let (dom, container) = setup(1024);
        let config = NavBarConfig::new(
            Brand::new("X", "/"),
            vec![MenuItem::link("A", "/a"), MenuItem::link("C", "/c")],
        );
        let nav = NavBar::create(dom.clone(), container, config).unwrap();

        let handle = nav.clone();
        dom.add_listener(
            EventTarget::Element(container),
            EventKind::Click,
            Rc::new(move |_: &DomEvent<crate::dom::memory::NodeId>| {
                let _ = handle.set_active(0);
            }),
        );
        dom.click(node(&dom, "[data-nav-item=\"1\"]"));
        assert_eq!(nav.state().unwrap().active_item, Some(0));
        assert_eq!(dom.query_all(&container, &Selector::class("active")).len(), 1);
    }

    #[test]
    fn test_rendering_matches_pure_render() {
        let (dom, container) = setup(600);
        let config = scenario_config();
        let nav = NavBar::create(dom.clone(), container, config.clone()).unwrap();
        nav.open_dropdown(1).unwrap();
        let expected = render::render(&config, &nav.state().unwrap()).to_html();
        assert_eq!(dom.inner_html(container), expected);
        assert_eq!(nav.render().unwrap().to_html(), expected);
    }

    #[test]
    fn test_dropping_last_handle_removes_listeners() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        assert_eq!(dom.listener_count(), 4);
        drop(nav);
        assert_eq!(dom.listener_count(), 0);
    }

    #[test]
    fn test_programmatic_activation() {
        let (dom, container) = setup(1024);
        let nav = NavBar::create(dom.clone(), container, scenario_config()).unwrap();
        assert_eq!(nav.activate(1).unwrap(), Activation::DropdownOpened(1));
        assert_eq!(
            nav.activate_child(1, 0).unwrap(),
            Activation::Navigated("/b1".into())
        );
        assert!(matches!(nav.activate_child(1, 3), Err(Error::Range { .. })));
        assert_eq!(nav.activate(0).unwrap(), Activation::Navigated("/a".into()));
        assert_eq!(dom.navigations(), vec!["/b1".to_string(), "/a".to_string()]);
    }
}

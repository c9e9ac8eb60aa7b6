//! Page controller: wires the navigation bar, icons, interactions and theme
//! onto an already rendered kickstart page.
//!
//! The host calls [`PageController::initialize`] once its markup exists. No
//! listener is registered before that call.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PageConfig;
use crate::dom::{Dom, DomEvent, EventKind, ListenerId, Selection, Selector};
use crate::error::{Error, Result};
use crate::icons::{ATTR_ICON, ATTR_ICON_SIZE, IconRegistry, IconScanner, ScanSummary};
use crate::markup::Element;
use crate::navbar::NavBar;
use crate::storage::{PreferenceStore, StorageMedium};
use crate::theme::{THEME_KEY, Theme};

/// Duration of each half of the primary button pulse.
pub const PULSE_DURATION: Duration = Duration::from_millis(200);

/// Class marking the floating theme toggle button.
pub const THEME_TOGGLE_CLASS: &str = "theme-toggle";

const THEME_TOGGLE_STYLE: &str = concat!(
    "position: fixed; top: 1rem; right: 1rem; z-index: 1000; ",
    "box-shadow: 0 2px 8px rgba(0,0,0,0.15)",
);

/// A fully wired page.
pub struct PageController<D: Dom, S: StorageMedium> {
    dom: D,
    navbar: NavBar<D>,
    store: Rc<PreferenceStore<S>>,
    listeners: Vec<ListenerId>,
    theme_button: Option<D::Node>,
    icons: ScanSummary,
    destroyed: bool,
}

impl<D: Dom, S: StorageMedium + 'static> PageController<D, S> {
    /// Wire every page feature under `root`.
    ///
    /// Fails only when the configuration is invalid or the navigation bar
    /// container is missing. Icon and preference problems degrade softly.
    pub fn initialize<R: IconRegistry>(
        dom: D,
        storage: S,
        icons: R,
        root: &D::Node,
        config: PageConfig,
    ) -> Result<Self> {
        config.validate()?;
        info!("Initializing page");

        let selector = Selector::parse(&config.nav_selector)
            .ok_or_else(|| Error::ElementNotFound(config.nav_selector.clone()))?;
        let container = dom
            .query(root, &selector)
            .ok_or_else(|| Error::ElementNotFound(config.nav_selector.clone()))?;
        let navbar = NavBar::create(dom.clone(), container, config.navbar.clone())?;
        info!("Navigation bar initialized");

        let store = Rc::new(PreferenceStore::new(storage, config.namespace.clone()));
        let mut controller = Self {
            dom,
            navbar,
            store,
            listeners: Vec::new(),
            theme_button: None,
            icons: ScanSummary::default(),
            destroyed: false,
        };

        controller.icons = controller.init_step_cards(root, &config, &IconScanner::new(icons));
        controller.bind_primary_buttons(root);
        controller.bind_smooth_scroll(root);
        controller.load_theme_preference();
        if config.theme_toggle {
            controller.create_theme_toggle();
        }

        info!(
            listeners = controller.listeners.len(),
            icons_missing = controller.icons.missing.len(),
            "Initialization complete"
        );
        Ok(controller)
    }

    fn init_step_cards<R: IconRegistry>(
        &self,
        root: &D::Node,
        config: &PageConfig,
        scanner: &IconScanner<R>,
    ) -> ScanSummary {
        let cards = self.dom.select(root, &Selector::class("step-card"));
        let size = config.step_icon_size.to_string();
        for (card, step) in cards.nodes().iter().zip(&config.steps) {
            let attrs = [
                (ATTR_ICON, step.icon.as_str()),
                (ATTR_ICON_SIZE, size.as_str()),
            ];
            Selection::one(self.dom.clone(), card.clone())
                .find(&Selector::class("step-icon"))
                .set_attrs(&attrs);
            debug!(
                step = step.number,
                description = %step.description,
                "Step card initialized"
            );
        }
        if cards.len() != config.steps.len() {
            debug!(
                cards = cards.len(),
                steps = config.steps.len(),
                "Step card count differs from configured steps"
            );
        }

        let summary = scanner.scan(&self.dom, root).summary();
        info!(
            rendered = summary.rendered,
            skipped = summary.skipped,
            missing = summary.missing.len(),
            "Icons scanned and rendered"
        );
        summary
    }

    fn bind_primary_buttons(&mut self, root: &D::Node) {
        let dom = self.dom.clone();
        let listener: crate::dom::Listener<D::Node> = Rc::new(move |event: &DomEvent<D::Node>| {
            let Some(button) = event
                .path
                .iter()
                .find(|node| dom.has_class(node, "btn-primary"))
            else {
                return;
            };
            debug!("Primary button clicked");
            Selection::one(dom.clone(), button.clone())
                .add_class("active")
                .pulse(PULSE_DURATION);
        });
        let ids = self
            .dom
            .select(root, &Selector::class("btn-primary"))
            .on(EventKind::Click, &listener);
        self.listeners.extend(ids);
    }

    fn bind_smooth_scroll(&mut self, root: &D::Node) {
        let dom = self.dom.clone();
        let scope = root.clone();
        let listener: crate::dom::Listener<D::Node> = Rc::new(move |event: &DomEvent<D::Node>| {
            event.prevent_default();
            match dom.query(&scope, &Selector::tag("main")) {
                Some(main) => {
                    dom.scroll_into_view(&main);
                    info!("Scrolled to main content");
                }
                None => warn!("No <main> element to scroll to"),
            }
        });
        let ids = self
            .dom
            .select(root, &Selector::class("jumbotron"))
            .find(&Selector::class("btn"))
            .on(EventKind::Click, &listener);
        self.listeners.extend(ids);
    }

    fn load_theme_preference(&self) {
        let Some(body) = self.dom.body() else {
            return;
        };
        if self.store.get::<Theme>(THEME_KEY) == Some(Theme::Dark) {
            Theme::Dark.apply(&self.dom, &body);
            info!("Loaded dark theme preference");
        }
    }

    fn create_theme_toggle(&mut self) {
        let Some(body) = self.dom.body() else {
            warn!("No <body>; theme toggle not added");
            return;
        };
        let button = Element::new("button")
            .attr("type", "button")
            .class("btn")
            .class("btn-outline")
            .class(THEME_TOGGLE_CLASS)
            .attr("style", THEME_TOGGLE_STYLE)
            .text("Toggle Theme");
        let Some(node) = self.dom.append(&body, &button.into()) else {
            return;
        };

        let dom = self.dom.clone();
        let store = Rc::clone(&self.store);
        let listener: crate::dom::Listener<D::Node> = Rc::new(move |_: &DomEvent<D::Node>| {
            toggle_theme(&dom, &store);
        });
        self.listeners
            .extend(Selection::one(self.dom.clone(), node.clone()).on(EventKind::Click, &listener));
        self.theme_button = Some(node);
        info!("Theme toggle button added");
    }

    /// Switch between light and dark, persisting the choice.
    pub fn toggle_theme(&self) -> Result<Theme> {
        self.ensure_alive()?;
        toggle_theme(&self.dom, &self.store).ok_or_else(|| Error::ElementNotFound("body".into()))
    }

    /// Theme currently shown by the page.
    pub fn theme(&self) -> Result<Theme> {
        self.ensure_alive()?;
        let body = self
            .dom
            .body()
            .ok_or_else(|| Error::ElementNotFound("body".into()))?;
        Ok(Theme::current(&self.dom, &body))
    }

    /// The navigation bar.
    pub fn navbar(&self) -> Result<&NavBar<D>> {
        self.ensure_alive()?;
        Ok(&self.navbar)
    }

    /// The preference store.
    pub fn store(&self) -> Result<&PreferenceStore<S>> {
        self.ensure_alive()?;
        Ok(&self.store)
    }

    /// Result of the icon scan run during initialization.
    #[must_use]
    pub const fn icon_summary(&self) -> &ScanSummary {
        &self.icons
    }

    /// Tear down the navigation bar and every listener added here.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.destroyed = true;
        if let Err(e) = self.navbar.destroy() {
            debug!(error = %e, "Navigation bar was already destroyed");
        }
        for id in self.listeners.drain(..) {
            self.dom.remove_listener(id);
        }
        if let Some(button) = self.theme_button.take() {
            self.dom.remove(&button);
        }
        info!("Page controller destroyed");
        Ok(())
    }

    /// Whether [`PageController::destroy`] has been called.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    const fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(Error::State)
        } else {
            Ok(())
        }
    }
}

impl<D: Dom, S: StorageMedium> std::fmt::Debug for PageController<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("listeners", &self.listeners.len())
            .field("icons", &self.icons)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

/// Flip the body theme class and persist the new theme.
fn toggle_theme<D: Dom, S: StorageMedium>(dom: &D, store: &PreferenceStore<S>) -> Option<Theme> {
    let body = dom.body()?;
    let next = if dom.has_class(&body, Theme::Light.class_name()) {
        Theme::Dark
    } else {
        Theme::Light
    };
    next.apply(dom, &body);
    if !store.set(THEME_KEY, &next) {
        warn!(theme = %next, "Theme switched but not persisted");
    }
    info!(theme = %next, "Switched theme");
    Some(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDom, NodeId};
    use crate::icons::IconSet;
    use crate::markup::Markup;
    use crate::storage::memory::MemoryStorage;

    fn page_markup() -> Vec<Markup> {
        let card = |n: u32| {
            Element::new("div")
                .class("step-card")
                .attr("id", format!("step-{n}"))
                .child(Element::new("div").class("step-icon"))
        };
        vec![
            Element::new("header")
                .child(Element::new("div").attr("id", "main-nav"))
                .into(),
            Element::new("section")
                .class("jumbotron")
                .child(
                    Element::new("a")
                        .class("btn")
                        .class("btn-primary")
                        .attr("href", "#start")
                        .text("Get started"),
                )
                .into(),
            Element::new("main")
                .child(card(1))
                .child(card(2))
                .child(card(3))
                .into(),
        ]
    }

    fn setup(
        config: PageConfig,
    ) -> (MemoryDom, MemoryStorage, PageController<MemoryDom, MemoryStorage>) {
        let dom = MemoryDom::with_body(1024, &page_markup());
        let body = dom.body().unwrap();
        dom.add_class(&body, "dm-theme-light");
        let storage = MemoryStorage::new();
        let controller = PageController::initialize(
            dom.clone(),
            storage.clone(),
            IconSet::builtin(),
            &dom.root(),
            config,
        )
        .unwrap();
        (dom, storage, controller)
    }

    fn by_id(dom: &MemoryDom, id: &str) -> NodeId {
        dom.find(&Selector::id(id)).unwrap()
    }

    #[test]
    fn test_initialize_renders_navbar_and_step_icons() {
        let (dom, _, controller) = setup(PageConfig::default());
        let nav = by_id(&dom, "main-nav");
        assert!(dom.inner_html(nav).starts_with("<nav class=\"navbar navbar-dark\""));

        let icon = dom.query(&by_id(&dom, "step-2"), &Selector::class("step-icon")).unwrap();
        assert_eq!(dom.attr(&icon, ATTR_ICON).as_deref(), Some("edit"));
        assert_eq!(dom.attr(&icon, ATTR_ICON_SIZE).as_deref(), Some("48"));
        assert!(dom.inner_html(icon).contains(r#"width="48""#));
        assert_eq!(controller.icon_summary().rendered, 3);
        assert!(controller.icon_summary().is_clean());
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let dom = MemoryDom::new(1024);
        let err = PageController::initialize(
            dom.clone(),
            MemoryStorage::new(),
            IconSet::builtin(),
            &dom.root(),
            PageConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(ref s) if s == "#main-nav"));
        assert_eq!(dom.listener_count(), 0);
    }

    #[test]
    fn test_primary_button_pulses() {
        let (dom, _, _controller) = setup(PageConfig::default());
        let button = dom.find(&Selector::class("btn-primary")).unwrap();
        dom.click(button);
        assert!(dom.has_class(&button, "active"));
        let fades: Vec<_> = dom.fades().iter().map(|f| (f.node, f.fade, f.duration)).collect();
        assert_eq!(
            fades,
            vec![
                (button, crate::dom::Fade::Out, PULSE_DURATION),
                (button, crate::dom::Fade::In, PULSE_DURATION)
            ]
        );
    }

    #[test]
    fn test_cta_scrolls_to_main() {
        let (dom, _, _controller) = setup(PageConfig::default());
        let button = dom.find(&Selector::class("btn")).unwrap();
        assert!(dom.click(button));
        let main = dom.find(&Selector::tag("main")).unwrap();
        assert_eq!(dom.scrolled(), vec![main]);
    }

    #[test]
    fn test_saved_dark_theme_is_restored() {
        let dom = MemoryDom::with_body(1024, &page_markup());
        let body = dom.body().unwrap();
        dom.add_class(&body, "dm-theme-light");
        let storage = MemoryStorage::new();
        storage.set_item("kickstart:theme", "\"dark\"").unwrap();

        let controller = PageController::initialize(
            dom.clone(),
            storage,
            IconSet::builtin(),
            &dom.root(),
            PageConfig::default(),
        )
        .unwrap();
        assert_eq!(controller.theme().unwrap(), Theme::Dark);
        assert!(!dom.has_class(&body, "dm-theme-light"));
    }

    #[test]
    fn test_corrupt_theme_keeps_default() {
        let dom = MemoryDom::with_body(1024, &page_markup());
        let body = dom.body().unwrap();
        dom.add_class(&body, "dm-theme-light");
        let storage = MemoryStorage::new();
        storage.set_item("kickstart:theme", "dark").unwrap();

        let controller = PageController::initialize(
            dom.clone(),
            storage,
            IconSet::builtin(),
            &dom.root(),
            PageConfig::default(),
        )
        .unwrap();
        assert_eq!(controller.theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_without_light_class_switches_to_light() {
        let dom = MemoryDom::with_body(1024, &page_markup());
        let body = dom.body().unwrap();
        let storage = MemoryStorage::new();
        let controller = PageController::initialize(
            dom.clone(),
            storage.clone(),
            IconSet::builtin(),
            &dom.root(),
            PageConfig::default(),
        )
        .unwrap();

        assert_eq!(controller.toggle_theme().unwrap(), Theme::Light);
        assert!(dom.has_class(&body, "dm-theme-light"));
        assert!(!dom.has_class(&body, "dm-theme-dark"));
        assert_eq!(
            storage.get_item("kickstart:theme").unwrap().as_deref(),
            Some("\"light\"")
        );

        assert_eq!(controller.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_theme_toggle_button_persists() {
        let (dom, storage, mut controller) = setup(PageConfig::default().with_theme_toggle(true));
        let button = dom.find(&Selector::class(THEME_TOGGLE_CLASS)).unwrap();
        assert_eq!(dom.text(&button), "Toggle Theme");

        dom.click(button);
        assert_eq!(controller.theme().unwrap(), Theme::Dark);
        assert_eq!(
            storage.get_item("kickstart:theme").unwrap().as_deref(),
            Some("\"dark\"")
        );

        assert_eq!(controller.toggle_theme().unwrap(), Theme::Light);

        controller.destroy().unwrap();
        assert!(!dom.is_alive(button));
    }

    #[test]
    fn test_destroy_removes_everything() {
        let (dom, _, mut controller) = setup(PageConfig::default().with_theme_toggle(true));
        assert!(dom.listener_count() > 4);
        controller.destroy().unwrap();
        assert_eq!(dom.listener_count(), 0);
        assert!(controller.is_destroyed());
        assert!(controller.toggle_theme().unwrap_err().is_state());
        assert!(controller.navbar().unwrap_err().is_state());
        assert!(controller.destroy().unwrap_err().is_state());

        let button = dom.find(&Selector::class("btn-primary")).unwrap();
        dom.click(button);
        assert!(dom.fades().is_empty());
    }
}

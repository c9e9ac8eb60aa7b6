//! Integration tests for Kickstart core workflows.
//!
//! These tests drive the public API end to end against the in-memory
//! document and storage:
//! - Navigation bar lifecycle through simulated user events
//! - Icon scanning across a full page
//! - Preference persistence across controller instances

#![allow(clippy::unwrap_used, clippy::expect_used)]

use kickstart_core::dom::memory::{MemoryDom, NodeId};
use kickstart_core::storage::memory::MemoryStorage;
use kickstart_core::{
    Brand, ConfigError, Dom, Element, Error, IconOutcome, IconScanner, IconSet, Markup, MenuItem,
    NavBar, NavBarConfig, PageConfig, PageController, PreferenceStore, Presentation, Selector,
    StorageMedium, Theme, Variant, run_examples,
};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn nav_page(width: u32) -> (MemoryDom, NodeId) {
    let dom = MemoryDom::with_body(width, &[Element::new("div").attr("id", "main-nav").into()]);
    let container = dom.find(&Selector::id("main-nav")).expect("container");
    (dom, container)
}

fn kickstart_page() -> Vec<Markup> {
    let card = |n: u32| {
        Element::new("div")
            .class("step-card")
            .child(Element::new("div").class("step-icon"))
            .child(Element::new("h3").text(format!("Step {n}")))
    };
    vec![
        Element::new("header")
            .child(Element::new("div").attr("id", "main-nav"))
            .into(),
        Element::new("section")
            .class("jumbotron")
            .child(Element::new("a").class("btn").class("btn-primary").text("Start"))
            .into(),
        Element::new("main")
            .child(card(1))
            .child(card(2))
            .child(card(3))
            .child(Element::new("span").attr("data-icon", "nonexistent-icon"))
            .into(),
    ]
}

/// The dark-variant scenario: resize below the breakpoint, open "B", follow "B1".
#[test]
fn test_dark_navbar_scenario() {
    let (dom, container) = nav_page(1024);
    let config = NavBarConfig::new(
        Brand::new("X", "/"),
        vec![
            MenuItem::link("A", "/a").active(),
            MenuItem::dropdown("B", vec![MenuItem::link("B1", "/b1")]),
        ],
    )
    .with_variant(Variant::Dark)
    .with_collapse_at(768);

    let nav = NavBar::create(dom.clone(), container, config).expect("valid config");
    assert_eq!(nav.state().unwrap().presentation(), Presentation::Expanded);
    assert_eq!(nav.state().unwrap().active_item, Some(0));

    dom.resize(500);
    assert_eq!(nav.state().unwrap().presentation(), Presentation::Collapsed);
    let html = dom.inner_html(container);
    assert!(html.contains("navbar-collapsed"));

    let trigger = dom.find(&Selector::attr("data-nav-dropdown")).unwrap();
    dom.click(trigger);
    assert_eq!(nav.state().unwrap().open_dropdown, Some(1));

    let child = dom.find(&Selector::attr("data-nav-child")).unwrap();
    assert_eq!(dom.text(&child), "B1");
    dom.click(child);

    assert_eq!(dom.navigations(), vec!["/b1".to_string()]);
    assert_eq!(nav.state().unwrap().open_dropdown, None);
    assert_eq!(nav.state().unwrap().active_item, Some(0));
}

/// Every configuration with at most one active item creates with exactly that item active.
#[test]
fn test_active_item_matches_configuration() {
    for active in [None, Some(0), Some(1), Some(2)] {
        let (dom, container) = nav_page(1024);
        let items = (0..3)
            .map(|i| {
                let item = MenuItem::link(format!("Item {i}"), format!("/{i}"));
                if active == Some(i) {
                    item.active()
                } else {
                    item
                }
            })
            .collect();
        let config = NavBarConfig::new(Brand::new("X", "/"), items);
        let nav = NavBar::create(dom.clone(), container, config).expect("valid config");
        assert_eq!(nav.state().unwrap().active_item, active);
        let marked = dom.query_all(&container, &Selector::class("active")).len();
        assert_eq!(marked, usize::from(active.is_some()));
    }
}

#[test]
fn test_two_active_items_fail_construction() {
    let (dom, container) = nav_page(1024);
    let config = NavBarConfig::new(
        Brand::new("X", "/"),
        vec![MenuItem::link("A", "/a").active(), MenuItem::link("B", "/b").active()],
    );
    let err = NavBar::create(dom, container, config).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::MultipleActive { count: 2 })));
}

#[test]
fn test_destroyed_navbar_rejects_everything() {
    let (dom, container) = nav_page(1024);
    let nav = NavBar::create(
        dom.clone(),
        container,
        NavBarConfig::new(Brand::new("X", "/"), vec![MenuItem::link("A", "/a")]),
    )
    .unwrap();
    nav.destroy().unwrap();

    assert!(nav.set_active(0).unwrap_err().is_state());
    assert!(nav.toggle_collapse().unwrap_err().is_state());
    assert!(nav.open_dropdown(0).unwrap_err().is_state());
    assert!(nav.close_dropdown().unwrap_err().is_state());
    assert!(nav.destroy().unwrap_err().is_state());
    assert_eq!(dom.listener_count(), 0);
    assert_eq!(dom.inner_html(container), "");
}

#[test]
fn test_scan_with_valid_and_unknown_marker() {
    let dom = MemoryDom::with_body(
        1024,
        &[
            Element::new("i").attr("data-icon", "home").into(),
            Element::new("i").attr("data-icon", "nonexistent-icon").into(),
        ],
    );
    let scanner = IconScanner::new(IconSet::builtin());
    let outcomes: Vec<_> = scanner.scan(&dom, &dom.root()).collect();

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(&outcomes[0], IconOutcome::Rendered { name, .. } if name == "home"));
    assert!(matches!(
        &outcomes[1],
        IconOutcome::Missing { name, .. } if name == "nonexistent-icon"
    ));

    let unknown = outcomes[1].node();
    assert_eq!(dom.inner_html(*unknown), "");
    assert_eq!(dom.attr(unknown, "data-icon-rendered"), None);
}

#[test]
fn test_preferences_round_trip_and_defaults() {
    let store = PreferenceStore::new(MemoryStorage::new(), "kickstart");
    let value = json!({"layout": {"columns": [1, 2, 3], "dense": false}, "name": "x"});
    assert!(store.set("nested", &value));
    assert_eq!(store.get_value("nested"), Some(value));

    assert!(!store.has("absent"));
    assert_eq!(store.get_or("absent", 42), 42);
}

#[test]
fn test_full_page_initialization() {
    init_tracing();
    let dom = MemoryDom::with_body(1024, &kickstart_page());
    let root = dom.root();
    let controller = PageController::initialize(
        dom.clone(),
        MemoryStorage::new(),
        IconSet::builtin(),
        &root,
        PageConfig::default(),
    )
    .expect("page initializes");

    let summary = controller.icon_summary();
    assert_eq!(summary.rendered, 3);
    assert_eq!(summary.missing, vec!["nonexistent-icon".to_string()]);

    let svgs = dom.query_all(&root, &Selector::tag("svg"));
    assert_eq!(svgs.len(), 3);
    for svg in svgs {
        assert_eq!(dom.attr(&svg, "width").as_deref(), Some("48"));
    }

    let navbar = controller.navbar().unwrap();
    assert_eq!(navbar.config().unwrap().items.len(), 4);
    assert_eq!(navbar.state().unwrap().active_item, Some(0));
}

#[test]
fn test_theme_survives_reload() {
    let storage = MemoryStorage::new();

    let dom = MemoryDom::with_body(1024, &kickstart_page());
    dom.add_class(&dom.body().unwrap(), Theme::Light.class_name());
    let mut first = PageController::initialize(
        dom.clone(),
        storage.clone(),
        IconSet::builtin(),
        &dom.root(),
        PageConfig::default().with_theme_toggle(true),
    )
    .unwrap();
    let toggle = dom.find(&Selector::class("theme-toggle")).unwrap();
    dom.click(toggle);
    assert_eq!(first.theme().unwrap(), Theme::Dark);
    first.destroy().unwrap();

    let reloaded = MemoryDom::with_body(1024, &kickstart_page());
    let body = reloaded.body().unwrap();
    reloaded.add_class(&body, Theme::Light.class_name());
    let second = PageController::initialize(
        reloaded.clone(),
        storage.clone(),
        IconSet::builtin(),
        &reloaded.root(),
        PageConfig::default(),
    )
    .unwrap();
    assert_eq!(second.theme().unwrap(), Theme::Dark);
    assert!(reloaded.has_class(&body, "dm-theme-dark"));
    assert_eq!(storage.get_item("kickstart:theme").unwrap().as_deref(), Some("\"dark\""));
}

#[test]
fn test_demo_walkthrough_on_page() {
    init_tracing();
    let dom = MemoryDom::with_body(1024, &kickstart_page());
    let store = PreferenceStore::new(MemoryStorage::new(), "kickstart");
    store.set("theme", &Theme::Light);

    let now = chrono::DateTime::parse_from_rfc3339("2025-01-09T08:30:00+02:00").unwrap();
    let report = run_examples(&dom, &store, &dom.root(), &now);

    assert_eq!(report.step_cards, 3);
    assert_eq!(report.keys, vec!["theme".to_string(), "user-preferences".to_string()]);
    assert_eq!(report.now, "January 9, 2025 at 8:30 AM");
    assert_eq!(report.iso, "2025-01-09T08:30:00+02:00");
    assert_eq!(report.next_week, "Jan 16, 2025");
    assert_eq!(report.yesterday, "a day ago");
}

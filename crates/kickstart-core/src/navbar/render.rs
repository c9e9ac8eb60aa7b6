//! Markup for the navigation bar.
//!
//! [`render`] is a pure function of configuration and state. The `data-nav-*`
//! attributes are how delegated click handling finds out what was clicked.

use super::config::{MenuItem, NavBarConfig};
use super::state::NavBarState;
use crate::markup::Element;

/// Attribute on the hamburger button.
pub const ATTR_TOGGLE: &str = "data-nav-toggle";
/// Attribute on dropdown triggers; value is the top-level index.
pub const ATTR_DROPDOWN: &str = "data-nav-dropdown";
/// Attribute on leaf links; value is the top-level index.
pub const ATTR_ITEM: &str = "data-nav-item";
/// Attribute on dropdown links; value is the child index.
pub const ATTR_CHILD: &str = "data-nav-child";
/// Class on the `li` wrapping a dropdown trigger and its menu.
pub const CLASS_DROPDOWN: &str = "navbar-dropdown";

/// Render the whole bar.
#[must_use]
pub fn render(config: &NavBarConfig, state: &NavBarState) -> Element {
    let mut nav = Element::new("nav")
        .class("navbar")
        .class(config.variant.class_name())
        .class_if(state.collapsed, "navbar-collapsed")
        .attr("data-variant", config.variant.to_string())
        .attr("aria-label", "Main navigation")
        .child(render_brand(config));

    if config.collapsible {
        nav = nav.child(render_toggle(state));
    }

    let menu = Element::new("ul")
        .class("navbar-menu")
        .attr("id", "navbar-menu")
        .children(
            config
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| render_item(index, item, state)),
        );

    nav.child(menu)
}

fn render_brand(config: &NavBarConfig) -> Element {
    let brand = &config.brand;
    let mut link = Element::new("a")
        .class("navbar-brand")
        .attr("href", brand.url.as_str());
    if let Some(logo) = &brand.logo {
        link = link.child(
            Element::new("img")
                .class("navbar-logo")
                .attr("src", logo.as_str())
                .attr("alt", ""),
        );
    }
    link.child(
        Element::new("span")
            .class("navbar-brand-text")
            .text(brand.text.as_str()),
    )
}

fn render_toggle(state: &NavBarState) -> Element {
    let bar = || {
        Element::new("span")
            .class("navbar-toggle-bar")
            .attr("aria-hidden", "true")
    };
    Element::new("button")
        .attr("type", "button")
        .class("navbar-toggle")
        .attr(ATTR_TOGGLE, "")
        .attr("aria-controls", "navbar-menu")
        .attr("aria-expanded", (!state.collapsed).to_string())
        .attr("aria-label", "Toggle navigation")
        .child(bar())
        .child(bar())
        .child(bar())
}

fn render_item(index: usize, item: &MenuItem, state: &NavBarState) -> Element {
    let active = state.active_item == Some(index);
    let li = Element::new("li")
        .class("navbar-item")
        .class_if(active, "active");

    if item.is_dropdown() {
        let open = state.is_open(index);
        let trigger = Element::new("button")
            .attr("type", "button")
            .class("navbar-link")
            .class("navbar-dropdown-toggle")
            .attr(ATTR_DROPDOWN, index.to_string())
            .attr("aria-haspopup", "true")
            .attr("aria-expanded", open.to_string())
            .text(item.text.as_str());
        let mut list = Element::new("ul").class("navbar-dropdown-menu");
        if !open {
            list = list.attr("hidden", "");
        }
        let list = list.children(item.items.iter().enumerate().map(|(child, entry)| {
            Element::new("li").child(
                Element::new("a")
                    .class("navbar-dropdown-item")
                    .attr("href", entry.url.as_deref().unwrap_or("#"))
                    .attr(ATTR_ITEM, index.to_string())
                    .attr(ATTR_CHILD, child.to_string())
                    .text(entry.text.as_str()),
            )
        }));
        li.class(CLASS_DROPDOWN)
            .class_if(open, "open")
            .child(trigger)
            .child(list)
    } else {
        let mut link = Element::new("a")
            .class("navbar-link")
            .attr("href", item.href().unwrap_or("#"))
            .attr(ATTR_ITEM, index.to_string());
        if active {
            link = link.attr("aria-current", "page");
        }
        li.child(link.text(item.text.as_str()))
    }
}

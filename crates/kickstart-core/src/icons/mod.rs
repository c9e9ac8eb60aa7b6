//! Vector icons and the registry the scanner resolves names against.

pub mod scanner;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::markup::Element;

pub use scanner::{DEFAULT_ICON_SIZE, IconOutcome, IconScanner, Scan, ScanSummary};

/// Marker attribute naming the requested icon.
pub const ATTR_ICON: &str = "data-icon";
/// Optional marker attribute with the pixel size.
pub const ATTR_ICON_SIZE: &str = "data-icon-size";
/// Set on a marker once its icon has been rendered.
pub const ATTR_ICON_RENDERED: &str = "data-icon-rendered";

/// Stroke artwork for one icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IconDef {
    /// SVG `viewBox`.
    #[serde(default = "default_view_box")]
    pub view_box: String,
    /// Path data, one entry per `<path d="...">`.
    pub paths: Vec<String>,
}

fn default_view_box() -> String {
    "0 0 24 24".to_string()
}

impl IconDef {
    /// An icon on the standard 24x24 grid.
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            view_box: default_view_box(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Render as an inline `<svg>` of `size` pixels.
    #[must_use]
    pub fn render(&self, name: &str, size: u32) -> Element {
        let size = size.to_string();
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .class("icon")
            .class(&format!("icon-{name}"))
            .attr("width", size.as_str())
            .attr("height", size)
            .attr("viewBox", self.view_box.as_str())
            .attr("fill", "none")
            .attr("stroke", "currentColor")
            .attr("stroke-width", "2")
            .attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round")
            .attr("aria-hidden", "true")
            .children(
                self.paths
                    .iter()
                    .map(|d| Element::new("path").attr("d", d.as_str())),
            )
    }
}

/// Name to artwork lookup. Lookups must be pure.
pub trait IconRegistry {
    /// Artwork for `name`, if registered.
    fn lookup(&self, name: &str) -> Option<&IconDef>;
}

/// A mutable icon set.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<String, IconDef>,
}

impl IconSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The icons used by the kickstart page.
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.register(
            "document",
            IconDef::new([
                "M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z",
                "M14 2v6h6",
                "M16 13H8",
                "M16 17H8",
                "M10 9H8",
            ]),
        );
        set.register(
            "edit",
            IconDef::new([
                "M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7",
                "M18.5 2.5a2.121 2.121 0 0 1 3 3L12 15l-4 1 1-4 9.5-9.5z",
            ]),
        );
        set.register("zap", IconDef::new(["M13 2L3 14h9l-1 8 10-12h-9l1-8z"]));
        set.register(
            "home",
            IconDef::new([
                "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z",
                "M9 22V12h6v10",
            ]),
        );
        set.register("menu", IconDef::new(["M3 12h18", "M3 6h18", "M3 18h18"]));
        set.register("x", IconDef::new(["M18 6L6 18", "M6 6l12 12"]));
        set.register("chevron-down", IconDef::new(["M6 9l6 6 6-6"]));
        set.register(
            "sun",
            IconDef::new([
                "M12 17a5 5 0 1 0 0-10 5 5 0 0 0 0 10z",
                "M12 1v2",
                "M12 21v2",
                "M4.22 4.22l1.42 1.42",
                "M18.36 18.36l1.42 1.42",
                "M1 12h2",
                "M21 12h2",
                "M4.22 19.78l1.42-1.42",
                "M18.36 5.64l1.42-1.42",
            ]),
        );
        set.register(
            "moon",
            IconDef::new(["M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"]),
        );
        set.register(
            "external-link",
            IconDef::new([
                "M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6",
                "M15 3h6v6",
                "M10 14L21 3",
            ]),
        );
        set
    }

    /// Add or replace an icon.
    pub fn register(&mut self, name: impl Into<String>, icon: IconDef) -> &mut Self {
        self.icons.insert(name.into(), icon);
        self
    }

    /// Number of registered icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether no icon is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl IconRegistry for IconSet {
    fn lookup(&self, name: &str) -> Option<&IconDef> {
        self.icons.get(name)
    }
}

impl<T: IconRegistry + ?Sized> IconRegistry for std::rc::Rc<T> {
    fn lookup(&self, name: &str) -> Option<&IconDef> {
        (**self).lookup(name)
    }
}

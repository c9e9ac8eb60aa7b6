//! Page colour theme.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dom::Dom;

/// Preference key the theme is persisted under.
pub const THEME_KEY: &str = "theme";

/// Colour theme applied through a class on `<body>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Body class for this theme.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Light => "dm-theme-light",
            Self::Dark => "dm-theme-dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme currently shown by `body`. Anything but the dark class reads as light.
    pub fn current<D: Dom>(dom: &D, body: &D::Node) -> Self {
        if dom.has_class(body, Self::Dark.class_name()) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Swap the body classes so only this theme's class remains.
    pub fn apply<D: Dom>(self, dom: &D, body: &D::Node) {
        dom.remove_class(body, self.toggled().class_name());
        dom.add_class(body, self.class_name());
        info!(theme = %self, "Theme applied");
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

//! Declarative navigation bar configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default collapse breakpoint in CSS pixels.
pub const DEFAULT_COLLAPSE_AT: u32 = 768;

/// Colour variant of the bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
    /// No background; inherits from the page.
    Transparent,
}

impl Variant {
    /// CSS class applied to the bar.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Light => "navbar-light",
            Self::Dark => "navbar-dark",
            Self::Transparent => "navbar-transparent",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
            Self::Transparent => write!(f, "transparent"),
        }
    }
}

/// Brand block shown at the start of the bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    /// Brand text.
    pub text: String,
    /// Optional logo image url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Link target for the brand.
    #[serde(default = "default_brand_url")]
    pub url: String,
}

fn default_brand_url() -> String {
    "/".to_string()
}

impl Brand {
    /// Create a brand with text and url.
    #[must_use]
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            logo: None,
            url: url.into(),
        }
    }

    /// Set the logo url.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

/// A menu entry. Entries with children are dropdown triggers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Label.
    pub text: String,
    /// Link target. Ignored for dropdown triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether the item starts active.
    #[serde(default)]
    pub active: bool,
    /// Dropdown children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    /// A navigable item.
    #[must_use]
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            active: false,
            items: Vec::new(),
        }
    }

    /// A dropdown trigger with children.
    #[must_use]
    pub fn dropdown(text: impl Into<String>, items: Vec<Self>) -> Self {
        Self {
            text: text.into(),
            url: None,
            active: false,
            items,
        }
    }

    /// Mark this item as initially active.
    #[must_use]
    pub const fn active(mut self) -> Self {
        self.active = true;
        self
    }

    /// Whether this item opens a dropdown instead of navigating.
    #[must_use]
    pub fn is_dropdown(&self) -> bool {
        !self.items.is_empty()
    }

    /// The url this item navigates to, if it is a leaf.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        if self.is_dropdown() {
            None
        } else {
            self.url.as_deref()
        }
    }
}

/// Immutable navigation bar configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavBarConfig {
    /// Brand block.
    pub brand: Brand,
    /// Top-level items.
    #[serde(default)]
    pub items: Vec<MenuItem>,
    /// Colour variant.
    #[serde(default)]
    pub variant: Variant,
    /// Whether the bar collapses into a hamburger menu.
    #[serde(default = "default_true")]
    pub collapsible: bool,
    /// Collapse breakpoint in CSS pixels.
    #[serde(default = "default_collapse_at")]
    pub collapse_at: u32,
}

const fn default_true() -> bool {
    true
}

const fn default_collapse_at() -> u32 {
    DEFAULT_COLLAPSE_AT
}

impl NavBarConfig {
    /// Create a configuration with default variant and breakpoint.
    #[must_use]
    pub fn new(brand: Brand, items: Vec<MenuItem>) -> Self {
        Self {
            brand,
            items,
            variant: Variant::default(),
            collapsible: true,
            collapse_at: DEFAULT_COLLAPSE_AT,
        }
    }

    /// Set the colour variant.
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable or disable collapsing.
    #[must_use]
    pub const fn with_collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Set the collapse breakpoint.
    #[must_use]
    pub const fn with_collapse_at(mut self, collapse_at: u32) -> Self {
        self.collapse_at = collapse_at;
        self
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Index of the item configured as active.
    #[must_use]
    pub fn initial_active(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }

    /// Check every structural rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collapse_at == 0 {
            return Err(ConfigError::InvalidBreakpoint);
        }
        if self.brand.text.trim().is_empty() {
            return Err(ConfigError::EmptyText("brand"));
        }

        let active = self.items.iter().filter(|item| item.active).count();
        if active > 1 {
            return Err(ConfigError::MultipleActive { count: active });
        }

        for item in &self.items {
            if item.text.trim().is_empty() {
                return Err(ConfigError::EmptyText("menu item"));
            }
            if !item.is_dropdown() && item.url.is_none() {
                return Err(ConfigError::MissingUrl(item.text.clone()));
            }
            for child in &item.items {
                if child.is_dropdown() {
                    return Err(ConfigError::NestedDropdown {
                        parent: item.text.clone(),
                        child: child.text.clone(),
                    });
                }
                if child.active {
                    return Err(ConfigError::ActiveChild(child.text.clone()));
                }
                if child.text.trim().is_empty() {
                    return Err(ConfigError::EmptyText("dropdown item"));
                }
                if child.url.is_none() {
                    return Err(ConfigError::MissingUrl(child.text.clone()));
                }
            }
        }
        Ok(())
    }
}

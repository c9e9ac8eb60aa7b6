//! Page configuration.
//!
//! Everything the page controller needs to wire the kickstart page, with
//! defaults matching the stock page so an empty JSON object is valid.

use serde::{Deserialize, Serialize};

use crate::dom::Selector;
use crate::error::{ConfigError, Result};
use crate::navbar::{Brand, MenuItem, NavBarConfig, Variant};

/// Pixel size of step card icons.
pub const STEP_ICON_SIZE: u32 = 48;

/// Default storage namespace.
pub const DEFAULT_NAMESPACE: &str = "kickstart";

/// One "getting started" step card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepCard {
    /// Step number shown to the user.
    pub number: u32,
    /// Icon name for the card's `.step-icon`.
    pub icon: String,
    /// Short label.
    pub description: String,
}

impl StepCard {
    /// Create a step card.
    #[must_use]
    pub fn new(number: u32, icon: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            number,
            icon: icon.into(),
            description: description.into(),
        }
    }
}

/// Configuration for the whole page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// Navigation bar.
    pub navbar: NavBarConfig,
    /// Simple selector for the navigation bar container.
    pub nav_selector: String,
    /// Step cards, matched to `.step-card` elements in document order.
    pub steps: Vec<StepCard>,
    /// Pixel size of step card icons.
    pub step_icon_size: u32,
    /// Storage namespace for preferences.
    pub namespace: String,
    /// Whether to add a floating theme toggle button.
    pub theme_toggle: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        let navbar = NavBarConfig::new(
            Brand::new("Kickstart", "./").with_logo("assets/logo/kickstart-icon.svg"),
            vec![
                MenuItem::link("Home", "/kickstart/").active(),
                MenuItem::link("Documentation", "/docs/"),
                MenuItem::link("Examples", "/examples/"),
                MenuItem::dropdown(
                    "More",
                    vec![
                        MenuItem::link("GitHub", "https://github.com/"),
                        MenuItem::link("NPM", "https://npmjs.com/"),
                        MenuItem::link("Download", "/download/"),
                    ],
                ),
            ],
        )
        .with_variant(Variant::Dark);

        Self {
            navbar,
            nav_selector: "#main-nav".to_string(),
            steps: vec![
                StepCard::new(1, "document", "Setup"),
                StepCard::new(2, "edit", "Development"),
                StepCard::new(3, "zap", "Deployment"),
            ],
            step_icon_size: STEP_ICON_SIZE,
            namespace: DEFAULT_NAMESPACE.to_string(),
            theme_toggle: false,
        }
    }
}

impl PageConfig {
    /// Parse from JSON, filling gaps with defaults, and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the navigation bar and page-level fields.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.navbar.validate()?;
        if Selector::parse(&self.nav_selector).is_none() {
            return Err(ConfigError::Parse(format!(
                "navSelector '{}' is not a simple selector",
                self.nav_selector
            )));
        }
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyText("storage namespace"));
        }
        Ok(())
    }

    /// Enable the floating theme toggle.
    #[must_use]
    pub const fn with_theme_toggle(mut self, enabled: bool) -> Self {
        self.theme_toggle = enabled;
        self
    }
}

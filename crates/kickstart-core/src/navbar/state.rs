//! Navigation bar state and its transition functions.
//!
//! Every transition takes the current state by value and returns the next
//! one. The widget swaps whole states, so a handler that re-enters the
//! widget never observes a half-applied change.

use super::config::NavBarConfig;

/// Presentation of the bar relative to the collapse breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Full horizontal menu.
    Expanded,
    /// Condensed hamburger menu.
    Collapsed,
}

/// Result of a hamburger toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The bar flipped to the given presentation.
    Changed(Presentation),
    /// The bar is not collapsible; nothing changed.
    Ignored,
}

/// Mutable state owned by one navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavBarState {
    /// Whether the condensed presentation is shown.
    pub collapsed: bool,
    /// Index of the open dropdown.
    pub open_dropdown: Option<usize>,
    /// Index of the active top-level item.
    pub active_item: Option<usize>,
    /// Last known viewport width.
    pub viewport_width: u32,
}

impl NavBarState {
    /// State at construction for the given viewport width.
    #[must_use]
    pub fn initial(config: &NavBarConfig, viewport_width: u32) -> Self {
        Self {
            collapsed: config.collapsible && viewport_width < config.collapse_at,
            open_dropdown: None,
            active_item: config.initial_active(),
            viewport_width,
        }
    }

    /// Current presentation.
    #[must_use]
    pub const fn presentation(&self) -> Presentation {
        if self.collapsed {
            Presentation::Collapsed
        } else {
            Presentation::Expanded
        }
    }

    /// Apply a viewport width change.
    ///
    /// Crossing the breakpoint resets `collapsed` to the width-derived value,
    /// discarding any manual toggle. Staying on the same side keeps it.
    #[must_use]
    pub const fn resized(self, config: &NavBarConfig, width: u32) -> Self {
        let was_below = self.viewport_width < config.collapse_at;
        let is_below = width < config.collapse_at;
        let collapsed = if config.collapsible && was_below != is_below {
            is_below
        } else {
            self.collapsed
        };
        Self {
            collapsed,
            viewport_width: width,
            ..self
        }
    }

    /// Flip the presentation. Returns `None` when the bar is not collapsible.
    #[must_use]
    pub const fn toggled(self, config: &NavBarConfig) -> Option<Self> {
        if !config.collapsible {
            return None;
        }
        Some(Self {
            collapsed: !self.collapsed,
            ..self
        })
    }

    /// Make `index` the active top-level item.
    #[must_use]
    pub const fn activated(self, index: usize) -> Self {
        Self {
            active_item: Some(index),
            ..self
        }
    }

    /// Open dropdown `index`, closing any other.
    #[must_use]
    pub const fn dropdown_opened(self, index: usize) -> Self {
        Self {
            open_dropdown: Some(index),
            ..self
        }
    }

    /// Close the open dropdown, if any.
    #[must_use]
    pub const fn dropdown_closed(self) -> Self {
        Self {
            open_dropdown: None,
            ..self
        }
    }

    /// Whether dropdown `index` is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open_dropdown == Some(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::navbar::config::{Brand, MenuItem};

    fn config(collapsible: bool) -> NavBarConfig {
        NavBarConfig::new(
            Brand::new("X", "/"),
            vec![
                MenuItem::link("A", "/a"),
                MenuItem::dropdown("B", vec![MenuItem::link("B1", "/b1")]),
                MenuItem::dropdown("C", vec![MenuItem::link("C1", "/c1")]),
            ],
        )
        .with_collapsible(collapsible)
    }

    #[test]
    fn test_initial_state_follows_width() {
        let cfg = config(true);
        assert!(NavBarState::initial(&cfg, 500).collapsed);
        assert!(!NavBarState::initial(&cfg, 1024).collapsed);
        assert!(!NavBarState::initial(&cfg, 768).collapsed);
    }

    #[test]
    fn test_non_collapsible_never_collapses() {
        let cfg = config(false);
        let state = NavBarState::initial(&cfg, 320);
        assert!(!state.collapsed);
        assert!(!state.resized(&cfg, 100).collapsed);
        assert_eq!(state.toggled(&cfg), None);
    }

    #[test]
    fn test_crossing_resets_manual_override() {
        let cfg = config(true);
        let state = NavBarState::initial(&cfg, 1024);
        let overridden = state.toggled(&cfg).unwrap();
        assert!(overridden.collapsed);

        // Same side of the breakpoint: override survives.
        let still = overridden.resized(&cfg, 900);
        assert!(still.collapsed);

        // Crossing downward then upward always lands on the width-derived value.
        let down = still.resized(&cfg, 500);
        assert!(down.collapsed);
        let up = down.resized(&cfg, 800);
        assert!(!up.collapsed);
        assert_eq!(up.viewport_width, 800);
    }

    #[test]
    fn test_width_sequences_match_breakpoint_after_crossing() {
        let cfg = config(true);
        let widths = [1200, 700, 760, 768, 1000, 300, 767, 769];
        let mut state = NavBarState::initial(&cfg, 1024);
        let mut below = false;
        for width in widths {
            let now_below = width < cfg.collapse_at;
            state = state.resized(&cfg, width);
            if now_below != below {
                assert_eq!(state.collapsed, now_below, "after resize to {width}");
            }
            below = now_below;
        }
    }

    #[test]
    fn test_dropdowns_are_exclusive() {
        let cfg = config(true);
        let state = NavBarState::initial(&cfg, 1024)
            .dropdown_opened(1)
            .dropdown_opened(2);
        assert!(state.is_open(2));
        assert!(!state.is_open(1));
        assert_eq!(state.dropdown_closed().open_dropdown, None);
    }

    #[test]
    fn test_presentation() {
        let cfg = config(true);
        let state = NavBarState::initial(&cfg, 400);
        assert_eq!(state.presentation(), Presentation::Collapsed);
        assert_eq!(
            state.toggled(&cfg).map(|s| s.presentation()),
            Some(Presentation::Expanded)
        );
    }
}

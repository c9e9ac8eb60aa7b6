//! Theme configuration for Kickstart.
//!
//! The body carries `dm-theme-light` or `dm-theme-dark`; each class sets
//! the same custom properties from its own palette, so switching themes is
//! a class swap.

use kickstart_core::Theme;

/// Colors one theme assigns to the shared custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background.
    pub background: &'static str,
    /// Cards and the navigation bar.
    pub surface: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Secondary text.
    pub text_muted: &'static str,
    /// Buttons, links and active items.
    pub accent: &'static str,
    /// Accent on hover.
    pub accent_hover: &'static str,
    /// Hairlines between sections.
    pub border: &'static str,
}

/// Light palette.
pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    surface: "#f4f4f5",
    text: "#18181b",
    text_muted: "#52525b",
    accent: "#7c3aed",
    accent_hover: "#6d28d9",
    border: "rgba(0, 0, 0, 0.08)",
};

/// Dark palette.
pub const DARK: Palette = Palette {
    background: "#09090b",
    surface: "#1c1c21",
    text: "#fafafa",
    text_muted: "#a1a1aa",
    accent: "#a78bfa",
    accent_hover: "#c4b5fd",
    border: "rgba(255, 255, 255, 0.08)",
};

/// Typography configuration.
pub mod typography {
    /// Body font stack.
    pub const FONT_FAMILY: &str =
        "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
    /// Base font size.
    pub const BASE: &str = "1rem";
}

/// Spacing and radius values.
pub mod spacing {
    /// Small spacing.
    pub const SM: &str = "0.5rem";
    /// Medium spacing.
    pub const MD: &str = "1rem";
    /// Large spacing.
    pub const LG: &str = "2rem";
    /// Card radius.
    pub const RADIUS: &str = "0.625rem";
}

/// Animation/transition configuration.
pub mod animation {
    /// Theme and hover transitions.
    pub const NORMAL: &str = "0.2s cubic-bezier(0.4, 0, 0.2, 1)";
}

/// The palette for `theme`.
#[must_use]
pub const fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

fn palette_block(theme: Theme) -> String {
    let p = palette(theme);
    format!(
        "body.{class} {{
  --bg: {bg};
  --surface: {surface};
  --text: {text};
  --text-muted: {muted};
  --accent: {accent};
  --accent-hover: {hover};
  --border: {border};
}}",
        class = theme.class_name(),
        bg = p.background,
        surface = p.surface,
        text = p.text,
        muted = p.text_muted,
        accent = p.accent,
        hover = p.accent_hover,
        border = p.border,
    )
}

/// Generate CSS custom properties for both themes.
///
/// `:root` carries the light palette so the page renders before a theme
/// class is applied.
pub fn generate_css_variables() -> String {
    let root = palette_block(Theme::Light).replacen(
        &format!("body.{}", Theme::Light.class_name()),
        ":root",
        1,
    );
    format!(
        "{root}
:root {{
  --font-family: {font};
  --font-size-base: {base};
  --spacing-sm: {sm};
  --spacing-md: {md};
  --spacing-lg: {lg};
  --radius: {radius};
  --transition-normal: {transition};
}}
{light}
{dark}",
        font = typography::FONT_FAMILY,
        base = typography::BASE,
        sm = spacing::SM,
        md = spacing::MD,
        lg = spacing::LG,
        radius = spacing::RADIUS,
        transition = animation::NORMAL,
        light = palette_block(Theme::Light),
        dark = palette_block(Theme::Dark),
    )
}

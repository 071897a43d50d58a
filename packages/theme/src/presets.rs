//! Built-in base themes.
//!
//! - classic (default)
//! - midnight
//! - sunset

use crate::tokens::{Theme, ThemeTokens};

/// Id of the theme used when a page does not pick one
pub const DEFAULT_THEME_ID: &str = "classic";

/// Classic - light, neutral storefront theme
pub fn classic() -> Theme {
    Theme {
        id: "classic".to_string(),
        name: "Classic".to_string(),
        tokens: ThemeTokens::default()
            .with_color("primary", "#1f4fd6")
            .with_color("secondary", "#5c6b82")
            .with_color("accent", "#f2a900")
            .with_color("background", "#ffffff")
            .with_color("surface", "#f5f7fa")
            .with_color("text", "#1b1f24")
            .with_color("muted", "#6b7380")
            .with_fonts("Georgia, serif", "Inter, sans-serif")
            .with_spacing("sm", "8px")
            .with_spacing("md", "16px")
            .with_spacing("lg", "32px")
            .with_radius("sm", "4px")
            .with_radius("md", "8px")
            .with_shadow("card", "0 1px 3px rgba(0, 0, 0, 0.12)"),
    }
}

/// Midnight - dark theme with high-contrast accents
pub fn midnight() -> Theme {
    Theme {
        id: "midnight".to_string(),
        name: "Midnight".to_string(),
        tokens: ThemeTokens::default()
            .with_color("primary", "#7aa2ff")
            .with_color("secondary", "#a1a9c4")
            .with_color("accent", "#ff7ab8")
            .with_color("background", "#0e1117")
            .with_color("surface", "#171b24")
            .with_color("text", "#e6e9f0")
            .with_color("muted", "#8a93a6")
            .with_fonts("\"Space Grotesk\", sans-serif", "Inter, sans-serif")
            .with_spacing("sm", "8px")
            .with_spacing("md", "20px")
            .with_spacing("lg", "40px")
            .with_radius("sm", "6px")
            .with_radius("md", "12px")
            .with_shadow("card", "0 2px 12px rgba(0, 0, 0, 0.5)"),
    }
}

/// Sunset - warm editorial theme, no shadows
pub fn sunset() -> Theme {
    Theme {
        id: "sunset".to_string(),
        name: "Sunset".to_string(),
        tokens: ThemeTokens::default()
            .with_color("primary", "#d9480f")
            .with_color("secondary", "#862e9c")
            .with_color("accent", "#fab005")
            .with_color("background", "#fff8f0")
            .with_color("surface", "#fff0e0")
            .with_color("text", "#2b1d16")
            .with_color("muted", "#8c6e5d")
            .with_fonts("\"Playfair Display\", serif", "\"Source Sans 3\", sans-serif")
            .with_spacing("sm", "6px")
            .with_spacing("md", "14px")
            .with_spacing("lg", "28px")
            .with_radius("sm", "2px")
            .with_radius("md", "4px"),
    }
}

/// All presets, default first
pub fn all() -> Vec<Theme> {
    vec![classic(), midnight(), sunset()]
}

//! # Pagecraft Theme
//!
//! Site-wide design tokens and the page-level override cascade.
//!
//! ```text
//! base theme tokens ──┐
//!                     ├── resolve() ──→ EffectiveTokens ──→ renderer
//! page overrides ─────┘
//! ```
//!
//! The base theme is never mutated: overrides are a sparse top layer and
//! resolution is a pure function of both inputs.
//!
//! ```rust
//! use pagecraft_theme::{presets, resolve, ThemeOverrides};
//!
//! let base = presets::classic();
//! let mut overrides = ThemeOverrides::new();
//! overrides.insert("colors.primary".to_string(), "#ff0066".to_string());
//!
//! let effective = resolve(&base.tokens, &overrides);
//! assert_eq!(effective.get("colors.primary"), Some("#ff0066"));
//! ```

pub mod catalog;
pub mod presets;
pub mod resolve;
pub mod tokens;

use thiserror::Error;

pub use catalog::ThemeCatalog;
pub use resolve::{css_variable_name, resolve, seed_overrides, EffectiveTokens, ThemeOverrides, ThemeSelection};
pub use tokens::{flatten, Fonts, Theme, ThemeTokens};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    #[error("Duplicate theme id: {0}")]
    DuplicateTheme(String),
}

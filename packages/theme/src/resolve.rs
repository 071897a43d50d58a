//! Theme override resolution.
//!
//! Layers a page's sparse override map over a base theme's flattened
//! tokens. The override layer wins for every key it names, including keys
//! the base theme does not define.

use crate::catalog::ThemeCatalog;
use crate::tokens::{flatten, Theme, ThemeTokens};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Sparse, page-scoped map of dotted token keys to override values
pub type ThemeOverrides = BTreeMap<String, String>;

/// Tokens after the override cascade, as consumed by the renderer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectiveTokens {
    values: BTreeMap<String, String>,
}

impl EffectiveTokens {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Shorthand for `colors.<name>`
    pub fn color(&self, name: &str) -> Option<&str> {
        self.get(&format!("colors.{}", name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Project every token to a CSS custom property
    pub fn css_variables(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(key, value)| (css_variable_name(key), value.clone()))
            .collect()
    }

    /// `var(--...)` reference for a token key, with a literal fallback
    /// taken from the resolved value
    pub fn var(&self, key: &str) -> String {
        match self.get(key) {
            Some(value) => format!("var({}, {})", css_variable_name(key), value),
            None => format!("var({})", css_variable_name(key)),
        }
    }
}

impl FromIterator<(String, String)> for EffectiveTokens {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Merge `overrides` over `base`. Pure: neither input is modified.
pub fn resolve(base: &ThemeTokens, overrides: &ThemeOverrides) -> EffectiveTokens {
    let mut values = flatten(base);
    for (key, value) in overrides {
        values.insert(key.clone(), value.clone());
    }
    debug!(tokens = values.len(), overrides = overrides.len(), "Resolved theme tokens");
    EffectiveTokens { values }
}

/// Override map pre-filled with every token of `tokens`
pub fn seed_overrides(tokens: &ThemeTokens) -> ThemeOverrides {
    flatten(tokens)
}

/// CSS custom property name for a dotted token key
pub fn css_variable_name(key: &str) -> String {
    let (group, rest) = match key.split_once('.') {
        Some((group, rest)) => (group, rest),
        None => return format!("--{}", key),
    };

    let prefix = match group {
        "colors" => "color",
        "fonts" => "font",
        "radii" => "radius",
        "shadows" => "shadow",
        other => other,
    };

    format!("--{}-{}", prefix, rest.replace('.', "-"))
}

/// A page's theme choice: which base theme, plus its override layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSelection {
    pub base_theme_id: String,
    #[serde(default)]
    pub overrides: ThemeOverrides,
}

impl ThemeSelection {
    pub fn new(base_theme_id: impl Into<String>) -> Self {
        Self {
            base_theme_id: base_theme_id.into(),
            overrides: ThemeOverrides::new(),
        }
    }

    /// Set one override. Returns whether the map changed.
    pub fn set_override(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if self.overrides.get(&key) == Some(&value) {
            return false;
        }
        self.overrides.insert(key, value);
        true
    }

    /// Remove one override. Returns whether the map changed.
    pub fn clear_override(&mut self, key: &str) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Switch base theme. Existing overrides survive the switch; with
    /// `seed`, the new theme's values are written into the override map
    /// (keys the theme does not define are kept).
    pub fn select_base(&mut self, theme: &Theme, seed: bool) {
        self.base_theme_id = theme.id.clone();
        if seed {
            self.overrides.extend(seed_overrides(&theme.tokens));
        }
    }

    /// Resolve against the catalog. An unknown base id falls back to the
    /// catalog's default theme; an empty catalog leaves only overrides.
    pub fn resolve(&self, catalog: &ThemeCatalog) -> EffectiveTokens {
        let base = match catalog.get(&self.base_theme_id) {
            Some(theme) => Some(theme),
            None => {
                warn!(theme_id = %self.base_theme_id, "Unknown base theme, using catalog default");
                catalog.default_theme()
            }
        };

        match base {
            Some(theme) => resolve(&theme.tokens, &self.overrides),
            None => self.overrides.clone().into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_override_wins_and_base_fills_the_rest() {
        let base = presets::classic().tokens;
        let mut overrides = ThemeOverrides::new();
        overrides.insert("colors.primary".to_string(), "#123456".to_string());

        let effective = resolve(&base, &overrides);
        assert_eq!(effective.color("primary"), Some("#123456"));
        assert_eq!(effective.color("accent"), Some("#f2a900"));
        assert_eq!(effective.get("fonts.body"), Some("Inter, sans-serif"));
    }

    #[test]
    fn test_resolve_does_not_mutate_base() {
        let base = presets::classic().tokens;
        let before = base.clone();
        let mut overrides = ThemeOverrides::new();
        overrides.insert("colors.primary".to_string(), "red".to_string());

        let _ = resolve(&base, &overrides);
        assert_eq!(base, before);
    }

    #[test]
    fn test_unknown_override_keys_are_kept() {
        let base = presets::sunset().tokens;
        let mut overrides = ThemeOverrides::new();
        overrides.insert("shadows.card".to_string(), "none".to_string());

        let effective = resolve(&base, &overrides);
        assert_eq!(effective.get("shadows.card"), Some("none"));
    }

    #[test]
    fn test_css_variable_names() {
        assert_eq!(css_variable_name("colors.primary"), "--color-primary");
        assert_eq!(css_variable_name("fonts.heading"), "--font-heading");
        assert_eq!(css_variable_name("spacing.md"), "--spacing-md");
        assert_eq!(css_variable_name("radii.sm"), "--radius-sm");
        assert_eq!(css_variable_name("shadows.card"), "--shadow-card");
        assert_eq!(css_variable_name("brand"), "--brand");
    }

    #[test]
    fn test_var_reference_includes_fallback() {
        let effective = resolve(&presets::classic().tokens, &ThemeOverrides::new());
        assert_eq!(effective.var("colors.primary"), "var(--color-primary, #1f4fd6)");
        assert_eq!(effective.var("colors.nope"), "var(--color-nope)");
    }

    #[test]
    fn test_switching_base_keeps_overrides() {
        let catalog = ThemeCatalog::builtin();
        let mut selection = ThemeSelection::new("classic");
        selection.set_override("colors.primary", "#abcdef");

        let midnight = catalog.get("midnight").unwrap().clone();
        selection.select_base(&midnight, false);

        let effective = selection.resolve(&catalog);
        assert_eq!(selection.base_theme_id, "midnight");
        assert_eq!(effective.color("primary"), Some("#abcdef"));
        assert_eq!(effective.color("background"), Some("#0e1117"));
    }

    #[test]
    fn test_seeding_writes_theme_values() {
        let catalog = ThemeCatalog::builtin();
        let mut selection = ThemeSelection::new("classic");
        selection.set_override("colors.primary", "#abcdef");
        selection.set_override("colors.brand", "#000000");

        let sunset = catalog.get("sunset").unwrap().clone();
        selection.select_base(&sunset, true);

        assert_eq!(selection.overrides.get("colors.primary").map(String::as_str), Some("#d9480f"));
        assert_eq!(selection.overrides.get("colors.brand").map(String::as_str), Some("#000000"));
        assert_eq!(selection.overrides.len(), seed_overrides(&sunset.tokens).len() + 1);
    }

    #[test]
    fn test_unknown_base_falls_back_to_default() {
        let catalog = ThemeCatalog::builtin();
        let selection = ThemeSelection::new("does-not-exist");
        let effective = selection.resolve(&catalog);
        assert_eq!(effective.color("primary"), Some("#1f4fd6"));
    }

    #[test]
    fn test_set_override_reports_change() {
        let mut selection = ThemeSelection::new("classic");
        assert!(selection.set_override("colors.text", "#111"));
        assert!(!selection.set_override("colors.text", "#111"));
        assert!(selection.clear_override("colors.text"));
        assert!(!selection.clear_override("colors.text"));
    }
}

//! Theme token model.
//!
//! Tokens are addressed by dotted keys: `colors.<name>`, `fonts.heading`,
//! `fonts.body`, `spacing.<name>`, `radii.<name>` and `shadows.<name>`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named set of style variables defining a visual theme
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeTokens {
    pub colors: BTreeMap<String, String>,
    pub fonts: Fonts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radii: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadows: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

/// A selectable base theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub tokens: ThemeTokens,
}

impl ThemeTokens {
    pub fn with_color(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(name.into(), value.into());
        self
    }

    pub fn with_fonts(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.fonts = Fonts {
            heading: heading.into(),
            body: body.into(),
        };
        self
    }

    pub fn with_spacing(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spacing
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_radius(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.radii
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_shadow(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.shadows
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Flatten tokens into their dotted-key form
pub fn flatten(tokens: &ThemeTokens) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();

    for (name, value) in &tokens.colors {
        flat.insert(format!("colors.{}", name), value.clone());
    }

    flat.insert("fonts.heading".to_string(), tokens.fonts.heading.clone());
    flat.insert("fonts.body".to_string(), tokens.fonts.body.clone());

    let groups = [
        ("spacing", &tokens.spacing),
        ("radii", &tokens.radii),
        ("shadows", &tokens.shadows),
    ];
    for (group, values) in groups {
        if let Some(values) = values {
            for (name, value) in values {
                flat.insert(format!("{}.{}", group, name), value.clone());
            }
        }
    }

    flat
}

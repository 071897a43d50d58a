use crate::presets;
use crate::tokens::Theme;
use crate::ThemeError;

/// Ordered set of selectable base themes
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Build a catalog, rejecting duplicate ids. The first theme is the
    /// fallback for unknown ids.
    pub fn new(themes: Vec<Theme>) -> Result<Self, ThemeError> {
        for (index, theme) in themes.iter().enumerate() {
            if themes[..index].iter().any(|t| t.id == theme.id) {
                return Err(ThemeError::DuplicateTheme(theme.id.clone()));
            }
        }
        Ok(Self { themes })
    }

    /// Catalog of the built-in presets
    pub fn builtin() -> Self {
        Self {
            themes: presets::all(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Theme, ThemeError> {
        self.get(id)
            .ok_or_else(|| ThemeError::ThemeNotFound(id.to_string()))
    }

    pub fn default_theme(&self) -> Option<&Theme> {
        self.themes.first()
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

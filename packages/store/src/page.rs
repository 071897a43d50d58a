use chrono::{DateTime, Utc};
use pagecraft_blocks::BlockInstance;
use pagecraft_theme::ThemeOverrides;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
    Scheduled,
    Unpublished,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageStatus::Draft => "draft",
            PageStatus::Published => "published",
            PageStatus::Scheduled => "scheduled",
            PageStatus::Unpublished => "unpublished",
        };
        f.write_str(name)
    }
}

/// SEO fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    pub noindex: bool,
}

/// A stored page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    /// Unique, URL-safe
    pub slug: String,
    pub status: PageStatus,
    pub store_target: String,
    pub locale: String,
    #[serde(default)]
    pub blocks: Vec<BlockInstance>,
    /// Base theme; `None` means the deployment default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub theme_overrides: ThemeOverrides,
    #[serde(default)]
    pub meta: PageMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Page {
    pub fn is_live(&self) -> bool {
        self.status == PageStatus::Published
    }

    /// Draft carrying every editable field of this page, for re-saving
    pub fn to_draft(&self) -> PageDraft {
        PageDraft {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            slug: self.slug.clone(),
            status: Some(self.status),
            store_target: Some(self.store_target.clone()),
            locale: Some(self.locale.clone()),
            blocks: self.blocks.clone(),
            theme_id: self.theme_id.clone(),
            theme_overrides: self.theme_overrides.clone(),
            meta: self.meta.clone(),
        }
    }
}

/// Partial page sent to [`crate::PageStore::save_page`]. Without an id the
/// page is created; with one it is updated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Empty means "derive from the title"
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub blocks: Vec<BlockInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    pub theme_overrides: ThemeOverrides,
    pub meta: PageMeta,
}

impl PageDraft {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<BlockInstance>) -> Self {
        self.blocks = blocks;
        self
    }
}

//! # Page Store
//!
//! Contract of the external page store plus an in-memory implementation.
//!
//! ## Semantics
//!
//! - `save_page` creates when the draft has no id and updates otherwise;
//!   it always stamps `updated_at`
//! - Slugs are unique across pages and must be URL-safe; an empty slug is
//!   derived from the title, or from the page id when the title has no
//!   ASCII letters or digits
//! - `scheduled` is only reachable through `schedule_publish`, which sets
//!   the publish date
//! - `get_page_by_slug(slug, false)` only returns published pages
//! - `schedule_publish` takes an RFC 3339 date and moves the page to
//!   `scheduled`; `publish_due` promotes scheduled pages whose time came

use crate::error::{StoreError, StoreResult};
use crate::page::{Page, PageDraft, PageStatus};
use crate::slug::{is_valid_slug, slugify};
use chrono::{DateTime, Utc};
use pagecraft_common::{Config, IdGenerator};
use std::sync::RwLock;
use tracing::{debug, info, instrument};

pub trait PageStore: Send + Sync {
    /// Every page, most recently updated first
    fn list_pages(&self) -> StoreResult<Vec<Page>>;

    fn get_page(&self, id: &str) -> StoreResult<Option<Page>>;

    fn get_page_by_slug(&self, slug: &str, include_draft: bool) -> StoreResult<Option<Page>>;

    fn save_page(&self, draft: PageDraft) -> StoreResult<Page>;

    fn update_status(&self, id: &str, status: PageStatus) -> StoreResult<Page>;

    fn schedule_publish(&self, id: &str, when: &str) -> StoreResult<Page>;

    /// Publish every scheduled page due at `now`; returns the promoted pages
    fn publish_due(&self, now: DateTime<Utc>) -> StoreResult<Vec<Page>>;

    fn delete_page(&self, id: &str) -> StoreResult<()>;
}

struct StoreState {
    pages: Vec<Page>,
    ids: IdGenerator,
}

/// Page store held in process memory
pub struct InMemoryPageStore {
    state: RwLock<StoreState>,
    default_locale: String,
    default_store_target: String,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Locale and store target defaults come from `config`
    pub fn with_config(config: &Config) -> Self {
        Self {
            state: RwLock::new(StoreState {
                pages: Vec::new(),
                ids: IdGenerator::new("pages"),
            }),
            default_locale: config.default_locale.clone(),
            default_store_target: config.default_store_target.clone(),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> StoreResult<T> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut state)
    }

    /// A slug must be URL-safe and not used by any page other than `owner`
    fn check_slug(state: &StoreState, slug: &str, owner: Option<&String>) -> StoreResult<()> {
        if !is_valid_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        let taken = state
            .pages
            .iter()
            .any(|p| p.slug == slug && Some(&p.id) != owner);
        if taken {
            return Err(StoreError::SlugTaken(slug.to_string()));
        }
        Ok(())
    }

    fn page_mut<'a>(state: &'a mut StoreState, id: &str) -> StoreResult<&'a mut Page> {
        state
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl Default for InMemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn set_status(page: &mut Page, status: PageStatus, now: DateTime<Utc>) {
    page.status = status;
    page.updated_at = now;
    match status {
        PageStatus::Published => {
            page.published_at = Some(now);
            page.scheduled_at = None;
        }
        PageStatus::Scheduled => {}
        PageStatus::Draft | PageStatus::Unpublished => page.scheduled_at = None,
    }
}

impl PageStore for InMemoryPageStore {
    fn list_pages(&self) -> StoreResult<Vec<Page>> {
        self.read(|state| {
            let mut pages = state.pages.clone();
            pages.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            pages
        })
    }

    fn get_page(&self, id: &str) -> StoreResult<Option<Page>> {
        self.read(|state| state.pages.iter().find(|p| p.id == id).cloned())
    }

    fn get_page_by_slug(&self, slug: &str, include_draft: bool) -> StoreResult<Option<Page>> {
        self.read(|state| {
            state
                .pages
                .iter()
                .find(|p| p.slug == slug && (include_draft || p.is_live()))
                .cloned()
        })
    }

    #[instrument(skip(self, draft), fields(page_id = ?draft.id, slug = %draft.slug))]
    fn save_page(&self, draft: PageDraft) -> StoreResult<Page> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::MissingTitle);
        }

        // None: the title has nothing slug-worthy, so the page id stands in
        let slug = if draft.slug.trim().is_empty() {
            Some(slugify(&title)).filter(|s| !s.is_empty())
        } else {
            Some(draft.slug.trim().to_string())
        };
        if let Some(slug) = slug.as_ref().filter(|s| !is_valid_slug(s)) {
            return Err(StoreError::InvalidSlug(slug.clone()));
        }

        let now = Utc::now();

        self.write(|state| {
            match &draft.id {
                Some(id) => {
                    let slug = slug.unwrap_or_else(|| slugify(id));
                    Self::check_slug(state, &slug, Some(id))?;

                    let page = Self::page_mut(state, id)?;
                    if draft.status == Some(PageStatus::Scheduled) && page.scheduled_at.is_none() {
                        return Err(StoreError::ScheduleWithoutDate(id.clone()));
                    }
                    page.title = title;
                    page.slug = slug;
                    if let Some(store_target) = draft.store_target {
                        page.store_target = store_target;
                    }
                    if let Some(locale) = draft.locale {
                        page.locale = locale;
                    }
                    page.blocks = draft.blocks;
                    page.theme_id = draft.theme_id;
                    page.theme_overrides = draft.theme_overrides;
                    page.meta = draft.meta;
                    match draft.status {
                        Some(status) if status != page.status => set_status(page, status, now),
                        _ => page.updated_at = now,
                    }

                    info!(page_id = %page.id, blocks = page.blocks.len(), "Page updated");
                    Ok(page.clone())
                }
                None => {
                    if draft.status == Some(PageStatus::Scheduled) {
                        return Err(StoreError::ScheduleWithoutDate(title));
                    }

                    let ids = &mut state.ids;
                    let pages = &state.pages;
                    let id = ids.new_unique_id(|candidate| pages.iter().any(|p| p.id == candidate));
                    let slug = slug.unwrap_or_else(|| slugify(&id));
                    Self::check_slug(state, &slug, None)?;

                    let mut page = Page {
                        id,
                        title,
                        slug,
                        status: PageStatus::Draft,
                        store_target: draft
                            .store_target
                            .unwrap_or_else(|| self.default_store_target.clone()),
                        locale: draft.locale.unwrap_or_else(|| self.default_locale.clone()),
                        blocks: draft.blocks,
                        theme_id: draft.theme_id,
                        theme_overrides: draft.theme_overrides,
                        meta: draft.meta,
                        created_at: now,
                        updated_at: now,
                        published_at: None,
                        scheduled_at: None,
                    };
                    if let Some(status) = draft.status {
                        set_status(&mut page, status, now);
                    }

                    info!(page_id = %page.id, slug = %page.slug, "Page created");
                    state.pages.push(page.clone());
                    Ok(page)
                }
            }
        })
    }

    fn update_status(&self, id: &str, status: PageStatus) -> StoreResult<Page> {
        let now = Utc::now();
        self.write(|state| {
            let page = Self::page_mut(state, id)?;
            if status == PageStatus::Scheduled && page.scheduled_at.is_none() {
                return Err(StoreError::ScheduleWithoutDate(id.to_string()));
            }
            set_status(page, status, now);
            info!(page_id = %id, status = %status, "Page status changed");
            Ok(page.clone())
        })
    }

    fn schedule_publish(&self, id: &str, when: &str) -> StoreResult<Page> {
        let at = DateTime::parse_from_rfc3339(when)
            .map_err(|e| StoreError::InvalidSchedule {
                value: when.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);
        let now = Utc::now();

        self.write(|state| {
            let page = Self::page_mut(state, id)?;
            set_status(page, PageStatus::Scheduled, now);
            page.scheduled_at = Some(at);
            info!(page_id = %id, publish_at = %at, "Page scheduled");
            Ok(page.clone())
        })
    }

    fn publish_due(&self, now: DateTime<Utc>) -> StoreResult<Vec<Page>> {
        self.write(|state| {
            let mut promoted = Vec::new();
            for page in state.pages.iter_mut() {
                let due = page.status == PageStatus::Scheduled
                    && page.scheduled_at.is_some_and(|at| at <= now);
                if due {
                    set_status(page, PageStatus::Published, now);
                    debug!(page_id = %page.id, "Scheduled page published");
                    promoted.push(page.clone());
                }
            }
            Ok(promoted)
        })
    }

    fn delete_page(&self, id: &str) -> StoreResult<()> {
        self.write(|state| {
            let before = state.pages.len();
            state.pages.retain(|p| p.id != id);
            if state.pages.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            info!(page_id = %id, "Page deleted");
            Ok(())
        })
    }
}

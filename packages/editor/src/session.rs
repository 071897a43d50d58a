//! # Edit Session
//!
//! One operator's editing context for one page: the block sequence (behind
//! an [`UndoStack`]), the selected block, the page's theme selection and
//! the autosave indicator.
//!
//! Every operation is total. Ids that are not in the sequence, indices out
//! of range and undo/redo at the ends of history are no-ops reported
//! through the boolean return value. The only errors are adding a type the
//! registry does not know, selecting a theme the catalog does not know,
//! importing malformed text, and store failures.

use crate::autosave::{Autosave, Clock, SaveStatus, SystemClock};
use crate::errors::{EditorError, EditorResult};
use crate::inspector::{self, FieldInput, Inspection};
use crate::undo_stack::UndoStack;
use pagecraft_blocks::{
    validate_sequence, BlockInstance, Props, Registry, RenderedPage, Renderer, ValidationWarning,
};
use pagecraft_common::{Config, IdGenerator};
use pagecraft_store::{Page, PageDraft, PageMeta, PageStore};
use pagecraft_theme::{EffectiveTokens, ThemeCatalog, ThemeSelection};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Block sequence snapshot kept by the history
pub type Sequence = Vec<BlockInstance>;

/// Single edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    registry: Arc<Registry>,
    themes: Arc<ThemeCatalog>,

    /// Page fields other than blocks and theme
    page: PageDraft,
    history: UndoStack<Sequence>,
    selected: Option<String>,
    theme: ThemeSelection,

    ids: IdGenerator,
    autosave: Autosave,
    closed: bool,
}

impl EditSession {
    /// Create a session on an empty page with default configuration
    pub fn new(id: impl Into<String>, registry: Arc<Registry>, themes: Arc<ThemeCatalog>) -> Self {
        Self::with_config(id, registry, themes, &Config::default())
    }

    pub fn with_config(
        id: impl Into<String>,
        registry: Arc<Registry>,
        themes: Arc<ThemeCatalog>,
        config: &Config,
    ) -> Self {
        let id = id.into();
        let mut page = PageDraft::new("", "");
        page.locale = Some(config.default_locale.clone());
        page.store_target = Some(config.default_store_target.clone());

        Self {
            ids: IdGenerator::new(&id),
            id,
            registry,
            themes,
            page,
            history: UndoStack::with_limit(Vec::new(), config.history_limit),
            selected: None,
            theme: ThemeSelection::new(config.default_theme.clone()),
            autosave: Autosave::new(
                Arc::new(SystemClock::new()),
                Duration::from_millis(config.autosave_delay_ms),
            ),
            closed: false,
        }
    }

    /// Swap the autosave time source, keeping its delay
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.autosave = Autosave::new(clock, self.autosave.delay());
        self
    }

    // =========================================================================
    // Sequence
    // =========================================================================

    pub fn blocks(&self) -> &[BlockInstance] {
        self.history.current()
    }

    pub fn block(&self, id: &str) -> Option<&BlockInstance> {
        self.blocks().iter().find(|b| b.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.blocks().iter().position(|b| b.id == id)
    }

    fn fresh_id(&mut self) -> String {
        let blocks = self.history.current();
        self.ids.new_unique_id(|candidate| blocks.iter().any(|b| b.id == candidate))
    }

    /// Give every block whose id is empty or already used earlier in
    /// `blocks` a fresh id, so id-keyed operations stay unambiguous
    fn assign_unique_ids(&mut self, blocks: &mut [BlockInstance]) -> usize {
        let mut seen = HashSet::new();
        let mut renamed = 0;

        for i in 0..blocks.len() {
            if !blocks[i].id.is_empty() && seen.insert(blocks[i].id.clone()) {
                continue;
            }
            let taken = &*blocks;
            let fresh = self
                .ids
                .new_unique_id(|candidate| taken.iter().any(|b| b.id == candidate));
            warn!(old_id = %blocks[i].id, new_id = %fresh, "Block id reassigned");
            seen.insert(fresh.clone());
            blocks[i].id = fresh;
            renamed += 1;
        }
        renamed
    }

    /// Record a new snapshot and restart the autosave timer
    fn commit(&mut self, next: Sequence) {
        self.history.push(next);
        self.autosave.touch();
    }

    /// Append a fresh instance of `block_type` and select it
    pub fn add_block(&mut self, block_type: &str) -> EditorResult<String> {
        let definition = self
            .registry
            .lookup(block_type)
            .ok_or_else(|| EditorError::UnknownBlockType(block_type.to_string()))?;
        let props = definition.instantiate_props();

        let id = self.fresh_id();
        let mut next = self.blocks().to_vec();
        next.push(BlockInstance::new(id.clone(), block_type, props));
        self.commit(next);
        self.selected = Some(id.clone());

        info!(block_id = %id, block_type = %block_type, "Block added");
        Ok(id)
    }

    /// Remove a block. A selected block hands the selection to the first
    /// remaining block.
    pub fn delete_block(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            debug!(block_id = %id, "Delete of unknown block ignored");
            return false;
        };

        let mut next = self.blocks().to_vec();
        next.remove(index);
        self.commit(next);

        if self.selected.as_deref() == Some(id) {
            self.selected = self.blocks().first().map(|b| b.id.clone());
        }

        info!(block_id = %id, "Block deleted");
        true
    }

    /// Move the block at `from` to `to`, keeping everyone else's relative
    /// order
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks().len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let mut next = self.blocks().to_vec();
        let block = next.remove(from);
        debug!(block_id = %block.id, from, to, "Block moved");
        next.insert(to, block);
        self.commit(next);
        true
    }

    /// Id-stable reorder. `to_index` past the end moves to the end.
    pub fn move_block(&mut self, id: &str, to_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = to_index.min(self.blocks().len().saturating_sub(1));
        self.reorder(from, to)
    }

    /// Copy a block under a fresh id, right after the original, and select
    /// the copy
    pub fn duplicate_block(&mut self, id: &str) -> Option<String> {
        let index = self.position(id)?;
        let new_id = self.fresh_id();

        let mut next = self.blocks().to_vec();
        let mut copy = next[index].clone();
        copy.id = new_id.clone();
        next.insert(index + 1, copy);
        self.commit(next);
        self.selected = Some(new_id.clone());

        info!(block_id = %id, copy_id = %new_id, "Block duplicated");
        Some(new_id)
    }

    /// Replace the props of one block. Identical props record nothing.
    pub fn update_props(&mut self, id: &str, props: Props) -> bool {
        let Some(index) = self.position(id) else {
            debug!(block_id = %id, "Props update for unknown block ignored");
            return false;
        };
        if self.blocks()[index].props == props {
            return false;
        }

        let mut next = self.blocks().to_vec();
        next[index].props = props;
        self.commit(next);
        debug!(block_id = %id, "Props updated");
        true
    }

    /// Apply one inspector edit to a schema field of a block
    pub fn edit_field(&mut self, id: &str, field: &str, input: FieldInput) -> bool {
        let Some(block) = self.block(id) else {
            return false;
        };
        let Some(spec) = self
            .registry
            .lookup(&block.block_type)
            .and_then(|def| def.schema.property(field))
            .map(inspector::FieldSpec::from_property)
        else {
            warn!(block_id = %id, field = %field, "Edit of undeclared field ignored");
            return false;
        };

        let next = inspector::apply_edit(&block.props, &spec, input);
        self.update_props(id, next)
    }

    /// Apply one inspector edit to a style field (`padding`, `textAlign`)
    pub fn edit_style(&mut self, id: &str, field: &str, input: FieldInput) -> bool {
        let Some(block) = self.block(id) else {
            return false;
        };
        let Some(spec) = inspector::style_fields().into_iter().find(|s| s.name == field) else {
            warn!(block_id = %id, field = %field, "Unknown style field ignored");
            return false;
        };

        let next = inspector::apply_style_edit(&block.props, &spec, input);
        self.update_props(id, next)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a block, or clear the selection with `None`. Unknown ids
    /// leave the selection as it was.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.position(id).is_some() => {
                self.selected = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(block_id = %id, "Selection of unknown block ignored");
                false
            }
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&BlockInstance> {
        self.selected.as_deref().and_then(|id| self.block(id))
    }

    /// Inspector panel for the selected block
    pub fn inspect_selected(&self) -> Option<Inspection> {
        let block = self.selected()?;
        Some(inspector::inspect(block, self.registry.lookup(&block.block_type)))
    }

    /// History moves can remove the selected block; drop a dangling selection
    fn repair_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !self.blocks().iter().any(|b| &b.id == id) {
                debug!(block_id = %id, "Selected block gone, clearing selection");
                self.selected = None;
            }
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.history.undo();
        self.repair_selection();
        self.autosave.touch();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.history.redo();
        self.repair_selection();
        self.autosave.touch();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack<Sequence> {
        &self.history
    }

    // =========================================================================
    // Theme
    // =========================================================================

    pub fn theme(&self) -> &ThemeSelection {
        &self.theme
    }

    pub fn set_theme_override(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let changed = self.theme.set_override(key, value);
        if changed {
            self.autosave.touch();
        }
        changed
    }

    pub fn clear_theme_override(&mut self, key: &str) -> bool {
        let changed = self.theme.clear_override(key);
        if changed {
            self.autosave.touch();
        }
        changed
    }

    /// Switch the base theme, keeping existing overrides. With `seed`, the
    /// theme's own values are copied into the override map.
    pub fn select_base_theme(&mut self, theme_id: &str, seed: bool) -> EditorResult<()> {
        let theme = self.themes.require(theme_id)?;
        self.theme.select_base(theme, seed);
        self.autosave.touch();
        info!(theme_id = %theme_id, seed, "Base theme selected");
        Ok(())
    }

    pub fn effective_tokens(&self) -> EffectiveTokens {
        self.theme.resolve(&self.themes)
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Render the whole sequence with the resolved theme
    pub fn preview(&self) -> RenderedPage {
        let tokens = self.effective_tokens();
        Renderer::new(&self.registry, &tokens).render_page(self.blocks())
    }

    /// Advisory warnings for the current sequence
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validate_sequence(&self.registry, self.blocks())
    }

    // =========================================================================
    // Page
    // =========================================================================

    pub fn page_id(&self) -> Option<&str> {
        self.page.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.page.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.page.title = title.into();
        self.autosave.touch();
    }

    /// An empty slug is derived from the title on save
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.page.slug = slug.into();
        self.autosave.touch();
    }

    pub fn set_meta(&mut self, meta: PageMeta) {
        self.page.meta = meta;
        self.autosave.touch();
    }

    /// Start editing `page`: history, selection and theme are replaced
    pub fn load_page(&mut self, page: &Page) {
        self.page = page.to_draft();
        self.page.blocks = Vec::new();
        let mut blocks = page.blocks.clone();
        self.assign_unique_ids(&mut blocks);
        self.history.reset(blocks);
        self.selected = None;

        let base = page
            .theme_id
            .clone()
            .unwrap_or_else(|| self.theme.base_theme_id.clone());
        self.theme = ThemeSelection {
            base_theme_id: base,
            overrides: page.theme_overrides.clone(),
        };

        info!(page_id = %page.id, blocks = page.blocks.len(), "Page loaded");
    }

    /// Snapshot of the working copy, ready for [`PageStore::save_page`]
    pub fn to_draft(&self) -> PageDraft {
        PageDraft {
            blocks: self.blocks().to_vec(),
            theme_id: Some(self.theme.base_theme_id.clone()),
            theme_overrides: self.theme.overrides.clone(),
            ..self.page.clone()
        }
    }

    /// Send the working copy to `store`. On failure nothing local changes.
    pub fn save(&mut self, store: &dyn PageStore) -> EditorResult<Page> {
        let saved = match store.save_page(self.to_draft()) {
            Ok(page) => page,
            Err(e) => {
                warn!(session = %self.id, error = %e, "Save failed, working copy kept");
                return Err(e.into());
            }
        };

        self.page = saved.to_draft();
        self.page.blocks = Vec::new();
        info!(session = %self.id, page_id = %saved.id, "Page saved");
        Ok(saved)
    }

    // =========================================================================
    // Export / import
    // =========================================================================

    /// Canonical text form of the sequence: pretty JSON array of
    /// `{id, type, props}`
    pub fn export_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self.blocks())?)
    }

    /// Replace the sequence with parsed export text, as one undoable step.
    /// Malformed text changes nothing. Empty or repeated ids are replaced
    /// with fresh ones; the first occurrence keeps its id.
    pub fn import_json(&mut self, text: &str) -> EditorResult<usize> {
        let mut blocks: Sequence = serde_json::from_str(text)?;
        self.assign_unique_ids(&mut blocks);
        let count = blocks.len();
        self.commit(blocks);
        self.repair_selection();
        info!(blocks = count, "Sequence imported");
        Ok(count)
    }

    // =========================================================================
    // Autosave / lifecycle
    // =========================================================================

    /// Current autosave status, settling the debounce if it is due
    pub fn poll_autosave(&mut self) -> SaveStatus {
        self.autosave.poll()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    /// End the session. The autosave timer is cancelled so no status
    /// change fires afterwards.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.autosave.cancel();
        self.closed = true;
        debug!(session = %self.id, "Session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::ManualClock;
    use pagecraft_blocks::builtin_registry;
    use pagecraft_store::{InMemoryPageStore, PageStatus, StoreError};
    use serde_json::json;

    fn session() -> EditSession {
        EditSession::new(
            "client-1",
            Arc::new(builtin_registry().unwrap()),
            Arc::new(ThemeCatalog::builtin()),
        )
    }

    fn ids(session: &EditSession) -> Vec<String> {
        session.blocks().iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert!(session.blocks().is_empty());
        assert!(session.selected_id().is_none());
        assert!(!session.can_undo());
        assert_eq!(session.save_status(), SaveStatus::Idle);
        assert_eq!(session.theme().base_theme_id, "classic");
    }

    #[test]
    fn test_add_block_copies_defaults_and_selects() {
        let mut session = session();
        let id = session.add_block("hero").unwrap();

        let block = session.block(&id).unwrap();
        assert_eq!(block.props["title"], json!("Welcome to our store"));
        assert_eq!(session.selected_id(), Some(id.as_str()));
        assert!(session.can_undo());
    }

    #[test]
    fn test_add_unknown_type_is_an_error() {
        let mut session = session();
        let err = session.add_block("carousel").unwrap_err();
        assert!(matches!(err, EditorError::UnknownBlockType(t) if t == "carousel"));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut session = session();
        let a = session.add_block("spacer").unwrap();
        let b = session.add_block("spacer").unwrap();
        let c = session.duplicate_block(&a).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_delete_moves_selection_to_first_block() {
        let mut session = session();
        let a = session.add_block("spacer").unwrap();
        let b = session.add_block("spacer").unwrap();

        assert!(session.delete_block(&b));
        assert_eq!(session.selected_id(), Some(a.as_str()));

        assert!(session.delete_block(&a));
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut session = session();
        session.add_block("spacer").unwrap();
        let len = session.history().len();

        assert!(!session.delete_block("missing"));
        assert!(!session.move_block("missing", 0));
        assert!(!session.update_props("missing", Props::new()));
        assert!(session.duplicate_block("missing").is_none());
        assert!(!session.select(Some("missing")));
        assert!(!session.reorder(0, 5));
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let mut session = session();
        let a = session.add_block("hero").unwrap();
        let b = session.add_block("spacer").unwrap();

        let copy = session.duplicate_block(&a).unwrap();
        assert_eq!(ids(&session), vec![a.clone(), copy.clone(), b]);
        assert_eq!(session.block(&copy).unwrap().props, session.block(&a).unwrap().props);
    }

    #[test]
    fn test_move_block_by_id() {
        let mut session = session();
        let a = session.add_block("spacer").unwrap();
        let b = session.add_block("spacer").unwrap();
        let c = session.add_block("spacer").unwrap();

        assert!(session.move_block(&c, 0));
        assert_eq!(ids(&session), vec![c.clone(), a.clone(), b.clone()]);

        assert!(session.move_block(&c, 99));
        assert_eq!(ids(&session), vec![a, b, c]);
    }

    #[test]
    fn test_edit_field_coerces_and_records() {
        let mut session = session();
        let id = session.add_block("spacer").unwrap();

        assert!(session.edit_field(&id, "height", FieldInput::Text("64.7".into())));
        assert_eq!(session.block(&id).unwrap().props["height"], json!(64));

        assert!(!session.edit_field(&id, "nope", FieldInput::Text("1".into())));
        assert!(!session.edit_field(&id, "height", FieldInput::Text("64".into())));
    }

    #[test]
    fn test_edit_style_keeps_schema_props() {
        let mut session = session();
        let id = session.add_block("hero").unwrap();

        assert!(session.edit_style(&id, "padding", FieldInput::Text("24px".into())));
        let block = session.block(&id).unwrap();
        assert_eq!(block.props["style"], json!({ "padding": "24px" }));
        assert_eq!(block.props["title"], json!("Welcome to our store"));

        let preview = session.preview();
        assert_eq!(preview.nodes[0].style("padding"), Some("24px"));
    }

    #[test]
    fn test_undo_clears_selection_of_vanished_block() {
        let mut session = session();
        let id = session.add_block("hero").unwrap();
        assert!(session.undo());
        assert!(session.blocks().is_empty());
        assert_eq!(session.selected_id(), None);

        assert!(session.redo());
        assert_eq!(ids(&session), vec![id]);
        assert!(!session.redo());
    }

    #[test]
    fn test_inspect_selected() {
        let mut session = session();
        assert!(session.inspect_selected().is_none());

        let id = session.add_block("hero").unwrap();
        let panel = session.inspect_selected().unwrap();
        assert_eq!(panel.block_id, id);
        assert!(panel.fields.iter().any(|f| f.name == "title"));
    }

    #[test]
    fn test_theme_edits() {
        let mut session = session();
        assert!(session.set_theme_override("colors.primary", "#ff0066"));
        assert!(!session.set_theme_override("colors.primary", "#ff0066"));

        session.select_base_theme("midnight", false).unwrap();
        let tokens = session.effective_tokens();
        assert_eq!(tokens.get("colors.primary"), Some("#ff0066"));
        assert_eq!(tokens.get("colors.background"), Some("#0e1117"));

        assert!(session.select_base_theme("neon", false).is_err());
        assert_eq!(session.theme().base_theme_id, "midnight");

        assert!(session.clear_theme_override("colors.primary"));
        assert!(!session.clear_theme_override("colors.primary"));
    }

    #[test]
    fn test_save_round_trip_through_store() {
        let store = InMemoryPageStore::new();
        let mut session = session();
        session.set_title("Summer sale");
        session.add_block("hero").unwrap();
        session.set_theme_override("colors.accent", "#00ff00");

        let page = session.save(&store).unwrap();
        assert_eq!(session.page_id(), Some(page.id.as_str()));
        assert_eq!(page.slug, "summer-sale");
        assert_eq!(page.status, PageStatus::Draft);
        assert_eq!(page.theme_id.as_deref(), Some("classic"));
        assert_eq!(page.theme_overrides["colors.accent"], "#00ff00");

        session.add_block("spacer").unwrap();
        let updated = session.save(&store).unwrap();
        assert_eq!(updated.id, page.id);
        assert_eq!(updated.blocks.len(), 2);
        assert_eq!(store.list_pages().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_working_copy() {
        let store = InMemoryPageStore::new();
        let mut session = session();
        session.add_block("hero").unwrap();
        let before = session.to_draft();

        let err = session.save(&store).unwrap_err();
        assert!(matches!(err, EditorError::Store(StoreError::MissingTitle)));
        assert_eq!(session.to_draft(), before);
        assert!(session.can_undo());
        assert!(session.page_id().is_none());
    }

    #[test]
    fn test_load_page_resets_session_state() {
        let store = InMemoryPageStore::new();
        let mut draft = PageDraft::new("Landing", "landing").with_blocks(vec![BlockInstance::new(
            "x1",
            "spacer",
            pagecraft_blocks::props(json!({ "height": 12 })),
        )]);
        draft.theme_id = Some("sunset".to_string());
        let page = store.save_page(draft).unwrap();

        let mut session = session();
        session.add_block("hero").unwrap();
        session.load_page(&page);

        assert_eq!(ids(&session), vec!["x1".to_string()]);
        assert!(!session.can_undo());
        assert!(session.selected_id().is_none());
        assert_eq!(session.theme().base_theme_id, "sunset");
        assert_eq!(session.title(), "Landing");

        let id = session.add_block("spacer").unwrap();
        assert_ne!(id, "x1");
    }

    #[test]
    fn test_load_page_reassigns_repeated_ids() {
        let store = InMemoryPageStore::new();
        let draft = PageDraft::new("Twins", "twins").with_blocks(vec![
            BlockInstance::new("a", "spacer", Props::new()),
            BlockInstance::new("a", "hero", Props::new()),
            BlockInstance::new("", "spacer", Props::new()),
        ]);
        let page = store.save_page(draft).unwrap();

        let mut session = session();
        session.load_page(&page);

        let loaded = ids(&session);
        assert_eq!(loaded[0], "a");
        assert_ne!(loaded[1], "a");
        assert!(!loaded[2].is_empty());
        assert_ne!(loaded[1], loaded[2]);
        assert_eq!(session.block(&loaded[1]).unwrap().block_type, "hero");
    }

    #[test]
    fn test_import_is_undoable_and_rejects_garbage() {
        let mut session = session();
        session.add_block("hero").unwrap();
        let before = session.blocks().to_vec();

        assert!(session.import_json("{ not json").is_err());
        assert_eq!(session.blocks(), before.as_slice());

        let count = session
            .import_json(r#"[{ "id": "z", "type": "spacer", "props": { "height": 4 } }]"#)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(session.selected_id(), None);

        session.undo();
        assert_eq!(session.blocks(), before.as_slice());
    }

    #[test]
    fn test_autosave_follows_edits_and_stops_on_close() {
        let clock = ManualClock::new();
        let mut session = session().with_clock(Arc::new(clock.clone()));

        session.add_block("hero").unwrap();
        assert_eq!(session.poll_autosave(), SaveStatus::Saving);

        clock.advance(Duration::from_millis(800));
        assert_eq!(session.poll_autosave(), SaveStatus::Saved);

        session.add_block("spacer").unwrap();
        session.close();
        clock.advance(Duration::from_secs(5));
        assert_eq!(session.poll_autosave(), SaveStatus::Saving);
        assert!(session.is_closed());
    }
}

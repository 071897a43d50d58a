//! # Pagecraft Editor
//!
//! The composition engine's editing surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ operator action (add / delete / move / edit)│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ EditSession                                 │
//! │  - whole-snapshot UndoStack of blocks       │
//! │  - selection + inspector                    │
//! │  - theme selection (base + overrides)       │
//! │  - debounced autosave status                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ blocks: Renderer → RenderedPage             │
//! │ store:  PageStore::save_page                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_blocks::builtin_registry;
//! use pagecraft_editor::{EditSession, FieldInput};
//! use pagecraft_theme::ThemeCatalog;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(builtin_registry().unwrap());
//! let mut session = EditSession::new("client-1", registry, Arc::new(ThemeCatalog::builtin()));
//!
//! let hero = session.add_block("hero").unwrap();
//! session.edit_field(&hero, "title", FieldInput::Text("Sale".into()));
//! session.undo();
//!
//! let preview = session.preview();
//! assert_eq!(preview.nodes.len(), 1);
//! ```

mod autosave;
mod errors;
mod inspector;
mod session;
mod undo_stack;

pub use autosave::{Autosave, Clock, ManualClock, SaveStatus, SystemClock};
pub use errors::{EditorError, EditorResult};
pub use inspector::{
    apply_edit, apply_style_edit, generate_fields, inspect, render_field, style_fields,
    FieldControl, FieldInput, FieldSpec, FieldWidget, Inspection, TEXT_ALIGNMENTS,
};
pub use session::{EditSession, Sequence};
pub use undo_stack::{UndoStack, DEFAULT_HISTORY_LIMIT};

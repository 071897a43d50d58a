//! # Pagecraft Store
//!
//! The narrow interface between the editing engine and wherever pages
//! actually live.
//!
//! - [`PageStore`]: list / get / save / status / schedule
//! - [`InMemoryPageStore`]: reference implementation used by tests and
//!   embedded previews
//! - [`PreviewSigner`]: short-lived tokens granting read access to an
//!   unpublished page
//!
//! Store failures never touch an editor's working copy: callers get a
//! [`StoreError`] and decide how to surface it.

mod error;
mod page;
mod preview;
mod slug;
mod store;

pub use error::{StoreError, StoreResult};
pub use page::{Page, PageDraft, PageMeta, PageStatus};
pub use preview::PreviewSigner;
pub use slug::{is_valid_slug, slugify};
pub use store::{InMemoryPageStore, PageStore};

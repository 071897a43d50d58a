//! # Pagecraft Blocks
//!
//! The block catalogue and the single dispatch point that renders it.
//!
//! ```text
//! BlockInstance {id, type, props}
//!         │
//!         ▼
//! Registry::lookup(type) ──none──→ RenderNode::Fallback {type}
//!         │
//!         ▼
//! BlockDefinition::render(props, ctx) ──→ RenderNode
//! ```
//!
//! Block kinds are data, not types: each kind is a [`BlockDefinition`]
//! record (schema, default props, render function) keyed by its type
//! string. Nothing outside [`Registry::lookup`] branches on the type.

pub mod catalogue;
pub mod definition;
pub mod error;
pub mod instance;
pub mod node;
pub mod registry;
pub mod renderer;
pub mod schema;
pub mod validator;

pub use catalogue::builtin_registry;
pub use definition::{BlockDefinition, RenderContext, RenderFn};
pub use error::{BlockError, BlockResult};
pub use instance::{props, BlockInstance, Props, STYLE_KEY};
pub use node::{RenderNode, RenderedPage};
pub use registry::Registry;
pub use renderer::{render, Renderer};
pub use schema::{FieldKind, SchemaBuilder, SchemaDescriptor, SchemaProperty};
pub use validator::{validate_props, validate_sequence, ValidationLevel, ValidationWarning};

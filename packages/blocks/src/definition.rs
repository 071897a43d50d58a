//! Block definitions: the registered, immutable description of one block kind.

use crate::instance::Props;
use crate::node::RenderNode;
use crate::schema::SchemaDescriptor;
use pagecraft_theme::EffectiveTokens;
use std::fmt;

/// Per-render inputs besides props
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub block_id: &'a str,
    pub tokens: &'a EffectiveTokens,
}

/// Render function of a block kind
pub type RenderFn = fn(&Props, &RenderContext<'_>) -> RenderNode;

#[derive(Clone)]
pub struct BlockDefinition {
    /// Unique registry key
    pub block_type: String,
    pub display_name: String,
    pub category: String,
    pub description: String,
    pub schema: SchemaDescriptor,
    pub default_props: Props,
    pub render: RenderFn,
}

impl BlockDefinition {
    pub fn new(block_type: impl Into<String>, display_name: impl Into<String>, render: RenderFn) -> Self {
        Self {
            block_type: block_type.into(),
            display_name: display_name.into(),
            category: "general".to_string(),
            description: String::new(),
            schema: SchemaDescriptor::default(),
            default_props: Props::new(),
            render,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_schema(mut self, schema: SchemaDescriptor) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_default_props(mut self, default_props: Props) -> Self {
        self.default_props = default_props;
        self
    }

    /// Fresh props for a new instance: a deep copy of the default props,
    /// completed with the schema's required fields
    pub fn instantiate_props(&self) -> Props {
        self.schema.instantiate(&self.default_props)
    }

    pub fn render(&self, props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
        (self.render)(props, ctx)
    }
}

impl fmt::Debug for BlockDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockDefinition")
            .field("block_type", &self.block_type)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .field("schema", &self.schema)
            .field("default_props", &self.default_props)
            .finish_non_exhaustive()
    }
}

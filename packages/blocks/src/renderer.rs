//! # Dynamic Renderer
//!
//! Resolves each block instance's type against the registry and invokes
//! the matching render function. Unknown types render as a visible
//! [`RenderNode::Fallback`]; they are never dropped and never an error.
//!
//! Every resolved block is wrapped in a `section` carrying its id and type,
//! with the reserved `style` props (`padding`, `textAlign`) applied.

use crate::definition::RenderContext;
use crate::instance::BlockInstance;
use crate::node::{RenderNode, RenderedPage};
use crate::registry::Registry;
use pagecraft_theme::EffectiveTokens;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Renders blocks against one registry and one set of resolved tokens
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    registry: &'a Registry,
    tokens: &'a EffectiveTokens,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry, tokens: &'a EffectiveTokens) -> Self {
        Self { registry, tokens }
    }

    /// Render one block
    pub fn render(&self, instance: &BlockInstance) -> RenderNode {
        let Some(definition) = self.registry.lookup(&instance.block_type) else {
            warn!(
                block_id = %instance.id,
                block_type = %instance.block_type,
                "Unknown block type, rendering fallback"
            );
            return RenderNode::fallback(&instance.block_type, &instance.id);
        };

        let ctx = RenderContext {
            block_id: &instance.id,
            tokens: self.tokens,
        };
        let body = definition.render(&instance.props, &ctx);
        debug!(block_id = %instance.id, block_type = %instance.block_type, "Rendered block");

        wrap_block(instance, body)
    }

    /// Render a whole sequence in order, attaching the theme variables
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub fn render_page(&self, blocks: &[BlockInstance]) -> RenderedPage {
        let nodes: Vec<RenderNode> = blocks.iter().map(|block| self.render(block)).collect();
        let variables = self.tokens.css_variables().into_iter().collect();

        let page = RenderedPage { nodes, variables };
        info!(
            nodes = page.nodes.len(),
            fallbacks = page.fallback_count(),
            "Page render complete"
        );
        page
    }
}

/// Render one block with an empty token set
pub fn render(instance: &BlockInstance, registry: &Registry) -> RenderNode {
    let tokens = EffectiveTokens::default();
    Renderer::new(registry, &tokens).render(instance)
}

fn wrap_block(instance: &BlockInstance, body: RenderNode) -> RenderNode {
    let mut section = RenderNode::element("section")
        .with_attr("data-block-id", &instance.id)
        .with_attr("data-block-type", &instance.block_type);

    if let Some(style) = instance.style() {
        if let Some(padding) = style.get("padding").and_then(css_length) {
            section = section.with_style("padding", padding);
        }
        if let Some(align) = style.get("textAlign").and_then(Value::as_str) {
            if matches!(align, "left" | "center" | "right" | "justify") {
                section = section.with_style("text-align", align);
            }
        }
    }

    section.with_child(body)
}

/// Numbers are pixels; non-empty strings pass through
fn css_length(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(format!("{}px", n)),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::BlockDefinition;
    use crate::instance::{props, Props};
    use serde_json::json;

    fn heading(props: &Props, ctx: &RenderContext<'_>) -> RenderNode {
        RenderNode::element("h1")
            .with_attr("id", ctx.block_id)
            .with_child(RenderNode::text(
                props.get("title").and_then(Value::as_str).unwrap_or_default(),
            ))
    }

    fn registry() -> Registry {
        Registry::register(vec![BlockDefinition::new("heading", "Heading", heading)]).unwrap()
    }

    #[test]
    fn test_known_type_is_rendered_and_wrapped() {
        let block = BlockInstance::new("b1", "heading", props(json!({ "title": "Hello" })));
        let node = render(&block, &registry());

        assert_eq!(node.tag(), Some("section"));
        assert_eq!(node.attr("data-block-id"), Some("b1"));
        assert_eq!(node.attr("data-block-type"), Some("heading"));
        assert_eq!(node.children()[0].attr("id"), Some("b1"));
        assert_eq!(node.text_content(), "Hello");
    }

    #[test]
    fn test_unknown_type_renders_fallback() {
        let block = BlockInstance::new("b2", "carousel", Props::new());
        let node = render(&block, &registry());

        match node {
            RenderNode::Fallback {
                block_type,
                block_id,
                ..
            } => {
                assert_eq!(block_type, "carousel");
                assert_eq!(block_id, "b2");
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_style_props_are_applied() {
        let block = BlockInstance::new(
            "b1",
            "heading",
            props(json!({ "title": "x", "style": { "padding": 24, "textAlign": "center" } })),
        );
        let node = render(&block, &registry());
        assert_eq!(node.style("padding"), Some("24px"));
        assert_eq!(node.style("text-align"), Some("center"));
    }

    #[test]
    fn test_invalid_style_values_are_ignored() {
        let block = BlockInstance::new(
            "b1",
            "heading",
            props(json!({ "style": { "padding": "  ", "textAlign": "diagonal" } })),
        );
        let node = render(&block, &registry());
        assert_eq!(node.style("padding"), None);
        assert_eq!(node.style("text-align"), None);
    }

    #[test]
    fn test_render_page_keeps_order_and_fallbacks() {
        let tokens = pagecraft_theme::resolve(
            &pagecraft_theme::presets::classic().tokens,
            &Default::default(),
        );
        let registry = registry();
        let blocks = vec![
            BlockInstance::new("a", "heading", Props::new()),
            BlockInstance::new("b", "missing", Props::new()),
            BlockInstance::new("c", "heading", Props::new()),
        ];

        let page = Renderer::new(&registry, &tokens).render_page(&blocks);
        assert_eq!(page.nodes.len(), 3);
        assert_eq!(page.fallback_count(), 1);
        assert_eq!(page.nodes[2].attr("data-block-id"), Some("c"));
        assert_eq!(
            page.variables.get("--color-primary").map(String::as_str),
            Some("#1f4fd6")
        );
    }
}

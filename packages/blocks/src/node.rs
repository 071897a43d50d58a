use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Renderable node produced by a block's render function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RenderNode {
    /// HTML-like element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<RenderNode>,
    },

    /// Text node
    Text { content: String },

    /// Placeholder for a block whose type is not registered. Shown to the
    /// operator instead of dropping the block.
    Fallback {
        block_type: String,
        block_id: String,
        message: String,
    },
}

impl RenderNode {
    pub fn element(tag: impl Into<String>) -> Self {
        RenderNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        RenderNode::Text {
            content: content.into(),
        }
    }

    pub fn fallback(block_type: impl Into<String>, block_id: impl Into<String>) -> Self {
        let block_type = block_type.into();
        RenderNode::Fallback {
            message: format!("Unknown block type \"{}\"", block_type),
            block_type,
            block_id: block_id.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let RenderNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = RenderNode>) -> Self {
        if let RenderNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            RenderNode::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            RenderNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            RenderNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderNode::Fallback { .. })
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            RenderNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            RenderNode::Text { content } => out.push_str(content),
            RenderNode::Fallback { message, .. } => out.push_str(message),
        }
    }

    /// Depth-first search for the first element with `tag`
    pub fn find_tag(&self, tag: &str) -> Option<&RenderNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_tag(tag))
    }
}

/// A fully rendered page: block nodes in sequence order plus the theme's
/// CSS custom properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedPage {
    pub nodes: Vec<RenderNode>,
    pub variables: BTreeMap<String, String>,
}

impl RenderedPage {
    pub fn fallback_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_fallback()).count()
    }
}

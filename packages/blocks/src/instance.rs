//! Block instances: one positioned occurrence of a block on a page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Props of a block instance. Shape comes from the block's schema but is
/// not enforced here.
pub type Props = Map<String, Value>;

/// Reserved props key holding the schema-independent style fields
pub const STYLE_KEY: &str = "style";

/// Turn a JSON value into props; anything but an object yields empty props
pub fn props(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

/// Persisted unit of composition: `{id, type, props}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub props: Props,
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            props,
        }
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// The reserved style object, if present and well-formed
    pub fn style(&self) -> Option<&Map<String, Value>> {
        self.props.get(STYLE_KEY).and_then(Value::as_object)
    }
}

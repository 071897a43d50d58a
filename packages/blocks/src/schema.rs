//! # Schema Descriptors
//!
//! Field-level metadata for a block's props, in a JSON-Schema-like shape:
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": {
//!     "title": { "type": "string", "title": "Title" },
//!     "align": { "type": "string", "enum": ["left", "center", "right"] }
//!   },
//!   "required": ["title"]
//! }
//! ```
//!
//! Only `type`, `enum`, `title`, `default` and `required` are read. Every
//! other keyword is accepted and ignored. Descriptors drive form
//! generation and default instantiation; they are not a validator.

use crate::error::{BlockError, BlockResult};
use crate::instance::Props;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared kind of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    /// Any `type` outside the interpreted set, kept verbatim
    Other(String),
}

impl FieldKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "integer" => FieldKind::Integer,
            "boolean" => FieldKind::Boolean,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            other => FieldKind::Other(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Other(name) => name,
        }
    }

    /// Value used when a required field has no declared default
    pub fn zero_value(&self) -> Value {
        match self {
            FieldKind::String => Value::String(String::new()),
            FieldKind::Number | FieldKind::Integer => Value::from(0),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Array => Value::Array(Vec::new()),
            FieldKind::Object => Value::Object(Map::new()),
            FieldKind::Other(_) => Value::Null,
        }
    }

    /// Whether `value` has the JSON shape this kind declares
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|n| n.fract() == 0.0)
            }
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Other(_) => true,
        }
    }
}

/// One editable field
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub name: String,
    pub kind: FieldKind,
    /// Closed set of allowed values, when declared
    pub enum_values: Option<Vec<Value>>,
    /// Human-readable label
    pub title: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
}

impl SchemaProperty {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enum_values: None,
            title: None,
            default: None,
            required: false,
        }
    }

    /// Label shown next to the field: the declared title, or the field
    /// name split at camelCase boundaries
    pub fn label(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        let mut label = String::with_capacity(self.name.len() + 4);
        for (i, ch) in self.name.chars().enumerate() {
            if i == 0 {
                label.extend(ch.to_uppercase());
            } else if ch.is_uppercase() {
                label.push(' ');
                label.extend(ch.to_lowercase());
            } else if ch == '_' || ch == '-' {
                label.push(' ');
            } else {
                label.push(ch);
            }
        }
        label
    }

    /// Default for instantiation: declared default, first enum value, or
    /// the kind's zero value
    pub fn initial_value(&self) -> Value {
        if let Some(default) = &self.default {
            return default.clone();
        }
        if let Some(first) = self.enum_values.as_ref().and_then(|values| values.first()) {
            return first.clone();
        }
        self.kind.zero_value()
    }

    fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::String(self.kind.type_name().to_string()));
        if let Some(values) = &self.enum_values {
            out.insert("enum".to_string(), Value::Array(values.clone()));
        }
        if let Some(title) = &self.title {
            out.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".to_string(), default.clone());
        }
        Value::Object(out)
    }

    fn from_json(name: &str, value: &Value) -> BlockResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            BlockError::InvalidSchema(format!("property '{}' must be an object", name))
        })?;

        // `"type": ["string", "null"]` is read as its first non-null entry
        let kind = match obj.get("type") {
            Some(Value::String(name)) => FieldKind::from_type_name(name),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null")
                .map(FieldKind::from_type_name)
                .unwrap_or_else(|| FieldKind::Other(String::new())),
            _ => FieldKind::Other(String::new()),
        };

        let enum_values = match obj.get("enum") {
            Some(Value::Array(values)) => Some(values.clone()),
            Some(_) => {
                return Err(BlockError::InvalidSchema(format!(
                    "enum of '{}' must be an array",
                    name
                )))
            }
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            kind,
            enum_values,
            title: obj.get("title").and_then(Value::as_str).map(str::to_string),
            default: obj.get("default").cloned(),
            required: false,
        })
    }
}

/// Editable-field tree of one block kind
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct SchemaDescriptor {
    properties: Vec<SchemaProperty>,
}

impl SchemaDescriptor {
    pub fn new(properties: Vec<SchemaProperty>) -> Self {
        Self { properties }
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            properties: Vec::new(),
        }
    }

    /// Parse the JSON-Schema-like descriptor shape
    pub fn from_json(value: &Value) -> BlockResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| BlockError::InvalidSchema("schema must be an object".to_string()))?;

        let mut properties = match obj.get("properties") {
            Some(Value::Object(props)) => props
                .iter()
                .map(|(name, prop)| SchemaProperty::from_json(name, prop))
                .collect::<BlockResult<Vec<_>>>()?,
            Some(_) => {
                return Err(BlockError::InvalidSchema(
                    "properties must be an object".to_string(),
                ))
            }
            None => Vec::new(),
        };

        if let Some(Value::Array(required)) = obj.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if let Some(prop) = properties.iter_mut().find(|p| p.name == name) {
                    prop.required = true;
                }
            }
        }

        Ok(Self { properties })
    }

    pub fn to_json(&self) -> Value {
        let mut props = Map::new();
        for prop in &self.properties {
            props.insert(prop.name.clone(), prop.to_json());
        }

        let mut out = Map::new();
        out.insert("type".to_string(), Value::String("object".to_string()));
        out.insert("properties".to_string(), Value::Object(props));

        let required: Vec<Value> = self
            .properties
            .iter()
            .filter(|p| p.required)
            .map(|p| Value::String(p.name.clone()))
            .collect();
        if !required.is_empty() {
            out.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(out)
    }

    pub fn properties(&self) -> &[SchemaProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Copy of `base` with every missing required field filled in.
    /// Keys in `base` that the schema does not declare are kept.
    pub fn instantiate(&self, base: &Props) -> Props {
        let mut props = base.clone();
        for prop in self.properties.iter().filter(|p| p.required) {
            if !props.contains_key(&prop.name) {
                props.insert(prop.name.clone(), prop.initial_value());
            }
        }
        props
    }
}

impl TryFrom<Value> for SchemaDescriptor {
    type Error = BlockError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        SchemaDescriptor::from_json(&value)
    }
}

impl From<SchemaDescriptor> for Value {
    fn from(schema: SchemaDescriptor) -> Self {
        schema.to_json()
    }
}

/// Fluent construction of descriptors for built-in blocks.
///
/// Modifiers (`required`, `titled`, `default_value`) apply to the most recently
/// added field.
#[derive(Debug)]
pub struct SchemaBuilder {
    properties: Vec<SchemaProperty>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.properties.push(SchemaProperty::new(name, kind));
        self
    }

    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::String)
    }

    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Number)
    }

    pub fn integer(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Integer)
    }

    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Boolean)
    }

    pub fn array(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Array)
    }

    pub fn object(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Object)
    }

    /// String field restricted to `values`
    pub fn enumeration<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prop = SchemaProperty::new(name, FieldKind::String);
        prop.enum_values = Some(values.into_iter().map(|v| Value::String(v.into())).collect());
        self.properties.push(prop);
        self
    }

    pub fn required(mut self) -> Self {
        if let Some(last) = self.properties.last_mut() {
            last.required = true;
        }
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        if let Some(last) = self.properties.last_mut() {
            last.title = Some(title.into());
        }
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        if let Some(last) = self.properties.last_mut() {
            last.default = Some(value.into());
        }
        self
    }

    pub fn build(self) -> SchemaDescriptor {
        SchemaDescriptor {
            properties: self.properties,
        }
    }
}

//! # Property Inspector
//!
//! Turns a block's schema into form fields and form input back into props.
//!
//! | Declared        | Widget       | Stored as                                   |
//! |-----------------|--------------|---------------------------------------------|
//! | has `enum`      | `Choice`     | the matching enum value, `""` when unset    |
//! | `string`        | `Text`       | the text                                    |
//! | `number`        | `Numeric`    | a JSON number, `null` when not a number     |
//! | `integer`       | `Numeric`    | a JSON integer, fractions truncated         |
//! | `boolean`       | `Toggle`     | a JSON boolean                              |
//! | anything else   | `Structured` | parsed JSON, or the raw text if unparseable |
//!
//! Edits never fail. Every edit returns a complete new props object with
//! the one field replaced and every other key, declared or not, kept.

use pagecraft_blocks::{
    validate_props, BlockDefinition, BlockInstance, FieldKind, Props, SchemaDescriptor,
    SchemaProperty, ValidationWarning, STYLE_KEY,
};
use serde_json::{Map, Number, Value};

/// Alignments offered by the style panel
pub const TEXT_ALIGNMENTS: [&str; 4] = ["left", "center", "right", "justify"];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Closed choice over `options`, plus the empty "unset" entry
    Choice { options: Vec<Value> },
    Text,
    Numeric { integer: bool },
    Toggle,
    /// Raw JSON text editor
    Structured,
}

/// One generated form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub widget: FieldWidget,
    pub required: bool,
}

/// What a form control hands back on change
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

/// A field ready to display: a `FieldSpec` plus the current value in the
/// control's own terms
#[derive(Debug, Clone, PartialEq)]
pub struct FieldControl {
    pub name: String,
    pub label: String,
    pub widget: FieldWidget,
    pub required: bool,
    pub value: FieldInput,
    /// Choice entries as displayed, the unset entry `""` first. Empty for
    /// every other widget.
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn from_property(property: &SchemaProperty) -> Self {
        let widget = match (&property.enum_values, &property.kind) {
            (Some(values), _) => FieldWidget::Choice {
                options: values.clone(),
            },
            (None, FieldKind::String) => FieldWidget::Text,
            (None, FieldKind::Number) => FieldWidget::Numeric { integer: false },
            (None, FieldKind::Integer) => FieldWidget::Numeric { integer: true },
            (None, FieldKind::Boolean) => FieldWidget::Toggle,
            (None, FieldKind::Array | FieldKind::Object | FieldKind::Other(_)) => {
                FieldWidget::Structured
            }
        };

        Self {
            name: property.name.clone(),
            label: property.label(),
            kind: property.kind.clone(),
            widget,
            required: property.required,
        }
    }

    /// Convert control input into the value stored in props
    pub fn coerce(&self, input: FieldInput) -> Value {
        match &self.widget {
            FieldWidget::Choice { options } => match input {
                FieldInput::Text(text) if text.is_empty() => Value::String(String::new()),
                FieldInput::Text(text) => options
                    .iter()
                    .find(|option| display_text(option) == text)
                    .cloned()
                    .unwrap_or(Value::String(text)),
                FieldInput::Checked(checked) => options
                    .iter()
                    .find(|option| option.as_bool() == Some(checked))
                    .cloned()
                    .unwrap_or(Value::String(String::new())),
            },
            FieldWidget::Text => match input {
                FieldInput::Text(text) => Value::String(text),
                FieldInput::Checked(checked) => Value::String(checked.to_string()),
            },
            FieldWidget::Numeric { integer } => match input {
                FieldInput::Text(text) => parse_number(&text, *integer),
                FieldInput::Checked(_) => Value::Null,
            },
            FieldWidget::Toggle => match input {
                FieldInput::Checked(checked) => Value::Bool(checked),
                FieldInput::Text(text) => {
                    Value::Bool(matches!(text.trim(), "true" | "on" | "1"))
                }
            },
            FieldWidget::Structured => match input {
                FieldInput::Text(text) => {
                    serde_json::from_str(&text).unwrap_or(Value::String(text))
                }
                FieldInput::Checked(checked) => Value::Bool(checked),
            },
        }
    }
}

/// Fields for every declared property, in schema order
pub fn generate_fields(schema: &SchemaDescriptor) -> Vec<FieldSpec> {
    schema.properties().iter().map(FieldSpec::from_property).collect()
}

/// The schema-independent style fields stored under `props.style`
pub fn style_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "padding".to_string(),
            label: "Padding".to_string(),
            kind: FieldKind::String,
            widget: FieldWidget::Text,
            required: false,
        },
        FieldSpec {
            name: "textAlign".to_string(),
            label: "Text alignment".to_string(),
            kind: FieldKind::String,
            widget: FieldWidget::Choice {
                options: TEXT_ALIGNMENTS.iter().map(|a| Value::from(*a)).collect(),
            },
            required: false,
        },
    ]
}

/// Describe the control for `spec` showing `current`
pub fn render_field(spec: &FieldSpec, current: Option<&Value>) -> FieldControl {
    let current = current.unwrap_or(&Value::Null);

    let value = match &spec.widget {
        FieldWidget::Toggle => FieldInput::Checked(current.as_bool().unwrap_or(false)),
        FieldWidget::Structured => FieldInput::Text(match current {
            Value::Null => String::new(),
            // Unparseable text kept from an earlier edit
            Value::String(raw) => raw.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }),
        FieldWidget::Choice { .. } | FieldWidget::Text | FieldWidget::Numeric { .. } => {
            FieldInput::Text(display_text(current))
        }
    };

    let options = match &spec.widget {
        FieldWidget::Choice { options } => std::iter::once(String::new())
            .chain(options.iter().map(display_text))
            .collect(),
        _ => Vec::new(),
    };

    FieldControl {
        name: spec.name.clone(),
        label: spec.label.clone(),
        widget: spec.widget.clone(),
        required: spec.required,
        value,
        options,
    }
}

/// Everything the inspector panel shows for one selected block
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub block_id: String,
    pub block_type: String,
    /// Empty when the block's type is not registered
    pub fields: Vec<FieldControl>,
    pub style: Vec<FieldControl>,
    pub warnings: Vec<ValidationWarning>,
}

/// Build the panel for `block`. Without a definition only the style
/// fields are offered.
pub fn inspect(block: &BlockInstance, definition: Option<&BlockDefinition>) -> Inspection {
    let (fields, warnings) = match definition {
        Some(def) => (
            generate_fields(&def.schema)
                .iter()
                .map(|spec| render_field(spec, block.props.get(&spec.name)))
                .collect(),
            validate_props(&def.schema, &block.props),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let style = style_fields()
        .iter()
        .map(|spec| render_field(spec, block.style().and_then(|s| s.get(&spec.name))))
        .collect();

    Inspection {
        block_id: block.id.clone(),
        block_type: block.block_type.clone(),
        fields,
        style,
        warnings,
    }
}

/// New props with `spec`'s field set from `input`
pub fn apply_edit(props: &Props, spec: &FieldSpec, input: FieldInput) -> Props {
    let mut next = props.clone();
    next.insert(spec.name.clone(), spec.coerce(input));
    next
}

/// New props with one style field set. A missing or malformed `style`
/// value is replaced by an object.
pub fn apply_style_edit(props: &Props, spec: &FieldSpec, input: FieldInput) -> Props {
    let mut style = props
        .get(STYLE_KEY)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_else(Map::new);
    style.insert(spec.name.clone(), spec.coerce(input));

    let mut next = props.clone();
    next.insert(STYLE_KEY.to_string(), Value::Object(style));
    next
}

fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_number(text: &str, integer: bool) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::Null;
    }

    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => {
            if integer {
                let truncated = f.trunc();
                if truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                    Value::from(truncated as i64)
                } else {
                    Value::Null
                }
            } else {
                Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        _ => Value::Null,
    }
}

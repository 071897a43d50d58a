/// Advisory checks on block props and block sequences. Nothing here blocks
/// an edit; warnings are surfaced next to the offending field.
use crate::instance::{BlockInstance, Props};
use crate::registry::Registry;
use crate::schema::SchemaDescriptor;
use serde_json::Value;
use std::collections::HashSet;

/// Validation warning level
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Worth fixing, renders fine
    Warning,
    /// Will render incorrectly or not at all
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    pub block_id: Option<String>,
    pub field: Option<String>,
}

impl ValidationWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            block_id: None,
            field: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            block_id: None,
            field: None,
        }
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Check props against the schema's declared kinds, enums and required
/// fields. Undeclared keys are not reported.
pub fn validate_props(schema: &SchemaDescriptor, props: &Props) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for prop in schema.properties() {
        let value = match props.get(&prop.name) {
            None | Some(Value::Null) => {
                if prop.required {
                    warnings.push(
                        ValidationWarning::error(format!("'{}' is required", prop.label()))
                            .with_field(&prop.name),
                    );
                }
                continue;
            }
            Some(value) => value,
        };

        if let Some(allowed) = &prop.enum_values {
            // The empty string is the form's "unset" choice
            let unset = value.as_str() == Some("");
            if !unset && !allowed.contains(value) {
                warnings.push(
                    ValidationWarning::warning(format!(
                        "'{}' must be one of {}",
                        prop.label(),
                        allowed
                            .iter()
                            .map(|v| v.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                    .with_field(&prop.name),
                );
            }
            continue;
        }

        if !prop.kind.accepts(value) {
            warnings.push(
                ValidationWarning::warning(format!(
                    "'{}' should be a {}",
                    prop.label(),
                    prop.kind.type_name()
                ))
                .with_field(&prop.name),
            );
        }
    }

    warnings
}

/// Check a whole sequence: duplicate ids, unregistered types, and every
/// block's props against its schema
pub fn validate_sequence(registry: &Registry, blocks: &[BlockInstance]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for block in blocks {
        if !seen.insert(block.id.as_str()) {
            warnings.push(
                ValidationWarning::error(format!("Duplicate block id '{}'", block.id))
                    .with_block_id(&block.id),
            );
        }

        match registry.lookup(&block.block_type) {
            Some(def) => warnings.extend(
                validate_props(&def.schema, &block.props)
                    .into_iter()
                    .map(|w| w.with_block_id(&block.id)),
            ),
            None => warnings.push(
                ValidationWarning::warning(format!(
                    "Block type '{}' is not registered",
                    block.block_type
                ))
                .with_block_id(&block.id),
            ),
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::builtin_registry;
    use crate::instance::props;
    use serde_json::json;

    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::builder()
            .string("title")
            .required()
            .integer("columns")
            .enumeration("align", ["left", "center"])
            .build()
    }

    #[test]
    fn test_valid_props_produce_no_warnings() {
        let warnings = validate_props(
            &schema(),
            &props(json!({ "title": "x", "columns": 2, "align": "left", "style": {} })),
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_missing_required_is_an_error() {
        let warnings = validate_props(&schema(), &props(json!({ "title": null })));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Error);
        assert_eq!(warnings[0].field.as_deref(), Some("title"));
    }

    #[test]
    fn test_kind_and_enum_mismatches_warn() {
        let warnings = validate_props(
            &schema(),
            &props(json!({ "title": "x", "columns": "three", "align": "diagonal" })),
        );
        let fields: Vec<_> = warnings.iter().filter_map(|w| w.field.as_deref()).collect();
        assert_eq!(fields, vec!["columns", "align"]);
        assert!(warnings.iter().all(|w| w.level == ValidationLevel::Warning));
    }

    #[test]
    fn test_enum_unset_sentinel_is_accepted() {
        let warnings = validate_props(&schema(), &props(json!({ "title": "x", "align": "" })));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_sequence_checks() {
        let registry = builtin_registry().unwrap();
        let blocks = vec![
            BlockInstance::new("a", "spacer", props(json!({ "height": 10 }))),
            BlockInstance::new("a", "spacer", props(json!({ "height": 10 }))),
            BlockInstance::new("b", "carousel", Props::new()),
        ];

        let warnings = validate_sequence(&registry, &blocks);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("Duplicate"));
        assert_eq!(warnings[1].block_id.as_deref(), Some("b"));
    }
}

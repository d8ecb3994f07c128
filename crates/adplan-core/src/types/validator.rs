//! Value validation against schemas

use super::schema::{FieldType, Schema};
use serde_json::Value;
use thiserror::Error;

/// Validation error
///
/// `field` is a dotted path from the validated root, e.g. `[0].market.iso`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Type mismatch
    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Required field missing
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    /// Unknown field
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    /// Value outside the allowed enum set
    #[error("Invalid value '{value}' for field '{field}', allowed: {allowed}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: String,
    },

    /// Array length outside bounds
    #[error("Field '{field}' has {len} items, expected {expected}")]
    ArrayLength {
        field: String,
        len: usize,
        expected: String,
    },
}

/// Validator for values against schemas
pub struct Validator {
    /// Whether to allow unknown fields
    allow_unknown_fields: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            allow_unknown_fields: false,
        }
    }

    /// Allow unknown fields in validation
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Validate an object value against a schema
    pub fn validate(&self, value: &Value, schema: &Schema) -> Result<(), Vec<ValidationError>> {
        self.validate_type(value, &FieldType::object(schema.clone()))
    }

    /// Validate any value against a field type
    pub fn validate_type(&self, value: &Value, field_type: &FieldType) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        self.check(value, field_type, "", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check(&self, value: &Value, field_type: &FieldType, path: &str, errors: &mut Vec<ValidationError>) {
        match field_type {
            FieldType::Boolean => {
                if !value.is_boolean() {
                    errors.push(mismatch(path, field_type, value));
                }
            }
            FieldType::Number => {
                if !value.is_number() {
                    errors.push(mismatch(path, field_type, value));
                }
            }
            FieldType::String => {
                if !value.is_string() {
                    errors.push(mismatch(path, field_type, value));
                }
            }
            FieldType::Enum { values } => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => {}
                Some(s) => errors.push(ValidationError::InvalidEnumValue {
                    field: display_path(path),
                    value: s.to_string(),
                    allowed: values.join(", "),
                }),
                None => errors.push(mismatch(path, field_type, value)),
            },
            FieldType::Array {
                item_type,
                min_items,
                max_items,
            } => {
                let Some(items) = value.as_array() else {
                    errors.push(mismatch(path, field_type, value));
                    return;
                };
                let too_few = min_items.map_or(false, |min| items.len() < min);
                let too_many = max_items.map_or(false, |max| items.len() > max);
                if too_few || too_many {
                    errors.push(ValidationError::ArrayLength {
                        field: display_path(path),
                        len: items.len(),
                        expected: bounds_label(*min_items, *max_items),
                    });
                }
                for (index, item) in items.iter().enumerate() {
                    self.check(item, item_type, &format!("{}[{}]", path, index), errors);
                }
            }
            FieldType::Object { schema } => {
                let Some(obj) = value.as_object() else {
                    errors.push(mismatch(path, field_type, value));
                    return;
                };

                // Check required fields; an explicit null counts as missing
                for field in schema.fields.iter().filter(|f| f.required) {
                    if obj.get(&field.name).map_or(true, Value::is_null) {
                        errors.push(ValidationError::RequiredFieldMissing {
                            field: join(path, &field.name),
                        });
                    }
                }

                for (name, field_value) in obj {
                    match schema.get_field(name) {
                        Some(_) if field_value.is_null() => {}
                        Some(field) => {
                            self.check(field_value, &field.field_type, &join(path, name), errors)
                        }
                        None if !self.allow_unknown_fields => {
                            errors.push(ValidationError::UnknownField {
                                field: join(path, name),
                            });
                        }
                        None => {}
                    }
                }
            }
        }
    }
}

fn mismatch(path: &str, expected: &FieldType, actual: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field: display_path(path),
        expected: expected.type_name().to_string(),
        actual: value_type_name(actual).to_string(),
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "root".to_string()
    } else {
        path.to_string()
    }
}

fn bounds_label(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => format!("exactly {}", min),
        (Some(min), Some(max)) => format!("{}..={}", min, max),
        (Some(min), None) => format!("at least {}", min),
        (None, Some(max)) => format!("at most {}", max),
        (None, None) => "any".to_string(),
    }
}

/// JSON type name of a value
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::schema::SchemaField;
    use serde_json::json;

    fn summary_schema() -> Schema {
        let market = Schema::new("Market")
            .add_field(SchemaField::new("name", FieldType::String).required())
            .add_field(SchemaField::new("iso", FieldType::String).required());
        Schema::new("Summary")
            .add_field(SchemaField::new("id", FieldType::String).required())
            .add_field(
                SchemaField::new("channel", FieldType::enumeration(["Google", "Meta", "TikTok"]))
                    .required(),
            )
            .add_field(SchemaField::new("market", FieldType::object(market)).required())
            .add_field(
                SchemaField::new("languages", FieldType::bounded_array(FieldType::String, 1, 1))
                    .required(),
            )
    }

    #[test]
    fn test_valid_object() {
        let value = json!({
            "id": "c1",
            "channel": "Google",
            "market": { "name": "France", "iso": "FR" },
            "languages": ["fr"]
        });
        assert!(Validator::new().validate(&value, &summary_schema()).is_ok());
    }

    #[test]
    fn test_required_field_missing_and_null() {
        let value = json!({
            "channel": "Google",
            "market": { "name": "France", "iso": null },
            "languages": ["fr"]
        });
        let errors = Validator::new().validate(&value, &summary_schema()).unwrap_err();
        assert!(errors.contains(&ValidationError::RequiredFieldMissing { field: "id".into() }));
        assert!(errors.contains(&ValidationError::RequiredFieldMissing {
            field: "market.iso".into()
        }));
    }

    #[test]
    fn test_enum_violation() {
        let value = json!({
            "id": "c1",
            "channel": "Bing",
            "market": { "name": "France", "iso": "FR" },
            "languages": ["fr"]
        });
        let errors = Validator::new().validate(&value, &summary_schema()).unwrap_err();
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidEnumValue { field, value, .. } if field == "channel" && value == "Bing"
        ));
    }

    #[test]
    fn test_array_cardinality() {
        let value = json!({
            "id": "c1",
            "channel": "Meta",
            "market": { "name": "France", "iso": "FR" },
            "languages": ["fr", "en"]
        });
        let errors = Validator::new().validate(&value, &summary_schema()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ArrayLength {
                field: "languages".into(),
                len: 2,
                expected: "exactly 1".into(),
            }]
        );
    }

    #[test]
    fn test_unknown_fields() {
        let value = json!({
            "id": "c1",
            "channel": "Meta",
            "market": { "name": "France", "iso": "FR" },
            "languages": ["fr"],
            "budget": 500
        });
        let strict = Validator::new().validate(&value, &summary_schema());
        assert_eq!(
            strict.unwrap_err(),
            vec![ValidationError::UnknownField { field: "budget".into() }]
        );

        let lenient = Validator::new()
            .allow_unknown_fields(true)
            .validate(&value, &summary_schema());
        assert!(lenient.is_ok());
    }

    #[test]
    fn test_nested_array_paths() {
        let plan = FieldType::array(FieldType::object(summary_schema()));
        let value = json!([
            { "id": "c1", "channel": "Meta", "market": { "name": "France", "iso": "FR" }, "languages": ["fr"] },
            { "id": "c2", "channel": "Meta", "market": { "name": "Spain", "iso": 34 }, "languages": ["es"] }
        ]);
        let errors = Validator::new().validate_type(&value, &plan).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TypeMismatch {
                field: "[1].market.iso".into(),
                expected: "string".into(),
                actual: "number".into(),
            }]
        );
    }

    #[test]
    fn test_root_type_mismatch() {
        let errors = Validator::new()
            .validate(&json!("not an object"), &summary_schema())
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("root"));
    }
}

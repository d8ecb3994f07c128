//! Response schema definitions
//!
//! A schema is defined once and used twice: rendered into the provider's
//! structured-output format for the request, and fed to the [`Validator`] to
//! check the parsed response.
//!
//! [`Validator`]: super::validator::Validator

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// An object schema: ordered fields with types and requiredness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name
    pub name: String,

    /// Schema description
    pub description: Option<String>,

    /// Fields in declaration order
    pub fields: Vec<SchemaField>,
}

/// A field in a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,

    /// Field type
    pub field_type: FieldType,

    /// Whether this field is required
    #[serde(default)]
    pub required: bool,

    /// Optional description, forwarded to the provider
    pub description: Option<String>,
}

/// Field type enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Boolean type
    Boolean,

    /// Number type (int or float)
    Number,

    /// String type
    String,

    /// String restricted to a fixed set of values
    Enum {
        /// Allowed values
        values: Vec<String>,
    },

    /// Array type
    Array {
        /// Type of array elements
        item_type: Box<FieldType>,
        /// Minimum number of items
        min_items: Option<usize>,
        /// Maximum number of items
        max_items: Option<usize>,
    },

    /// Object type with a nested schema
    Object {
        /// Schema for the object
        schema: Box<Schema>,
    },
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a field, replacing any field with the same name
    pub fn add_field(mut self, field: SchemaField) -> Self {
        self.fields.retain(|f| f.name != field.name);
        self.fields.push(field);
        self
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if a field is required
    pub fn is_required(&self, name: &str) -> bool {
        self.get_field(name).map(|f| f.required).unwrap_or(false)
    }

    /// Whether objects of this schema must carry an `id`
    pub fn requires_id(&self) -> bool {
        self.get_field("id")
            .map(|f| f.required && f.field_type == FieldType::String)
            .unwrap_or(false)
    }

    /// Render in the provider's structured-output format
    pub fn to_provider_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut rendered = field.field_type.to_provider_schema();
            if let (Some(description), Value::Object(map)) = (&field.description, &mut rendered) {
                map.insert("description".to_string(), json!(description));
            }
            properties.insert(field.name.clone(), rendered);
        }

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        let ordering: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();

        let mut schema = json!({
            "type": "OBJECT",
            "properties": properties,
            "propertyOrdering": ordering,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        if let Some(description) = &self.description {
            schema["description"] = json!(description);
        }
        schema
    }
}

impl SchemaField {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            description: None,
        }
    }

    /// Mark field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl FieldType {
    /// Create an array type
    pub fn array(item_type: FieldType) -> Self {
        FieldType::Array {
            item_type: Box::new(item_type),
            min_items: None,
            max_items: None,
        }
    }

    /// Create an array type with cardinality bounds
    pub fn bounded_array(item_type: FieldType, min_items: usize, max_items: usize) -> Self {
        FieldType::Array {
            item_type: Box::new(item_type),
            min_items: Some(min_items),
            max_items: Some(max_items),
        }
    }

    /// Create an array type with a minimum length
    pub fn array_min(item_type: FieldType, min_items: usize) -> Self {
        FieldType::Array {
            item_type: Box::new(item_type),
            min_items: Some(min_items),
            max_items: None,
        }
    }

    /// Create an enum type
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldType::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an object type with schema
    pub fn object(schema: Schema) -> Self {
        FieldType::Object {
            schema: Box::new(schema),
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Enum { .. } => "enum",
            FieldType::Array { .. } => "array",
            FieldType::Object { .. } => "object",
        }
    }

    /// Render in the provider's structured-output format
    pub fn to_provider_schema(&self) -> Value {
        match self {
            FieldType::Boolean => json!({ "type": "BOOLEAN" }),
            FieldType::Number => json!({ "type": "NUMBER" }),
            FieldType::String => json!({ "type": "STRING" }),
            FieldType::Enum { values } => json!({ "type": "STRING", "enum": values }),
            FieldType::Array {
                item_type,
                min_items,
                max_items,
            } => {
                let mut schema = json!({
                    "type": "ARRAY",
                    "items": item_type.to_provider_schema(),
                });
                if let Some(min) = min_items {
                    schema["minItems"] = json!(min.to_string());
                }
                if let Some(max) = max_items {
                    schema["maxItems"] = json!(max.to_string());
                }
                schema
            }
            FieldType::Object { schema } => schema.to_provider_schema(),
        }
    }
}

//! Identifier repair
//!
//! Models do not reliably emit ids. Every object whose schema requires a string
//! `id` gets a fresh UUID v4 when the id is missing, null or blank.

use adplan_core::types::FieldType;
use serde_json::Value;
use uuid::Uuid;

/// Assign missing ids in place, returning how many were assigned
pub fn assign_missing_ids(value: &mut Value, field_type: &FieldType) -> usize {
    match (field_type, value) {
        (FieldType::Array { item_type, .. }, Value::Array(items)) => items
            .iter_mut()
            .map(|item| assign_missing_ids(item, item_type))
            .sum(),
        (FieldType::Object { schema }, Value::Object(map)) => {
            let mut assigned = 0;
            if schema.requires_id() {
                let missing = match map.get("id") {
                    None | Some(Value::Null) => true,
                    Some(Value::String(id)) => id.trim().is_empty(),
                    Some(_) => false,
                };
                if missing {
                    map.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
                    assigned += 1;
                }
            }
            for field in &schema.fields {
                if let Some(child) = map.get_mut(&field.name) {
                    assigned += assign_missing_ids(child, &field.field_type);
                }
            }
            assigned
        }
        _ => 0,
    }
}

//! Rewriting `x-nullable` vendor markers into standard JSON Schema nullability.

use serde_json::{Map, Value};

use crate::types::{NULL_TYPE, X_NULLABLE};

/// Normalize vendor nullability in a dereferenced schema fragment.
///
/// - In object fragments, every property marked `x-nullable: true` gets
///   `"null"` added to its `type`; every property is then normalized in turn.
/// - In array fragments, `items` is normalized.
/// - Every `enum` gets a `null` member if it has none.
///
/// The marker itself is left in place (see [`strip_vendor_extensions`]).
/// Running this twice yields the same result as running it once.
pub fn normalize_nullable(schema: &Value) -> Value {
    let mut result = schema.clone();
    if let Value::Object(map) = &mut result {
        normalize_object(map);
    }
    result
}

/// Add `"null"` to a fragment's `type`, coercing a scalar type into a list.
///
/// A fragment with no `type` is left alone since it already admits null.
pub fn add_null_type(fragment: &mut Map<String, Value>) {
    let types = match fragment.get("type") {
        Some(Value::String(t)) => vec![Value::String(t.clone())],
        Some(Value::Array(types)) => types.clone(),
        _ => return,
    };
    fragment.insert("type".to_string(), Value::Array(with_null(types)));
}

/// Returns true if the fragment's `type` is, or includes, `name`.
pub fn type_includes(fragment: &Map<String, Value>, name: &str) -> bool {
    match fragment.get("type") {
        Some(Value::String(t)) => t == name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
        _ => false,
    }
}

/// Recursively remove `x-nullable` markers once they have been applied.
///
/// Only schema keywords are stripped. Property names and instance values
/// (`example`, `default`, `enum`) are copied as they are, even when they
/// contain an `x-nullable` key.
pub fn strip_vendor_extensions(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut result = Map::new();
            for (key, value) in map {
                if key == X_NULLABLE {
                    continue;
                }
                let value = match key.as_str() {
                    // Maps from names to schemas
                    "properties" | "patternProperties" | "definitions" => strip_schema_map(value),
                    // Single schema, or a list of schemas for tuple `items`
                    "items" | "additionalProperties" | "not" => strip_vendor_extensions(value),
                    "allOf" | "anyOf" | "oneOf" => strip_schema_list(value),
                    _ => value.clone(),
                };
                result.insert(key.clone(), value);
            }
            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(strip_vendor_extensions).collect()),
        other => other.clone(),
    }
}

// --- Internal implementation ---

fn normalize_object(fragment: &mut Map<String, Value>) {
    if type_includes(fragment, "object") {
        if let Some(Value::Object(props)) = fragment.get_mut("properties") {
            for prop in props.values_mut() {
                if let Value::Object(prop_map) = prop {
                    if is_marked_nullable(prop_map) {
                        add_null_type(prop_map);
                    }
                    normalize_object(prop_map);
                }
            }
        }
    } else if type_includes(fragment, "array") {
        if let Some(Value::Object(items)) = fragment.get_mut("items") {
            normalize_object(items);
        }
    }

    if let Some(Value::Array(values)) = fragment.get_mut("enum") {
        if !values.contains(&Value::Null) {
            values.push(Value::Null);
        }
    }
}

fn strip_schema_map(value: &Value) -> Value {
    match value {
        Value::Object(schemas) => Value::Object(
            schemas
                .iter()
                .map(|(name, schema)| (name.clone(), strip_vendor_extensions(schema)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn strip_schema_list(value: &Value) -> Value {
    match value {
        Value::Array(schemas) => Value::Array(schemas.iter().map(strip_vendor_extensions).collect()),
        other => other.clone(),
    }
}

fn is_marked_nullable(fragment: &Map<String, Value>) -> bool {
    fragment.get(X_NULLABLE).and_then(Value::as_bool).unwrap_or(false)
}

fn with_null(mut types: Vec<Value>) -> Vec<Value> {
    if !types.iter().any(|t| t.as_str() == Some(NULL_TYPE)) {
        types.push(Value::String(NULL_TYPE.to_string()));
    }
    types
}

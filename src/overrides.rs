//! Per-resource schema overrides applied after nullable normalization.
//!
//! Two layers run in a fixed order:
//!
//! 1. the resource's static list of fields that are nullable at runtime,
//! 2. the resource's structural patch, if any.
//!
//! A patch therefore sees, and may replace, whatever the static list set.

use serde_json::{Map, Value};

use crate::error::OverrideError;
use crate::nullable::add_null_type;
use crate::resource::ResourceDefinition;

/// A hand-written correction for known inaccuracies in a resource's schema.
///
/// Receives the resource name for error context and the schema to edit.
pub type SchemaPatch = fn(resource: &str, schema: &mut Value) -> Result<(), OverrideError>;

/// Apply both override layers of `resource` to a normalized schema.
///
/// # Errors
///
/// Returns `OverrideError` if the structural patch targets a missing property.
pub fn apply_overrides(schema: &Value, resource: &ResourceDefinition) -> Result<Value, OverrideError> {
    let mut result = apply_nullable_fields(schema, &resource.extra_nullable_fields);

    if let Some(patch) = resource.patch {
        tracing::debug!(resource = %resource.name, "applying structural patch");
        patch(&resource.name, &mut result)?;
    }

    Ok(result)
}

/// Force top-level properties to accept null.
///
/// Names not declared in the schema's `properties` are skipped.
pub fn apply_nullable_fields<S: AsRef<str>>(schema: &Value, fields: &[S]) -> Value {
    let mut result = schema.clone();

    if let Some(Value::Object(props)) = result.get_mut("properties") {
        for field in fields {
            if let Some(Value::Object(prop)) = props.get_mut(field.as_ref()) {
                add_null_type(prop);
            }
        }
    }

    result
}

/// Replace the `type` of a top-level property.
///
/// Intended for use inside a [`SchemaPatch`].
///
/// # Errors
///
/// Returns `OverrideError::MissingProperty` if the property is absent, or
/// `OverrideError::NotAnObject` if the schema has no `properties`.
pub fn set_property_type(
    resource: &str,
    schema: &mut Value,
    property: &str,
    types: &[&str],
) -> Result<(), OverrideError> {
    let prop = property_mut(resource, schema, property)?;
    let types = match types {
        [single] => Value::String(single.to_string()),
        many => Value::Array(many.iter().map(|t| Value::String(t.to_string())).collect()),
    };
    prop.insert("type".to_string(), types);
    Ok(())
}

/// Borrow a top-level property for editing.
///
/// # Errors
///
/// Same as [`set_property_type`].
pub fn property_mut<'a>(
    resource: &str,
    schema: &'a mut Value,
    property: &str,
) -> Result<&'a mut Map<String, Value>, OverrideError> {
    let props = schema
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| OverrideError::NotAnObject {
            resource: resource.to_string(),
        })?;

    props
        .get_mut(property)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| OverrideError::MissingProperty {
            resource: resource.to_string(),
            property: property.to_string(),
        })
}

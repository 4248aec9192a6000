//! `$ref` inlining against the document's shared definitions.

use serde_json::{Map, Value};

use crate::error::ResolveError;

/// Inline every `$ref` in `fragment` with a copy of the definition it points to.
///
/// Pointers must be local (`#/definitions/Name`). Sibling keys of a `$ref` are
/// kept unless the referenced definition declares the same key. Neither the
/// fragment nor `definitions` is modified.
///
/// # Errors
///
/// Returns `ResolveError::UnresolvedRef` for a pointer with no target,
/// `ResolveError::UnsupportedRef` for non-local pointers, and
/// `ResolveError::RefCycle` when a definition transitively refers to itself.
pub fn resolve_refs(
    fragment: &Value,
    definitions: &Map<String, Value>,
) -> Result<Value, ResolveError> {
    let mut stack = Vec::new();
    resolve_value(fragment, definitions, &mut stack)
}

// --- Internal implementation ---

fn resolve_value(
    value: &Value,
    definitions: &Map<String, Value>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    match value {
        Value::Object(map) => match map.get("$ref") {
            Some(Value::String(reference)) => resolve_reference(reference, map, definitions, stack),
            _ => {
                let mut result = Map::new();
                for (key, child) in map {
                    result.insert(key.clone(), resolve_value(child, definitions, stack)?);
                }
                Ok(Value::Object(result))
            }
        },
        Value::Array(arr) => arr
            .iter()
            .map(|item| resolve_value(item, definitions, stack))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn resolve_reference(
    reference: &str,
    node: &Map<String, Value>,
    definitions: &Map<String, Value>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    if stack.iter().any(|r| r == reference) {
        let mut chain = stack.clone();
        chain.push(reference.to_string());
        return Err(ResolveError::RefCycle { chain });
    }

    let target = navigate_pointer(definitions, reference)?;

    stack.push(reference.to_string());
    let resolved = resolve_value(target, definitions, stack);
    stack.pop();

    let mut result = Map::new();
    for (key, child) in node {
        if key != "$ref" {
            result.insert(key.clone(), resolve_value(child, definitions, stack)?);
        }
    }
    match resolved? {
        Value::Object(target_map) => {
            for (key, child) in target_map {
                result.insert(key, child);
            }
            Ok(Value::Object(result))
        }
        // A pointer to a non-schema value replaces the node outright
        other => Ok(other),
    }
}

/// Navigate a local JSON Pointer such as `#/definitions/Story`.
fn navigate_pointer<'a>(
    definitions: &'a Map<String, Value>,
    reference: &str,
) -> Result<&'a Value, ResolveError> {
    let Some(pointer) = reference.strip_prefix("#/") else {
        return Err(ResolveError::UnsupportedRef {
            reference: reference.to_string(),
        });
    };
    let unresolved = || ResolveError::UnresolvedRef {
        reference: reference.to_string(),
    };

    // Unescape JSON Pointer encoding (~1 = /, ~0 = ~)
    let mut parts = pointer
        .split('/')
        .map(|part| part.replace("~1", "/").replace("~0", "~"));

    if parts.next().as_deref() != Some("definitions") {
        return Err(unresolved());
    }
    let name = parts.next().ok_or_else(unresolved)?;
    let mut current = definitions.get(&name).ok_or_else(unresolved)?;
    for key in parts {
        current = current.get(key.as_str()).ok_or_else(unresolved)?;
    }
    Ok(current)
}

//! Declarative resource definitions.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{ContextError, RegistryError};
use crate::overrides::SchemaPatch;
use crate::types::{HttpMethod, ResponseKey};

/// Derives the path parameters of child resources from one parent record.
pub type ChildContextFn = fn(record: &Value) -> Result<Map<String, Value>, ContextError>;

/// A registered API resource and its schema overrides.
///
/// Definitions are plain data: customizations are values (field lists and
/// function pointers), so every resource goes through the same pipeline.
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    /// Unique stream name (e.g., "members").
    pub name: String,
    /// Path template, possibly with `{parameter}` placeholders.
    pub path: String,
    pub method: HttpMethod,
    pub primary_keys: Vec<String>,
    /// Name of the resource whose records fill this resource's path parameters.
    pub parent: Option<String>,
    /// Top-level fields that are nullable at runtime regardless of the document.
    pub extra_nullable_fields: Vec<String>,
    pub patch: Option<SchemaPatch>,
    /// Set on resources that act as a parent for others.
    pub child_context: Option<ChildContextFn>,
}

impl ResourceDefinition {
    /// Create a `GET` resource keyed by `id` with no overrides.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: HttpMethod::Get,
            primary_keys: vec!["id".to_string()],
            parent: None,
            extra_nullable_fields: Vec::new(),
            patch: None,
            child_context: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_nullable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_nullable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_patch(mut self, patch: SchemaPatch) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn with_child_context(mut self, child_context: ChildContextFn) -> Self {
        self.child_context = Some(child_context);
        self
    }

    /// Key of this resource's list response in the document.
    pub fn response_key(&self) -> ResponseKey {
        ResponseKey::new(self.path.clone(), self.method)
    }

    /// Derive the context passed to child resources from one of this resource's records.
    ///
    /// Returns `Ok(None)` for resources without children.
    pub fn child_context(&self, record: &Value) -> Result<Option<Map<String, Value>>, ContextError> {
        self.child_context.map(|derive| derive(record)).transpose()
    }

    /// Fill the path template's `{parameter}` placeholders from a context.
    ///
    /// String values are inserted verbatim; other values use their JSON form.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::MissingParameter` for a placeholder absent from `context`.
    pub fn request_path(&self, context: &Map<String, Value>) -> Result<String, ContextError> {
        let mut result = String::with_capacity(self.path.len());
        let mut rest = self.path.as_str();

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let parameter = &rest[start + 1..start + len];
            let value = context
                .get(parameter)
                .ok_or_else(|| ContextError::MissingParameter {
                    path: self.path.clone(),
                    parameter: parameter.to_string(),
                })?;

            result.push_str(&rest[..start]);
            match value {
                Value::String(s) => result.push_str(s),
                other => result.push_str(&other.to_string()),
            }
            rest = &rest[start + len + 1..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// Copy one field of a parent record into a child context under a new name.
///
/// Helper for writing [`ChildContextFn`]s.
pub fn context_from_field(
    resource: &str,
    record: &Value,
    field: &str,
    parameter: &str,
) -> Result<Map<String, Value>, ContextError> {
    let value = record
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ContextError::MissingField {
            resource: resource.to_string(),
            field: field.to_string(),
        })?;

    let mut context = Map::new();
    context.insert(parameter.to_string(), value.clone());
    Ok(context)
}

/// Check that a set of definitions is consistent.
///
/// Names must be unique, every parent must be registered, and every parent
/// used by a child must define a child context.
pub fn validate_registry(resources: &[ResourceDefinition]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for resource in resources {
        if !seen.insert(resource.name.as_str()) {
            return Err(RegistryError::DuplicateName {
                name: resource.name.clone(),
            });
        }
    }

    for resource in resources {
        let Some(parent_name) = &resource.parent else {
            continue;
        };
        let parent = resources
            .iter()
            .find(|r| &r.name == parent_name)
            .ok_or_else(|| RegistryError::UnknownParent {
                resource: resource.name.clone(),
                parent: parent_name.clone(),
            })?;

        if parent.child_context.is_none() {
            return Err(RegistryError::ParentWithoutContext {
                resource: resource.name.clone(),
                parent: parent_name.clone(),
            });
        }
    }

    Ok(())
}

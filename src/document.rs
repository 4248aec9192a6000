//! The raw Swagger 2.0 document.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{LookupError, SpecError};
use crate::types::ResponseKey;

/// A parsed OpenAPI document.
///
/// Only `paths` and the shared `definitions` are retained; the document is
/// never modified after construction and is shared read-only across resources.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    paths: Map<String, Value>,
    #[serde(default)]
    definitions: Map<String, Value>,
}

impl SchemaDocument {
    /// Build a document from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::InvalidDocument` if `paths` is missing or either
    /// mapping is not a JSON object.
    pub fn from_value(raw: Value) -> Result<Self, SpecError> {
        if !raw.is_object() {
            return Err(SpecError::InvalidDocument {
                message: format!(
                    "expected a JSON object, got {}",
                    crate::types::json_type_name(&raw)
                ),
            });
        }

        serde_json::from_value(raw).map_err(|e| SpecError::InvalidDocument {
            message: e.to_string(),
        })
    }

    /// Shared schema definitions, keyed by name.
    pub fn definitions(&self) -> &Map<String, Value> {
        &self.definitions
    }

    /// Find the item schema of a list operation's response.
    ///
    /// Walks `paths[path][method].responses[status].schema.items`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingPath` naming the first segment not found.
    pub fn lookup(&self, key: &ResponseKey) -> Result<&Value, LookupError> {
        let missing = |segment: &str| LookupError::MissingPath {
            path: key.path.clone(),
            method: key.method.to_string(),
            status: key.expected_status,
            segment: segment.to_string(),
        };

        let status = key.expected_status.to_string();
        let operation = self
            .paths
            .get(&key.path)
            .ok_or_else(|| missing(&key.path))?;

        let segments = [key.method.as_str(), "responses", status.as_str(), "schema", "items"];
        let mut current = operation;
        for segment in segments {
            current = current.get(segment).ok_or_else(|| missing(segment))?;
        }
        Ok(current)
    }
}

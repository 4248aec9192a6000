//! Core types for schema discovery.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vendor marker used by the upstream document instead of nullable type unions.
pub const X_NULLABLE: &str = "x-nullable";

/// JSON Schema type name for null.
pub const NULL_TYPE: &str = "null";

/// Status code whose response schema describes a resource's records.
pub const DEFAULT_STATUS: u16 = 200;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTTP method of a resource's list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns the method as it is keyed under `paths` in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Identifies one operation's response schema in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseKey {
    pub path: String,
    pub method: HttpMethod,
    pub expected_status: u16,
}

impl ResponseKey {
    /// Create a key expecting a `200` response.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            expected_status: DEFAULT_STATUS,
        }
    }

    /// Override the expected status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }
}

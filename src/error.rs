//! Error types for schema discovery and record validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while obtaining the raw OpenAPI document.
#[derive(Debug, Error)]
pub enum SpecError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid OpenAPI document: {message}")]
    InvalidDocument { message: String },
}

impl SpecError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpecError::FileNotFound { .. }
            | SpecError::ReadError { .. }
            | SpecError::WriteError { .. } => 3,
            #[cfg(feature = "remote")]
            SpecError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors while inlining `$ref` pointers.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unresolved reference: {reference}")]
    UnresolvedRef { reference: String },

    #[error("unsupported reference {reference}: only local '#/...' pointers are allowed")]
    UnsupportedRef { reference: String },

    #[error("reference cycle detected: {}", chain.join(" -> "))]
    RefCycle { chain: Vec<String> },
}

/// A resource's response schema is missing from the document.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no schema for {method} {path} ({status}): missing '{segment}'")]
    MissingPath {
        path: String,
        method: String,
        status: u16,
        segment: String,
    },
}

/// A structural patch could not be applied.
///
/// Always fatal: the override definitions have drifted from the upstream document.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("resource '{resource}': patched property '{property}' is missing from the schema")]
    MissingProperty { resource: String, property: String },

    #[error("resource '{resource}': schema has no properties to patch")]
    NotAnObject { resource: String },
}

/// Errors while deriving a child context or filling a path template.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("resource '{resource}': record has no '{field}' field")]
    MissingField { resource: String, field: String },

    #[error("path {path}: no value for parameter '{parameter}'")]
    MissingParameter { path: String, parameter: String },
}

/// Inconsistent resource registrations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("resource '{name}' is registered more than once")]
    DuplicateName { name: String },

    #[error("resource '{resource}' names unknown parent '{parent}'")]
    UnknownParent { resource: String, parent: String },

    #[error("resource '{resource}': parent '{parent}' does not define a child context")]
    ParentWithoutContext { resource: String, parent: String },
}

/// Errors while loading the connector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("config is missing a non-empty 'token'")]
    MissingToken,
}

impl ConfigError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::FileNotFound { .. } | ConfigError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// Any error that aborts a discovery pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unknown resource: {name}")]
    UnknownResource { name: String },
}

impl DiscoveryError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DiscoveryError::Spec(e) => e.exit_code(),
            _ => 2,
        }
    }
}

/// Errors during record validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<RecordError> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::InvalidSchema { .. } => 2,
            ValidateError::Invalid { .. } => 1,
        }
    }
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

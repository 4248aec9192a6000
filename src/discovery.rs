//! Discovery - assembling the final schema of every registered resource.
//!
//! For each resource, in registration order:
//!
//! 1. look up `paths[path][method].responses[200].schema.items`,
//! 2. inline `$ref` pointers against the shared `definitions`,
//! 3. normalize `x-nullable` markers,
//! 4. apply the static nullable-field list, then the structural patch,
//! 5. drop the vendor markers.
//!
//! The result is sorted by resource name. Any error aborts the whole pass.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::SchemaDocument;
use crate::error::{ContextError, DiscoveryError, ValidateError};
use crate::loader::load_spec_auto;
use crate::nullable::{normalize_nullable, strip_vendor_extensions};
use crate::overrides::apply_overrides;
use crate::refs::resolve_refs;
use crate::resource::{validate_registry, ChildContextFn, ResourceDefinition};
use crate::types::HttpMethod;
use crate::validator::validate_record;

/// A resource with its final schema, ready for extraction.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredStream {
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub primary_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub schema: Value,
    #[serde(skip)]
    child_context: Option<ChildContextFn>,
}

impl DiscoveredStream {
    fn new(resource: &ResourceDefinition, schema: Value) -> Self {
        Self {
            name: resource.name.clone(),
            path: resource.path.clone(),
            method: resource.method,
            primary_keys: resource.primary_keys.clone(),
            parent: resource.parent.clone(),
            schema,
            child_context: resource.child_context,
        }
    }

    /// Derive the context for child resources from one record of this stream.
    pub fn child_context(&self, record: &Value) -> Result<Option<Map<String, Value>>, ContextError> {
        self.child_context.map(|derive| derive(record)).transpose()
    }

    /// Validate a record against this stream's schema.
    pub fn validate(&self, record: &Value) -> Result<(), ValidateError> {
        validate_record(&self.schema, record)
    }
}

/// The discovery output handed to the extraction runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub streams: Vec<DiscoveredStream>,
}

impl Catalog {
    /// Find a stream by name.
    pub fn get(&self, name: &str) -> Option<&DiscoveredStream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

/// Produce the final schema of one resource.
///
/// # Errors
///
/// Returns the first lookup, resolution, or override error encountered.
pub fn discover_schema(
    document: &SchemaDocument,
    resource: &ResourceDefinition,
) -> Result<Value, DiscoveryError> {
    let key = resource.response_key();
    let raw = document.lookup(&key)?;

    tracing::debug!(resource = %resource.name, path = %key.path, "resolving references");
    let resolved = resolve_refs(raw, document.definitions())?;

    let normalized = normalize_nullable(&resolved);
    let overridden = apply_overrides(&normalized, resource)?;

    Ok(strip_vendor_extensions(&overridden))
}

/// Discover every resource against an already loaded document.
///
/// # Errors
///
/// Fails fast: the registry is validated first, and the first per-resource
/// error aborts the pass without a partial result.
pub fn discover(
    document: &SchemaDocument,
    resources: &[ResourceDefinition],
) -> Result<Catalog, DiscoveryError> {
    validate_registry(resources)?;

    let mut streams = Vec::with_capacity(resources.len());
    for resource in resources {
        let schema = discover_schema(document, resource)?;
        tracing::info!(resource = %resource.name, "discovered stream");
        streams.push(DiscoveredStream::new(resource, schema));
    }

    streams.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Catalog { streams })
}

/// Load the document from a file path or URL, then discover every resource.
pub fn discover_from_source(
    source: &str,
    resources: &[ResourceDefinition],
) -> Result<Catalog, DiscoveryError> {
    let document = load_spec_auto(source)?;
    discover(&document, resources)
}

/// Discover a single resource by name.
///
/// # Errors
///
/// Returns `DiscoveryError::UnknownResource` if no definition has that name.
pub fn discover_one(
    document: &SchemaDocument,
    resources: &[ResourceDefinition],
    name: &str,
) -> Result<DiscoveredStream, DiscoveryError> {
    let resource = resources
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| DiscoveryError::UnknownResource {
            name: name.to_string(),
        })?;

    let schema = discover_schema(document, resource)?;
    Ok(DiscoveredStream::new(resource, schema))
}

//! Shortcut Stream Discovery
//!
//! Builds a self-contained JSON Schema for every Shortcut API resource from
//! the vendor's Swagger 2.0 document.
//!
//! The document marks nullable fields with the `x-nullable` vendor extension,
//! shares definitions through `$ref`, and misses some fields that are null in
//! practice. Discovery fixes all three, in this order:
//!
//! | Stage | Function |
//! |-------|----------|
//! | Look up the list response's item schema | [`SchemaDocument::lookup`] |
//! | Inline `$ref` pointers | [`resolve_refs`] |
//! | Rewrite `x-nullable` into `type` unions | [`normalize_nullable`] |
//! | Apply per-resource overrides | [`apply_overrides`] |
//! | Remove vendor markers | [`strip_vendor_extensions`] |
//!
//! # Example
//!
//! ```
//! use shortcut_discovery::{discover, load_spec_str, ResourceDefinition};
//! use serde_json::json;
//!
//! let document = load_spec_str(r#"{
//!     "paths": {
//!         "/api/v3/members": {
//!             "get": { "responses": { "200": { "schema": {
//!                 "type": "array",
//!                 "items": {
//!                     "type": "object",
//!                     "properties": {
//!                         "id": { "type": "integer" },
//!                         "replaced_by": { "type": "string" }
//!                     }
//!                 }
//!             } } } }
//!         }
//!     },
//!     "definitions": {}
//! }"#).unwrap();
//!
//! let members = ResourceDefinition::new("members", "/api/v3/members")
//!     .with_nullable_fields(["replaced_by"]);
//!
//! let catalog = discover(&document, &[members]).unwrap();
//! let schema = &catalog.streams[0].schema;
//! assert_eq!(schema["properties"]["replaced_by"]["type"], json!(["string", "null"]));
//! ```

mod catalog;
mod config;
mod discovery;
mod document;
mod error;
mod loader;
mod nullable;
mod overrides;
mod refs;
mod resource;
mod types;
mod validator;

pub use catalog::{shortcut_resources, PROJECT_PUBLIC_ID};
pub use config::{load_config, ConnectorConfig, TOKEN_HEADER};
pub use discovery::{
    discover, discover_from_source, discover_one, discover_schema, Catalog, DiscoveredStream,
};
pub use document::SchemaDocument;
pub use error::{
    ConfigError, ContextError, DiscoveryError, LookupError, OverrideError, RecordError,
    RegistryError, ResolveError, SpecError, ValidateError,
};
pub use loader::{is_url, load_spec, load_spec_auto, load_spec_str, write_snapshot, SHORTCUT_OPENAPI_URL};
pub use nullable::{add_null_type, normalize_nullable, strip_vendor_extensions, type_includes};
pub use overrides::{
    apply_nullable_fields, apply_overrides, property_mut, set_property_type, SchemaPatch,
};
pub use refs::resolve_refs;
pub use resource::{context_from_field, validate_registry, ChildContextFn, ResourceDefinition};
pub use types::{json_type_name, HttpMethod, ResponseKey, DEFAULT_STATUS, NULL_TYPE, X_NULLABLE};
pub use validator::validate_record;

#[cfg(feature = "remote")]
pub use loader::{fetch_json, load_spec_url};

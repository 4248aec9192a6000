//! Loading the raw OpenAPI document.
//!
//! Handles loading the document from a local snapshot, a string, or the
//! vendor's published URL.

use std::path::Path;

use serde_json::Value;

use crate::document::SchemaDocument;
use crate::error::SpecError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Published location of the Shortcut v3 Swagger document.
pub const SHORTCUT_OPENAPI_URL: &str =
    "https://developer.shortcut.com/api/rest/v3/shortcut.swagger.json";

/// Timeout for fetching the document (30 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Load a document from a snapshot file.
///
/// # Errors
///
/// Returns `SpecError::FileNotFound` if the file doesn't exist,
/// `SpecError::InvalidJson` if it isn't valid JSON, or
/// `SpecError::InvalidDocument` if it has no `paths` mapping.
pub fn load_spec(path: &Path) -> Result<SchemaDocument, SpecError> {
    let raw = read_json(path)?;
    SchemaDocument::from_value(raw)
}

/// Load a document from a JSON string.
pub fn load_spec_str(content: &str) -> Result<SchemaDocument, SpecError> {
    let raw: Value =
        serde_json::from_str(content).map_err(|source| SpecError::InvalidJson { source })?;
    SchemaDocument::from_value(raw)
}

/// Fetch the raw JSON at an HTTP/HTTPS URL.
///
/// One attempt with a bounded timeout; non-2xx responses are errors.
/// Requires the `remote` feature (enabled by default).
#[cfg(feature = "remote")]
pub fn fetch_json(url: &str) -> Result<Value, SpecError> {
    let network = |source: reqwest::Error| SpecError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network)?;

    tracing::info!(url, "fetching OpenAPI document");
    let response = client.get(url).send().map_err(network)?;

    // Check for HTTP errors before parsing
    let response = response.error_for_status().map_err(network)?;

    response.json().map_err(network)
}

/// Load a document from an HTTP/HTTPS URL.
#[cfg(feature = "remote")]
pub fn load_spec_url(url: &str) -> Result<SchemaDocument, SpecError> {
    SchemaDocument::from_value(fetch_json(url)?)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a document from a file path or URL.
///
/// URL loading requires the `remote` feature.
pub fn load_spec_auto(source: &str) -> Result<SchemaDocument, SpecError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_spec_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(SpecError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_spec(Path::new(source))
    }
}

/// Write a raw document as a snapshot: two-space indented JSON and a trailing newline.
pub fn write_snapshot(raw: &Value, path: &Path) -> Result<(), SpecError> {
    let mut content =
        serde_json::to_string_pretty(raw).map_err(|source| SpecError::InvalidJson { source })?;
    content.push('\n');

    std::fs::write(path, content).map_err(|source| SpecError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value, SpecError> {
    if !path.exists() {
        return Err(SpecError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SpecError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SpecError::InvalidJson { source })
}

//! Connector configuration.
//!
//! The only setting is the API token used to authenticate requests:
//!
//! ```json
//! { "token": "..." }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Header carrying the API token on every request.
pub const TOKEN_HEADER: &str = "Shortcut-Token";

/// Settings consumed by the extraction runtime.
#[derive(Clone, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    token: String,
}

impl ConnectorConfig {
    /// Create a config from a token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` for an empty token.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            token: token.into(),
        };
        config.check()?;
        Ok(config)
    }

    /// Parse and check a JSON config.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|source| ConfigError::InvalidJson { source })?;
        config.check()?;
        Ok(config)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Name and value of the authentication header.
    pub fn auth_header(&self) -> (&'static str, &str) {
        (TOKEN_HEADER, &self.token)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Load the connector config from a JSON file.
pub fn load_config(path: &Path) -> Result<ConnectorConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    ConnectorConfig::from_json(&content)
}

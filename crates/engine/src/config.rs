//! Store configuration via `docbatch.toml`
//!
//! The configuration names the storage engine connection and the body
//! serialization settings. The connection string is handed to external
//! engines untouched; the in-memory engine ignores it.

use crate::serializer::{DefaultJsonSerializer, JsonSettings};
use docbatch_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "docbatch.toml";

/// Configuration loaded from `docbatch.toml`.
///
/// # Example
///
/// ```toml
/// # connection_string = "host=localhost dbname=docs"
///
/// [json]
/// pretty = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocStoreConfig {
    /// Connection string for the storage engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
    /// Body serialization settings
    #[serde(default)]
    pub json: JsonSettings,
}

impl DocStoreConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# docbatch configuration
#
# Connection string passed to the storage engine.
# connection_string = "host=localhost dbname=docs"

# Document body serialization.
[json]
# Indent stored JSON bodies (default: false)
pretty = false
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DocStoreConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!("{} ({})", message, path.display())),
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the connection string is blank.
    pub fn validate(&self) -> Result<()> {
        if let Some(connection_string) = &self.connection_string {
            if connection_string.trim().is_empty() {
                return Err(Error::Config(
                    "connection_string must not be blank; omit it instead".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the serializer described by this config.
    pub fn serializer(&self) -> DefaultJsonSerializer {
        DefaultJsonSerializer::new(self.json.clone())
    }
}

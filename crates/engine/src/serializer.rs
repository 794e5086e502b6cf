//! Body serialization collaborator
//!
//! Documents carry their body as serialized JSON text. The typed entity
//! layer converts payloads through a [`JsonSerializer`]; errors are passed
//! through as `Error::Serialization` and never interpreted.

use docbatch_core::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Converts payloads to and from document bodies
pub trait JsonSerializer: Send + Sync {
    /// Serialize a payload into a document body
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the payload cannot be represented.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    /// Deserialize a document body into a payload
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the body is malformed.
    fn deserialize<T: DeserializeOwned>(&self, body: &str) -> Result<T>;
}

/// Output settings for [`DefaultJsonSerializer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Indent bodies instead of writing them compactly
    #[serde(default)]
    pub pretty: bool,
}

/// `serde_json` backed serializer
#[derive(Debug, Clone, Default)]
pub struct DefaultJsonSerializer {
    settings: JsonSettings,
}

impl DefaultJsonSerializer {
    /// Create a serializer with the given settings
    pub fn new(settings: JsonSettings) -> Self {
        Self { settings }
    }

    /// Get the settings
    pub fn settings(&self) -> &JsonSettings {
        &self.settings
    }
}

impl JsonSerializer for DefaultJsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let body = if self.settings.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(body)
    }

    fn deserialize<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        Ok(serde_json::from_str(body)?)
    }
}

//! Container storage configuration.

use crate::error::{CoreError, CoreResult};
use echest_storage::Backend;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for opening container storage.
///
/// Deserializes from camelCase JSON; every key is optional:
///
/// ```json
/// {
///   "baseType": "sqlite",
///   "databaseConnectionUri": "jdbc:sqlite:plugins/EchestPlus/data.db",
///   "dataDir": "plugins/EchestPlus/playerdata",
///   "defaultSize": 27
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Backend kind: `file`, `sqlite`, `mysql`, `mongodb` or `memory`.
    pub base_type: String,

    /// Connection URI for relational kinds.
    #[serde(alias = "databaseConnectionUri")]
    pub connection_uri: Option<String>,

    /// Directory of the file backend (also the fallback location).
    pub data_dir: PathBuf,

    /// Size used when a stored size cannot be read.
    #[serde(alias = "enderChestSize")]
    pub default_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_type: "file".to_string(),
            connection_uri: None,
            data_dir: PathBuf::from("playerdata"),
            default_size: 27,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        serde_json::from_str(text).map_err(|e| CoreError::config(e.to_string()))
    }

    /// Sets the backend kind.
    #[must_use]
    pub fn base_type(mut self, kind: impl Into<String>) -> Self {
        self.base_type = kind.into();
        self
    }

    /// Sets the relational connection URI.
    #[must_use]
    pub fn connection_uri(mut self, uri: impl Into<String>) -> Self {
        self.connection_uri = Some(uri.into());
        self
    }

    /// Sets the file backend directory.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the fallback container size.
    #[must_use]
    pub const fn default_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }

    /// Builds the configured backend, falling back to file storage.
    #[must_use]
    pub fn open_backend(&self) -> Backend {
        Backend::open(
            &self.base_type,
            self.connection_uri.as_deref(),
            &self.data_dir,
        )
    }
}

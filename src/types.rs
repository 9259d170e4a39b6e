use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Production API gateway. Every endpoint path is appended under `/api/v1`.
pub static DEFAULT_API_URL: &str = "https://bitecast.app";

/// User configuration, normally read from `bitecast/config.yaml` in the
/// platform configuration directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolboxConfig {
    /// Base URL of the BiteCast API gateway.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the authenticated custom-fish endpoints.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ToolboxConfig {
    /// Loads the configuration file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_yml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Platform used for registry coordinates; unset fields fall back to the
    /// running platform.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Reproduce the historical `required_providers` result shape, which
    /// carries one leading placeholder entry per declared provider.
    #[serde(default)]
    pub legacy_requirement_placeholders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
}

impl PlatformConfig {
    /// Unset or empty fields fall back to the running platform.
    pub fn resolve(&self) -> Platform {
        Platform::new(
            self.os.clone().unwrap_or_default(),
            self.arch.clone().unwrap_or_default(),
        )
        .or_current()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DecoderConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        tracing::debug!(?config, "decoder config loaded");
        Ok(config)
    }
}

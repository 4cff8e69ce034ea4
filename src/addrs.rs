//! In-module provider addresses.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::valid_identifier;

/// A bare provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProviderType {
    pub name: String,
    pub source: String,
}

impl ProviderType {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Reference to a provider configuration within a module.
///
/// An empty `alias` is the default configuration for the type. Within one
/// module `(type_name, alias)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub alias: String,
}

impl ProviderConfig {
    pub fn new(type_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            alias: alias.into(),
        }
    }

    /// The default (unaliased) configuration for `type_name`.
    pub fn default_for(type_name: impl Into<String>) -> Self {
        Self::new(type_name, "")
    }

    pub fn is_default(&self) -> bool {
        self.alias.is_empty()
    }

    /// `type` or `type.alias`.
    pub fn compact(&self) -> String {
        if self.alias.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.type_name, self.alias)
        }
    }
}

/// Renders `provider.type` or `provider.type.alias`.
impl std::fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "provider.{}", self.compact())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrError {
    #[error("Invalid provider configuration address {input:?}: {reason}")]
    InvalidProviderConfig { input: String, reason: String },
}

/// Parses the compact form, `type` or `type.alias`.
impl FromStr for ProviderConfig {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AddrError::InvalidProviderConfig {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split('.');
        let type_name = parts.next().unwrap_or_default();
        let alias = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(invalid("extraneous items after the provider alias"));
        }
        if !valid_identifier(type_name) {
            return Err(invalid("provider type name must be a valid identifier"));
        }
        if s.contains('.') && !valid_identifier(alias) {
            return Err(invalid("provider alias must be a valid identifier"));
        }
        Ok(ProviderConfig::new(type_name, alias))
    }
}

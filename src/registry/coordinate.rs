use serde::{Deserialize, Serialize};

use super::host::{FriendlyHost, HostError, Hostname};
use super::source::parse_provider_source;

/// Target platform of a provider package, using the registry's naming
/// (`linux`, `darwin`, `amd64`, `arm64`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this process runs on.
    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            other => other,
        };
        Self::new(os, arch)
    }

    /// Fills an empty `os` or `arch` from the running platform.
    pub fn or_current(&self) -> Self {
        if !self.os.is_empty() && !self.arch.is_empty() {
            return self.clone();
        }
        let current = Self::current();
        Self {
            os: if self.os.is_empty() { current.os } else { self.os.clone() },
            arch: if self.arch.is_empty() { current.arch } else { self.arch.clone() },
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

/// Fully resolved registry address of a provider package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSourceCoordinate {
    pub host: FriendlyHost,
    pub namespace: String,
    pub name: String,
    pub os: String,
    pub arch: String,
}

impl ProviderSourceCoordinate {
    /// Builds the coordinate for provider `name` declared with `source`.
    ///
    /// The name is taken from the caller, not from the source string. Empty
    /// `os`/`arch` default to the running platform.
    pub fn new(name: &str, os: &str, arch: &str, source: &str) -> Self {
        Self::with_platform(name, source, &Platform::new(os, arch))
    }

    /// Like [`ProviderSourceCoordinate::new`]; empty platform fields still
    /// default to the running platform.
    pub fn with_platform(name: &str, source: &str, platform: &Platform) -> Self {
        let platform = platform.or_current();
        let parts = parse_provider_source(source);
        tracing::debug!(
            name,
            namespace = %parts.namespace,
            host = %parts.host,
            "resolved provider source"
        );
        Self {
            host: parts.host,
            namespace: parts.namespace,
            name: name.to_string(),
            os: platform.os,
            arch: platform.arch,
        }
    }

    /// Builds the coordinate using the name found in the source string.
    pub fn from_source(source: &str, platform: &Platform) -> Self {
        let name = parse_provider_source(source).name;
        Self::with_platform(&name, source, platform)
    }

    /// Registry identifier, `namespace/name`.
    pub fn registry_id(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// The host normalized for comparison.
    pub fn svc_host(&self) -> Result<Hostname, HostError> {
        Hostname::for_comparison(self.host.raw())
    }
}

impl std::fmt::Display for ProviderSourceCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.namespace, self.name)
    }
}

//! Registry hostnames.
//!
//! Hosts are compared in their normalized form: IDNA to-ASCII, lowercase,
//! with the default HTTPS port removed. [`FriendlyHost`] keeps the string as
//! the user wrote it and normalizes on demand.

use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

/// Host of the public provider registry, used when a source omits its host.
pub const PUBLIC_REGISTRY_HOST: &str = "registry.terraform.io";

const DEFAULT_PORT: u16 = 443;
const MAX_LABEL_LEN: usize = 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },
}

impl HostError {
    fn invalid(host: &str, reason: impl Into<String>) -> Self {
        HostError::InvalidHost {
            host: host.to_string(),
            reason: reason.into(),
        }
    }
}

/// A hostname in its canonical comparison form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Hostname(String);

impl Hostname {
    /// Normalizes `given` for comparison.
    ///
    /// Accepts an optional `:port` suffix. Port 443 is dropped, any other port
    /// is kept without leading zeros.
    pub fn for_comparison(given: &str) -> Result<Self, HostError> {
        let (host, port) = match given.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (given, None),
        };

        let port_suffix = match port {
            None => String::new(),
            Some(port) => normalize_port(port).map_err(|reason| HostError::invalid(given, reason))?,
        };

        if host.is_empty() {
            return Err(HostError::invalid(given, "empty string is not a valid hostname"));
        }

        let ascii = match url::Host::parse(host) {
            Ok(url::Host::Domain(domain)) => domain,
            // Numeric shorthand such as `0x7f.1` or `123` names a different
            // host once expanded, so only dotted quads pass.
            Ok(url::Host::Ipv4(addr)) if host.parse::<Ipv4Addr>().is_ok() => addr.to_string(),
            Ok(url::Host::Ipv4(_)) => {
                return Err(HostError::invalid(
                    given,
                    "numeric hosts must be written as four decimal octets",
                ))
            }
            Ok(url::Host::Ipv6(_)) => {
                return Err(HostError::invalid(given, "IPv6 addresses are not supported"))
            }
            Err(e) => return Err(HostError::invalid(given, e.to_string())),
        };

        for label in ascii.split('.') {
            check_label(label).map_err(|reason| HostError::invalid(given, reason))?;
        }

        Ok(Hostname(format!("{}{}", ascii, port_suffix)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Hostname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize_port(port: &str) -> Result<String, String> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err("port must be a decimal number".to_string());
    }
    let number: u16 = port
        .parse()
        .map_err(|_| format!("port {} is out of range", port))?;
    match number {
        0 => Err("port 0 is not valid".to_string()),
        DEFAULT_PORT => Ok(String::new()),
        n => Ok(format!(":{}", n)),
    }
}

fn check_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("hostname contains an empty label".to_string());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!("label {:?} is longer than {} bytes", label, MAX_LABEL_LEN));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(format!("label {:?} must not start or end with a dash", label));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(format!("label {:?} contains invalid character {:?}", label, c));
    }
    Ok(())
}

/// A registry host as written in a provider source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FriendlyHost {
    raw: String,
}

impl FriendlyHost {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn public_registry() -> Self {
        Self::new(PUBLIC_REGISTRY_HOST)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn valid(&self) -> bool {
        Hostname::for_comparison(&self.raw).is_ok()
    }

    /// Comparison form, or the lowercased raw string when the host is not
    /// valid.
    pub fn normalized(&self) -> String {
        Hostname::for_comparison(&self.raw)
            .map(|h| h.to_string())
            .unwrap_or_else(|_| self.raw.to_lowercase())
    }

    /// True when both hosts are valid and normalize to the same name.
    pub fn equal(&self, other: &FriendlyHost) -> bool {
        match (
            Hostname::for_comparison(&self.raw),
            Hostname::for_comparison(&other.raw),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    pub fn is_public_registry(&self) -> bool {
        self.equal(&FriendlyHost::public_registry())
    }
}

impl std::fmt::Display for FriendlyHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

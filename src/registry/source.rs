//! Provider source strings.
//!
//! A source has the shape `[[host/]namespace/]name`. Parsing is total: any
//! string yields a result, and the content of each segment is not checked
//! here. Host validity surfaces later, when the host is normalized for
//! comparison.

use serde::Serialize;

use super::host::FriendlyHost;

/// Namespace used when a source does not name one.
pub const DEFAULT_PROVIDER_NAMESPACE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSourceParts {
    pub name: String,
    pub namespace: String,
    pub host: FriendlyHost,
}

impl ProviderSourceParts {
    /// Reassembles the parts into `host/namespace/name`.
    pub fn to_source_string(&self) -> String {
        format!("{}/{}/{}", self.host, self.namespace, self.name)
    }
}

/// Splits a source string into its name, namespace and host.
///
/// Missing or empty namespaces become [`DEFAULT_PROVIDER_NAMESPACE`] and
/// missing or empty hosts become the public registry, so the result never
/// carries an empty namespace or host.
///
/// ```
/// use provider_config::registry::{parse_provider_source, PUBLIC_REGISTRY_HOST};
///
/// let parts = parse_provider_source("example.com/ns/name");
/// assert_eq!(parts.name, "name");
/// assert_eq!(parts.namespace, "ns");
/// assert_eq!(parts.host.raw(), "example.com");
///
/// let parts = parse_provider_source("null");
/// assert_eq!(parts.namespace, "-");
/// assert_eq!(parts.host.raw(), PUBLIC_REGISTRY_HOST);
/// ```
pub fn parse_provider_source(source: &str) -> ProviderSourceParts {
    if source.is_empty() {
        return ProviderSourceParts {
            name: String::new(),
            namespace: DEFAULT_PROVIDER_NAMESPACE.to_string(),
            host: FriendlyHost::public_registry(),
        };
    }

    let segments: Vec<&str> = source.split('/').collect();
    let (name, leading) = match segments.split_last() {
        Some((name, leading)) => (*name, leading),
        None => (source, &[][..]),
    };

    let namespace = match leading.last() {
        Some(namespace) if !namespace.is_empty() => *namespace,
        _ => DEFAULT_PROVIDER_NAMESPACE,
    };

    let host = if leading.len() > 1 {
        let host = leading[..leading.len() - 1].join("/");
        if host.is_empty() {
            FriendlyHost::public_registry()
        } else {
            FriendlyHost::new(host)
        }
    } else {
        FriendlyHost::public_registry()
    };

    ProviderSourceParts {
        name: name.to_string(),
        namespace: namespace.to_string(),
        host,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::registry::host::PUBLIC_REGISTRY_HOST;

    fn triple(source: &str) -> (String, String, String) {
        let parts = parse_provider_source(source);
        (parts.name, parts.namespace, parts.host.raw().to_string())
    }

    fn expect(name: &str, namespace: &str, host: &str) -> (String, String, String) {
        (name.to_string(), namespace.to_string(), host.to_string())
    }

    #[test]
    fn test_empty() {
        assert_eq!(triple(""), expect("", "-", PUBLIC_REGISTRY_HOST));
    }

    #[test]
    fn test_name_only() {
        assert_eq!(triple("null"), expect("null", "-", PUBLIC_REGISTRY_HOST));
    }

    #[test]
    fn test_namespace_and_name() {
        assert_eq!(
            triple("terraform-providers/null"),
            expect("null", "terraform-providers", PUBLIC_REGISTRY_HOST)
        );
        assert_eq!(
            triple("community-providers/null"),
            expect("null", "community-providers", PUBLIC_REGISTRY_HOST)
        );
    }

    #[test]
    fn test_custom_host() {
        assert_eq!(
            triple("example.com/ns/name"),
            expect("name", "ns", "example.com")
        );
        // leading segments are rejoined into the host
        assert_eq!(
            triple("example.com/mirror/ns/name"),
            expect("name", "ns", "example.com/mirror")
        );
    }

    #[test]
    fn test_empty_segments_fall_back_to_defaults() {
        assert_eq!(triple("/null"), expect("null", "-", PUBLIC_REGISTRY_HOST));
        assert_eq!(
            triple("/ns/null"),
            expect("null", "ns", PUBLIC_REGISTRY_HOST)
        );
        assert_eq!(triple("ns/"), expect("", "ns", PUBLIC_REGISTRY_HOST));
    }

    proptest! {
        #[test]
        fn prop_reparse_is_identity(source in "[a-zA-Z0-9./-]{0,24}") {
            let parts = parse_provider_source(&source);
            prop_assert!(!parts.namespace.is_empty());
            prop_assert!(!parts.host.raw().is_empty());
            if parts.host.raw() != PUBLIC_REGISTRY_HOST {
                let reparsed = parse_provider_source(&parts.to_source_string());
                prop_assert_eq!(reparsed, parts);
            }
        }

        #[test]
        fn prop_explicit_triple_round_trips(
            host in "[a-z0-9.-]{1,16}",
            namespace in "[a-z0-9-]{1,16}",
            name in "[a-z0-9-]{1,16}",
        ) {
            let parts = parse_provider_source(&format!("{}/{}/{}", host, namespace, name));
            prop_assert_eq!(parts.host.raw(), host.as_str());
            prop_assert_eq!(parts.namespace, namespace);
            prop_assert_eq!(parts.name, name);
        }
    }
}

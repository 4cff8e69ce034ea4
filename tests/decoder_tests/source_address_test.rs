//! Source address parsing and host comparison.

use pretty_assertions::assert_eq;
use provider_config::registry::{
    parse_provider_source, FriendlyHost, HostError, Hostname, Platform, ProviderSourceCoordinate,
    DEFAULT_PROVIDER_NAMESPACE, PUBLIC_REGISTRY_HOST,
};

fn triple(source: &str) -> (String, String, String) {
    let parts = parse_provider_source(source);
    (parts.name, parts.namespace, parts.host.raw().to_string())
}

fn expected(name: &str, namespace: &str, host: &str) -> (String, String, String) {
    (name.to_string(), namespace.to_string(), host.to_string())
}

#[test]
fn test_source_forms() {
    assert_eq!(triple(""), expected("", DEFAULT_PROVIDER_NAMESPACE, PUBLIC_REGISTRY_HOST));
    assert_eq!(triple("null"), expected("null", "-", PUBLIC_REGISTRY_HOST));
    assert_eq!(
        triple("terraform-providers/null"),
        expected("null", "terraform-providers", PUBLIC_REGISTRY_HOST)
    );
    assert_eq!(triple("example.com/ns/name"), expected("name", "ns", "example.com"));
    assert_eq!(
        triple("example.com/extra/ns/name"),
        expected("name", "ns", "example.com/extra")
    );
}

#[test]
fn test_reparse_custom_host() {
    let parts = parse_provider_source("registry.example.io/acme/widget");
    let again = parse_provider_source(&parts.to_source_string());
    assert_eq!(again, parts);
}

#[test]
fn test_coordinate_defaults() {
    let platform = Platform::new("windows", "386");
    let coordinate = ProviderSourceCoordinate::from_source("null", &platform);
    assert_eq!(coordinate.namespace, "-");
    assert!(coordinate.host.is_public_registry());
    assert_eq!(coordinate.registry_id(), "-/null");
    assert_eq!(coordinate.svc_host().unwrap().as_str(), PUBLIC_REGISTRY_HOST);
    assert_eq!(coordinate.os, "windows");
}

#[test]
fn test_host_comparison() {
    assert_eq!(Hostname::for_comparison("Example.COM:443").unwrap().as_str(), "example.com");
    assert_eq!(
        Hostname::for_comparison("bücher.example").unwrap().as_str(),
        "xn--bcher-kva.example"
    );
    assert_eq!(
        Hostname::for_comparison("example.com:08080").unwrap().as_str(),
        "example.com:8080"
    );
    assert!(matches!(
        Hostname::for_comparison(""),
        Err(HostError::InvalidHost { .. })
    ));
    assert!(matches!(
        Hostname::for_comparison("a:b"),
        Err(HostError::InvalidHost { .. })
    ));

    assert!(FriendlyHost::new("REGISTRY.terraform.io").equal(&FriendlyHost::public_registry()));
    assert!(!FriendlyHost::new("bad host").equal(&FriendlyHost::new("bad host")));
}

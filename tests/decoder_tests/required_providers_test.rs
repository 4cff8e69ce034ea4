//! End-to-end decoding of `required_providers` blocks.

use pretty_assertions::assert_eq;
use provider_config::{
    config::DecoderConfig, decode_required_providers_block, diagnostic::DiagnosticKind,
    RequirementDecoder,
};
use serde_json::json;

use super::block_from_json;

#[test]
fn test_null_provider_requirement() {
    let block = block_from_json(json!({
        "type": "required_providers",
        "body": {"blocks": [{
            "type": "provider",
            "labels": ["null"],
            "body": {"attributes": [
                {"name": "source", "expr": {"literal": "terraform-providers/null"}}
            ]}
        }]}
    }));

    let decoded = decode_required_providers_block(&block);
    assert!(decoded.diagnostics.is_empty());

    let requirements: Vec<_> = decoded
        .value
        .iter()
        .filter(|r| !r.is_placeholder())
        .collect();
    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements[0].name, "null");
    assert_eq!(requirements[0].source, "terraform-providers/null");
    assert!(requirements[0].version_constraints.is_empty());
}

#[test]
fn test_numeric_source() {
    let block = block_from_json(json!({
        "type": "required_providers",
        "body": {"blocks": [{
            "type": "provider",
            "labels": ["null"],
            "body": {"attributes": [{
                "name": "source",
                "expr": {"literal": 3},
                "expr_span": {"start": 30, "end": 31, "line": 2, "column": 14}
            }]}
        }]}
    }));

    let decoded = decode_required_providers_block(&block);
    let diags: Vec<_> = decoded.diagnostics.iter().collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::InvalidSourceType);
    assert_eq!(diags[0].summary, "Invalid source constraint");
    assert_eq!(diags[0].subject.as_ref().map(|s| s.start), Some(30));
    assert_eq!(decoded.value[0].source, "");
}

#[test]
fn test_legacy_placeholders_from_config() {
    let config = DecoderConfig::from_json(r#"{"legacy_requirement_placeholders": true}"#).unwrap();
    let block = block_from_json(json!({
        "type": "required_providers",
        "body": {"blocks": [
            {"type": "provider", "labels": ["aws"]},
            {"type": "provider", "labels": ["null"], "body": {"attributes": [
                {"name": "version", "expr": {"literal": "~> 2.1"}}
            ]}}
        ]}
    }));

    let decoded = RequirementDecoder::from_config(&config).decode(&block);
    assert_eq!(decoded.value.len(), 4);
    let real: Vec<_> = decoded.value.iter().filter(|r| !r.is_placeholder()).collect();
    assert_eq!(real.len(), 2);
    assert_eq!(real[1].name, "null");
    assert_eq!(real[1].version_constraints[0].to_string(), "~> 2.1");
}

#[test]
fn test_requirement_coordinates() {
    let config = DecoderConfig::from_json(r#"{"platform": {"os": "linux", "arch": "arm64"}}"#).unwrap();
    let block = block_from_json(json!({
        "type": "required_providers",
        "body": {"blocks": [
            {"type": "provider", "labels": ["custom"], "body": {"attributes": [
                {"name": "source", "expr": {"literal": "Example.COM:443/acme/custom"}}
            ]}}
        ]}
    }));

    let decoded = decode_required_providers_block(&block);
    let coordinate = decoded.value[0].coordinate(&config.platform.resolve());
    assert_eq!(coordinate.registry_id(), "acme/custom");
    assert_eq!(coordinate.arch, "arm64");
    assert_eq!(coordinate.svc_host().unwrap().as_str(), "example.com");
}

#[test]
fn test_empty_configured_os_uses_running_platform() {
    let config = DecoderConfig::from_json(r#"{"platform": {"os": ""}}"#).unwrap();
    let block = block_from_json(json!({
        "type": "required_providers",
        "body": {"blocks": [
            {"type": "provider", "labels": ["null"], "body": {"attributes": [
                {"name": "source", "expr": {"literal": "hashicorp/null"}}
            ]}}
        ]}
    }));

    let decoded = decode_required_providers_block(&block);
    let coordinate = decoded.value[0].coordinate(&config.platform.resolve());
    let current = provider_config::registry::Platform::current();
    assert_eq!(coordinate.os, current.os);
    assert_eq!(coordinate.arch, current.arch);
}

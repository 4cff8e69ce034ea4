//! End-to-end decoding of provider blocks read from JSON block trees.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use provider_config::{
    addrs::ProviderConfig,
    decode_provider_block,
    diagnostic::{Decoded, DiagnosticKind},
    span::Span,
    version::{MockVersionConstraintDecoder, VersionConstraint},
    BlockDecoder, Diagnostic,
};
use serde_json::json;

use super::block_from_json;

fn kinds(diagnostics: &provider_config::Diagnostics) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn test_aliased_provider_address() {
    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["aws"],
        "body": {
            "attributes": [
                {"name": "alias", "expr": {"literal": "west"}},
                {"name": "version", "expr": {"literal": ">= 2.0, < 3.0"}},
                {"name": "region", "expr": {"literal": "us-west-2"}}
            ]
        }
    }));

    let decoded = decode_provider_block(&block);
    assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);

    let provider = decoded.value;
    assert_eq!(provider.name, "aws");
    assert_eq!(provider.alias, "west");
    assert_eq!(provider.module_unique_key(), "aws.west");
    assert_eq!(ProviderConfig::from(&provider), ProviderConfig::new("aws", "west"));
    assert_eq!(provider.addr().to_string(), "provider.aws.west");
    assert_eq!(
        provider.version.required,
        vec![">= 2.0".to_string(), "< 3.0".to_string()]
    );
    assert_eq!(provider.config.attributes.len(), 1);
    assert_eq!(provider.config.attributes[0].name, "region");
}

#[test]
fn test_invalid_alias_is_reported_once_and_kept() {
    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["aws"],
        "body": {
            "attributes": [{
                "name": "alias",
                "expr": {"literal": "1bad"},
                "expr_span": {"file": "main.tf", "start": 40, "end": 46, "line": 3, "column": 11}
            }]
        }
    }));

    let decoded = decode_provider_block(&block);
    assert_eq!(kinds(&decoded.diagnostics), vec![DiagnosticKind::InvalidIdentifier]);
    assert_eq!(decoded.value.alias, "1bad");

    let diag = decoded.diagnostics.iter().next().unwrap();
    assert_eq!(diag.subject, Some(Span::new("main.tf", 40, 46, 3, 11)));
    assert_eq!(decoded.value.alias_span, diag.subject);
}

#[test]
fn test_reserved_count_does_not_disturb_decoding() {
    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["google"],
        "body": {
            "attributes": [
                {"name": "count", "expr": {"literal": 1}},
                {"name": "project", "expr": {"literal": "demo"}}
            ]
        }
    }));

    let decoded = decode_provider_block(&block);
    let reserved: Vec<&Diagnostic> = decoded
        .diagnostics
        .of_kind(DiagnosticKind::ReservedAttribute)
        .collect();
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(reserved.len(), 1);
    assert!(reserved[0].detail.contains("\"count\""));

    assert_eq!(decoded.value.name, "google");
    assert_eq!(decoded.value.alias, "");
    assert!(decoded.value.version.is_unconstrained());
    assert_eq!(decoded.value.config.attributes.len(), 1);
    assert_eq!(decoded.value.config.attributes[0].name, "project");
}

#[test]
fn test_nested_blocks() {
    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["aws"],
        "body": {
            "blocks": [
                {"type": "assume_role", "body": {"attributes": [
                    {"name": "role_arn", "expr": {"literal": "arn:aws:iam::123:role/x"}}
                ]}},
                {"type": "lifecycle"}
            ]
        }
    }));

    let decoded = decode_provider_block(&block);
    assert_eq!(kinds(&decoded.diagnostics), vec![DiagnosticKind::ReservedBlock]);
    assert_eq!(decoded.value.config.blocks.len(), 1);
    assert_eq!(decoded.value.config.blocks[0].block_type, "assume_role");
}

#[test]
fn test_repeatable() {
    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["aws"],
        "body": {
            "attributes": [
                {"name": "alias", "expr": {"variable": "var.alias"}},
                {"name": "source", "expr": {"literal": "hashicorp/aws"}},
                {"name": "depends_on", "expr": {"literal": []}}
            ],
            "blocks": [{"type": "locals"}]
        }
    }));

    let first = decode_provider_block(&block);
    let second = decode_provider_block(&block);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(
        kinds(&first.diagnostics),
        vec![
            DiagnosticKind::EvaluationFailed,
            DiagnosticKind::InvalidIdentifier,
            DiagnosticKind::ReservedAttribute,
            DiagnosticKind::ReservedAttribute,
            DiagnosticKind::ReservedBlock,
        ]
    );
}

#[test]
fn test_custom_version_decoder() {
    let mut versions = MockVersionConstraintDecoder::new();
    versions
        .expect_decode()
        .withf(|attr| attr.name == "version")
        .times(1)
        .returning(|attr| {
            Decoded::new(
                VersionConstraint {
                    required: vec!["~> 5.0".to_string()],
                    decl_span: attr.span.clone(),
                },
                Diagnostic::warning(
                    DiagnosticKind::InvalidVersionConstraint,
                    "Deprecated constraint",
                    "Pessimistic constraints are discouraged here.",
                )
                .into(),
            )
        });

    let block = block_from_json(json!({
        "type": "provider",
        "labels": ["aws"],
        "body": {"attributes": [{"name": "version", "expr": {"literal": "anything"}}]}
    }));

    let decoded = BlockDecoder::new(Arc::new(versions)).decode(&block);
    assert_eq!(decoded.value.version.to_string(), "~> 5.0");
    assert_eq!(decoded.diagnostics.len(), 1);
    assert!(!decoded.diagnostics.has_errors());
}

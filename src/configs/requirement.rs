//! Decoding of `required_providers` blocks.
//!
//! ```text
//! required_providers {
//!   provider "null" {
//!     source  = "terraform-providers/null"
//!     version = "~> 2.1"
//!   }
//! }
//! ```
//!
//! Each nested `provider` block becomes one [`ProviderRequirement`]. A
//! requirement declares a dependency; it does not configure the provider.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::addrs::ProviderType;
use crate::body::{Attribute, AttributeSchema, Block, BlockHeaderSchema, BodySchema};
use crate::config::DecoderConfig;
use crate::diagnostic::{Decoded, Diagnostic, DiagnosticKind, Diagnostics};
use crate::registry::{Platform, ProviderSourceCoordinate};
use crate::version::{RawVersionConstraintDecoder, VersionConstraint, VersionConstraintDecoder};

const REQUIRED_PROVIDERS_SCHEMA: BodySchema = BodySchema {
    attributes: &[],
    blocks: &[BlockHeaderSchema {
        block_type: "provider",
        label_names: &["name"],
    }],
};

const PROVIDER_REQUIREMENT_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("version"),
        AttributeSchema::optional("source"),
    ],
    blocks: &[],
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProviderRequirement {
    pub name: String,
    /// Empty when undeclared or not decodable.
    pub source: String,
    pub version_constraints: Vec<VersionConstraint>,
}

impl ProviderRequirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Placeholder entries only appear in legacy mode; they have no name.
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }

    pub fn provider_type(&self) -> ProviderType {
        ProviderType::new(self.name.clone(), self.source.clone())
    }

    /// Registry coordinate of the required provider on `platform`.
    pub fn coordinate(&self, platform: &Platform) -> ProviderSourceCoordinate {
        ProviderSourceCoordinate::with_platform(&self.name, &self.source, platform)
    }
}

#[derive(Clone)]
pub struct RequirementDecoder {
    versions: Arc<dyn VersionConstraintDecoder + Send + Sync>,
    legacy_placeholders: bool,
}

impl std::fmt::Debug for RequirementDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequirementDecoder")
            .field("legacy_placeholders", &self.legacy_placeholders)
            .finish_non_exhaustive()
    }
}

impl Default for RequirementDecoder {
    fn default() -> Self {
        Self::new(Arc::new(RawVersionConstraintDecoder))
    }
}

impl RequirementDecoder {
    pub fn new(versions: Arc<dyn VersionConstraintDecoder + Send + Sync>) -> Self {
        Self {
            versions,
            legacy_placeholders: false,
        }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::default().with_legacy_placeholders(config.legacy_requirement_placeholders)
    }

    /// When enabled, the result starts with one empty placeholder entry per
    /// nested provider block, as older releases produced. Callers must then
    /// drop entries for which [`ProviderRequirement::is_placeholder`] holds.
    pub fn with_legacy_placeholders(mut self, enabled: bool) -> Self {
        self.legacy_placeholders = enabled;
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(block_type = %block.block_type))]
    pub fn decode(&self, block: &Block) -> Decoded<Vec<ProviderRequirement>> {
        let (content, _, mut diags) = block.body.partial_content(&REQUIRED_PROVIDERS_SCHEMA);

        let mut reqs = if self.legacy_placeholders {
            vec![ProviderRequirement::default(); content.blocks.len()]
        } else {
            Vec::with_capacity(content.blocks.len())
        };

        for nested in &content.blocks {
            let (requirement, nested_diags) = self.decode_requirement(nested);
            diags.append(nested_diags);
            reqs.push(requirement);
        }

        debug!(
            requirements = reqs.len(),
            diagnostics = diags.len(),
            "decoded required_providers block"
        );
        Decoded::new(reqs, diags)
    }

    fn decode_requirement(&self, block: &Block) -> (ProviderRequirement, Diagnostics) {
        let (mut content, residual, mut diags) =
            block.body.partial_content(&PROVIDER_REQUIREMENT_SCHEMA);
        if !residual.is_empty() {
            trace!(
                attributes = residual.attributes.len(),
                blocks = residual.blocks.len(),
                "ignoring unrecognized requirement content"
            );
        }

        let mut requirement = ProviderRequirement::new(block.labels[0].clone());

        if let Some(attr) = content.take_attribute("version") {
            let (version, version_diags) = self.versions.decode(&attr).into_parts();
            requirement.version_constraints.push(version);
            diags.append(version_diags);
        }

        if let Some(attr) = content.take_attribute("source") {
            let (source, source_diags) = decode_provider_source(&attr);
            requirement.source = source;
            diags.append(source_diags);
        }

        (requirement, diags)
    }
}

/// Reduces a `source` attribute to a string. Any failure yields an empty
/// source and a single [`DiagnosticKind::InvalidSourceType`]; a null value
/// counts as no source.
fn decode_provider_source(attr: &Attribute) -> (String, Diagnostics) {
    let mut diags = Diagnostics::new();
    let problem = match attr.expr.value(None) {
        Ok(value) => match value.to_string_scalar() {
            Ok(source) => return (source.unwrap_or_default(), diags),
            Err(e) => e.to_string(),
        },
        Err(e) => e.to_string(),
    };
    diags.push(
        Diagnostic::error(
            DiagnosticKind::InvalidSourceType,
            "Invalid source constraint",
            format!("A string value is required for {} ({}).", attr.name, problem),
        )
        .with_subject(attr.expr_span.clone()),
    );
    (String::new(), diags)
}

/// Decodes a `required_providers` block with the default settings.
pub fn decode_required_providers_block(block: &Block) -> Decoded<Vec<ProviderRequirement>> {
    RequirementDecoder::default().decode(block)
}

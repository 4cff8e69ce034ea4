//! Decoding of `provider` configuration blocks.
//!
//! A provider block names a provider type in its single label and carries the
//! provider's own configuration. Only `alias` and `version` are interpreted
//! here; a handful of attribute names and block types are reserved for
//! future use and rejected. Everything else is left in [`Provider::config`]
//! for the provider's schema to validate.
//!
//! ```
//! use provider_config::body::{Attribute, Block, Body};
//! use provider_config::configs::decode_provider_block;
//! use provider_config::expr::Expression;
//!
//! let block = Block::new("provider").with_label("aws").with_body(
//!     Body::new()
//!         .with_attribute(Attribute::new("alias", Expression::literal("west")))
//!         .with_attribute(Attribute::new("region", Expression::literal("us-west-2"))),
//! );
//!
//! let decoded = decode_provider_block(&block);
//! assert!(decoded.diagnostics.is_empty());
//! assert_eq!(decoded.value.addr().to_string(), "provider.aws.west");
//! assert_eq!(decoded.value.config.attributes[0].name, "region");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

use super::decode_string_attribute;
use crate::addrs::ProviderConfig;
use crate::body::{Attribute, AttributeSchema, Block, BlockHeaderSchema, Body, BodyContent, BodySchema};
use crate::diagnostic::{Decoded, Diagnostic, DiagnosticKind};
use crate::identifier::valid_identifier;
use crate::span::Span;
use crate::version::{RawVersionConstraintDecoder, VersionConstraint, VersionConstraintDecoder};

/// Attribute names reserved inside provider blocks, in schema order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ReservedAttribute {
    Count,
    DependsOn,
    ForEach,
    Source,
}

lazy_static! {
    static ref RESERVED_ATTRIBUTES: HashSet<&'static str> =
        ReservedAttribute::iter().map(<&'static str>::from).collect();
}

/// Block types extracted from a provider block. All of them are reserved.
pub const RESERVED_BLOCK_TYPES: &[&str] = &["lifecycle", "locals"];

const PROVIDER_BLOCK_SCHEMA: BodySchema = BodySchema {
    attributes: &[
        AttributeSchema::optional("alias"),
        AttributeSchema::optional("version"),
        AttributeSchema::optional("count"),
        AttributeSchema::optional("depends_on"),
        AttributeSchema::optional("for_each"),
        AttributeSchema::optional("source"),
    ],
    blocks: &[
        BlockHeaderSchema {
            block_type: "lifecycle",
            label_names: &[],
        },
        BlockHeaderSchema {
            block_type: "locals",
            label_names: &[],
        },
    ],
};

pub fn is_reserved_attribute(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(name)
}

/// Schema-matched content of a provider block.
#[derive(Debug, Default)]
struct ProviderBlockContent {
    alias: Option<Attribute>,
    version: Option<Attribute>,
    reserved_attributes: Vec<Attribute>,
    reserved_blocks: Vec<Block>,
}

impl From<BodyContent> for ProviderBlockContent {
    fn from(mut content: BodyContent) -> Self {
        let alias = content.take_attribute("alias");
        let version = content.take_attribute("version");
        let reserved_attributes = content
            .attributes
            .into_iter()
            .filter(|attr| is_reserved_attribute(&attr.name))
            .collect();
        Self {
            alias,
            version,
            reserved_attributes,
            reserved_blocks: content.blocks,
        }
    }
}

/// A decoded `provider` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    pub name: String,
    pub name_span: Span,
    /// Empty for the default configuration.
    pub alias: String,
    /// Set only when an alias was declared.
    pub alias_span: Option<Span>,
    pub version: VersionConstraint,
    /// Attributes and blocks not interpreted here.
    pub config: Body,
    pub decl_span: Span,
}

impl Provider {
    /// Address of this configuration relative to its module.
    pub fn addr(&self) -> ProviderConfig {
        ProviderConfig::new(self.name.clone(), self.alias.clone())
    }

    pub fn module_unique_key(&self) -> String {
        if self.alias.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.alias)
        }
    }
}

impl From<&Provider> for ProviderConfig {
    fn from(provider: &Provider) -> Self {
        provider.addr()
    }
}

/// Decodes provider blocks, delegating `version` to a
/// [`VersionConstraintDecoder`].
#[derive(Clone)]
pub struct BlockDecoder {
    versions: Arc<dyn VersionConstraintDecoder + Send + Sync>,
}

impl std::fmt::Debug for BlockDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockDecoder").finish_non_exhaustive()
    }
}

impl Default for BlockDecoder {
    fn default() -> Self {
        Self::new(Arc::new(RawVersionConstraintDecoder))
    }
}

impl BlockDecoder {
    pub fn new(versions: Arc<dyn VersionConstraintDecoder + Send + Sync>) -> Self {
        Self { versions }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(name = block.labels.first().map(String::as_str).unwrap_or_default())
    )]
    pub fn decode(&self, block: &Block) -> Decoded<Provider> {
        let (content, config, mut diags) = block.body.partial_content(&PROVIDER_BLOCK_SCHEMA);
        let content = ProviderBlockContent::from(content);

        let name = match block.labels.first() {
            Some(name) => name.clone(),
            None => {
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::MissingLabel,
                        format!("Missing name for {}", block.block_type),
                        "A provider block must have one label: the provider type name.",
                    )
                    .with_subject(block.def_span.clone()),
                );
                String::new()
            }
        };

        let mut provider = Provider {
            name,
            name_span: block.label_span(0),
            alias: String::new(),
            alias_span: None,
            version: VersionConstraint::default(),
            config,
            decl_span: block.def_span.clone(),
        };

        if let Some(attr) = &content.alias {
            let (alias, alias_diags) = decode_string_attribute(attr);
            diags.append(alias_diags);
            provider.alias = alias.unwrap_or_default();
            provider.alias_span = Some(attr.expr_span.clone());

            if !valid_identifier(&provider.alias) {
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::InvalidIdentifier,
                        "Invalid provider configuration alias",
                        "An alias must be a valid name. A name must start with a letter or \
                         underscore and may contain only letters, digits, underscores, and dashes.",
                    )
                    .with_subject(attr.expr_span.clone()),
                );
            }
        }

        if let Some(attr) = &content.version {
            let (version, version_diags) = self.versions.decode(attr).into_parts();
            provider.version = version;
            diags.append(version_diags);
        }

        for attr in &content.reserved_attributes {
            diags.push(
                Diagnostic::error(
                    DiagnosticKind::ReservedAttribute,
                    "Reserved argument name in provider block",
                    format!(
                        "The provider argument name {:?} is reserved for use in a future version.",
                        attr.name
                    ),
                )
                .with_subject(attr.name_span.clone()),
            );
        }

        for reserved in &content.reserved_blocks {
            diags.push(
                Diagnostic::error(
                    DiagnosticKind::ReservedBlock,
                    "Reserved block type name in provider block",
                    format!(
                        "The block type name {:?} is reserved for use in a future version.",
                        reserved.block_type
                    ),
                )
                .with_subject(reserved.type_span.clone()),
            );
        }

        debug!(
            key = %provider.module_unique_key(),
            diagnostics = diags.len(),
            "decoded provider block"
        );
        Decoded::new(provider, diags)
    }
}

/// Decodes a provider block with the default version decoder.
pub fn decode_provider_block(block: &Block) -> Decoded<Provider> {
    BlockDecoder::default().decode(block)
}

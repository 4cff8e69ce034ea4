//! Decoding of provider configuration and provider requirement blocks, with
//! the registry address helpers they rely on.

pub mod addrs;
pub mod body;
pub mod config;
pub mod configs;
pub mod diagnostic;
pub mod error;
pub mod expr;
pub mod identifier;
pub mod registry;
pub mod span;
pub mod version;

// Re-exports
pub use addrs::{ProviderConfig, ProviderType};
pub use body::{Attribute, Block, Body};
pub use config::DecoderConfig;
pub use configs::{
    decode_provider_block, decode_required_providers_block, BlockDecoder, Provider,
    ProviderRequirement, RequirementDecoder,
};
pub use diagnostic::{Decoded, Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{Error, Result};
pub use span::Span;

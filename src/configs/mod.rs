//! Decoders for the provider-related blocks of a module.
//!
//! - [`provider`]: `provider "<name>" { ... }` configuration blocks.
//! - [`requirement`]: `required_providers { ... }` dependency declarations.
//!
//! Both are best-effort: they always return a value, together with the
//! diagnostics found while decoding it.

pub mod provider;
pub mod requirement;

pub use provider::{decode_provider_block, BlockDecoder, Provider};
pub use requirement::{decode_required_providers_block, ProviderRequirement, RequirementDecoder};

use crate::body::Attribute;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

/// Evaluates `attr` without a context and converts the result to a string.
///
/// Returns `None` with a diagnostic when the expression cannot be evaluated
/// or is not a string; a null value yields `None` without a diagnostic.
pub(crate) fn decode_string_attribute(attr: &Attribute) -> (Option<String>, Diagnostics) {
    let mut diags = Diagnostics::new();
    let value = match attr.expr.value(None) {
        Ok(value) => value,
        Err(e) => {
            diags.push(
                Diagnostic::error(
                    DiagnosticKind::EvaluationFailed,
                    format!("Invalid value for {}", attr.name),
                    e.to_string(),
                )
                .with_subject(attr.expr_span.clone()),
            );
            return (None, diags);
        }
    };
    match value.to_string_scalar() {
        Ok(s) => (s, diags),
        Err(e) => {
            diags.push(
                Diagnostic::error(
                    DiagnosticKind::UnsuitableValue,
                    "Unsuitable value type",
                    format!("Unsuitable value: {}", e),
                )
                .with_subject(attr.expr_span.clone()),
            );
            (None, diags)
        }
    }
}

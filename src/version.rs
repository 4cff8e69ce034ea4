//! Version constraints attached to provider blocks and requirements.
//!
//! Interpreting constraint syntax belongs to the version resolver, not to
//! this crate. Decoding goes through the [`VersionConstraintDecoder`] seam;
//! the bundled [`RawVersionConstraintDecoder`] only checks that the attribute
//! is a string and splits it into its comma-separated terms.

use serde::{Deserialize, Serialize};

use crate::body::Attribute;
use crate::diagnostic::{Decoded, Diagnostic, DiagnosticKind, Diagnostics};
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionConstraint {
    /// Constraint terms, e.g. `[">= 1.0", "< 2.0"]`. Empty means any version.
    pub required: Vec<String>,
    pub decl_span: Span,
}

impl VersionConstraint {
    pub fn is_unconstrained(&self) -> bool {
        self.required.is_empty()
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.required.join(", "))
    }
}

/// Decodes a `version` attribute into a [`VersionConstraint`].
///
/// Implementations never fail: problems are reported as diagnostics and the
/// returned constraint is best-effort.
#[mockall::automock]
pub trait VersionConstraintDecoder {
    fn decode(&self, attr: &Attribute) -> Decoded<VersionConstraint>;
}

/// Default decoder: requires a string (or null) and keeps the terms verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawVersionConstraintDecoder;

impl VersionConstraintDecoder for RawVersionConstraintDecoder {
    #[tracing::instrument(level = "debug", skip_all, fields(attr = %attr.name))]
    fn decode(&self, attr: &Attribute) -> Decoded<VersionConstraint> {
        let mut constraint = VersionConstraint {
            required: Vec::new(),
            decl_span: attr.span.clone(),
        };
        let mut diags = Diagnostics::new();

        let value = match attr.expr.value(None) {
            Ok(value) => value,
            Err(e) => {
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::EvaluationFailed,
                        "Invalid version constraint",
                        e.to_string(),
                    )
                    .with_subject(attr.expr_span.clone()),
                );
                return Decoded::new(constraint, diags);
            }
        };

        match value.to_string_scalar() {
            // null means no constraint
            Ok(None) => {}
            Ok(Some(raw)) => {
                constraint.required = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|term| !term.is_empty())
                    .map(String::from)
                    .collect();
            }
            Err(_) => diags.push(
                Diagnostic::error(
                    DiagnosticKind::InvalidVersionConstraint,
                    "Invalid version constraint",
                    format!("A string value is required for {}.", attr.name),
                )
                .with_subject(attr.expr_span.clone()),
            ),
        }

        Decoded::new(constraint, diags)
    }
}

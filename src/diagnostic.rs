//! Diagnostics produced while decoding configuration blocks.
//!
//! Decoding is best-effort: every decode operation returns a [`Decoded`]
//! value carrying both the decoded object and the problems found along the
//! way. Nothing here aborts the caller; it is up to the caller to decide
//! whether an error diagnostic is fatal.
//!
//! Diagnostics are kept in the order they were produced. Decoders produce
//! them in declaration order, so decoding identical input twice yields an
//! identical sequence.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Severity of a [`Diagnostic`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// Classification of decoding problems.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum DiagnosticKind {
    /// A provider alias is not a valid identifier.
    InvalidIdentifier,
    /// An attribute name reserved for future use appears in a provider block.
    ReservedAttribute,
    /// A block type reserved for future use appears in a provider block.
    ReservedBlock,
    /// A `source` attribute could not be reduced to a string.
    InvalidSourceType,
    /// A `version` attribute could not be decoded.
    InvalidVersionConstraint,
    /// A value has the wrong type for the attribute it was assigned to.
    UnsuitableValue,
    /// An expression could not be evaluated.
    EvaluationFailed,
    /// An attribute was declared more than once in the same body.
    DuplicateArgument,
    /// A required attribute is absent.
    MissingRequiredArgument,
    /// A block has fewer labels than its type requires.
    MissingLabel,
    /// A block has more labels than its type allows.
    ExtraneousLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub summary: String,
    pub detail: String,
    pub subject: Option<Span>,
}

impl Diagnostic {
    pub fn error(
        kind: DiagnosticKind,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            summary: summary.into(),
            detail: detail.into(),
            subject: None,
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, summary, detail)
        }
    }

    pub fn with_subject(mut self, subject: Span) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.summary)?;
        if let Some(subject) = &self.subject {
            write!(f, " at {}", subject)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(kind = %diagnostic.kind, "{}", diagnostic.summary);
        self.0.push(diagnostic);
    }

    /// Appends `other` after the diagnostics already collected.
    pub fn append(&mut self, other: Diagnostics) {
        for diagnostic in other.0 {
            self.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.kind == kind)
    }

    /// Merges diagnostics from independent decodes keyed by the declaration
    /// index of the construct each decode worked on, so the result does not
    /// depend on the order in which the decodes finished.
    pub fn merge_ordered<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (usize, Diagnostics)>,
    {
        let mut parts: Vec<_> = parts.into_iter().collect();
        // stable: equal indices keep their relative order
        parts.sort_by_key(|(index, _)| *index);
        let mut merged = Diagnostics::new();
        for (_, diagnostics) in parts {
            merged.append(diagnostics);
        }
        merged
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

/// A best-effort decoded value together with the diagnostics found while
/// producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Decoded<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    pub fn clean(value: T) -> Self {
        Self::new(value, Diagnostics::new())
    }

    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.diagnostics)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}

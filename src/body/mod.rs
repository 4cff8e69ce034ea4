//! Parsed configuration bodies.
//!
//! A [`Block`] is a typed, optionally labeled container for a [`Body`]; a body
//! holds attributes and nested blocks in source order. Decoders never walk a
//! body directly: they describe what they want with a [`BodySchema`] and call
//! [`Body::partial_content`], which splits the body into the matched content
//! and a residual body holding everything else.

mod schema;

pub use schema::{AttributeSchema, BlockHeaderSchema, BodyContent, BodySchema};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::expr::Expression;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub expr: Expression,
    #[serde(default)]
    pub name_span: Span,
    #[serde(default)]
    pub expr_span: Span,
    /// Whole `name = expr` range.
    #[serde(default)]
    pub span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, expr: Expression) -> Self {
        Self {
            name: name.into(),
            expr,
            name_span: Span::default(),
            expr_span: Span::default(),
            span: Span::default(),
        }
    }

    pub fn with_spans(mut self, name_span: Span, expr_span: Span) -> Self {
        self.span = name_span.to(&expr_span);
        self.name_span = name_span;
        self.expr_span = expr_span;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub label_spans: Vec<Span>,
    #[serde(default)]
    pub type_span: Span,
    /// Header range: the type and labels, up to the opening brace.
    #[serde(default)]
    pub def_span: Span,
    #[serde(default)]
    pub body: Body,
}

impl Block {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            labels: Vec::new(),
            label_spans: Vec::new(),
            type_span: Span::default(),
            def_span: Span::default(),
            body: Body::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Span of the label at `index`, falling back to the block header when
    /// the label carries no position.
    pub fn label_span(&self, index: usize) -> Span {
        self.label_spans
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.def_span.clone())
    }
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.blocks.is_empty()
    }

    /// Extracts the attributes and blocks `schema` names.
    ///
    /// Returns the matched content, a residual body with every attribute and
    /// block the schema does not name (source order preserved), and the
    /// problems found during extraction. Matched blocks with the wrong number
    /// of labels are reported and dropped; a repeated attribute is reported
    /// and the first occurrence wins.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn partial_content(&self, schema: &BodySchema) -> (BodyContent, Body, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut matched: Vec<&Attribute> = Vec::new();
        let mut residual = Body {
            span: self.span.clone(),
            ..Body::default()
        };

        for attr in &self.attributes {
            if schema.attribute(&attr.name).is_none() {
                residual.attributes.push(attr.clone());
                continue;
            }
            if let Some(first) = matched.iter().find(|a| a.name == attr.name) {
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::DuplicateArgument,
                        "Duplicate argument",
                        format!(
                            "The argument {:?} was already set at {}. Each argument may be set only once.",
                            attr.name, first.name_span
                        ),
                    )
                    .with_subject(attr.name_span.clone()),
                );
                continue;
            }
            matched.push(attr);
        }

        let mut content = BodyContent::default();
        for attr_schema in schema.attributes {
            match matched.iter().find(|a| a.name == attr_schema.name) {
                Some(attr) => content.attributes.push((*attr).clone()),
                None if attr_schema.required => diags.push(
                    Diagnostic::error(
                        DiagnosticKind::MissingRequiredArgument,
                        "Missing required argument",
                        format!(
                            "The argument {:?} is required, but no definition was found.",
                            attr_schema.name
                        ),
                    )
                    .with_subject(self.span.clone()),
                ),
                None => {}
            }
        }

        for block in &self.blocks {
            let Some(header) = schema.block(&block.block_type) else {
                residual.blocks.push(block.clone());
                continue;
            };
            let expected = header.label_names.len();
            if block.labels.len() < expected {
                let missing = header.label_names[block.labels.len()];
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::MissingLabel,
                        format!("Missing {} for {}", missing, block.block_type),
                        format!(
                            "All {} blocks must have {} labels ({}).",
                            block.block_type,
                            expected,
                            header.label_names.join(", ")
                        ),
                    )
                    .with_subject(block.def_span.clone()),
                );
                continue;
            }
            if block.labels.len() > expected {
                let detail = if expected == 0 {
                    format!("No labels are expected for {} blocks.", block.block_type)
                } else {
                    format!(
                        "Only {} labels ({}) are expected for {} blocks.",
                        expected,
                        header.label_names.join(", "),
                        block.block_type
                    )
                };
                diags.push(
                    Diagnostic::error(
                        DiagnosticKind::ExtraneousLabel,
                        format!("Extraneous label for {}", block.block_type),
                        detail,
                    )
                    .with_subject(block.label_span(expected)),
                );
                continue;
            }
            content.blocks.push(block.clone());
        }

        (content, residual, diags)
    }
}

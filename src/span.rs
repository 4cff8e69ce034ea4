use serde::{Deserialize, Serialize};

/// Location of a construct in a configuration file.
///
/// `start`/`end` are byte offsets; `line`/`column` are 1-based and point at
/// `start`. Spans are provenance for diagnostics only and never take part in
/// decoding decisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    #[serde(default = "default_position")]
    pub line: usize,
    #[serde(default = "default_position")]
    pub column: usize,
}

fn default_position() -> usize {
    1
}

impl Span {
    pub fn new(file: impl Into<String>, start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            start,
            end,
            line,
            column,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            file: self.file.clone(),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.file.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

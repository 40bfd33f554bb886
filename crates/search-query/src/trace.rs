//! Diagnostic record of the source expressions behind a flat query.

use serde::{Deserialize, Serialize};

/// Byte range of a term in the query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One term as it appeared in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    /// Canonical field name; empty for pattern terms.
    pub field: String,
    /// The value text with quotes and escapes removed.
    pub value: String,
    pub negated: bool,
    pub quoted: bool,
    pub span: Span,
}

/// The ordered expressions a query was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseTrace(Vec<Expr>);

pub(crate) static EMPTY_TRACE: ParseTrace = ParseTrace::empty();

impl ParseTrace {
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new(exprs: Vec<Expr>) -> Self {
        Self(exprs)
    }

    pub fn exprs(&self) -> &[Expr] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first expression for `field`, for position reporting.
    pub fn find(&self, field: &str) -> Option<&Expr> {
        self.0.iter().find(|expr| expr.field == field)
    }
}

impl<'a> IntoIterator for &'a ParseTrace {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(field: &str, value: &str, start: usize) -> Expr {
        Expr {
            field: field.to_string(),
            value: value.to_string(),
            negated: false,
            quoted: false,
            span: Span::new(start, start + field.len() + value.len() + 1),
        }
    }

    #[test]
    fn find_returns_first_match() {
        let trace = ParseTrace::new(vec![expr("repo", "a", 0), expr("repo", "b", 7)]);
        assert_eq!(trace.find("repo").map(|e| e.value.as_str()), Some("a"));
        assert!(trace.find("file").is_none());
    }

    #[test]
    fn serializes_as_plain_list() {
        let trace = ParseTrace::new(vec![expr("file", "x", 0)]);
        let json = serde_json::to_value(&trace).expect("serialize trace");
        assert!(json.is_array());
        assert_eq!(json[0]["field"], "file");
        assert_eq!(json[0]["span"]["end"], 6);
    }
}

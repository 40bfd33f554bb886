use crate::expression::ExpressionTree;
use crate::facade::{Capabilities, FieldMap, Polarized, QueryInfo, EMPTY_FIELDS};
use crate::trace::{ParseTrace, EMPTY_TRACE};
use crate::value::TypedValue;

/// A query containing and/or expressions.
///
/// Extraction is not boolean-aware yet: flattening a tree into per-field
/// lists would lose the and/or structure, so every facade operation answers
/// with its empty default and [`QueryInfo::capabilities`] reports nothing.
/// Callers that need the fields walk [`BooleanQuery::expression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanQuery {
    expression: ExpressionTree,
}

impl BooleanQuery {
    pub fn new(expression: ExpressionTree) -> Self {
        Self { expression }
    }

    pub fn expression(&self) -> &ExpressionTree {
        &self.expression
    }

    pub fn into_expression(self) -> ExpressionTree {
        self.expression
    }
}

impl QueryInfo for BooleanQuery {
    fn regexp_patterns(&self, _field: &str) -> Polarized<Vec<&str>> {
        Polarized::default()
    }

    fn string_values(&self, _field: &str) -> Polarized<Vec<&str>> {
        Polarized::default()
    }

    fn string_value(&self, _field: &str) -> Polarized<&str> {
        Polarized::default()
    }

    fn values(&self, _field: &str) -> &[TypedValue] {
        &[]
    }

    fn fields(&self) -> &FieldMap {
        &EMPTY_FIELDS
    }

    fn is_case_sensitive(&self) -> bool {
        false
    }

    fn parse_tree(&self) -> &ParseTrace {
        &EMPTY_TRACE
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }
}

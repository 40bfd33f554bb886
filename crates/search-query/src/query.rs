//! Query variants and the sum type consumers hold.
//!
//! A query is either ordinary (flat `field:value` terms) or boolean (an
//! and/or expression tree), never both. Consumers work through
//! [`QueryInfo`]; the only sanctioned look at the concrete variant is
//! [`Query::as_boolean`] for walking the expression tree.

mod boolean;
mod ordinary;

pub use boolean::BooleanQuery;
pub use ordinary::OrdinaryQuery;

use crate::config::SyntaxMode;
use crate::expression::ExpressionTree;
use crate::facade::{Capabilities, FieldMap, Polarized, QueryInfo};
use crate::trace::ParseTrace;
use crate::value::TypedValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Ordinary(OrdinaryQuery),
    Boolean(BooleanQuery),
}

impl Query {
    /// The syntax mode that produces this variant.
    pub fn syntax(&self) -> SyntaxMode {
        match self {
            Query::Ordinary(_) => SyntaxMode::Ordinary,
            Query::Boolean(_) => SyntaxMode::AndOr,
        }
    }

    pub fn as_ordinary(&self) -> Option<&OrdinaryQuery> {
        match self {
            Query::Ordinary(query) => Some(query),
            Query::Boolean(_) => None,
        }
    }

    /// Returns the boolean variant for callers that must walk the tree.
    pub fn as_boolean(&self) -> Option<&BooleanQuery> {
        match self {
            Query::Boolean(query) => Some(query),
            Query::Ordinary(_) => None,
        }
    }

    /// The expression tree, when this is a boolean query.
    pub fn expression(&self) -> Option<&ExpressionTree> {
        self.as_boolean().map(BooleanQuery::expression)
    }

    /// Whether every facade operation reflects the query's contents.
    ///
    /// False for boolean queries, whose extraction answers are placeholders.
    pub fn is_extraction_complete(&self) -> bool {
        self.capabilities().contains(Capabilities::all())
    }

    /// Returns the field set only when it is real.
    ///
    /// Unlike [`QueryInfo::fields`], this does not let an empty placeholder
    /// pass for a query without fields.
    pub fn require_fields(&self) -> Option<&FieldMap> {
        if self.capabilities().contains(Capabilities::FIELD_EXTRACTION) {
            return Some(self.fields());
        }
        log::warn!(
            "field extraction requested from a {:?} query; walk the expression tree instead",
            self.syntax()
        );
        None
    }
}

impl From<OrdinaryQuery> for Query {
    fn from(query: OrdinaryQuery) -> Self {
        Query::Ordinary(query)
    }
}

impl From<BooleanQuery> for Query {
    fn from(query: BooleanQuery) -> Self {
        Query::Boolean(query)
    }
}

impl QueryInfo for Query {
    fn regexp_patterns(&self, field: &str) -> Polarized<Vec<&str>> {
        match self {
            Query::Ordinary(query) => query.regexp_patterns(field),
            Query::Boolean(query) => query.regexp_patterns(field),
        }
    }

    fn string_values(&self, field: &str) -> Polarized<Vec<&str>> {
        match self {
            Query::Ordinary(query) => query.string_values(field),
            Query::Boolean(query) => query.string_values(field),
        }
    }

    fn string_value(&self, field: &str) -> Polarized<&str> {
        match self {
            Query::Ordinary(query) => query.string_value(field),
            Query::Boolean(query) => query.string_value(field),
        }
    }

    fn values(&self, field: &str) -> &[TypedValue] {
        match self {
            Query::Ordinary(query) => query.values(field),
            Query::Boolean(query) => query.values(field),
        }
    }

    fn fields(&self) -> &FieldMap {
        match self {
            Query::Ordinary(query) => query.fields(),
            Query::Boolean(query) => query.fields(),
        }
    }

    fn is_case_sensitive(&self) -> bool {
        match self {
            Query::Ordinary(query) => query.is_case_sensitive(),
            Query::Boolean(query) => query.is_case_sensitive(),
        }
    }

    fn parse_tree(&self) -> &ParseTrace {
        match self {
            Query::Ordinary(query) => query.parse_tree(),
            Query::Boolean(query) => query.parse_tree(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        match self {
            Query::Ordinary(query) => query.capabilities(),
            Query::Boolean(query) => query.capabilities(),
        }
    }
}

//! Boolean expression trees produced by and/or syntax.

use std::collections::BTreeSet;
use std::fmt;

use crate::fields::DEFAULT_FIELD;
use crate::value::{TypedValue, ValueData};

/// A parsed and/or query (AST node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionTree {
    Leaf(Predicate),
    Not(Box<ExpressionTree>),
    And(Vec<ExpressionTree>),
    Or(Vec<ExpressionTree>),
}

/// A single `field:value` constraint (leaf node in the AST).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub value: TypedValue,
}

impl Predicate {
    pub fn new(field: impl Into<String>, value: TypedValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Returns true for bare search patterns.
    pub fn is_pattern(&self) -> bool {
        self.field == DEFAULT_FIELD
    }
}

impl ExpressionTree {
    pub fn leaf(field: impl Into<String>, value: TypedValue) -> Self {
        Self::Leaf(Predicate::new(field, value))
    }

    pub fn negate(inner: ExpressionTree) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Checks if the tree contains at least one leaf.
    pub fn has_terms(&self) -> bool {
        match self {
            ExpressionTree::Leaf(_) => true,
            ExpressionTree::Not(inner) => inner.has_terms(),
            ExpressionTree::And(parts) | ExpressionTree::Or(parts) => {
                parts.iter().any(ExpressionTree::has_terms)
            }
        }
    }

    /// Visits every leaf predicate in source order.
    ///
    /// Polarity from enclosing `Not` nodes is not applied to the yielded
    /// predicates; callers that care must walk the tree themselves.
    pub fn predicates(&self) -> Predicates<'_> {
        Predicates { stack: vec![self] }
    }

    /// Returns the distinct field names mentioned anywhere in the tree.
    pub fn mentioned_fields(&self) -> BTreeSet<&str> {
        self.predicates()
            .map(|predicate| predicate.field.as_str())
            .collect()
    }

    /// Returns the nesting depth; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            ExpressionTree::Leaf(_) => 1,
            ExpressionTree::Not(inner) => 1 + inner.depth(),
            ExpressionTree::And(parts) | ExpressionTree::Or(parts) => {
                1 + parts.iter().map(ExpressionTree::depth).max().unwrap_or(0)
            }
        }
    }

    /// Flattens nested AND/OR groups and unwraps single-item groups.
    ///
    /// The function never mutates the input; a new tree is returned.
    pub fn flatten(self) -> ExpressionTree {
        match self {
            ExpressionTree::And(parts) => flatten_group(parts, true),
            ExpressionTree::Or(parts) => flatten_group(parts, false),
            ExpressionTree::Not(inner) => ExpressionTree::Not(Box::new(inner.flatten())),
            ExpressionTree::Leaf(_) => self,
        }
    }
}

fn flatten_group(parts: Vec<ExpressionTree>, conjunction: bool) -> ExpressionTree {
    let mut flattened = Vec::with_capacity(parts.len());

    for expr in parts.into_iter().map(ExpressionTree::flatten) {
        match expr {
            ExpressionTree::And(nested) if conjunction => flattened.extend(nested),
            ExpressionTree::Or(nested) if !conjunction => flattened.extend(nested),
            other => flattened.push(other),
        }
    }

    if flattened.len() == 1 {
        if let Some(only) = flattened.pop() {
            return only;
        }
    }
    if conjunction {
        ExpressionTree::And(flattened)
    } else {
        ExpressionTree::Or(flattened)
    }
}

/// Depth-first iterator over the leaves of an [`ExpressionTree`].
pub struct Predicates<'a> {
    stack: Vec<&'a ExpressionTree>,
}

impl<'a> Iterator for Predicates<'a> {
    type Item = &'a Predicate;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                ExpressionTree::Leaf(predicate) => return Some(predicate),
                ExpressionTree::Not(inner) => self.stack.push(inner),
                ExpressionTree::And(parts) | ExpressionTree::Or(parts) => {
                    self.stack.extend(parts.iter().rev());
                }
            }
        }
        None
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_negated() {
            write!(f, "-")?;
        }
        if !self.is_pattern() {
            write!(f, "{}:", self.field)?;
        }
        match self.value.data() {
            ValueData::String(value) => write!(f, "{value:?}"),
            ValueData::Regexp(pattern) => write!(f, "{pattern}"),
            ValueData::Bool(true) => write!(f, "yes"),
            ValueData::Bool(false) => write!(f, "no"),
        }
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionTree::Leaf(predicate) => write!(f, "{predicate}"),
            ExpressionTree::Not(inner) => write!(f, "(not {inner})"),
            ExpressionTree::And(parts) => write_group(f, "and", parts),
            ExpressionTree::Or(parts) => write_group(f, "or", parts),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, op: &str, parts: &[ExpressionTree]) -> fmt::Result {
    write!(f, "({op}")?;
    for part in parts {
        write!(f, " {part}")?;
    }
    write!(f, ")")
}

//! Query representation and introspection for code search.
//!
//! This crate provides the query layer shared by planners, highlighters and
//! result filters:
//! - Typed field values and the flat `ValueStore` they live in
//! - The boolean `ExpressionTree` produced by and/or syntax
//! - The `QueryInfo` facade both query variants implement
//! - A reference parser for both surface syntaxes

pub mod config;
pub mod error;
pub mod expression;
pub mod facade;
pub mod fields;
pub mod parser;
pub mod query;
pub mod store;
pub mod trace;
pub mod value;

// Re-export main types
pub use config::{QueryConfig, SearchType, SyntaxMode};
pub use error::{QueryError, Result};
pub use expression::{ExpressionTree, Predicate};
pub use facade::{Capabilities, FieldMap, Polarized, QueryInfo};
pub use fields::{FieldRegistry, FieldSpec, DEFAULT_FIELD};
pub use parser::QueryParser;
pub use query::{BooleanQuery, OrdinaryQuery, Query};
pub use store::{ValueStore, ValueStoreBuilder};
pub use trace::{Expr, ParseTrace, Span};
pub use value::{TypedValue, ValueData, ValueKind};

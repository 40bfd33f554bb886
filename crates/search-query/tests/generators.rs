//! Proptest generators for query data structures
//!
//! Provides `Strategy` implementations for typed values, value stores and
//! expression trees used in property tests.

#![allow(dead_code)]

use proptest::collection::vec;
use proptest::prelude::*;
use search_query::{ExpressionTree, TypedValue, ValueData, ValueStore};

// ============================================================================
// Field names and values
// ============================================================================

/// Field names drawn from a small vocabulary so fields repeat
pub fn arb_field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("repo".to_string()),
        Just("file".to_string()),
        Just("lang".to_string()),
        Just("content".to_string()),
        "[a-z][a-z0-9_]{0,6}",
    ]
}

/// Non-empty value text
pub fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.*]{1,8}"
}

pub fn arb_typed_value() -> impl Strategy<Value = TypedValue> {
    let data = prop_oneof![
        arb_text().prop_map(ValueData::String),
        arb_text().prop_map(ValueData::Regexp),
        any::<bool>().prop_map(ValueData::Bool),
    ];
    (data, any::<bool>()).prop_map(|(data, negated)| TypedValue::new(data, negated))
}

/// A string value with an explicit polarity
pub fn arb_string_value() -> impl Strategy<Value = TypedValue> {
    (arb_text(), any::<bool>())
        .prop_map(|(text, negated)| TypedValue::new(ValueData::String(text), negated))
}

// ============================================================================
// Stores and trees
// ============================================================================

/// Field/value pairs in insertion order
pub fn arb_entries() -> impl Strategy<Value = Vec<(String, TypedValue)>> {
    vec((arb_field_name(), arb_typed_value()), 0..24)
}

pub fn build_store(entries: &[(String, TypedValue)]) -> ValueStore {
    let mut builder = ValueStore::builder();
    for (field, value) in entries {
        builder.push(field.clone(), value.clone());
    }
    builder.build()
}

pub fn arb_value_store() -> impl Strategy<Value = ValueStore> {
    arb_entries().prop_map(|entries| build_store(&entries))
}

pub fn arb_expression_tree() -> impl Strategy<Value = ExpressionTree> {
    let leaf = (arb_field_name(), arb_typed_value())
        .prop_map(|(field, value)| ExpressionTree::leaf(field, value));
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(ExpressionTree::negate),
            vec(inner.clone(), 1..4).prop_map(ExpressionTree::And),
            vec(inner, 1..4).prop_map(ExpressionTree::Or),
        ]
    })
}

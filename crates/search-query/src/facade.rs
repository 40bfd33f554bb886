//! The read-only contract every query variant implements.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::trace::ParseTrace;
use crate::value::TypedValue;

/// Field name to the values authored for it, in source order.
pub type FieldMap = BTreeMap<String, Vec<TypedValue>>;

pub(crate) static EMPTY_FIELDS: FieldMap = BTreeMap::new();

/// Values split by polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polarized<T> {
    pub affirmed: T,
    pub negated: T,
}

impl<T> Polarized<T> {
    pub fn new(affirmed: T, negated: T) -> Self {
        Self { affirmed, negated }
    }

    pub fn into_tuple(self) -> (T, T) {
        (self.affirmed, self.negated)
    }
}

bitflags! {
    /// Which parts of the facade carry real information for a query.
    ///
    /// A variant that lacks a flag still answers the matching operations,
    /// but only with the contract's empty defaults.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Field and value extraction reflects the query.
        const FIELD_EXTRACTION = 1 << 0;
        /// `is_case_sensitive` is derived from the query.
        const CASE_DERIVATION = 1 << 1;
        /// `parse_tree` records the source expressions.
        const PARSE_TRACE = 1 << 2;
    }
}

/// Uniform introspection over flat and boolean queries.
///
/// Every operation is a pure projection: it never fails, never panics on an
/// unknown field, and returns empty results when there is nothing to report.
pub trait QueryInfo {
    /// Regexp values for `field`, split by polarity, in stored order.
    /// Values of other kinds are skipped.
    fn regexp_patterns(&self, field: &str) -> Polarized<Vec<&str>>;

    /// String values for `field`, split by polarity, in stored order.
    fn string_values(&self, field: &str) -> Polarized<Vec<&str>>;

    /// The first affirmed and first negated string value of `field`.
    ///
    /// An empty string means the value is absent. Only use this for fields
    /// whose grammar forbids empty values.
    fn string_value(&self, field: &str) -> Polarized<&str>;

    /// Every value of `field` regardless of kind, in stored order.
    fn values(&self, field: &str) -> &[TypedValue];

    /// The full field set as authored.
    fn fields(&self) -> &FieldMap;

    fn is_case_sensitive(&self) -> bool;

    fn parse_tree(&self) -> &ParseTrace;

    fn capabilities(&self) -> Capabilities;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarized_default_is_empty() {
        let values: Polarized<Vec<&str>> = Polarized::default();
        assert!(values.affirmed.is_empty());
        assert!(values.negated.is_empty());

        let value: Polarized<&str> = Polarized::default();
        assert_eq!(value.into_tuple(), ("", ""));
    }

    #[test]
    fn capabilities_compose() {
        let all = Capabilities::all();
        assert!(all.contains(Capabilities::FIELD_EXTRACTION | Capabilities::PARSE_TRACE));
        assert!(Capabilities::empty().is_empty());
    }
}

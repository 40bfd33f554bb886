use crate::facade::{Capabilities, FieldMap, Polarized, QueryInfo};
use crate::store::ValueStore;
use crate::trace::ParseTrace;
use crate::value::TypedValue;

/// A query of flat `field:value` terms, corresponding to a single search.
///
/// Every facade operation delegates to the wrapped [`ValueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinaryQuery {
    store: ValueStore,
    parse_tree: ParseTrace,
}

impl OrdinaryQuery {
    pub fn new(store: ValueStore, parse_tree: ParseTrace) -> Self {
        Self { store, parse_tree }
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn into_parts(self) -> (ValueStore, ParseTrace) {
        (self.store, self.parse_tree)
    }
}

impl QueryInfo for OrdinaryQuery {
    fn regexp_patterns(&self, field: &str) -> Polarized<Vec<&str>> {
        self.store.regexp_patterns(field)
    }

    fn string_values(&self, field: &str) -> Polarized<Vec<&str>> {
        self.store.string_values(field)
    }

    fn string_value(&self, field: &str) -> Polarized<&str> {
        self.store.string_value(field)
    }

    fn values(&self, field: &str) -> &[TypedValue] {
        self.store.values(field)
    }

    fn fields(&self) -> &FieldMap {
        self.store.fields()
    }

    fn is_case_sensitive(&self) -> bool {
        self.store.is_case_sensitive()
    }

    fn parse_tree(&self) -> &ParseTrace {
        &self.parse_tree
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }
}

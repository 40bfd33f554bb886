//! Flat field-to-values storage produced by ordinary syntax.

use crate::facade::{FieldMap, Polarized};
use crate::value::TypedValue;

/// The field that controls case-sensitive matching.
pub const CASE_FIELD: &str = "case";

/// An immutable mapping from field name to its ordered values.
///
/// A field missing from the store places no constraint on the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueStore {
    fields: FieldMap,
    case_sensitive_default: bool,
}

impl ValueStore {
    pub fn builder() -> ValueStoreBuilder {
        ValueStoreBuilder::default()
    }

    /// Wraps an already-built field map.
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            fields,
            case_sensitive_default: false,
        }
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn values(&self, field: &str) -> &[TypedValue] {
        self.fields
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn regexp_patterns(&self, field: &str) -> Polarized<Vec<&str>> {
        partition(self.values(field), TypedValue::as_regexp)
    }

    pub fn string_values(&self, field: &str) -> Polarized<Vec<&str>> {
        partition(self.values(field), TypedValue::as_str)
    }

    /// First affirmed and first negated string value; `""` when absent.
    pub fn string_value(&self, field: &str) -> Polarized<&str> {
        let mut result = Polarized::default();
        let mut seen_affirmed = false;
        let mut seen_negated = false;
        for value in self.values(field) {
            let Some(text) = value.as_str() else {
                continue;
            };
            if value.is_negated() {
                if !seen_negated {
                    result.negated = text;
                    seen_negated = true;
                }
            } else if !seen_affirmed {
                result.affirmed = text;
                seen_affirmed = true;
            }
            if seen_affirmed && seen_negated {
                break;
            }
        }
        result
    }

    /// The first affirmed boolean value of `field`.
    pub fn bool_value(&self, field: &str) -> Option<bool> {
        self.values(field)
            .iter()
            .filter(|value| !value.is_negated())
            .find_map(TypedValue::as_bool)
    }

    /// Whether matching should be case sensitive.
    ///
    /// The first affirmed `case` value decides; without one the store's
    /// default applies, which is `false` unless configured otherwise.
    pub fn is_case_sensitive(&self) -> bool {
        self.bool_value(CASE_FIELD)
            .unwrap_or(self.case_sensitive_default)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn partition<'a>(
    values: &'a [TypedValue],
    extract: impl Fn(&'a TypedValue) -> Option<&'a str>,
) -> Polarized<Vec<&'a str>> {
    let mut result = Polarized::<Vec<&str>>::default();
    for value in values {
        let Some(text) = extract(value) else {
            continue;
        };
        if value.is_negated() {
            result.negated.push(text);
        } else {
            result.affirmed.push(text);
        }
    }
    result
}

/// Accumulates values before freezing them into a [`ValueStore`].
#[derive(Debug, Default)]
pub struct ValueStoreBuilder {
    fields: FieldMap,
    case_sensitive_default: bool,
}

impl ValueStoreBuilder {
    /// Appends a value to `field`, after any values already pushed.
    pub fn push(&mut self, field: impl Into<String>, value: TypedValue) -> &mut Self {
        self.fields.entry(field.into()).or_default().push(value);
        self
    }

    pub fn value(mut self, field: impl Into<String>, value: TypedValue) -> Self {
        self.push(field, value);
        self
    }

    pub fn case_sensitive_default(mut self, enabled: bool) -> Self {
        self.case_sensitive_default = enabled;
        self
    }

    pub fn build(self) -> ValueStore {
        ValueStore {
            fields: self.fields,
            case_sensitive_default: self.case_sensitive_default,
        }
    }
}

//! Typed field values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a field value, as assigned by the field registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Regexp,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::Regexp => write!(f, "regexp"),
            ValueKind::Bool => write!(f, "bool"),
        }
    }
}

/// The raw payload of a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "raw", rename_all = "lowercase")]
pub enum ValueData {
    String(String),
    /// A regular expression source. It is never compiled at this layer.
    Regexp(String),
    Bool(bool),
}

/// A field value together with its polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedValue {
    data: ValueData,
    negated: bool,
}

impl TypedValue {
    pub fn new(data: ValueData, negated: bool) -> Self {
        Self { data, negated }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueData::String(value.into()), false)
    }

    pub fn regexp(pattern: impl Into<String>) -> Self {
        Self::new(ValueData::Regexp(pattern.into()), false)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueData::Bool(value), false)
    }

    /// Returns the same value with negated polarity.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn kind(&self) -> ValueKind {
        match self.data {
            ValueData::String(_) => ValueKind::String,
            ValueData::Regexp(_) => ValueKind::Regexp,
            ValueData::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the string payload if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the pattern source if this is a regexp value.
    pub fn as_regexp(&self) -> Option<&str> {
        match &self.data {
            ValueData::Regexp(pattern) => Some(pattern.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        match &self.data {
            ValueData::String(value) => write!(f, "{value:?}"),
            ValueData::Regexp(pattern) => write!(f, "/{pattern}/"),
            ValueData::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Parses a boolean field value.
///
/// Accepts `yes/no`, `true/false`, `y/n` and `1/0`, ignoring ASCII case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_payload() {
        assert_eq!(TypedValue::string("a").kind(), ValueKind::String);
        assert_eq!(TypedValue::regexp("a.*").kind(), ValueKind::Regexp);
        assert_eq!(TypedValue::bool(true).kind(), ValueKind::Bool);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let value = TypedValue::regexp("foo");
        assert_eq!(value.as_regexp(), Some("foo"));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_bool(), None);
    }

    #[test]
    fn negate_toggles_polarity() {
        let value = TypedValue::string("x").negate();
        assert!(value.is_negated());
        assert!(!value.negate().is_negated());
    }

    #[test]
    fn display_marks_negation_and_kind() {
        assert_eq!(TypedValue::string("a b").negate().to_string(), "-\"a b\"");
        assert_eq!(TypedValue::regexp("^x$").to_string(), "/^x$/");
    }

    #[test]
    fn parse_bool_variants() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("n"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

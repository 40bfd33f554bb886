//! Parser configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Which surface syntax the parser accepts, and so which query variant it
/// produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxMode {
    /// Flat `field:value` terms; produces an ordinary query.
    #[default]
    Ordinary,
    /// Nested `and` / `or` / `not` expressions; produces a boolean query.
    AndOr,
}

/// How bare pattern terms are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Regex,
    Literal,
    Structural,
}

impl FromStr for SearchType {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "regex" | "regexp" => Ok(SearchType::Regex),
            "literal" => Ok(SearchType::Literal),
            "structural" => Ok(SearchType::Structural),
            _ => Err(QueryError::InvalidValue {
                field: "patterntype".to_string(),
                value: value.to_string(),
                reason: "expected regex, literal or structural".to_string(),
            }),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchType::Regex => write!(f, "regex"),
            SearchType::Literal => write!(f, "literal"),
            SearchType::Structural => write!(f, "structural"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub syntax: SyntaxMode,
    /// Used unless the query names a `patterntype:`.
    pub search_type: SearchType,
    /// Case sensitivity for queries without a `case:` field.
    pub case_sensitive_default: bool,
}

impl QueryConfig {
    /// Decodes a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|error| QueryError::Config(error.to_string()))
    }

    pub fn with_syntax(mut self, syntax: SyntaxMode) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = QueryConfig::from_json_str(r#"{"syntax":"and_or"}"#).expect("valid config");
        assert_eq!(config.syntax, SyntaxMode::AndOr);
        assert_eq!(config.search_type, SearchType::Regex);
        assert!(!config.case_sensitive_default);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let error = QueryConfig::from_json_str(r#"{"syntax":"lisp"}"#).unwrap_err();
        assert!(matches!(error, QueryError::Config(_)));
    }

    #[test]
    fn search_type_from_str() {
        assert_eq!("Literal".parse::<SearchType>(), Ok(SearchType::Literal));
        assert_eq!("regexp".parse::<SearchType>(), Ok(SearchType::Regex));
        assert!("fuzzy".parse::<SearchType>().is_err());
    }
}

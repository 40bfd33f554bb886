//! Query parsing for ordinary and and/or syntax.
//!
//! The configured [`SyntaxMode`] decides the variant: ordinary input becomes
//! a [`Query::Ordinary`] backed by a `ValueStore`, and/or input always
//! becomes a [`Query::Boolean`] backed by an `ExpressionTree`.

mod and_or;
mod token;

use fnv::FnvHashSet;

use crate::config::{QueryConfig, SearchType, SyntaxMode};
use crate::error::{QueryError, Result};
use crate::fields::{FieldRegistry, DEFAULT_FIELD};
use crate::query::{BooleanQuery, OrdinaryQuery, Query};
use crate::store::ValueStore;
use crate::trace::{Expr, ParseTrace, Span};
use crate::value::{parse_bool, TypedValue, ValueData, ValueKind};

use and_or::AndOrParser;
use token::{tokenize, RawTerm, Token, TokenKind};

const PATTERN_TYPE_FIELD: &str = "patterntype";

pub struct QueryParser {
    config: QueryConfig,
    registry: FieldRegistry,
}

impl QueryParser {
    pub fn new(config: QueryConfig, registry: FieldRegistry) -> Self {
        Self { config, registry }
    }

    /// A parser over the standard code search field vocabulary.
    pub fn code_search(config: QueryConfig) -> Self {
        Self::new(config, FieldRegistry::code_search())
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn parse(&self, input: &str) -> Result<Query> {
        let tokens = tokenize(input, self.config.syntax)?;
        if tokens.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let typer = TermTyper {
            registry: &self.registry,
            search_type: self.effective_search_type(&tokens)?,
            seen_singular: FnvHashSet::default(),
        };
        log::debug!(
            "parsing {} query tokens as {:?} (search type {})",
            tokens.len(),
            self.config.syntax,
            typer.search_type
        );

        let query = match self.config.syntax {
            SyntaxMode::Ordinary => Query::Ordinary(self.parse_ordinary(tokens, typer)?),
            SyntaxMode::AndOr => {
                let expression = AndOrParser::new(tokens, typer).parse()?;
                Query::Boolean(BooleanQuery::new(expression))
            }
        };
        log::debug!("parsed {:?} query", query.syntax());
        Ok(query)
    }

    fn parse_ordinary(
        &self,
        tokens: Vec<Token>,
        mut typer: TermTyper<'_>,
    ) -> Result<OrdinaryQuery> {
        let mut builder =
            ValueStore::builder().case_sensitive_default(self.config.case_sensitive_default);
        let mut exprs = Vec::with_capacity(tokens.len());

        for token in tokens {
            let TokenKind::Term(raw) = token.kind else {
                return Err(QueryError::parse(
                    "unexpected operator in ordinary query",
                    token.span.start,
                ));
            };
            let (field, value) = typer.type_term(&raw, token.span)?;
            log::trace!("term {field:?} = {value}");
            exprs.push(Expr {
                field: field.clone(),
                value: raw.value,
                negated: raw.negated,
                quoted: raw.quoted,
                span: token.span,
            });
            builder.push(field, value);
        }

        Ok(OrdinaryQuery::new(builder.build(), ParseTrace::new(exprs)))
    }

    /// The first `patterntype:` value in the input, or the configured default.
    fn effective_search_type(&self, tokens: &[Token]) -> Result<SearchType> {
        for token in tokens {
            let TokenKind::Term(RawTerm {
                field: Some(field),
                value,
                ..
            }) = &token.kind
            else {
                continue;
            };
            let is_pattern_type = self
                .registry
                .lookup(field)
                .is_some_and(|spec| spec.name() == PATTERN_TYPE_FIELD);
            if is_pattern_type {
                return value.parse();
            }
        }
        Ok(self.config.search_type)
    }
}

/// Resolves fields and types values for one parse.
pub(crate) struct TermTyper<'a> {
    registry: &'a FieldRegistry,
    search_type: SearchType,
    seen_singular: FnvHashSet<String>,
}

impl TermTyper<'_> {
    /// Returns the canonical field name and typed value of a term.
    pub(crate) fn type_term(&mut self, raw: &RawTerm, span: Span) -> Result<(String, TypedValue)> {
        let Some(name) = raw.field.as_deref() else {
            return self.type_pattern(raw, span);
        };

        let spec = self
            .registry
            .lookup(name)
            .ok_or_else(|| QueryError::UnknownField(name.to_string()))?;
        let field = spec.name().to_string();

        if raw.negated && !spec.is_negatable() {
            return Err(QueryError::NegationNotAllowed(field));
        }
        if raw.value.is_empty() {
            return Err(QueryError::InvalidValue {
                field,
                value: String::new(),
                reason: "value must not be empty".to_string(),
            });
        }
        if spec.is_singular() && !self.seen_singular.insert(field.clone()) {
            return Err(QueryError::DuplicateField(field));
        }

        let data = match spec.kind() {
            ValueKind::String => ValueData::String(raw.value.clone()),
            ValueKind::Regexp => ValueData::Regexp(raw.value.clone()),
            ValueKind::Bool => {
                let value = parse_bool(&raw.value).ok_or_else(|| QueryError::InvalidValue {
                    field: field.clone(),
                    value: raw.value.clone(),
                    reason: "expected a boolean such as yes or no".to_string(),
                })?;
                ValueData::Bool(value)
            }
        };

        Ok((field, TypedValue::new(data, raw.negated)))
    }

    fn type_pattern(&self, raw: &RawTerm, span: Span) -> Result<(String, TypedValue)> {
        let spec = self
            .registry
            .lookup(DEFAULT_FIELD)
            .ok_or_else(|| QueryError::UnknownField(DEFAULT_FIELD.to_string()))?;
        if raw.value.is_empty() {
            return Err(QueryError::parse("empty search pattern", span.start));
        }
        let literal = raw.quoted
            || self.search_type != SearchType::Regex
            || spec.kind() != ValueKind::Regexp;
        let data = if literal {
            ValueData::String(raw.value.clone())
        } else {
            ValueData::Regexp(raw.value.clone())
        };
        Ok((DEFAULT_FIELD.to_string(), TypedValue::new(data, false)))
    }
}

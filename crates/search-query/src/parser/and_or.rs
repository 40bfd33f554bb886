//! Recursive-descent parser for and/or syntax.
//!
//! Precedence, loosest first: `or`, `and` (explicit or by juxtaposition),
//! `not`. Parentheses group.

use crate::error::{QueryError, Result};
use crate::expression::ExpressionTree;

use super::token::{Token, TokenKind};
use super::TermTyper;

/// Maximum parenthesis nesting accepted in one query.
pub(super) const MAX_NESTING_DEPTH: usize = 256;

pub(super) struct AndOrParser<'a> {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    typer: TermTyper<'a>,
}

impl<'a> AndOrParser<'a> {
    pub(super) fn new(tokens: Vec<Token>, typer: TermTyper<'a>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
            typer,
        }
    }

    pub(super) fn parse(mut self) -> Result<ExpressionTree> {
        let expression = self.parse_or_expression()?;
        if let Some(token) = self.peek() {
            let message = match token.kind {
                TokenKind::RParen => "unexpected ')'",
                _ => "unexpected token",
            };
            return Err(QueryError::parse(message, token.span.start));
        }
        Ok(expression.flatten())
    }

    fn parse_or_expression(&mut self) -> Result<ExpressionTree> {
        let mut parts = vec![self.parse_and_expression()?];
        while self.consume(&TokenKind::Or) {
            parts.push(self.parse_and_expression()?);
        }
        Ok(group(parts, ExpressionTree::Or))
    }

    fn parse_and_expression(&mut self) -> Result<ExpressionTree> {
        let mut parts = vec![self.parse_not_expression()?];
        loop {
            if self.consume(&TokenKind::And) {
                parts.push(self.parse_not_expression()?);
                continue;
            }
            if self.next_starts_operand() {
                parts.push(self.parse_not_expression()?);
                continue;
            }
            break;
        }
        Ok(group(parts, ExpressionTree::And))
    }

    fn parse_not_expression(&mut self) -> Result<ExpressionTree> {
        let mut negate = false;
        while self.consume(&TokenKind::Not) {
            negate = !negate;
        }

        let expression = self.parse_primary_expression()?;
        if negate {
            Ok(ExpressionTree::negate(expression))
        } else {
            Ok(expression)
        }
    }

    fn parse_primary_expression(&mut self) -> Result<ExpressionTree> {
        let Some(token) = self.next() else {
            return Err(QueryError::parse(
                "expected query term but reached end of query",
                self.end_position(),
            ));
        };

        match token.kind {
            TokenKind::LParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(QueryError::parse(
                        "query nested too deeply",
                        token.span.start,
                    ));
                }
                self.depth += 1;
                let expression = self.parse_or_expression();
                self.depth -= 1;
                let expression = expression?;
                if self.consume(&TokenKind::RParen) {
                    return Ok(expression);
                }
                let position = self
                    .peek()
                    .map(|token| token.span.start)
                    .unwrap_or_else(|| self.end_position());
                Err(QueryError::parse("missing closing ')'", position))
            }
            TokenKind::Term(raw) => {
                let (field, value) = self.typer.type_term(&raw, token.span)?;
                log::trace!("leaf {field:?} = {value}");
                Ok(ExpressionTree::leaf(field, value))
            }
            TokenKind::RParen => Err(QueryError::parse("unexpected ')'", token.span.start)),
            TokenKind::And | TokenKind::Or | TokenKind::Not => Err(QueryError::parse(
                "expected query term",
                token.span.start,
            )),
        }
    }

    fn next_starts_operand(&self) -> bool {
        matches!(
            self.peek().map(|token| &token.kind),
            Some(TokenKind::Term(_) | TokenKind::LParen | TokenKind::Not)
        )
    }

    fn consume(&mut self, expected: &TokenKind) -> bool {
        matches!(self.peek(), Some(token) if &token.kind == expected) && {
            self.index += 1;
            true
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        Some(token)
    }

    fn end_position(&self) -> usize {
        self.tokens
            .last()
            .map(|token| token.span.end)
            .unwrap_or_default()
    }
}

fn group(
    mut parts: Vec<ExpressionTree>,
    wrap: fn(Vec<ExpressionTree>) -> ExpressionTree,
) -> ExpressionTree {
    if parts.len() == 1 {
        if let Some(only) = parts.pop() {
            return only;
        }
    }
    wrap(parts)
}

#[cfg(test)]
mod tests {
    use crate::config::{QueryConfig, SyntaxMode};
    use crate::error::QueryError;
    use crate::parser::QueryParser;

    use super::MAX_NESTING_DEPTH;

    fn nested(levels: usize) -> String {
        format!("{}a{}", "(".repeat(levels), ")".repeat(levels))
    }

    fn render(input: &str) -> String {
        parse(input).expect("parse").to_string()
    }

    fn parse(input: &str) -> crate::error::Result<crate::expression::ExpressionTree> {
        let parser =
            QueryParser::code_search(QueryConfig::default().with_syntax(SyntaxMode::AndOr));
        let query = parser.parse(input)?;
        Ok(query.expression().cloned().expect("boolean query"))
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(render("a b or c"), "(or (and a b) c)");
        assert_eq!(render("a or b and c"), "(or a (and b c))");
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(render("(a or b) c"), "(and (or a b) c)");
        assert_eq!(render("((a))"), "a");
    }

    #[test]
    fn nested_groups_are_flattened() {
        assert_eq!(render("a or (b or c)"), "(or a b c)");
        assert_eq!(render("a and (b and c)"), "(and a b c)");
    }

    #[test]
    fn not_and_value_negation_are_distinct() {
        assert_eq!(render("not repo:x"), "(not repo:x)");
        assert_eq!(render("-repo:x"), "-repo:x");
        assert_eq!(render("not not a"), "a");
        assert_eq!(render("NOT (a OR b)"), "(not (or a b))");
    }

    #[test]
    fn fields_are_typed_in_leaves() {
        assert_eq!(render(r#"lang:go or file:"a b""#), r#"(or lang:"go" file:a b)"#);
        assert_eq!(render("case:yes x"), "(and case:yes x)");
    }

    #[test]
    fn structural_errors_report_positions() {
        assert_eq!(
            parse("(a or b").unwrap_err(),
            QueryError::parse("missing closing ')'", 7)
        );
        assert_eq!(parse("a)").unwrap_err(), QueryError::parse("unexpected ')'", 1));
        assert_eq!(
            parse("a or").unwrap_err(),
            QueryError::parse("expected query term but reached end of query", 4)
        );
        assert_eq!(
            parse("and a").unwrap_err(),
            QueryError::parse("expected query term", 0)
        );
        assert_eq!(parse("()").unwrap_err(), QueryError::parse("unexpected ')'", 1));
    }

    #[test]
    fn singular_fields_are_checked_across_the_tree() {
        assert_eq!(
            parse("case:yes or case:no").unwrap_err(),
            QueryError::DuplicateField("case".to_string())
        );
    }

    #[test]
    fn nesting_at_the_limit_parses() {
        assert_eq!(render(&nested(MAX_NESTING_DEPTH)), "a");
    }

    #[test]
    fn deep_nesting_is_an_error() {
        assert_eq!(
            parse(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err(),
            QueryError::parse("query nested too deeply", MAX_NESTING_DEPTH)
        );
        assert!(parse(&nested(50_000)).is_err());
    }
}

//! Tokenizer for both query syntaxes.

use crate::config::SyntaxMode;
use crate::error::{QueryError, Result};
use crate::trace::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Term(RawTerm),
    LParen,
    RParen,
    And,
    Or,
    Not,
}

/// A term before its field is resolved and its value typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTerm {
    /// Field name as written, without the negation prefix.
    pub field: Option<String>,
    pub value: String,
    pub negated: bool,
    pub quoted: bool,
}

impl RawTerm {
    fn pattern(value: String, quoted: bool) -> Self {
        Self {
            field: None,
            value,
            negated: false,
            quoted,
        }
    }
}

/// Splits query input into tokens.
///
/// Parentheses and the `and` / `or` / `not` keywords are only recognized in
/// and/or mode; in ordinary mode they are part of pattern terms.
pub(crate) fn tokenize(input: &str, syntax: SyntaxMode) -> Result<Vec<Token>> {
    let boolean = syntax == SyntaxMode::AndOr;
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    while let Some(ch) = input[cursor..].chars().next() {
        if ch.is_whitespace() {
            cursor += ch.len_utf8();
            continue;
        }

        let start = cursor;
        match ch {
            '(' if boolean => {
                cursor += 1;
                tokens.push(Token {
                    kind: TokenKind::LParen,
                    span: Span::new(start, cursor),
                });
            }
            ')' if boolean => {
                cursor += 1;
                tokens.push(Token {
                    kind: TokenKind::RParen,
                    span: Span::new(start, cursor),
                });
            }
            '"' => {
                let (phrase, next_cursor) = consume_quoted_phrase(input, cursor)?;
                cursor = next_cursor;
                ensure_term_boundary(input, cursor, boolean)?;
                tokens.push(Token {
                    kind: TokenKind::Term(RawTerm::pattern(phrase, true)),
                    span: Span::new(start, cursor),
                });
            }
            _ => {
                let (kind, next_cursor) = consume_word(input, cursor, boolean)?;
                cursor = next_cursor;
                tokens.push(Token {
                    kind,
                    span: Span::new(start, cursor),
                });
            }
        }
    }

    Ok(tokens)
}

fn is_delimiter(ch: char, boolean: bool) -> bool {
    ch.is_whitespace() || (boolean && matches!(ch, '(' | ')'))
}

fn ensure_term_boundary(input: &str, cursor: usize, boolean: bool) -> Result<()> {
    match input[cursor..].chars().next() {
        Some(next) if !is_delimiter(next, boolean) => Err(QueryError::parse(
            "unexpected character after closing quote",
            cursor,
        )),
        _ => Ok(()),
    }
}

fn consume_word(input: &str, start: usize, boolean: bool) -> Result<(TokenKind, usize)> {
    let mut end = start;
    while let Some(next) = input[end..].chars().next() {
        if is_delimiter(next, boolean) {
            break;
        }
        // A quoted field value: `file:"a b"`.
        if next == '"' && end > start && input[..end].ends_with(':') {
            let prefix = &input[start..end - 1];
            if let Some((field, negated)) = split_field_name(prefix) {
                let (value, next_cursor) = consume_quoted_phrase(input, end)?;
                ensure_term_boundary(input, next_cursor, boolean)?;
                let term = RawTerm {
                    field: Some(field.to_string()),
                    value,
                    negated,
                    quoted: true,
                };
                return Ok((TokenKind::Term(term), next_cursor));
            }
        }
        end += next.len_utf8();
    }

    let raw = &input[start..end];
    if boolean {
        if raw.eq_ignore_ascii_case("and") {
            return Ok((TokenKind::And, end));
        }
        if raw.eq_ignore_ascii_case("or") {
            return Ok((TokenKind::Or, end));
        }
        if raw.eq_ignore_ascii_case("not") {
            return Ok((TokenKind::Not, end));
        }
    }

    Ok((TokenKind::Term(split_term(raw)), end))
}

fn split_term(raw: &str) -> RawTerm {
    let Some(split) = raw.find(':') else {
        return RawTerm::pattern(raw.to_string(), false);
    };
    match split_field_name(&raw[..split]) {
        Some((field, negated)) => RawTerm {
            field: Some(field.to_string()),
            value: raw[split + 1..].to_string(),
            negated,
            quoted: false,
        },
        None => RawTerm::pattern(raw.to_string(), false),
    }
}

/// Splits `-name` into `(name, true)`; returns `None` when `name` is not an
/// ASCII identifier.
fn split_field_name(prefix: &str) -> Option<(&str, bool)> {
    let (name, negated) = match prefix.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (prefix, false),
    };
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    valid.then_some((name, negated))
}

fn consume_quoted_phrase(input: &str, start: usize) -> Result<(String, usize)> {
    let mut cursor = start + 1;
    let mut phrase = String::new();
    let mut escaped = false;

    while let Some(ch) = input[cursor..].chars().next() {
        cursor += ch.len_utf8();

        if escaped {
            phrase.push(ch);
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == '"' {
            return Ok((phrase, cursor));
        }

        phrase.push(ch);
    }

    Err(QueryError::parse("missing closing quote", start))
}

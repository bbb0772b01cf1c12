//! Minimal indentation parser for the brief subset.
//!
//! Covers exactly what briefs use: two-space indented mappings, sequences of
//! mappings or scalars, quoted and plain scalars, and `#` comments. Anything
//! richer is a [`ParseError`]. The full-featured strategy is
//! [`crate::parse::ParseStrategy::Yaml`]; for any document in the subset the
//! two must produce identical values, and the conformance suite holds them
//! to it.

use crate::error::ParseError;
use crate::value::{Scalar, Value};

/// One significant line: indentation width, trimmed content, 1-based line.
#[derive(Debug, Clone)]
struct Token {
    indent: usize,
    content: String,
    line: usize,
}

pub(crate) fn parse_document(text: &str) -> Result<Value, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Ok(Value::Mapping(Vec::new()));
    }
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
    };
    let root_indent = tokens[0].indent;
    let value = cursor.parse_block(root_indent)?;
    if cursor.pos != tokens.len() {
        return Err(ParseError::TrailingContent {
            line: tokens[cursor.pos].line,
        });
    }
    match value {
        Value::Mapping(_) => Ok(value),
        _ => Err(ParseError::TopLevelNotMapping),
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let stripped = raw.trim_start_matches(' ');
        if stripped.starts_with('\t') {
            return Err(ParseError::Tab { line });
        }
        if stripped.starts_with('#') {
            continue;
        }
        let indent = raw.len() - stripped.len();
        tokens.push(Token {
            indent,
            content: stripped.trim_end().to_string(),
            line,
        });
    }
    Ok(tokens)
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn parse_block(&mut self, indent: usize) -> Result<Value, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(Value::Mapping(Vec::new()));
        };
        if token.indent != indent {
            return Err(ParseError::Indentation { line: token.line });
        }
        if token.content.starts_with("- ") {
            self.parse_sequence(indent)
        } else {
            self.parse_mapping(indent)
        }
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Value, ParseError> {
        let mut entries = Vec::new();
        self.parse_mapping_into(indent, &mut entries)?;
        Ok(Value::Mapping(entries))
    }

    /// Consume mapping entries at `indent`, appending to `entries` so that
    /// sequence items can merge inline and continuation keys with one
    /// duplicate check.
    fn parse_mapping_into(
        &mut self,
        indent: usize,
        entries: &mut Vec<(String, Value)>,
    ) -> Result<(), ParseError> {
        while let Some(token) = self.peek() {
            if token.indent != indent {
                break;
            }
            let line = token.line;
            if token.content.starts_with("- ") {
                return Err(ParseError::UnexpectedListItem { line });
            }
            let content = token.content.clone();
            let Some((key_part, value_part)) = split_entry(&content) else {
                return Err(ParseError::MissingColon { line });
            };
            let key = key_part.trim().to_string();
            if entries.iter().any(|(k, _)| k == &key) {
                return Err(ParseError::DuplicateKey { key, line });
            }
            self.pos += 1;
            let value_text = strip_comment(value_part).trim().to_string();
            if !value_text.is_empty() {
                entries.push((key, Value::Scalar(scalar_of(&value_text))));
                continue;
            }
            match self.peek() {
                Some(next) if next.indent > indent => {
                    let child_indent = next.indent;
                    let child = self.parse_block(child_indent)?;
                    entries.push((key, child));
                }
                _ => entries.push((key, Value::Scalar(Scalar::Null))),
            }
        }
        Ok(())
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            if token.indent != indent || !token.content.starts_with("- ") {
                break;
            }
            let item_content = token.content[2..].trim_start().to_string();
            self.pos += 1;
            if let Some((key_part, value_part)) = split_entry(&item_content) {
                items.push(self.parse_sequence_mapping(indent, key_part, value_part)?);
            } else {
                let text = strip_comment(&item_content).trim().to_string();
                if text.is_empty() {
                    items.push(Value::Scalar(Scalar::Null));
                } else {
                    items.push(Value::Scalar(scalar_of(&text)));
                }
            }
        }
        Ok(Value::Sequence(items))
    }

    /// A `- key: value` item: the inline entry plus any continuation entries
    /// indented past the dash.
    fn parse_sequence_mapping(
        &mut self,
        indent: usize,
        key_part: &str,
        value_part: &str,
    ) -> Result<Value, ParseError> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let key = key_part.trim().to_string();
        let value_text = strip_comment(value_part).trim().to_string();
        if !value_text.is_empty() {
            entries.push((key, Value::Scalar(scalar_of(&value_text))));
        } else {
            match self.peek() {
                Some(next) if next.indent > indent => {
                    let child_indent = next.indent;
                    let child = self.parse_block(child_indent)?;
                    entries.push((key, child));
                }
                _ => entries.push((key, Value::Scalar(Scalar::Null))),
            }
        }
        match self.peek() {
            Some(next) if next.indent > indent => {
                let cont_indent = next.indent;
                self.parse_mapping_into(cont_indent, &mut entries)?;
            }
            _ => {}
        }
        Ok(Value::Mapping(entries))
    }
}

/// Split a `key: value` line. The colon must be followed by a space or end
/// the line, otherwise the colon is part of a plain scalar.
fn split_entry(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    if value.is_empty() || value.starts_with(' ') {
        Some((key, value))
    } else {
        None
    }
}

/// Drop a trailing comment. A `#` opens a comment only outside quotes and
/// only when preceded by whitespace or the start of the value.
fn strip_comment(value: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut prev_space = true;
    for (idx, ch) in value.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double && prev_space => {
                return value[..idx].trim_end();
            }
            _ => {}
        }
        prev_space = ch == ' ' || ch == '\t';
    }
    value
}

/// Type a plain scalar, after comment stripping and trimming.
fn scalar_of(text: &str) -> Scalar {
    match text {
        "true" | "True" | "TRUE" => return Scalar::Bool(true),
        "false" | "False" | "FALSE" => return Scalar::Bool(false),
        "null" | "Null" | "NULL" | "~" => return Scalar::Null,
        _ => {}
    }
    if is_decimal_int(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Scalar::Int(n);
        }
    }
    if let Some(inner) = unquote(text) {
        return Scalar::Str(inner.to_string());
    }
    Scalar::Str(text.to_string())
}

fn is_decimal_int(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn unquote(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') && bytes[bytes.len() - 1] == bytes[0] {
        return Some(&text[1..text.len() - 1]);
    }
    None
}

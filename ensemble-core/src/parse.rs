//! Brief parsing.
//!
//! A brief can be read by two interchangeable strategies. [`parse_brief`] is
//! the entry point: pick a strategy, get a [`RawBrief`] or the first
//! [`ParseError`].

use std::fmt;

use crate::brief::RawBrief;
use crate::error::ParseError;
use crate::minimal;
use crate::value::{Scalar, Value};

/// Which underlying parser reads the brief document.
///
/// Both strategies lower into the same [`Value`] tree, so for any document
/// in the supported subset they produce field-for-field identical briefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    /// Full YAML via `serde_yaml`.
    #[default]
    Yaml,
    /// Dependency-light indentation parser covering only the brief subset.
    Minimal,
}

impl ParseStrategy {
    /// Parse a brief document into a generic value tree.
    pub fn parse_document(self, text: &str) -> Result<Value, ParseError> {
        match self {
            ParseStrategy::Yaml => parse_yaml(text),
            ParseStrategy::Minimal => minimal::parse_document(text),
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStrategy::Yaml => f.write_str("yaml"),
            ParseStrategy::Minimal => f.write_str("minimal"),
        }
    }
}

/// Parse `text` with `strategy` and shape the result into a [`RawBrief`].
pub fn parse_brief(text: &str, strategy: ParseStrategy) -> Result<RawBrief, ParseError> {
    let value = strategy.parse_document(text)?;
    RawBrief::from_value(&value)
}

fn parse_yaml(text: &str) -> Result<Value, ParseError> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(text)?;
    // An all-whitespace document comes back as null; treat it as the empty
    // brief, the same as the minimal strategy.
    match convert(parsed)? {
        Value::Scalar(Scalar::Null) => Ok(Value::Mapping(Vec::new())),
        mapping @ Value::Mapping(_) => Ok(mapping),
        _ => Err(ParseError::TopLevelNotMapping),
    }
}

fn convert(value: serde_yaml::Value) -> Result<Value, ParseError> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Scalar(Scalar::Null),
        serde_yaml::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Scalar(Scalar::Int(i)),
            // floats and out-of-range integers degrade to their string form
            None => Value::Scalar(Scalar::Str(n.to_string())),
        },
        serde_yaml::Value::String(s) => Value::Scalar(Scalar::Str(s)),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, val) in map {
                entries.push((key_string(key)?, convert(val)?));
            }
            Value::Mapping(entries)
        }
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value)?,
    })
}

/// Scalar keys are stringified the way the minimal parser reads them;
/// structured keys have no brief meaning at all.
fn key_string(key: serde_yaml::Value) -> Result<String, ParseError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        _ => Err(ParseError::NonScalarKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_strategy_preserves_mapping_order() {
        let doc = ParseStrategy::Yaml
            .parse_document("zebra: 1\nalpha: 2\nmiddle: 3\n")
            .unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn yaml_strategy_rejects_non_mapping_documents() {
        let err = ParseStrategy::Yaml.parse_document("just a scalar").unwrap_err();
        assert!(matches!(err, ParseError::TopLevelNotMapping));
    }

    #[test]
    fn yaml_strategy_maps_empty_documents_to_empty_briefs() {
        assert_eq!(
            ParseStrategy::Yaml.parse_document("").unwrap(),
            Value::Mapping(Vec::new())
        );
    }

    #[test]
    fn floats_degrade_to_strings() {
        let doc = ParseStrategy::Yaml.parse_document("version: 1.5\n").unwrap();
        assert_eq!(
            doc.get("version"),
            Some(&Value::Scalar(Scalar::Str("1.5".to_string())))
        );
    }
}

//! Turning raw model output into a [`FieldTree`].

use crate::enums::Language;
use crate::error::{ParseError, ParseErrorKind};
use crate::types::{FieldTree, FieldValue, join_path};
use serde_json::{Map, Value};

/// The slice from the first `{` to the last `}`, if there is one.
///
/// Model replies often wrap the JSON in prose or code fences.
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Parse a model reply into a field tree.
///
/// Scalars are accepted leniently: `null` becomes an empty value, numbers and
/// booleans their text form. Arrays have no place in the form and are rejected.
pub fn parse_response(content: &str) -> Result<FieldTree, ParseError> {
    let Some(json) = extract_json_object(content) else {
        tracing::warn!("no JSON object found in model response");
        return Err(ParseError {
            kind: ParseErrorKind::NoJsonObject,
            message: "no JSON object found in response".to_string(),
            path: None,
        });
    };

    let value: Value = serde_json::from_str(json).map_err(|e| ParseError {
        kind: ParseErrorKind::Syntax,
        message: e.to_string(),
        path: None,
    })?;

    tree_from_value(&value)
}

/// Convert a JSON object into a field tree.
pub fn tree_from_value(value: &Value) -> Result<FieldTree, ParseError> {
    match value {
        Value::Object(map) => tree_from_map(map, ""),
        _ => Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "response root must be a JSON object".to_string(),
            path: None,
        }),
    }
}

fn tree_from_map(map: &Map<String, Value>, path: &str) -> Result<FieldTree, ParseError> {
    let mut tree = FieldTree::new();
    for (key, child) in map {
        let child_path = join_path(path, key);
        tree.insert(key.as_str(), node_from_value(child, &child_path)?);
    }
    Ok(tree)
}

fn node_from_value(value: &Value, path: &str) -> Result<FieldValue, ParseError> {
    Ok(match value {
        Value::Null => FieldValue::text(""),
        Value::String(s) => FieldValue::text(s.as_str()),
        Value::Number(n) => FieldValue::Text(n.to_string()),
        Value::Bool(b) => FieldValue::Text(b.to_string()),
        Value::Object(map) => FieldValue::Group(tree_from_map(map, path)?),
        Value::Array(_) => {
            return Err(ParseError {
                kind: ParseErrorKind::TypeMismatch,
                message: "arrays are not valid field values".to_string(),
                path: Some(path.to_string()),
            });
        }
    })
}

/// Hebrew when Hebrew letters outnumber half the Latin letters.
pub fn detect_language(text: &str) -> Language {
    let hebrew = text
        .chars()
        .filter(|c| ('\u{0590}'..='\u{05FF}').contains(c))
        .count();
    let latin = text.chars().filter(char::is_ascii_alphabetic).count();
    if hebrew as f64 > latin as f64 * 0.5 {
        Language::Hebrew
    } else {
        Language::English
    }
}

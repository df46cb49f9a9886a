// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Semantic results and their field extraction.
//!
//! Recognition engines hand back semantic values whose text is not reliable:
//! nested values are stringified with an `[object Object]` marker and lists
//! come out as `{A} {B}`. [`parse`] turns such a result into clean fields so
//! nothing downstream sees the raw text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::grammar::{COMMAND_FIELD, DIRECT_OBJECT_FIELD, SUBJECT_FIELD};

/// Stringification artifact removed from every field before splitting.
pub const OBJECT_MARKER: &str = "[object Object]";

/// Characters separating fragments in a field's text.
const DELIMITERS: [char; 3] = ['{', '}', ' '];

/// Key/value semantics of one recognized utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemanticResult {
    fields: Map<String, Value>,
}

impl SemanticResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object, e.g. `{"command": "MAP"}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Text form of a field: strings as they are, anything else as JSON.
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl<K, V> FromIterator<(K, V)> for SemanticResult
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The three fields dispatch works from. `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSemantics {
    pub subjects: Option<Vec<String>>,
    pub command: Option<String>,
    pub direct_object: Option<String>,
}

/// Extract subject list, command and direct object.
pub fn parse(result: &SemanticResult) -> ParsedSemantics {
    ParsedSemantics {
        subjects: parse_list(SUBJECT_FIELD, result),
        command: parse_scalar(COMMAND_FIELD, result),
        direct_object: parse_scalar(DIRECT_OBJECT_FIELD, result),
    }
}

/// First usable fragment of `key`. Further fragments are dropped.
pub fn parse_scalar(key: &str, result: &SemanticResult) -> Option<String> {
    let text = result.text(key)?;
    fragments(&text).into_iter().next()
}

/// Every usable fragment of `key`, in order. Present but unusable text gives
/// an empty list.
pub fn parse_list(key: &str, result: &SemanticResult) -> Option<Vec<String>> {
    let text = result.text(key)?;
    Some(fragments(&text))
}

/// Remove the first marker, split on the delimiters, drop empty pieces.
fn fragments(text: &str) -> Vec<String> {
    text.replacen(OBJECT_MARKER, "", 1)
        .split(&DELIMITERS[..])
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_only() {
        let result: SemanticResult = [("command", "MAP")].into_iter().collect();
        assert_eq!(
            parse(&result),
            ParsedSemantics {
                subjects: None,
                command: Some("MAP".to_string()),
                direct_object: None,
            }
        );
    }

    #[test]
    fn test_subject_list_with_marker() {
        let result: SemanticResult = [("subject", "{ALPHA} {BRAVO}[object Object]")]
            .into_iter()
            .collect();
        assert_eq!(
            parse_list("subject", &result),
            Some(vec!["ALPHA".to_string(), "BRAVO".to_string()])
        );
    }

    #[test]
    fn test_marker_excised_not_split() {
        let result: SemanticResult = [("command", "WA[object Object]TCH")].into_iter().collect();
        assert_eq!(parse_scalar("command", &result).as_deref(), Some("WATCH"));
    }

    #[test]
    fn test_only_first_marker_removed() {
        let result: SemanticResult = [("subject", "[object Object] ONE [object Object]")]
            .into_iter()
            .collect();
        assert_eq!(
            parse_list("subject", &result),
            Some(vec!["ONE".to_string(), "[object".to_string(), "Object]".to_string()])
        );
    }

    #[test]
    fn test_scalar_truncates_to_first() {
        let result: SemanticResult = [("directObject", "{NORTH} {SOUTH}")].into_iter().collect();
        assert_eq!(parse_scalar("directObject", &result).as_deref(), Some("NORTH"));
    }

    #[test]
    fn test_present_but_empty() {
        let result: SemanticResult = [("subject", "{ } [object Object]"), ("command", "  ")]
            .into_iter()
            .collect();
        let parsed = parse(&result);
        assert_eq!(parsed.subjects, Some(Vec::new()));
        assert_eq!(parsed.command, None);
        assert_eq!(parsed.direct_object, None);
    }

    #[test]
    fn test_non_string_values() {
        let result = SemanticResult::from_json(r#"{"command": 42, "subject": ["ONE", "TWO"]}"#)
            .unwrap();
        assert_eq!(result.text("command").as_deref(), Some("42"));
        assert_eq!(parse_scalar("command", &result).as_deref(), Some("42"));
        // JSON arrays are not split on commas; the text is used as a whole.
        assert_eq!(
            parse_list("subject", &result),
            Some(vec![r#"["ONE","TWO"]"#.to_string()])
        );
    }

    #[test]
    fn test_json_round_trip_shape() {
        let mut result = SemanticResult::new();
        result.insert("command", "WATCH").insert("directObject", "NORTH");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"command": "WATCH", "directObject": "NORTH"})
        );
    }
}

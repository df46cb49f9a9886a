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

//! Reference utterance matcher.
//!
//! Interprets transcribed text against a [`Grammar`] the way a recognition
//! engine would, producing the same [`SemanticResult`] shape. Alternatives are
//! tried in declaration order and the first parse that consumes the whole
//! utterance wins. Tags written inside a referenced rule are visible to the
//! caller directly, so `rules.<id>` assignments add nothing.

use serde_json::Value;
use tracing::trace;

use super::{Element, Grammar, TagValue};
use crate::semantics::SemanticResult;

/// Rule references deeper than this are treated as non-matching.
const MAX_RULE_DEPTH: usize = 32;

type Assignment<'g> = (&'g str, &'g str);
type Path<'g> = (usize, Vec<Assignment<'g>>);

/// Lowercased words with surrounding punctuation removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

struct Matcher<'g> {
    grammar: &'g Grammar,
    tokens: Vec<String>,
}

impl<'g> Matcher<'g> {
    fn walk(
        &self,
        element: &'g Element,
        pos: usize,
        assigned: &[Assignment<'g>],
        depth: usize,
    ) -> Vec<Path<'g>> {
        match element {
            Element::Phrase(text) => {
                let words = tokenize(text);
                let end = pos + words.len();
                if end <= self.tokens.len() && self.tokens[pos..end] == words[..] {
                    vec![(end, assigned.to_vec())]
                } else {
                    Vec::new()
                }
            }
            Element::OneOf(alternatives) => alternatives
                .iter()
                .flat_map(|alternative| self.walk(alternative, pos, assigned, depth))
                .collect(),
            Element::Sequence(parts) => {
                let mut paths = vec![(pos, assigned.to_vec())];
                for part in parts {
                    paths = paths
                        .iter()
                        .flat_map(|(p, a)| self.walk(part, *p, a, depth))
                        .collect();
                    if paths.is_empty() {
                        break;
                    }
                }
                paths
            }
            Element::RuleRef(id) => {
                if depth >= MAX_RULE_DEPTH {
                    return Vec::new();
                }
                match self.grammar.rule(id) {
                    Some(rule) => self.walk(&rule.body, pos, assigned, depth + 1),
                    None => Vec::new(),
                }
            }
            Element::Repeat { element, min, max } => {
                let mut results = Vec::new();
                let mut frontier = vec![(pos, assigned.to_vec())];
                let mut count = 0;
                loop {
                    if count >= *min {
                        results.extend(frontier.iter().cloned());
                    }
                    if frontier.is_empty() || max.is_some_and(|max| count >= max) {
                        break;
                    }
                    // Past the minimum every extra repetition must consume words.
                    let must_progress = count >= *min;
                    frontier = frontier
                        .iter()
                        .flat_map(|(p, a)| {
                            self.walk(element, *p, a, depth)
                                .into_iter()
                                .filter(move |(next, _)| !must_progress || next > p)
                        })
                        .collect();
                    count += 1;
                }
                results
            }
            Element::Tag(tag) => {
                let mut assigned = assigned.to_vec();
                if let TagValue::Literal(value) = &tag.value {
                    assigned.push((tag.field.as_str(), value.as_str()));
                }
                vec![(pos, assigned)]
            }
        }
    }
}

impl Grammar {
    /// Match `utterance` against the root rule.
    ///
    /// A field assigned once carries its value; a field assigned several
    /// times (several subjects) carries `{A} {B}`, the list form engines emit.
    pub fn interpret(&self, utterance: &str) -> Option<SemanticResult> {
        let root = self.root_rule()?;
        let matcher = Matcher {
            grammar: self,
            tokens: tokenize(utterance),
        };
        if matcher.tokens.is_empty() {
            return None;
        }

        let paths = matcher.walk(&root.body, 0, &[], 0);
        let (_, assigned) = paths
            .into_iter()
            .find(|(end, _)| *end == matcher.tokens.len())?;
        trace!("'{}' matched with {:?}", utterance, assigned);

        let mut fields: Vec<(&str, Vec<&str>)> = Vec::new();
        for (field, value) in assigned {
            match fields.iter_mut().find(|(name, _)| *name == field) {
                Some((_, values)) => values.push(value),
                None => fields.push((field, vec![value])),
            }
        }

        let mut result = SemanticResult::new();
        for (field, values) in fields {
            let text = match values.as_slice() {
                [single] => single.to_string(),
                many => many
                    .iter()
                    .map(|value| format!("{{{}}}", value))
                    .collect::<Vec<_>>()
                    .join(" "),
            };
            result.insert(field, Value::String(text));
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::grammar::{GrammarAssembler, Slot};
    use crate::input::{key_presses, KeyCode};

    fn grammar() -> Grammar {
        let mut subject = Slot::subject("subject", 3);
        subject
            .add_entry(["one", "unit one"], "ONE", key_presses(&[KeyCode::F1]))
            .unwrap()
            .add_entry(["two"], "TWO", key_presses(&[KeyCode::F2]))
            .unwrap();

        let mut direction = Slot::direct_object("directionDO");
        direction
            .add_entry(["north"], "NORTH", key_presses(&[KeyCode::One]))
            .unwrap()
            .add_entry(["north east"], "NORTHEAST", key_presses(&[KeyCode::Two]))
            .unwrap();

        let mut assembler = GrammarAssembler::new("en-US", subject).unwrap();
        let subject = assembler.subject_ref();
        assembler
            .add_command(Command::new("MAP", ["map", "open map"], Vec::new()))
            .unwrap()
            .add_command(
                Command::new("ADVANCE", ["advance", "move up"], Vec::new())
                    .with_subject(subject.clone()),
            )
            .unwrap()
            .add_command(
                Command::new("WATCH", ["watch", "watch the"], Vec::new())
                    .with_subject(subject)
                    .with_direct_object(direction),
            )
            .unwrap();
        assembler.build().0
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Open MAP! "), vec!["open", "map"]);
        assert_eq!(tokenize("I'm hit."), vec!["i'm", "hit"]);
        assert!(tokenize(" ... ").is_empty());
    }

    #[test]
    fn test_plain_command() {
        let result = grammar().interpret("open map").unwrap();
        assert_eq!(result.text("command").as_deref(), Some("MAP"));
        assert!(!result.contains("subject"));
        assert!(!result.contains("directObject"));
    }

    #[test]
    fn test_subjects_then_command() {
        let result = grammar().interpret("unit one two advance").unwrap();
        assert_eq!(result.text("subject").as_deref(), Some("{ONE} {TWO}"));
        assert_eq!(result.text("command").as_deref(), Some("ADVANCE"));
    }

    #[test]
    fn test_subject_only() {
        let result = grammar().interpret("two").unwrap();
        assert_eq!(result.text("subject").as_deref(), Some("TWO"));
        assert!(!result.contains("command"));
    }

    #[test]
    fn test_direct_object_longest_phrase() {
        let result = grammar().interpret("one watch the north east").unwrap();
        assert_eq!(result.text("subject").as_deref(), Some("ONE"));
        assert_eq!(result.text("command").as_deref(), Some("WATCH"));
        assert_eq!(result.text("directObject").as_deref(), Some("NORTHEAST"));

        let result = grammar().interpret("watch").unwrap();
        assert_eq!(result.text("command").as_deref(), Some("WATCH"));
        assert!(!result.contains("directObject"));
    }

    #[test]
    fn test_no_match() {
        let grammar = grammar();
        assert!(grammar.interpret("make me a sandwich").is_none());
        assert!(grammar.interpret("").is_none());
        // More subjects than the slot allows.
        assert!(grammar.interpret("one two one two advance").is_none());
    }
}

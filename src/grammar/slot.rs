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

//! Reusable phrase slots: subjects and direct objects.

use crate::error::{Error, Result};
use crate::input::KeyOperation;

use super::{Element, Rule, RuleScope, SemanticTag, DIRECT_OBJECT_FIELD, SUBJECT_FIELD};

/// Which part of an utterance a slot fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Who the order is for. Shared by every command.
    Subject,
    /// What the order is about. Owned by a single command.
    DirectObject,
}

impl SlotKind {
    /// Semantic field the slot's tags are written to.
    pub fn field(self) -> &'static str {
        match self {
            SlotKind::Subject => SUBJECT_FIELD,
            SlotKind::DirectObject => DIRECT_OBJECT_FIELD,
        }
    }
}

/// Phrases that select one tag, and the keys that tag sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    pub phrases: Vec<String>,
    pub tag: String,
    pub keys: Vec<KeyOperation>,
}

/// A named grammar fragment mapping phrases to tags and key sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    kind: SlotKind,
    max_repeat: u32,
    entries: Vec<SlotEntry>,
}

/// Optional reference to a slot's rule, for use inside a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReference {
    rule: String,
    field: &'static str,
}

impl SlotReference {
    /// Id of the referenced rule.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// `[<rule> out.<field> = rules.<rule>]`
    pub fn to_element(&self) -> Element {
        Element::optional(Element::sequence(vec![
            Element::rule_ref(self.rule.clone()),
            Element::tag(SemanticTag::rule_output(self.field, self.rule.clone())),
        ]))
    }
}

impl Slot {
    /// A subject slot. Up to `max_repeat` subjects may be named in a row.
    pub fn subject(name: impl Into<String>, max_repeat: u32) -> Self {
        Self {
            name: name.into(),
            kind: SlotKind::Subject,
            max_repeat: max_repeat.max(1),
            entries: Vec::new(),
        }
    }

    /// A direct-object slot.
    pub fn direct_object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SlotKind::DirectObject,
            max_repeat: 1,
            entries: Vec::new(),
        }
    }

    /// Rule id of this slot.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    /// Append an entry. Tags and phrases must be unique within the slot.
    pub fn add_entry<I, S>(
        &mut self,
        phrases: I,
        tag: impl Into<String>,
        keys: Vec<KeyOperation>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tag = tag.into();
        if self.entries.iter().any(|entry| entry.tag == tag) {
            return Err(Error::DuplicateTag {
                slot: self.name.clone(),
                tag,
            });
        }

        let mut accepted: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.into().trim().to_string();
            let taken = accepted.iter().any(|p| p.eq_ignore_ascii_case(&phrase))
                || self.uses_phrase(&phrase);
            if taken {
                return Err(Error::DuplicatePhrase {
                    slot: self.name.clone(),
                    phrase,
                });
            }
            accepted.push(phrase);
        }

        self.entries.push(SlotEntry {
            phrases: accepted,
            tag,
            keys,
        });
        Ok(self)
    }

    /// Entry registered under `tag`.
    pub fn entry_for(&self, tag: &str) -> Result<&SlotEntry> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .ok_or_else(|| Error::UnknownTag {
                slot: self.name.clone(),
                tag: tag.to_string(),
            })
    }

    /// Keys for `tag`, if the slot has it.
    pub fn keys_for(&self, tag: &str) -> Option<&[KeyOperation]> {
        self.entry_for(tag).ok().map(|entry| entry.keys.as_slice())
    }

    /// The slot as a rule: one alternative per entry, each tagging its
    /// phrases with the entry's tag under the slot's field.
    pub fn as_grammar_fragment(&self) -> Rule {
        let field = self.kind.field();
        let alternatives = self
            .entries
            .iter()
            .map(|entry| {
                Element::sequence(vec![
                    Element::one_of(entry.phrases.iter().map(Element::phrase).collect()),
                    Element::tag(SemanticTag::literal(field, entry.tag.clone())),
                ])
            })
            .collect();

        let choice = Element::one_of(alternatives);
        let body = if self.max_repeat > 1 {
            Element::repeat(choice, 1, Some(self.max_repeat))
        } else {
            choice
        };
        Rule::new(self.name.clone(), RuleScope::Private, body)
    }

    /// Zero-or-one reference to this slot, to place before or after a
    /// command's trigger phrase. Saying nothing produces no tag.
    pub fn as_optional_reference(&self) -> SlotReference {
        SlotReference {
            rule: self.name.clone(),
            field: self.kind.field(),
        }
    }

    fn uses_phrase(&self, phrase: &str) -> bool {
        self.entries
            .iter()
            .flat_map(|entry| entry.phrases.iter())
            .any(|p| p.eq_ignore_ascii_case(phrase))
    }
}

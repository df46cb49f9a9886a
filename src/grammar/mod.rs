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

//! Recognition grammar model.
//!
//! A [`Grammar`] is a list of named rules plus a root rule. Rule bodies are
//! trees of [`Element`]s: phrase text, alternations, sequences, rule
//! references, repetitions and semantic tags. Slots and commands are turned
//! into rules by the [`GrammarAssembler`].

mod assembler;
mod matcher;
mod slot;
mod srgs;

pub use assembler::{GrammarAssembler, ROOT_RULE};
pub use slot::{Slot, SlotEntry, SlotKind, SlotReference};

/// Semantic field carrying the addressed subjects.
pub const SUBJECT_FIELD: &str = "subject";
/// Semantic field carrying the command id.
pub const COMMAND_FIELD: &str = "command";
/// Semantic field carrying the direct-object tag.
pub const DIRECT_OBJECT_FIELD: &str = "directObject";

/// Right-hand side of a semantic assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// A fixed string, e.g. `out.command = "MAP"`.
    Literal(String),
    /// Whatever the referenced rule produced, e.g. `out.subject = rules.subject`.
    RuleOutput(String),
}

/// A semantic assignment `out.<field> = <value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTag {
    pub field: String,
    pub value: TagValue,
}

impl SemanticTag {
    pub fn literal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: TagValue::Literal(value.into()),
        }
    }

    pub fn rule_output(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: TagValue::RuleOutput(rule.into()),
        }
    }
}

/// One node of a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Words that must be spoken as written.
    Phrase(String),
    /// Exactly one of the alternatives, tried in declaration order.
    OneOf(Vec<Element>),
    /// All parts, in order.
    Sequence(Vec<Element>),
    /// The body of another rule, by id.
    RuleRef(String),
    /// The inner element between `min` and `max` times (`None` is unbounded).
    Repeat {
        element: Box<Element>,
        min: u32,
        max: Option<u32>,
    },
    /// A semantic assignment; matches no words.
    Tag(SemanticTag),
}

impl Element {
    pub fn phrase(text: impl Into<String>) -> Self {
        Element::Phrase(text.into())
    }

    pub fn one_of(alternatives: Vec<Element>) -> Self {
        Element::OneOf(alternatives)
    }

    pub fn sequence(parts: Vec<Element>) -> Self {
        Element::Sequence(parts)
    }

    pub fn rule_ref(rule: impl Into<String>) -> Self {
        Element::RuleRef(rule.into())
    }

    pub fn repeat(element: Element, min: u32, max: Option<u32>) -> Self {
        Element::Repeat {
            element: Box::new(element),
            min,
            max,
        }
    }

    /// Zero or one occurrence.
    pub fn optional(element: Element) -> Self {
        Self::repeat(element, 0, Some(1))
    }

    pub fn tag(tag: SemanticTag) -> Self {
        Element::Tag(tag)
    }

    /// Ids of every rule referenced below this element.
    pub fn referenced_rules(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Element::RuleRef(id) => out.push(id),
            Element::OneOf(items) | Element::Sequence(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
            Element::Repeat { element, .. } => element.collect_refs(out),
            Element::Phrase(_) | Element::Tag(_) => {}
        }
    }
}

/// Rule visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Public,
    Private,
}

/// A named grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub scope: RuleScope,
    pub body: Element,
}

impl Rule {
    pub fn new(id: impl Into<String>, scope: RuleScope, body: Element) -> Self {
        Self {
            id: id.into(),
            scope,
            body,
        }
    }
}

/// A complete recognition grammar. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    culture: String,
    rules: Vec<Rule>,
    root: String,
}

impl Grammar {
    pub(crate) fn new(culture: String, rules: Vec<Rule>, root: String) -> Self {
        Self {
            culture,
            rules,
            root,
        }
    }

    /// Language tag the phrases are written in, e.g. `en-US`.
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// All rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Id of the root rule.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn root_rule(&self) -> Option<&Rule> {
        self.rule(&self.root)
    }
}

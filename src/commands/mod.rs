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

//! Voice commands.
//!
//! A [`Command`] ties trigger phrases to the keys that open the matching
//! entry of the squad-command menus. Commands are registered with a
//! [`GrammarAssembler`](crate::grammar::GrammarAssembler), which produces the
//! [`CommandRegistry`] the [`ActionDispatcher`] resolves against.

pub mod catalog;
mod dispatcher;
mod registry;

use std::collections::HashMap;

use crate::grammar::{Element, SemanticTag, Slot, SlotReference, COMMAND_FIELD};
use crate::input::KeyOperation;

pub use dispatcher::{resolve, ActionDispatcher};
pub use registry::CommandRegistry;

/// A spoken order and the keys it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    id: String,
    phrases: Vec<String>,
    keys: Vec<KeyOperation>,
    subject: Option<SlotReference>,
    direct_object: Option<Slot>,
}

impl Command {
    /// Create a command triggered by any of `phrases`.
    pub fn new<I, S>(id: impl Into<String>, phrases: I, keys: Vec<KeyOperation>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            phrases: phrases
                .into_iter()
                .map(|p| p.into().trim().to_string())
                .collect(),
            keys,
            subject: None,
            direct_object: None,
        }
    }

    /// Accept an optional subject before the trigger phrase.
    pub fn with_subject(mut self, subject: SlotReference) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Accept an optional direct object after the trigger phrase.
    pub fn with_direct_object(mut self, direct_object: Slot) -> Self {
        self.direct_object = Some(direct_object);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// The command's own keys, without any subject or direct object.
    pub fn keys(&self) -> &[KeyOperation] {
        &self.keys
    }

    pub fn subject(&self) -> Option<&SlotReference> {
        self.subject.as_ref()
    }

    pub fn direct_object(&self) -> Option<&Slot> {
        self.direct_object.as_ref()
    }

    /// `[subject] (phrase | phrase ...) out.command="<id>" [direct object]`
    pub fn to_grammar_alternative(&self) -> Element {
        let mut parts = Vec::with_capacity(4);
        if let Some(subject) = &self.subject {
            parts.push(subject.to_element());
        }
        parts.push(Element::one_of(
            self.phrases.iter().map(Element::phrase).collect(),
        ));
        parts.push(Element::tag(SemanticTag::literal(
            COMMAND_FIELD,
            self.id.clone(),
        )));
        if let Some(direct_object) = &self.direct_object {
            parts.push(direct_object.as_optional_reference().to_element());
        }
        Element::sequence(parts)
    }

    /// Direct-object tags of this command, mapped to their keys. Empty when
    /// the command takes no direct object.
    pub fn direct_object_table(&self) -> HashMap<String, Vec<KeyOperation>> {
        self.direct_object
            .iter()
            .flat_map(|slot| slot.entries())
            .map(|entry| (entry.tag.clone(), entry.keys.clone()))
            .collect()
    }
}

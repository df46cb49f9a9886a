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

//! Builds one grammar and one command registry from slots and commands.

use std::collections::HashSet;
use tracing::info;

use super::{Element, Grammar, Rule, RuleScope, SemanticTag, Slot, SlotKind, SlotReference};
use crate::commands::{Command, CommandRegistry};
use crate::error::{Error, Result};

/// Id of the top-level rule.
pub const ROOT_RULE: &str = "commands";

/// Collects commands into a grammar rooted at [`ROOT_RULE`].
///
/// The root is an alternation of the subject-only production followed by one
/// alternative per command, in the order commands were added. Engines that
/// break ties by declaration order therefore prefer earlier commands.
#[derive(Debug)]
pub struct GrammarAssembler {
    culture: String,
    subject: Slot,
    direct_objects: Vec<Rule>,
    rule_ids: HashSet<String>,
    alternatives: Vec<Element>,
    registry: CommandRegistry,
}

impl GrammarAssembler {
    /// Start a grammar for `culture` (e.g. `en-US`) around a subject slot.
    pub fn new(culture: impl Into<String>, subject: Slot) -> Result<Self> {
        debug_assert_eq!(subject.kind(), SlotKind::Subject);
        if subject.name() == ROOT_RULE {
            return Err(Error::DuplicateRule(ROOT_RULE.to_string()));
        }

        let mut rule_ids = HashSet::new();
        rule_ids.insert(ROOT_RULE.to_string());
        rule_ids.insert(subject.name().to_string());

        let subject_only = Element::sequence(vec![
            Element::rule_ref(subject.name()),
            Element::tag(SemanticTag::rule_output(
                subject.kind().field(),
                subject.name(),
            )),
        ]);

        Ok(Self {
            culture: culture.into(),
            direct_objects: Vec::new(),
            rule_ids,
            alternatives: vec![subject_only],
            registry: CommandRegistry::new(subject.clone()),
            subject,
        })
    }

    /// Reference to the subject, for commands that accept one.
    pub fn subject_ref(&self) -> SlotReference {
        self.subject.as_optional_reference()
    }

    /// Register a command and add its alternative to the root rule.
    ///
    /// Fails on a duplicate command id and on a direct-object rule name that
    /// is already taken. Nothing is added when it fails.
    pub fn add_command(&mut self, command: Command) -> Result<&mut Self> {
        if self.registry.contains(command.id()) {
            return Err(Error::DuplicateCommand(command.id().to_string()));
        }

        let direct_object_rule = match command.direct_object() {
            Some(slot) if self.rule_ids.contains(slot.name()) => {
                return Err(Error::DuplicateRule(slot.name().to_string()));
            }
            Some(slot) => Some(slot.as_grammar_fragment()),
            None => None,
        };

        let alternative = command.to_grammar_alternative();
        self.registry.register(command)?;

        if let Some(rule) = direct_object_rule {
            self.rule_ids.insert(rule.id.clone());
            self.direct_objects.push(rule);
        }
        self.alternatives.push(alternative);
        Ok(self)
    }

    /// Number of commands added so far.
    pub fn command_count(&self) -> usize {
        self.registry.len()
    }

    /// Finish the grammar. Rules are ordered subject, direct objects, root.
    pub fn build(self) -> (Grammar, CommandRegistry) {
        let mut rules = Vec::with_capacity(self.direct_objects.len() + 2);
        rules.push(self.subject.as_grammar_fragment());
        rules.extend(self.direct_objects);
        rules.push(Rule::new(
            ROOT_RULE,
            RuleScope::Public,
            Element::one_of(self.alternatives),
        ));

        info!(
            "Grammar assembled: {} rules, {} commands ({})",
            rules.len(),
            self.registry.len(),
            self.culture
        );

        (
            Grammar::new(self.culture, rules, ROOT_RULE.to_string()),
            self.registry,
        )
    }
}

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

//! Lookup tables built during grammar assembly.

use std::collections::HashMap;
use tracing::debug;

use super::Command;
use crate::error::{Error, Result};
use crate::grammar::Slot;
use crate::input::KeyOperation;

#[derive(Debug, Clone)]
struct Registered {
    command: Command,
    direct_objects: HashMap<String, Vec<KeyOperation>>,
}

/// Commands by id, each with its own direct-object table, plus the subject
/// slot.
///
/// Built once by the assembler and read-only afterwards; share it with
/// `Arc` rather than locking.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    subject: Slot,
    commands: HashMap<String, Registered>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub(crate) fn new(subject: Slot) -> Self {
        Self {
            subject,
            commands: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, command: Command) -> Result<()> {
        if self.commands.contains_key(command.id()) {
            return Err(Error::DuplicateCommand(command.id().to_string()));
        }

        let direct_objects = command.direct_object_table();
        let id = command.id().to_string();
        debug!(
            "Registered command {} ({} direct objects)",
            id,
            direct_objects.len()
        );

        self.order.push(id.clone());
        self.commands.insert(
            id,
            Registered {
                command,
                direct_objects,
            },
        );
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id).map(|registered| &registered.command)
    }

    /// The command's own keys.
    pub fn command_keys(&self, command_id: &str) -> Option<&[KeyOperation]> {
        self.get(command_id).map(Command::keys)
    }

    /// Keys for one of the direct objects declared by `command_id`.
    pub fn direct_object_keys(&self, command_id: &str, tag: &str) -> Option<&[KeyOperation]> {
        self.commands
            .get(command_id)?
            .direct_objects
            .get(tag)
            .map(Vec::as_slice)
    }

    /// Keys for a subject tag.
    pub fn subject_keys(&self, tag: &str) -> Option<&[KeyOperation]> {
        self.subject.keys_for(tag)
    }

    pub fn subject(&self) -> &Slot {
        &self.subject
    }

    /// Command ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{key_presses, KeyCode};

    fn team(name: &str, red: KeyCode) -> Slot {
        let mut slot = Slot::direct_object(name);
        slot.add_entry(["red"], "RED", key_presses(&[red])).unwrap();
        slot
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CommandRegistry::new(Slot::subject("subject", 1));
        registry
            .register(Command::new("MAP", ["map"], key_presses(&[KeyCode::M])))
            .unwrap();

        let err = registry
            .register(Command::new("MAP", ["show map"], key_presses(&[KeyCode::N])))
            .unwrap_err();
        assert_eq!(err, Error::DuplicateCommand("MAP".to_string()));
        assert!(err.is_assembly_error());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("MAP").unwrap().phrases(), ["map"]);
    }

    #[test]
    fn test_same_tag_under_two_commands() {
        let mut registry = CommandRegistry::new(Slot::subject("subject", 1));
        registry
            .register(
                Command::new("ASSIGN", ["assign"], key_presses(&[KeyCode::Nine]))
                    .with_direct_object(team("teamDO", KeyCode::One)),
            )
            .unwrap();
        registry
            .register(
                Command::new("PAINT", ["paint"], key_presses(&[KeyCode::P]))
                    .with_direct_object(team("paintDO", KeyCode::F5)),
            )
            .unwrap();

        assert_eq!(
            registry.direct_object_keys("ASSIGN", "RED"),
            Some(key_presses(&[KeyCode::One]).as_slice())
        );
        assert_eq!(
            registry.direct_object_keys("PAINT", "RED"),
            Some(key_presses(&[KeyCode::F5]).as_slice())
        );
        assert_eq!(registry.direct_object_keys("MAP", "RED"), None);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["ASSIGN", "PAINT"]);
    }

    #[test]
    fn test_command_id_is_not_a_direct_object() {
        let mut registry = CommandRegistry::new(Slot::subject("subject", 1));
        registry
            .register(Command::new("MAP", ["map"], key_presses(&[KeyCode::M])))
            .unwrap();
        registry
            .register(
                Command::new("ASSIGN", ["assign"], key_presses(&[KeyCode::Nine]))
                    .with_direct_object(team("teamDO", KeyCode::One)),
            )
            .unwrap();

        assert_eq!(
            registry.command_keys("MAP"),
            Some(key_presses(&[KeyCode::M]).as_slice())
        );
        assert_eq!(registry.direct_object_keys("MAP", "MAP"), None);
        assert_eq!(registry.direct_object_keys("ASSIGN", "ASSIGN"), None);
        assert_eq!(registry.command_keys("LAUNCH"), None);
    }
}

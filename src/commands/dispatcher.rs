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

//! Turns parsed semantics into key sequences and sends them.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::CommandRegistry;
use crate::error::Result;
use crate::input::{space_operations, Completion, KeyEmulator, KeyOperation};
use crate::semantics::{self, ParsedSemantics, SemanticResult};

/// Resolve parsed fields to keys: every known subject, then the command's
/// own keys, then its direct object looked up in that command's table.
///
/// Unknown subjects, commands and direct objects are skipped. A missing
/// direct object never drops the command keys already collected.
pub fn resolve(registry: &CommandRegistry, parsed: &ParsedSemantics) -> Vec<KeyOperation> {
    let mut operations = Vec::new();

    for subject in parsed.subjects.iter().flatten() {
        match registry.subject_keys(subject) {
            Some(keys) => operations.extend_from_slice(keys),
            None => debug!("Unknown subject '{}' skipped", subject),
        }
    }

    let Some(command) = parsed.command.as_deref() else {
        return operations;
    };
    match registry.command_keys(command) {
        Some(keys) => operations.extend_from_slice(keys),
        None => {
            debug!("Unknown command '{}' skipped", command);
            return operations;
        }
    }

    if let Some(direct_object) = parsed.direct_object.as_deref() {
        match registry.direct_object_keys(command, direct_object) {
            Some(keys) => operations.extend_from_slice(keys),
            None => debug!(
                "Command '{}' has no direct object '{}'",
                command, direct_object
            ),
        }
    }

    operations
}

/// Sends the keys for recognition results.
#[derive(Clone)]
pub struct ActionDispatcher {
    registry: Arc<CommandRegistry>,
    emulator: KeyEmulator,
    key_press_delay: Duration,
}

impl ActionDispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        emulator: KeyEmulator,
        key_press_delay: Duration,
    ) -> Self {
        Self {
            registry,
            emulator,
            key_press_delay,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The spaced key sequence for `result`. Pure: the same result always
    /// gives the same sequence.
    pub fn resolve(&self, result: &SemanticResult) -> Vec<KeyOperation> {
        let parsed = semantics::parse(result);
        space_operations(&resolve(&self.registry, &parsed), self.key_press_delay)
    }

    /// Queue the keys for `result` without waiting for them to be sent.
    pub fn dispatch(&self, result: &SemanticResult) -> Result<Completion> {
        let parsed = semantics::parse(result);
        if let Some(command) = &parsed.command {
            info!(
                "Dispatching {} (subjects: {:?}, direct object: {:?})",
                command, parsed.subjects, parsed.direct_object
            );
        }

        let operations = space_operations(&resolve(&self.registry, &parsed), self.key_press_delay);
        debug!("Queueing {} key operations", operations.len());
        self.emulator.submit(operations)
    }

    /// Send the keys for `result` and wait until they are all performed.
    pub async fn execute(&self, result: &SemanticResult) -> Result<()> {
        self.dispatch(result)?.wait().await
    }
}

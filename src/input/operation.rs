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

//! Atomic key operations and their timing.

use std::time::Duration;

use super::keys::KeyCode;

/// What a key operation does to its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Push the key down and leave it held.
    Press,
    /// Push the key down and let it go again.
    PressAndRelease,
}

/// One simulated key action followed by a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyOperation {
    pub key: KeyCode,
    pub action: KeyAction,
    pub delay_after: Duration,
}

impl KeyOperation {
    /// Press and release `key`, with no pause.
    pub const fn key_press(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::PressAndRelease,
            delay_after: Duration::ZERO,
        }
    }

    /// Press `key` and hold it, with no pause.
    pub const fn key_down(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Press,
            delay_after: Duration::ZERO,
        }
    }

    /// Copy of this operation with a different pause.
    pub fn with_delay(self, delay_after: Duration) -> Self {
        Self {
            delay_after,
            ..self
        }
    }
}

/// Press and release each key in order.
pub fn key_presses(keys: &[KeyCode]) -> Vec<KeyOperation> {
    keys.iter().copied().map(KeyOperation::key_press).collect()
}

/// Give every operation the same trailing delay so the target application
/// registers each key separately.
pub fn space_operations(operations: &[KeyOperation], delay: Duration) -> Vec<KeyOperation> {
    operations.iter().map(|op| op.with_delay(delay)).collect()
}

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

//! Application state management.

use parking_lot::RwLock;
use std::sync::Arc;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Whether recognized commands are dispatched.
    pub listening: RwLock<bool>,

    /// Id of the last dispatched command.
    pub last_command: RwLock<Option<String>>,

    /// Last utterance that matched nothing.
    pub last_rejected: RwLock<Option<String>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            listening: RwLock::new(true),
            last_command: RwLock::new(None),
            last_rejected: RwLock::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_listening(listening: bool) -> Arc<Self> {
        let state = Self::default();
        *state.listening.write() = listening;
        Arc::new(state)
    }

    pub fn set_listening(&self, listening: bool) {
        *self.listening.write() = listening;
    }

    pub fn is_listening(&self) -> bool {
        *self.listening.read()
    }

    pub fn set_last_command(&self, command: String) {
        *self.last_command.write() = Some(command);
    }

    pub fn get_last_command(&self) -> Option<String> {
        self.last_command.read().clone()
    }

    pub fn set_last_rejected(&self, utterance: String) {
        *self.last_rejected.write() = Some(utterance);
    }

    pub fn get_last_rejected(&self) -> Option<String> {
        self.last_rejected.read().clone()
    }
}

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

//! Error types for grammar assembly and key dispatch.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("Tag '{tag}' is already defined in slot '{slot}'")]
    DuplicateTag { slot: String, tag: String },

    #[error("Phrase '{phrase}' is already used in slot '{slot}'")]
    DuplicatePhrase { slot: String, phrase: String },

    #[error("Grammar rule '{0}' is defined twice")]
    DuplicateRule(String),

    #[error("Slot '{slot}' has no entry tagged '{tag}'")]
    UnknownTag { slot: String, tag: String },

    #[error("Key injection failed: {0}")]
    Injection(String),

    #[error("Key emulator is not running")]
    EmulatorClosed,
}

impl Error {
    /// Whether this error comes from building the grammar.
    pub fn is_assembly_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateCommand(_)
                | Error::DuplicateTag { .. }
                | Error::DuplicatePhrase { .. }
                | Error::DuplicateRule(_)
        )
    }
}

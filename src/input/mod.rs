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

//! Simulated keyboard input.
//!
//! Key definitions, key operations, injector backends, and the serializing
//! key emulator that drives them.

mod emulator;
mod injector;
mod keys;
mod operation;
#[cfg(test)]
mod recording;
#[cfg(feature = "x11")]
mod x11;
mod wayland;

pub use emulator::{Completion, KeyEmulator};
pub use injector::{create_injector_with_preference, DisplayServer, InputInjector, StubInjector};
pub use keys::KeyCode;
pub use operation::{key_presses, space_operations, KeyAction, KeyOperation};
#[cfg(test)]
pub use recording::{Recorded, RecordingInjector};

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

//! Injector that records instead of sending, for unit tests.

use anyhow::{bail, Result};
use parking_lot::Mutex;

use super::injector::InputInjector;
use super::keys::KeyCode;

/// One call received by a [`RecordingInjector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Press(KeyCode),
    Release(KeyCode),
    Click(KeyCode),
}

impl Recorded {
    pub fn key(self) -> KeyCode {
        match self {
            Recorded::Press(key) | Recorded::Release(key) | Recorded::Click(key) => key,
        }
    }
}

/// Injector that remembers every call it was asked to perform.
#[derive(Default)]
pub struct RecordingInjector {
    log: Mutex<Vec<Recorded>>,
    fail_after: Option<usize>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` calls, then fail every later one.
    pub fn failing_after(count: usize) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fail_after: Some(count),
        }
    }

    /// Calls performed so far, in order.
    pub fn operations(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    /// Keys pushed down so far, in order. Releases are left out.
    pub fn keys(&self) -> Vec<KeyCode> {
        self.log
            .lock()
            .iter()
            .filter(|call| !matches!(call, Recorded::Release(_)))
            .map(|call| call.key())
            .collect()
    }

    fn record(&self, call: Recorded) -> Result<()> {
        let mut log = self.log.lock();
        if self.fail_after.is_some_and(|limit| log.len() >= limit) {
            bail!("injected failure on {:?}", call.key());
        }
        log.push(call);
        Ok(())
    }
}

impl InputInjector for RecordingInjector {
    fn backend_name(&self) -> &'static str {
        "Recording"
    }

    fn press(&self, key: KeyCode) -> Result<()> {
        self.record(Recorded::Press(key))
    }

    fn release(&self, key: KeyCode) -> Result<()> {
        self.record(Recorded::Release(key))
    }

    fn click(&self, key: KeyCode) -> Result<()> {
        self.record(Recorded::Click(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyOperation;

    #[test]
    fn test_apply_dispatches_on_action() {
        let injector = RecordingInjector::new();
        injector
            .apply(&KeyOperation::key_press(KeyCode::M))
            .unwrap();
        injector
            .apply(&KeyOperation::key_down(KeyCode::LeftShift))
            .unwrap();

        assert_eq!(
            injector.operations(),
            vec![Recorded::Click(KeyCode::M), Recorded::Press(KeyCode::LeftShift)]
        );
    }

    #[test]
    fn test_release_is_recorded() {
        let injector = RecordingInjector::new();
        injector.press(KeyCode::LeftShift).unwrap();
        injector.click(KeyCode::F1).unwrap();
        injector.release(KeyCode::LeftShift).unwrap();

        assert_eq!(
            injector.operations(),
            vec![
                Recorded::Press(KeyCode::LeftShift),
                Recorded::Click(KeyCode::F1),
                Recorded::Release(KeyCode::LeftShift),
            ]
        );
        assert_eq!(injector.keys(), vec![KeyCode::LeftShift, KeyCode::F1]);
    }

    #[test]
    fn test_recording_failure() {
        let injector = RecordingInjector::failing_after(1);
        assert!(injector.click(KeyCode::One).is_ok());
        assert!(injector.click(KeyCode::Two).is_err());
        assert!(injector.release(KeyCode::One).is_err());
        assert_eq!(injector.keys(), vec![KeyCode::One]);
    }
}

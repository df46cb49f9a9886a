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

//! X11 key injection using enigo.

use anyhow::{anyhow, Result};
use enigo::{Direction, Enigo, Keyboard, Settings};
use parking_lot::Mutex;
use tracing::{debug, info};

use super::keys::KeyCode;
use super::InputInjector;

/// X11 input injector using enigo.
pub struct X11Injector {
    enigo: Mutex<Enigo>,
}

impl X11Injector {
    /// Create a new X11 injector.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("Failed to connect to X11: {:?}", e))?;
        info!("X11 injector ready");
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }

    fn key(&self, key: KeyCode, direction: Direction) -> Result<()> {
        let mut enigo = self.enigo.lock();
        enigo
            .key(key.to_enigo(), direction)
            .map_err(|e| anyhow!("X11 key {:?} failed: {:?}", key, e))
    }
}

impl InputInjector for X11Injector {
    fn backend_name(&self) -> &'static str {
        "X11 (enigo)"
    }

    fn press(&self, key: KeyCode) -> Result<()> {
        debug!("Pressing key: {:?}", key);
        self.key(key, Direction::Press)
    }

    fn release(&self, key: KeyCode) -> Result<()> {
        debug!("Releasing key: {:?}", key);
        self.key(key, Direction::Release)
    }

    fn click(&self, key: KeyCode) -> Result<()> {
        debug!("Clicking key: {:?}", key);
        self.key(key, Direction::Click)
    }
}

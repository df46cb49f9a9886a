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

//! Wayland key injection using ydotool.

use anyhow::{anyhow, Result};
use std::process::Command;
use tracing::{debug, warn};

use super::keys::KeyCode;
use super::InputInjector;

/// Wayland input injector using ydotool.
pub struct WaylandInjector {
    /// Whether ydotool daemon is available.
    ydotool_available: bool,
}

impl WaylandInjector {
    /// Create a new Wayland injector.
    pub fn new() -> Result<Self> {
        let ydotool_available = Command::new("which")
            .arg("ydotool")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if !ydotool_available {
            warn!("ydotool not found in PATH");
        }

        let daemon_running = Command::new("pgrep")
            .arg("ydotoold")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if !daemon_running {
            warn!("ydotoold daemon not running. Start with: sudo systemctl start ydotool");
        }

        Ok(Self { ydotool_available })
    }

    /// Run ydotool command.
    fn run_ydotool(&self, args: &[String]) -> Result<()> {
        if !self.ydotool_available {
            return Err(anyhow!("ydotool not available"));
        }

        debug!("Running: ydotool {:?}", args);

        let output = Command::new("ydotool")
            .args(args)
            .output()
            .map_err(|e| anyhow!("Failed to run ydotool: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("ydotool failed: {}", stderr));
        }

        Ok(())
    }
}

/// `ydotool key` arguments: `<code>:1` presses, `<code>:0` releases.
fn key_events(key: KeyCode, states: &[u8]) -> Vec<String> {
    let mut args = vec!["key".to_string()];
    args.extend(
        states
            .iter()
            .map(|state| format!("{}:{}", key.to_ydotool(), state)),
    );
    args
}

impl InputInjector for WaylandInjector {
    fn backend_name(&self) -> &'static str {
        "Wayland (ydotool)"
    }

    fn press(&self, key: KeyCode) -> Result<()> {
        debug!("Pressing key: {:?}", key);
        self.run_ydotool(&key_events(key, &[1]))
    }

    fn release(&self, key: KeyCode) -> Result<()> {
        debug!("Releasing key: {:?}", key);
        self.run_ydotool(&key_events(key, &[0]))
    }

    fn click(&self, key: KeyCode) -> Result<()> {
        debug!("Clicking key: {:?}", key);
        self.run_ydotool(&key_events(key, &[1, 0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events() {
        assert_eq!(key_events(KeyCode::M, &[1, 0]), vec!["key", "50:1", "50:0"]);
        assert_eq!(key_events(KeyCode::F1, &[1]), vec!["key", "59:1"]);
    }
}

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

//! Configuration module.
//!
//! Handles loading and saving application settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "articulate";
const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key injection settings.
    pub input: InputConfig,

    /// Grammar settings.
    pub grammar: GrammarConfig,

    /// Recognition settings.
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Delay after each key operation in milliseconds.
    pub key_press_delay_ms: u64,

    /// Preferred backend: "auto", "x11", "wayland", or "stub".
    pub prefer_backend: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            key_press_delay_ms: 50,
            prefer_backend: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Culture the grammar is declared for.
    pub culture: String,

    /// Most subjects accepted in one utterance.
    pub max_subjects: u32,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            culture: "en-US".to_string(),
            max_subjects: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Whether recognized commands are dispatched right after startup.
    pub start_listening: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            start_listening: true,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path())
    }

    /// Load configuration from `path`, writing the defaults there if it
    /// does not exist yet.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    pub fn key_press_delay(&self) -> Duration {
        Duration::from_millis(self.input.key_press_delay_ms)
    }
}

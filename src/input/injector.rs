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

//! Key injection abstraction and factory.

use anyhow::{bail, Result};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

use super::keys::KeyCode;
use super::operation::{KeyAction, KeyOperation};

#[cfg(feature = "x11")]
use super::x11::X11Injector;

use super::wayland::WaylandInjector;

/// Trait for input injection backends.
pub trait InputInjector: Send + Sync {
    /// Get the backend name (e.g., "X11", "Wayland").
    fn backend_name(&self) -> &'static str;

    /// Push a key down.
    fn press(&self, key: KeyCode) -> Result<()>;

    /// Let a key go.
    fn release(&self, key: KeyCode) -> Result<()>;

    /// Press and release a key.
    fn click(&self, key: KeyCode) -> Result<()> {
        self.press(key)?;
        self.release(key)
    }

    /// Perform one key operation. The trailing delay is the caller's job.
    fn apply(&self, operation: &KeyOperation) -> Result<()> {
        match operation.action {
            KeyAction::Press => self.press(operation.key),
            KeyAction::PressAndRelease => self.click(operation.key),
        }
    }
}

/// Detected display server type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    Wayland,
    Unknown,
}

impl DisplayServer {
    /// Detect the current display server.
    pub fn detect() -> Self {
        // Check XDG_SESSION_TYPE first
        if let Ok(session_type) = env::var("XDG_SESSION_TYPE") {
            match session_type.to_lowercase().as_str() {
                "x11" => return DisplayServer::X11,
                "wayland" => return DisplayServer::Wayland,
                _ => {}
            }
        }

        if env::var("WAYLAND_DISPLAY").is_ok() {
            return DisplayServer::Wayland;
        }

        if env::var("DISPLAY").is_ok() {
            return DisplayServer::X11;
        }

        DisplayServer::Unknown
    }
}

/// Create input injector with a preference.
///
/// - "auto": Auto-detect display server
/// - "x11": Force X11 backend
/// - "wayland": Force Wayland backend
/// - "stub": Log keys without sending them
pub fn create_injector_with_preference(preference: &str) -> Result<Arc<dyn InputInjector>> {
    let display_server = match preference.to_lowercase().as_str() {
        "stub" => {
            info!("Using stub input injector");
            return Ok(Arc::new(StubInjector));
        }
        "x11" => DisplayServer::X11,
        "wayland" => DisplayServer::Wayland,
        "auto" => DisplayServer::detect(),
        other => bail!("Unknown input backend: {}", other),
    };

    info!("Display server: {:?}", display_server);

    match display_server {
        DisplayServer::X11 => {
            #[cfg(feature = "x11")]
            {
                info!("Using X11 input injector");
                Ok(Arc::new(X11Injector::new()?))
            }
            #[cfg(not(feature = "x11"))]
            {
                bail!("X11 support not compiled in")
            }
        }
        DisplayServer::Wayland => {
            info!("Using Wayland input injector");
            Ok(Arc::new(WaylandInjector::new()?))
        }
        DisplayServer::Unknown => {
            warn!("Unknown display server, trying X11 first...");
            #[cfg(feature = "x11")]
            {
                match X11Injector::new() {
                    Ok(injector) => {
                        info!("Using X11 input injector (fallback)");
                        Ok(Arc::new(injector))
                    }
                    Err(_) => {
                        info!("Trying Wayland input injector...");
                        Ok(Arc::new(WaylandInjector::new()?))
                    }
                }
            }
            #[cfg(not(feature = "x11"))]
            {
                info!("Using Wayland input injector (no X11 support)");
                let injector = WaylandInjector::new()
                    .map_err(|e| anyhow::anyhow!("No usable input backend: {}", e))?;
                Ok(Arc::new(injector))
            }
        }
    }
}

/// Stub injector for running without display server.
pub struct StubInjector;

impl InputInjector for StubInjector {
    fn backend_name(&self) -> &'static str {
        "Stub (no-op)"
    }

    fn press(&self, key: KeyCode) -> Result<()> {
        info!("[STUB] Would press: {:?}", key);
        Ok(())
    }

    fn release(&self, key: KeyCode) -> Result<()> {
        info!("[STUB] Would release: {:?}", key);
        Ok(())
    }

    fn click(&self, key: KeyCode) -> Result<()> {
        info!("[STUB] Would click: {:?}", key);
        Ok(())
    }
}

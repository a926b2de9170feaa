// Copyright 2025 eraflo
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

//! Settings for windows and the main dispatcher.
//!
//! Every field has a default, so a configuration file only needs to name what it
//! overrides. Files are written in RON:
//!
//! ```ron
//! (
//!     window: (title: "Tools", width: 1600, height: 900, embedded: false),
//!     dispatcher: (initial_capacity: 256),
//! )
//! ```

use crate::error::ConfigError;
use crate::input::TimestampUnit;
use crate::window::CursorCapture;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied to a [`Window`](crate::Window) when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// The initial window title.
    pub title: String,
    /// The requested inner width, in logical units.
    pub width: u32,
    /// The requested inner height, in logical units.
    pub height: u32,
    /// Whether the window's lifetime is owned by an external host framework.
    /// Size, title, fullscreen and close requests are ignored in this mode.
    pub embedded: bool,
    /// Whether this is the application's primary window.
    pub primary: bool,
    /// The unit of raw timestamps produced by the platform event source.
    pub timestamp_unit: TimestampUnit,
    /// The cursor capture mode requested at startup.
    pub cursor_capture: CursorCapture,
    /// The cursor visibility requested at startup.
    pub cursor_visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aperture".to_string(),
            width: 1024,
            height: 768,
            embedded: false,
            primary: true,
            timestamp_unit: TimestampUnit::Milliseconds,
            cursor_capture: CursorCapture::Off,
            cursor_visible: true,
        }
    }
}

/// Settings for the [`MainDispatcher`](crate::MainDispatcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Number of events the resident frame queue reserves up front.
    pub initial_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApertureConfig {
    /// Settings for the primary window.
    pub window: WindowConfig,
    /// Settings for the event dispatcher.
    pub dispatcher: DispatcherConfig,
}

impl ApertureConfig {
    /// Parses a configuration document from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded configuration from '{}'.", path.display());
        Ok(config)
    }

    /// Reads `path` if it exists, falling back to defaults when it does not.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!(
                "No configuration at '{}', using defaults.",
                path.display()
            );
            Ok(Self::default())
        }
    }
}

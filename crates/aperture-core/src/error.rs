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

//! Error types for window management and configuration loading.

use crate::window::WindowId;
use std::fmt;

/// An error returned by a window operation that rejected its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// The requested surface scale is outside `(0, 1]`.
    InvalidSurfaceScale {
        /// The rejected scale.
        scale: f32,
    },
    /// No window with this id is registered.
    WindowNotFound {
        /// The id that was looked up.
        id: WindowId,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidSurfaceScale { scale } => {
                write!(f, "Surface scale {scale} is out of range (0;1]")
            }
            WindowError::WindowNotFound { id } => {
                write!(f, "No window registered for {id}")
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// An error raised while reading an [`ApertureConfig`](crate::ApertureConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration text is not valid RON for the expected schema.
    Parse(ron::error::SpannedError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read configuration from '{path}': {source}")
            }
            ConfigError::Parse(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

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

//! Committed window geometry.

use crate::dispatch::SizeEvent;
use serde::{Deserialize, Serialize};

/// Whether a window covers its display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FullscreenMode {
    /// A regular decorated window.
    #[default]
    Windowed,
    /// A borderless window covering the display.
    Fullscreen,
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The geometry a window has committed for the current frame.
///
/// Only the size-merge step writes this; everything else reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSizeState {
    /// Client area width, in logical units.
    pub width: f32,
    /// Client area height, in logical units.
    pub height: f32,
    /// Unscaled render surface width, in pixels.
    pub surface_width: f32,
    /// Unscaled render surface height, in pixels.
    pub surface_height: f32,
    /// Render surface scale in `(0, 1]`.
    pub surface_scale: f32,
    /// Display density.
    pub dpi: f32,
    /// Fullscreen state.
    pub fullscreen: FullscreenMode,
}

impl WindowSizeState {
    /// Client area size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Render surface size after applying the surface scale.
    pub fn surface_size(&self) -> Size {
        Size::new(
            self.surface_width * self.surface_scale,
            self.surface_height * self.surface_scale,
        )
    }

    pub(crate) fn commit(&mut self, merged: &SizeEvent) {
        self.width = merged.width;
        self.height = merged.height;
        self.surface_width = merged.surface_width;
        self.surface_height = merged.surface_height;
        self.surface_scale = merged.surface_scale;
        self.dpi = merged.dpi;
        self.fullscreen = merged.fullscreen;
    }
}

impl Default for WindowSizeState {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            surface_width: 0.0,
            surface_height: 0.0,
            surface_scale: 1.0,
            dpi: 96.0,
            fullscreen: FullscreenMode::Windowed,
        }
    }
}

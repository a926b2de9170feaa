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

use super::{Size, WindowId};

/// A committed window state transition, published on the registry's
/// [`EventBus`](crate::event::EventBus).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSignal {
    /// The window was created and has a render surface.
    Created {
        /// The window.
        window: WindowId,
    },
    /// The window was destroyed.
    Destroyed {
        /// The window.
        window: WindowId,
    },
    /// The window committed a new size.
    SizeChanged {
        /// The window.
        window: WindowId,
        /// Client area size.
        size: Size,
        /// Scaled render surface size.
        surface_size: Size,
    },
    /// The display density changed.
    DpiChanged {
        /// The window.
        window: WindowId,
        /// The new density.
        dpi: f32,
    },
    /// The window gained or lost focus.
    FocusChanged {
        /// The window.
        window: WindowId,
        /// Whether the window now has focus.
        focused: bool,
    },
    /// The window was shown or hidden.
    VisibilityChanged {
        /// The window.
        window: WindowId,
        /// Whether the window is now visible.
        visible: bool,
    },
}

impl WindowSignal {
    /// The window the signal is about.
    pub fn window(&self) -> WindowId {
        match *self {
            WindowSignal::Created { window }
            | WindowSignal::Destroyed { window }
            | WindowSignal::SizeChanged { window, .. }
            | WindowSignal::DpiChanged { window, .. }
            | WindowSignal::FocusChanged { window, .. }
            | WindowSignal::VisibilityChanged { window, .. } => window,
        }
    }
}

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

//! The collaborators a window reaches while handling events.

use crate::input::{InputSink, KeyboardState};
use crate::window::RenderHost;

/// Borrowed application services, passed down through
/// [`MainDispatcher::dispatch_frame`](crate::MainDispatcher::dispatch_frame).
pub struct WindowContext<'a> {
    /// Receives translated input.
    pub input: &'a mut dyn InputSink,
    /// Tracks held keys.
    pub keyboard: &'a mut dyn KeyboardState,
    /// Owns per-window render resources.
    pub renderer: &'a mut dyn RenderHost,
}

impl<'a> WindowContext<'a> {
    /// Bundles the given collaborators.
    pub fn new(
        input: &'a mut dyn InputSink,
        keyboard: &'a mut dyn KeyboardState,
        renderer: &'a mut dyn RenderHost,
    ) -> Self {
        Self {
            input,
            keyboard,
            renderer,
        }
    }
}

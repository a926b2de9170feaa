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

use super::InputEvent;

/// The input system a window forwards translated events to.
///
/// Events are passed by reference and must not be retained by the window; a sink
/// that needs them later copies them.
pub trait InputSink {
    /// Handles one canonical input event.
    fn handle_input_event(&mut self, event: &InputEvent);
}

/// An [`InputSink`] that buffers events until the application drains them.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffered events, oldest first.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Takes every buffered event, leaving the queue empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSink for InputQueue {
    fn handle_input_event(&mut self, event: &InputEvent) {
        log::trace!("Input {:?} from {:?}", event.phase, event.device);
        self.events.push(*event);
    }
}

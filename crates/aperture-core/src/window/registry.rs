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

use super::{Window, WindowBackend, WindowId, WindowSignal};
use crate::config::WindowConfig;
use crate::error::WindowError;
use crate::event::EventBus;

/// Owns every live [`Window`] and the bus their signals are published on.
#[derive(Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
    signals: EventBus<WindowSignal>,
    next_id: u64,
}

impl WindowRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a window around `backend` and registers it.
    ///
    /// The window stays inert until the platform reports
    /// [`WindowCreated`](crate::PlatformEventKind::WindowCreated).
    pub fn create_window(
        &mut self,
        config: &WindowConfig,
        backend: Box<dyn WindowBackend>,
    ) -> WindowId {
        self.next_id += 1;
        let id = WindowId(self.next_id);
        self.insert(Window::new(id, config, backend, self.signals.sender()));
        id
    }

    /// Registers an already built window, replacing any with the same id.
    pub fn insert(&mut self, window: Window) {
        let id = window.id();
        self.next_id = self.next_id.max(id.0);
        if let Some(slot) = self.windows.iter_mut().find(|w| w.id() == id) {
            log::warn!("Replacing already registered {id}.");
            *slot = window;
        } else {
            log::debug!("Registered {id}.");
            self.windows.push(window);
        }
    }

    /// Removes a window.
    pub fn remove(&mut self, id: WindowId) -> Result<Window, WindowError> {
        let index = self
            .windows
            .iter()
            .position(|w| w.id() == id)
            .ok_or(WindowError::WindowNotFound { id })?;
        Ok(self.windows.remove(index))
    }

    /// Drops every window that handled its destruction event.
    pub fn remove_destroyed(&mut self) {
        self.windows.retain(|w| {
            if w.is_destroyed() {
                log::debug!("Unregistered {}.", w.id());
            }
            !w.is_destroyed()
        });
    }

    /// Looks up a window.
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    /// Looks up a window mutably.
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// The primary window, if one is registered.
    pub fn primary(&self) -> Option<&Window> {
        self.windows.iter().find(|w| w.is_primary())
    }

    /// The primary window, mutably.
    pub fn primary_mut(&mut self) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.is_primary())
    }

    /// Iterates windows in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Iterates windows mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.iter_mut()
    }

    /// The bus window signals are published on.
    pub fn signals(&self) -> &EventBus<WindowSignal> {
        &self.signals
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` when no window is registered.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{CursorCapture, FullscreenMode};

    struct InertBackend;

    impl WindowBackend for InertBackend {
        fn resize(&mut self, _: f32, _: f32) {}
        fn close(&mut self) {}
        fn set_title(&mut self, _: &str) {}
        fn set_fullscreen(&mut self, _: FullscreenMode) {}
        fn set_cursor_capture(&mut self, _: CursorCapture) {}
        fn set_cursor_visibility(&mut self, _: bool) {}
        fn set_surface_scale(&mut self, _: f32) {}
        fn is_ready_for_render(&self) -> bool {
            true
        }
    }

    #[test]
    fn ids_are_unique_and_lookup_works() {
        let mut registry = WindowRegistry::new();
        let config = WindowConfig::default();

        let first = registry.create_window(&config, Box::new(InertBackend));
        let second = registry.create_window(
            &WindowConfig {
                primary: false,
                ..WindowConfig::default()
            },
            Box::new(InertBackend),
        );

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.primary().map(Window::id), Some(first));
        assert!(registry.get(second).is_some());
    }

    #[test]
    fn removing_unknown_window_fails() {
        let mut registry = WindowRegistry::new();
        let err = registry.remove(WindowId(42)).err();
        assert_eq!(err, Some(WindowError::WindowNotFound { id: WindowId(42) }));
    }
}

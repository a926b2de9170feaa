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

//! Seams between a [`Window`](super::Window) and the outside world.

use super::{CursorCapture, FullscreenMode, WindowId, WindowSizeState};

/// The native window a [`Window`](super::Window) drives.
///
/// Calls are requests; the platform reports the outcome back as raw events.
pub trait WindowBackend {
    /// Requests a new client area size, in logical units.
    fn resize(&mut self, width: f32, height: f32);

    /// Requests that the native window close.
    fn close(&mut self);

    /// Sets the title bar text.
    fn set_title(&mut self, title: &str);

    /// Switches between windowed and fullscreen.
    fn set_fullscreen(&mut self, mode: FullscreenMode);

    /// Applies a cursor capture mode.
    fn set_cursor_capture(&mut self, mode: CursorCapture);

    /// Shows or hides the cursor over the window.
    fn set_cursor_visibility(&mut self, visible: bool);

    /// Changes the render surface scale.
    fn set_surface_scale(&mut self, scale: f32);

    /// Returns `true` once the native surface can be rendered to.
    fn is_ready_for_render(&self) -> bool;

    /// Called once per frame after all events were handled.
    fn trigger_platform_events(&mut self) {}
}

/// Owns the render resources bound to each window.
pub trait RenderHost {
    /// Creates render resources for a newly created window.
    fn init_renderer(&mut self, window: WindowId, size: &WindowSizeState);

    /// Adapts render resources to a new size.
    ///
    /// `full_reinit` is set when the backend was not ready for rendering.
    fn reset_renderer(&mut self, window: WindowId, size: &WindowSizeState, full_reinit: bool);

    /// Releases render resources of a destroyed window.
    fn deinit_renderer(&mut self, window: WindowId);
}

/// A [`RenderHost`] that only logs.
#[derive(Debug, Default)]
pub struct NullRenderHost;

impl RenderHost for NullRenderHost {
    fn init_renderer(&mut self, window: WindowId, size: &WindowSizeState) {
        log::debug!(
            "Renderer init for {window} at {}x{}.",
            size.surface_width,
            size.surface_height
        );
    }

    fn reset_renderer(&mut self, window: WindowId, size: &WindowSizeState, full_reinit: bool) {
        log::debug!(
            "Renderer reset for {window} at {}x{} (full: {full_reinit}).",
            size.surface_width,
            size.surface_height
        );
    }

    fn deinit_renderer(&mut self, window: WindowId) {
        log::debug!("Renderer deinit for {window}.");
    }
}

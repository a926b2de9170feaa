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

//! A `winit`-based implementation of the `WindowBackend` trait.

use crate::platform::clock::PlatformClock;
use crate::platform::scale::SurfaceScale;
use aperture_core::dispatch::SizeEvent;
use aperture_core::{
    CursorCapture, FullscreenMode, PlatformEvent, PlatformEventKind, PlatformEventSender,
    WindowBackend, WindowConfig, WindowId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};

/// Display density at a scale factor of 1.
const BASE_DPI: f64 = 96.0;

/// A wrapper around a `winit::window::Window` that implements [`WindowBackend`].
///
/// Requests that change the geometry without `winit` reporting it back (the
/// surface scale) are posted to the dispatcher as size changes.
#[derive(Debug)]
pub struct WinitWindowBackend {
    inner: Arc<Window>,
    events: PlatformEventSender,
    clock: PlatformClock,
    surface_scale: SurfaceScale,
    close_requested: Arc<AtomicBool>,
}

impl WinitWindowBackend {
    /// Wraps a native window.
    ///
    /// ## Arguments
    ///
    /// * `inner` - The native window.
    /// * `events` - Where geometry changes made by this backend are posted.
    /// * `clock` - Stamps posted events.
    pub fn new(inner: Arc<Window>, events: PlatformEventSender, clock: PlatformClock) -> Self {
        Self {
            inner,
            events,
            clock,
            surface_scale: SurfaceScale::default(),
            close_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A stable identifier derived from the native window id.
    pub fn window_id(&self) -> WindowId {
        window_id_for(self.inner.id())
    }

    /// A shared handle to the native window.
    pub fn handle(&self) -> Arc<Window> {
        Arc::clone(&self.inner)
    }

    /// The requested surface scale, to be shared with the window's
    /// [`WinitEventState`](crate::WinitEventState) so native resizes carry it.
    pub fn surface_scale(&self) -> SurfaceScale {
        self.surface_scale.clone()
    }

    /// A flag raised when the application asks the window to close.
    ///
    /// `winit` windows close when dropped, which only the event loop owner can do.
    pub fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.close_requested)
    }

    /// The geometry of the native window as it is now.
    pub fn size_event(&self) -> SizeEvent {
        let scale_factor = self.inner.scale_factor();
        let physical = self.inner.inner_size();
        let logical = physical.to_logical::<f64>(scale_factor);
        SizeEvent {
            width: logical.width as f32,
            height: logical.height as f32,
            surface_width: physical.width as f32,
            surface_height: physical.height as f32,
            surface_scale: self.surface_scale.get(),
            dpi: (BASE_DPI * scale_factor) as f32,
            fullscreen: if self.inner.fullscreen().is_some() {
                FullscreenMode::Fullscreen
            } else {
                FullscreenMode::Windowed
            },
        }
    }

    /// The event announcing this window to the core.
    pub fn creation_event(&self) -> PlatformEvent {
        PlatformEvent::new(
            self.window_id(),
            self.clock.now(),
            PlatformEventKind::WindowCreated(self.size_event()),
        )
    }
}

/// Derives the core identifier for a native window id.
pub fn window_id_for(id: winit::window::WindowId) -> WindowId {
    WindowId(u64::from(id))
}

impl WindowBackend for WinitWindowBackend {
    fn resize(&mut self, width: f32, height: f32) {
        // `None` means the request is pending and a `Resized` event follows.
        let _ = self
            .inner
            .request_inner_size(LogicalSize::new(width, height));
    }

    fn close(&mut self) {
        log::info!("Close requested for window {:?}.", self.inner.id());
        self.close_requested.store(true, Ordering::Release);
    }

    fn set_title(&mut self, title: &str) {
        self.inner.set_title(title);
    }

    fn set_fullscreen(&mut self, mode: FullscreenMode) {
        self.inner.set_fullscreen(match mode {
            FullscreenMode::Fullscreen => Some(Fullscreen::Borderless(None)),
            FullscreenMode::Windowed => None,
        });
    }

    fn set_cursor_capture(&mut self, mode: CursorCapture) {
        let result = match mode {
            CursorCapture::Off => self.inner.set_cursor_grab(CursorGrabMode::None),
            CursorCapture::Frame => self.inner.set_cursor_grab(CursorGrabMode::Confined),
            // Not every platform can lock; confining is the closest fallback.
            CursorCapture::Pinning => self
                .inner
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Confined)),
        };
        if let Err(e) = result {
            log::warn!("Failed to apply cursor capture {mode:?}: {e}");
        }
    }

    fn set_cursor_visibility(&mut self, visible: bool) {
        self.inner.set_cursor_visible(visible);
    }

    fn set_surface_scale(&mut self, scale: f32) {
        self.surface_scale.set(scale);
        let event = PlatformEvent::new(
            self.window_id(),
            self.clock.now(),
            PlatformEventKind::WindowSizeChanged(self.size_event()),
        );
        self.events.post(event);
    }

    fn is_ready_for_render(&self) -> bool {
        let size = self.inner.inner_size();
        size.width > 0 && size.height > 0
    }

    fn trigger_platform_events(&mut self) {
        self.inner.request_redraw();
    }
}

/// A builder for creating `WinitWindowBackend` instances.
///
/// This follows the builder pattern to provide an ergonomic API for window creation.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    fullscreen: bool,
    cursor_capture: CursorCapture,
    cursor_visible: bool,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self::from_config(&WindowConfig::default())
    }

    /// Creates a builder from window settings.
    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            fullscreen: false,
            cursor_capture: config.cursor_capture,
            cursor_visible: config.cursor_visible,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Starts the window borderless fullscreen.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Builds the window using the provided `winit` event loop.
    ///
    /// The requested cursor state is applied right away, so the core's view of
    /// it and the native one agree from the first frame.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(
        self,
        event_loop: &ActiveEventLoop,
        events: PlatformEventSender,
        clock: PlatformClock,
    ) -> Result<WinitWindowBackend, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_fullscreen(self.fullscreen.then_some(Fullscreen::Borderless(None)))
            .with_visible(true);

        let window = event_loop.create_window(window_attributes)?;
        log::info!("Winit window created successfully (id: {:?}).", window.id());

        let mut backend = WinitWindowBackend::new(Arc::new(window), events, clock);
        if self.cursor_capture != CursorCapture::Off {
            backend.set_cursor_capture(self.cursor_capture);
        }
        if !self.cursor_visible {
            backend.set_cursor_visibility(false);
        }
        Ok(backend)
    }
}

impl Default for WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    fn default() -> Self {
        Self::new()
    }
}

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

//! Windows: per-window event handling, cursor state and the application-facing
//! mutators.

mod activation;
mod backend;
mod registry;
mod signal;
mod size;

pub use self::activation::{ActivationGate, ActivationPhase, CursorCapture, GateDecision};
pub use self::backend::{NullRenderHost, RenderHost, WindowBackend};
pub use self::registry::WindowRegistry;
pub use self::signal::WindowSignal;
pub use self::size::{FullscreenMode, Size, WindowSizeState};

use crate::config::WindowConfig;
use crate::context::WindowContext;
use crate::dispatch::{PendingEvents, PlatformEvent, PlatformEventKind, SizeEvent};
use crate::error::WindowError;
use crate::input::{InputPayload, InputTranslator, MouseButtonSet, Phase};
use std::fmt;

/// Identifies a window within a [`WindowRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// An application window.
///
/// A window reacts to the raw events the [`MainDispatcher`](crate::MainDispatcher)
/// hands it, keeps the committed geometry, gates input on focus and cursor
/// reactivation, and forwards translated input to the [`WindowContext`].
pub struct Window {
    id: WindowId,
    title: String,
    primary: bool,
    embedded: bool,
    backend: Box<dyn WindowBackend>,
    signals: flume::Sender<WindowSignal>,
    size: WindowSizeState,
    size_merged_this_frame: bool,
    gate: ActivationGate,
    translator: InputTranslator,
    has_focus: bool,
    visible: bool,
    created: bool,
    destroyed: bool,
}

impl Window {
    /// Creates a window.
    ///
    /// ## Arguments
    ///
    /// * `id` - The identifier raw events are addressed to.
    /// * `config` - Startup settings.
    /// * `backend` - The native window to drive.
    /// * `signals` - Where committed transitions are published.
    pub fn new(
        id: WindowId,
        config: &WindowConfig,
        backend: Box<dyn WindowBackend>,
        signals: flume::Sender<WindowSignal>,
    ) -> Self {
        Self {
            id,
            title: config.title.clone(),
            primary: config.primary,
            embedded: config.embedded,
            backend,
            signals,
            size: WindowSizeState::default(),
            size_merged_this_frame: false,
            gate: ActivationGate::new(config.cursor_capture, config.cursor_visible),
            translator: InputTranslator::new(config.timestamp_unit),
            has_focus: false,
            visible: false,
            created: false,
            destroyed: false,
        }
    }

    /// Handles one raw event.
    ///
    /// ## Arguments
    ///
    /// * `event` - The event, addressed to this window.
    /// * `pending` - The events still queued behind it, used for size coalescing.
    /// * `ctx` - Application collaborators.
    pub fn handle_event(
        &mut self,
        event: &PlatformEvent,
        pending: &PendingEvents<'_>,
        ctx: &mut WindowContext<'_>,
    ) {
        match event.kind {
            PlatformEventKind::WindowCreated(size) => {
                self.handle_window_created(&size, pending, ctx)
            }
            PlatformEventKind::WindowDestroyed => self.handle_window_destroyed(ctx),
            PlatformEventKind::WindowSizeChanged(size) => {
                self.handle_size_changed(&size, pending, ctx)
            }
            PlatformEventKind::WindowDpiChanged { dpi } => {
                log::debug!("{} dpi changed to {dpi:.1}.", self.id);
                self.size.dpi = dpi;
                self.emit(WindowSignal::DpiChanged {
                    window: self.id,
                    dpi,
                });
            }
            PlatformEventKind::WindowFocusChanged(focused) => {
                self.handle_focus_changed(focused, ctx)
            }
            PlatformEventKind::WindowVisibilityChanged(visible) => {
                log::debug!("{} visibility changed to {visible}.", self.id);
                self.visible = visible;
                self.emit(WindowSignal::VisibilityChanged {
                    window: self.id,
                    visible,
                });
            }
            PlatformEventKind::WindowCaptureLost => self.gate.on_capture_lost(),
            PlatformEventKind::MouseButtonDown(_)
            | PlatformEventKind::MouseButtonUp(_)
            | PlatformEventKind::MouseMove(_)
            | PlatformEventKind::MouseWheel(_)
            | PlatformEventKind::TouchDown(_)
            | PlatformEventKind::TouchUp(_)
            | PlatformEventKind::TouchMove(_)
            | PlatformEventKind::KeyDown(_)
            | PlatformEventKind::KeyUp(_)
            | PlatformEventKind::KeyChar(_)
            | PlatformEventKind::TrackpadGesture(_) => self.handle_input(event, ctx),
        }
    }

    /// Closes the current frame. Called by the dispatcher after every drain.
    pub fn finish_event_handling_on_current_frame(&mut self) {
        self.size_merged_this_frame = false;
        self.backend.trigger_platform_events();
    }

    fn handle_window_created(
        &mut self,
        size: &SizeEvent,
        pending: &PendingEvents<'_>,
        ctx: &mut WindowContext<'_>,
    ) {
        log::debug!("{} created.", self.id);
        self.merge_size_changed_events(size, pending);
        self.created = true;

        ctx.renderer.init_renderer(self.id, &self.size);
        self.emit(WindowSignal::Created { window: self.id });
        self.emit_size_changed();
    }

    fn handle_window_destroyed(&mut self, ctx: &mut WindowContext<'_>) {
        log::debug!("{} destroyed.", self.id);
        self.emit(WindowSignal::Destroyed { window: self.id });
        if self.created {
            ctx.renderer.deinit_renderer(self.id);
        }
        self.destroyed = true;
        self.has_focus = false;
    }

    fn handle_size_changed(
        &mut self,
        size: &SizeEvent,
        pending: &PendingEvents<'_>,
        ctx: &mut WindowContext<'_>,
    ) {
        if self.size_merged_this_frame {
            log::trace!("{} size change already merged this frame.", self.id);
            return;
        }
        self.merge_size_changed_events(size, pending);
        if !self.created {
            return;
        }

        let ready = self.backend.is_ready_for_render();
        ctx.renderer.reset_renderer(self.id, &self.size, !ready);
        if ready {
            self.emit_size_changed();
        }
    }

    /// Commits the latest size change queued for this window this frame, or
    /// `trigger` if none is queued.
    fn merge_size_changed_events(&mut self, trigger: &SizeEvent, pending: &PendingEvents<'_>) {
        let merged = pending.last_size_change_for(self.id).unwrap_or(trigger);
        self.size.commit(merged);
        self.size_merged_this_frame = true;

        log::debug!(
            "{} size {}x{}, surface {}x{} scale {:.2}, dpi {:.1}, {:?}.",
            self.id,
            self.size.width,
            self.size.height,
            self.size.surface_width,
            self.size.surface_height,
            self.size.surface_scale,
            self.size.dpi,
            self.size.fullscreen
        );
    }

    fn handle_focus_changed(&mut self, focused: bool, ctx: &mut WindowContext<'_>) {
        log::debug!("{} focus changed to {focused}.", self.id);
        ctx.keyboard.clear_all_keys();
        self.has_focus = focused;

        if focused && !self.gate.is_waiting() {
            self.backend.set_cursor_visibility(self.gate.cursor_visible());
        }
        self.emit(WindowSignal::FocusChanged {
            window: self.id,
            focused,
        });
    }

    fn handle_input(&mut self, event: &PlatformEvent, ctx: &mut WindowContext<'_>) {
        if self.destroyed {
            return;
        }
        debug_assert!(
            self.created,
            "{} received input before it was created",
            self.id
        );
        if !self.created {
            return;
        }

        // Button state is tracked even for input the gates drop below.
        self.translator.track_mouse_buttons(&event.kind);

        if !self.has_focus {
            log::trace!("{} ignoring {:?} without focus.", self.id, event.kind);
            return;
        }

        match self.gate.filter(&event.kind) {
            GateDecision::Forward => {}
            GateDecision::Swallow => return,
            GateDecision::Restore => {
                self.backend.set_cursor_capture(self.gate.cursor_capture());
                self.backend.set_cursor_visibility(self.gate.cursor_visible());
                return;
            }
        }

        for input in self.translator.translate(event, &*ctx.keyboard) {
            ctx.input.handle_input_event(&input);
            if let InputPayload::Key(key) = input.payload {
                match input.phase {
                    Phase::KeyDown | Phase::KeyDownRepeat => ctx.keyboard.on_key_pressed(key),
                    Phase::KeyUp => ctx.keyboard.on_key_unpressed(key),
                    _ => {}
                }
            }
        }
    }

    fn emit_size_changed(&self) {
        self.emit(WindowSignal::SizeChanged {
            window: self.id,
            size: self.size.size(),
            surface_size: self.size.surface_size(),
        });
    }

    fn emit(&self, signal: WindowSignal) {
        if let Err(e) = self.signals.send(signal) {
            log::trace!("No listener for {} signal: {e}", self.id);
        }
    }

    /// Requests a new client area size. Ignored for embedded windows.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if self.embedded {
            log::debug!("{} is embedded, ignoring resize.", self.id);
            return;
        }
        self.backend.resize(width, height);
    }

    /// Requests that the window close. Ignored for embedded windows.
    pub fn close(&mut self) {
        if self.embedded {
            log::debug!("{} is embedded, ignoring close.", self.id);
            return;
        }
        self.backend.close();
    }

    /// Sets the title. Ignored for embedded windows.
    pub fn set_title(&mut self, title: &str) {
        if self.embedded {
            log::debug!("{} is embedded, ignoring title change.", self.id);
            return;
        }
        self.title = title.to_string();
        self.backend.set_title(title);
    }

    /// Requests a fullscreen mode. Ignored for embedded windows and when the
    /// window is already in `mode`.
    pub fn set_fullscreen(&mut self, mode: FullscreenMode) {
        if self.embedded {
            log::debug!("{} is embedded, ignoring fullscreen change.", self.id);
            return;
        }
        if self.size.fullscreen != mode {
            self.backend.set_fullscreen(mode);
        }
    }

    /// Requests a cursor capture mode.
    ///
    /// [`CursorCapture::Frame`] is not supported and is ignored.
    pub fn set_cursor_capture(&mut self, mode: CursorCapture) {
        if mode == CursorCapture::Frame {
            log::warn!("{}: frame cursor capture is not supported.", self.id);
            return;
        }
        if self.gate.request_capture(mode) {
            self.backend.set_cursor_capture(mode);
        }
    }

    /// Shows or hides the cursor.
    pub fn set_cursor_visibility(&mut self, visible: bool) {
        if self.gate.request_visibility(visible) {
            self.backend.set_cursor_visibility(visible);
        }
    }

    /// Changes the render surface scale.
    ///
    /// ## Returns
    ///
    /// [`WindowError::InvalidSurfaceScale`] if `scale` is outside `(0, 1]`.
    pub fn set_surface_scale(&mut self, scale: f32) -> Result<(), WindowError> {
        if scale.is_nan() || scale <= 0.0 || scale > 1.0 {
            log::error!("{}: surface scale {scale} is outside (0, 1].", self.id);
            return Err(WindowError::InvalidSurfaceScale { scale });
        }
        if (self.size.surface_scale - scale).abs() > f32::EPSILON {
            self.backend.set_surface_scale(scale);
        }
        Ok(())
    }

    /// The window identifier.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// The last title set.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The committed geometry.
    pub fn size_state(&self) -> &WindowSizeState {
        &self.size
    }

    /// Client area size.
    pub fn size(&self) -> Size {
        self.size.size()
    }

    /// Scaled render surface size.
    pub fn surface_size(&self) -> Size {
        self.size.surface_size()
    }

    /// Render surface scale.
    pub fn surface_scale(&self) -> f32 {
        self.size.surface_scale
    }

    /// Display density.
    pub fn dpi(&self) -> f32 {
        self.size.dpi
    }

    /// Fullscreen state.
    pub fn fullscreen(&self) -> FullscreenMode {
        self.size.fullscreen
    }

    /// The requested cursor capture mode.
    pub fn cursor_capture(&self) -> CursorCapture {
        self.gate.cursor_capture()
    }

    /// The requested cursor visibility.
    pub fn cursor_visibility(&self) -> bool {
        self.gate.cursor_visible()
    }

    /// The activation gate state.
    pub fn activation(&self) -> &ActivationGate {
        &self.gate
    }

    /// Mouse buttons currently held over this window.
    pub fn held_mouse_buttons(&self) -> MouseButtonSet {
        self.translator.held_buttons()
    }

    /// Whether the window has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether the window is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the window's lifetime is owned by an external host.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Whether this is the application's primary window.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether the native window exists.
    pub fn is_alive(&self) -> bool {
        self.created && !self.destroyed
    }

    /// Whether the native window was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a size change was already committed this frame.
    pub fn size_merged_this_frame(&self) -> bool {
        self.size_merged_this_frame
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("embedded", &self.embedded)
            .field("size", &self.size)
            .field("has_focus", &self.has_focus)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

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

//! Translation from `winit` window events to the core's raw platform events.
//!
//! This module is the adapter layer between the native event loop and the
//! [`MainDispatcher`](aperture_core::MainDispatcher). `winit` spreads the
//! information a raw event needs over several events (cursor position arrives
//! separately from button presses, modifiers have their own event), so the
//! translation carries a small [`WinitEventState`] between calls.

use aperture_core::dispatch::{
    CharEvent, GestureEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent,
    SizeEvent, TouchEvent,
};
use aperture_core::input::{KeyModifiers, MouseButton, TouchId};
use aperture_core::{CursorCapture, FullscreenMode, PlatformEventKind};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase,
    WindowEvent,
};
use winit::keyboard::{ModifiersState, PhysicalKey};

use super::keymap::hid_usage_for_keycode;
use super::scale::SurfaceScale;

/// Display density at a scale factor of 1.
const BASE_DPI: f64 = 96.0;

/// Native state remembered between `winit` events of one window.
#[derive(Debug, Clone)]
pub struct WinitEventState {
    cursor: (f32, f32),
    modifiers: KeyModifiers,
    scale_factor: f64,
    surface_scale: SurfaceScale,
    fullscreen: FullscreenMode,
    cursor_pinned: bool,
}

impl WinitEventState {
    /// Creates the state for a window with the given scale factor.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            cursor: (0.0, 0.0),
            modifiers: KeyModifiers::empty(),
            scale_factor,
            surface_scale: SurfaceScale::default(),
            fullscreen: FullscreenMode::Windowed,
            cursor_pinned: false,
        }
    }

    /// Reports resizes with the scale requested through `scale`, usually the
    /// handle of the window's [`WinitWindowBackend`](crate::WinitWindowBackend).
    pub fn with_surface_scale(mut self, scale: SurfaceScale) -> Self {
        self.surface_scale = scale;
        self
    }

    /// Reads the scale factor and fullscreen state from the native window.
    pub fn refresh_from_window(&mut self, window: &winit::window::Window) {
        self.scale_factor = window.scale_factor();
        self.fullscreen = if window.fullscreen().is_some() {
            FullscreenMode::Fullscreen
        } else {
            FullscreenMode::Windowed
        };
    }

    /// Mirrors the cursor capture the application requested, which decides
    /// how pointer events are reported.
    pub fn sync_with(&mut self, window: &aperture_core::Window) {
        self.cursor_pinned = window.cursor_capture() == CursorCapture::Pinning;
    }

    /// Records the modifiers reported by `winit`.
    pub fn set_modifiers(&mut self, state: ModifiersState) {
        let mut modifiers = KeyModifiers::empty();
        modifiers.set(KeyModifiers::SHIFT, state.shift_key());
        modifiers.set(KeyModifiers::CONTROL, state.control_key());
        modifiers.set(KeyModifiers::ALT, state.alt_key());
        modifiers.set(KeyModifiers::META, state.super_key());
        self.modifiers = modifiers;
    }

    /// Active modifiers.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Last known cursor position, in logical units.
    pub fn cursor_position(&self) -> (f32, f32) {
        self.cursor
    }

    /// Whether pointer movement is reported as relative deltas.
    pub fn is_cursor_pinned(&self) -> bool {
        self.cursor_pinned
    }

    /// The native scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Builds the geometry payload for a native inner size.
    pub fn size_event(&self, physical: PhysicalSize<u32>) -> SizeEvent {
        let logical = physical.to_logical::<f64>(self.scale_factor);
        SizeEvent {
            width: logical.width as f32,
            height: logical.height as f32,
            surface_width: physical.width as f32,
            surface_height: physical.height as f32,
            surface_scale: self.surface_scale.get(),
            dpi: (BASE_DPI * self.scale_factor) as f32,
            fullscreen: self.fullscreen,
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        (logical.x as f32, logical.y as f32)
    }
}

impl Default for WinitEventState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Translates a `winit::event::WindowEvent` into raw platform events.
///
/// ## Arguments
///
/// * `event` - The native event.
/// * `state` - The window's remembered native state, updated in place.
///
/// ## Returns
///
/// Zero or more events, in the order they must be posted. A key press that
/// produced text yields the key event followed by one character event per
/// printable character.
pub fn translate_winit_event(
    event: &WindowEvent,
    state: &mut WinitEventState,
) -> Vec<PlatformEventKind> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => translate_key(
            key_event.physical_key,
            key_event.state,
            key_event.repeat,
            key_event.text.as_deref(),
            state,
        ),
        WindowEvent::ModifiersChanged(modifiers) => {
            state.set_modifiers(modifiers.state());
            Vec::new()
        }
        WindowEvent::CursorMoved { position, .. } => {
            state.cursor = state.to_logical(*position);
            // Pinned cursors report deltas through device motion instead.
            if state.cursor_pinned {
                return Vec::new();
            }
            vec![PlatformEventKind::MouseMove(MouseMoveEvent {
                x: state.cursor.0,
                y: state.cursor.1,
                is_relative: false,
                modifiers: state.modifiers,
            })]
        }
        WindowEvent::MouseInput {
            state: element,
            button,
            ..
        } => {
            let Some(button) = map_mouse_button(*button) else {
                log::trace!("Ignoring unsupported mouse button {button:?}.");
                return Vec::new();
            };
            let payload = MouseButtonEvent {
                button,
                x: state.cursor.0,
                y: state.cursor.1,
                is_relative: state.cursor_pinned,
                modifiers: state.modifiers,
            };
            vec![match element {
                ElementState::Pressed => PlatformEventKind::MouseButtonDown(payload),
                ElementState::Released => PlatformEventKind::MouseButtonUp(payload),
            }]
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy): (f32, f32) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
            };
            if dx == 0.0 && dy == 0.0 {
                return Vec::new();
            }
            vec![PlatformEventKind::MouseWheel(MouseWheelEvent {
                x: state.cursor.0,
                y: state.cursor.1,
                delta_x: dx,
                delta_y: dy,
                is_relative: state.cursor_pinned,
                modifiers: state.modifiers,
            })]
        }
        WindowEvent::Touch(touch) => vec![translate_touch(touch, state)],
        WindowEvent::PinchGesture { delta, .. } => {
            vec![gesture(state, *delta as f32, 0.0, 0.0, 0.0)]
        }
        WindowEvent::RotationGesture { delta, .. } => {
            vec![gesture(state, 0.0, *delta, 0.0, 0.0)]
        }
        WindowEvent::PanGesture { delta, .. } => {
            vec![gesture(state, 0.0, 0.0, delta.x, delta.y)]
        }
        WindowEvent::Resized(size) => {
            vec![PlatformEventKind::WindowSizeChanged(state.size_event(*size))]
        }
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            state.scale_factor = *scale_factor;
            vec![PlatformEventKind::WindowDpiChanged {
                dpi: (BASE_DPI * scale_factor) as f32,
            }]
        }
        WindowEvent::Focused(focused) => {
            let mut events = vec![PlatformEventKind::WindowFocusChanged(*focused)];
            // The platform drops a pinned cursor along with focus.
            if !focused && state.cursor_pinned {
                events.push(PlatformEventKind::WindowCaptureLost);
            }
            events
        }
        WindowEvent::Occluded(occluded) => {
            vec![PlatformEventKind::WindowVisibilityChanged(!occluded)]
        }
        WindowEvent::Destroyed => vec![PlatformEventKind::WindowDestroyed],
        _ => Vec::new(),
    }
}

/// Translates raw device motion into a relative pointer move.
///
/// Returns `None` unless the cursor is pinned; free cursors are tracked through
/// `CursorMoved` instead.
pub fn translate_mouse_motion(
    delta: (f64, f64),
    state: &WinitEventState,
) -> Option<PlatformEventKind> {
    if !state.cursor_pinned {
        return None;
    }
    Some(PlatformEventKind::MouseMove(MouseMoveEvent {
        x: delta.0 as f32,
        y: delta.1 as f32,
        is_relative: true,
        modifiers: state.modifiers,
    }))
}

// --- Private Helper Functions ---

fn translate_key(
    physical_key: PhysicalKey,
    element: ElementState,
    repeat: bool,
    text: Option<&str>,
    state: &WinitEventState,
) -> Vec<PlatformEventKind> {
    let mut events = Vec::new();

    if let PhysicalKey::Code(code) = physical_key {
        let payload = KeyEvent {
            key: hid_usage_for_keycode(code),
            is_repeated: repeat,
            modifiers: state.modifiers,
        };
        events.push(match element {
            ElementState::Pressed => PlatformEventKind::KeyDown(payload),
            ElementState::Released => PlatformEventKind::KeyUp(payload),
        });
    }

    if element == ElementState::Pressed {
        let chars = text.unwrap_or_default().chars().filter(|c| !c.is_control());
        events.extend(chars.map(|c| {
            PlatformEventKind::KeyChar(CharEvent {
                code_point: u32::from(c),
                is_repeated: repeat,
                modifiers: state.modifiers,
            })
        }));
    }
    events
}

fn translate_touch(touch: &Touch, state: &WinitEventState) -> PlatformEventKind {
    let (x, y) = state.to_logical(touch.location);
    let payload = TouchEvent {
        // Platform ids are small per-contact counters.
        touch_id: TouchId(touch.id as u32),
        x,
        y,
        modifiers: state.modifiers,
    };
    match touch.phase {
        TouchPhase::Started => PlatformEventKind::TouchDown(payload),
        TouchPhase::Moved => PlatformEventKind::TouchMove(payload),
        TouchPhase::Ended | TouchPhase::Cancelled => PlatformEventKind::TouchUp(payload),
    }
}

fn gesture(
    state: &WinitEventState,
    magnification: f32,
    rotation: f32,
    delta_x: f32,
    delta_y: f32,
) -> PlatformEventKind {
    PlatformEventKind::TrackpadGesture(GestureEvent {
        magnification,
        rotation,
        delta_x,
        delta_y,
        modifiers: state.modifiers,
    })
}

fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Extended1),
        WinitMouseButton::Forward => Some(MouseButton::Extended2),
        WinitMouseButton::Other(_) => None,
    }
}

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

//! Raw events produced by a platform layer.

use crate::input::{KeyModifiers, MouseButton, SystemKey, TouchId};
use crate::window::{FullscreenMode, WindowId};

/// A mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    /// The button that changed.
    pub button: MouseButton,
    /// Cursor x position.
    pub x: f32,
    /// Cursor y position.
    pub y: f32,
    /// Whether the cursor is pinned and positions are deltas.
    pub is_relative: bool,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A pointer movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// New x position, or x delta when relative.
    pub x: f32,
    /// New y position, or y delta when relative.
    pub y: f32,
    /// Whether the cursor is pinned and positions are deltas.
    pub is_relative: bool,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A scroll wheel movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    /// Cursor x position.
    pub x: f32,
    /// Cursor y position.
    pub y: f32,
    /// Horizontal scroll delta.
    pub delta_x: f32,
    /// Vertical scroll delta.
    pub delta_y: f32,
    /// Whether the cursor is pinned and positions are deltas.
    pub is_relative: bool,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A touch contact change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// The contact identifier assigned by the platform.
    pub touch_id: TouchId,
    /// Contact x position.
    pub x: f32,
    /// Contact y position.
    pub y: f32,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A physical key transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    /// The platform key code.
    pub key: SystemKey,
    /// Whether this is an auto-repeat of a held key.
    pub is_repeated: bool,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A typed character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharEvent {
    /// The Unicode scalar value as delivered by the platform.
    pub code_point: u32,
    /// Whether this is an auto-repeat of a held key.
    pub is_repeated: bool,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// A trackpad gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    /// Pinch magnification delta.
    pub magnification: f32,
    /// Rotation delta, in degrees.
    pub rotation: f32,
    /// Horizontal swipe delta.
    pub delta_x: f32,
    /// Vertical swipe delta.
    pub delta_y: f32,
    /// Active modifiers.
    pub modifiers: KeyModifiers,
}

/// Window geometry reported on creation and on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeEvent {
    /// Client area width, in logical units.
    pub width: f32,
    /// Client area height, in logical units.
    pub height: f32,
    /// Render surface width, in pixels.
    pub surface_width: f32,
    /// Render surface height, in pixels.
    pub surface_height: f32,
    /// Render surface scale in `(0, 1]`.
    pub surface_scale: f32,
    /// Display density.
    pub dpi: f32,
    /// Fullscreen state.
    pub fullscreen: FullscreenMode,
}

/// The payload of a [`PlatformEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEventKind {
    /// A mouse button went down.
    MouseButtonDown(MouseButtonEvent),
    /// A mouse button went up.
    MouseButtonUp(MouseButtonEvent),
    /// The pointer moved.
    MouseMove(MouseMoveEvent),
    /// The scroll wheel turned.
    MouseWheel(MouseWheelEvent),
    /// A touch contact began.
    TouchDown(TouchEvent),
    /// A touch contact ended.
    TouchUp(TouchEvent),
    /// A touch contact moved.
    TouchMove(TouchEvent),
    /// A key went down.
    KeyDown(KeyEvent),
    /// A key went up.
    KeyUp(KeyEvent),
    /// A character was typed.
    KeyChar(CharEvent),
    /// A trackpad gesture progressed.
    TrackpadGesture(GestureEvent),
    /// The native window was created.
    WindowCreated(SizeEvent),
    /// The native window was destroyed.
    WindowDestroyed,
    /// The native window changed size, surface or fullscreen state.
    WindowSizeChanged(SizeEvent),
    /// The display density changed.
    WindowDpiChanged {
        /// The new density.
        dpi: f32,
    },
    /// The window gained (`true`) or lost (`false`) focus.
    WindowFocusChanged(bool),
    /// The window became visible (`true`) or hidden (`false`).
    WindowVisibilityChanged(bool),
    /// The operating system released the window's cursor capture.
    WindowCaptureLost,
}

impl PlatformEventKind {
    /// Returns `true` for user input kinds, which are subject to focus and
    /// activation gating.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
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
                | PlatformEventKind::TrackpadGesture(_)
        )
    }

    /// The size payload if this is a [`PlatformEventKind::WindowSizeChanged`].
    pub fn as_size_change(&self) -> Option<&SizeEvent> {
        match self {
            PlatformEventKind::WindowSizeChanged(size) => Some(size),
            _ => None,
        }
    }
}

/// A raw event addressed to one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformEvent {
    /// The target window.
    pub window: WindowId,
    /// Raw platform timestamp; its unit is given by
    /// [`TimestampUnit`](crate::input::TimestampUnit).
    pub timestamp: u64,
    /// What happened.
    pub kind: PlatformEventKind,
}

impl PlatformEvent {
    /// Creates an event for `window`.
    pub fn new(window: WindowId, timestamp: u64, kind: PlatformEventKind) -> Self {
        Self {
            window,
            timestamp,
            kind,
        }
    }
}

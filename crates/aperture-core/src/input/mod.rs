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

//! The canonical, platform-independent input model.
//!
//! Windows translate raw platform events into [`InputEvent`]s and hand them to an
//! [`InputSink`]. Key codes go through a [`KeyboardState`] collaborator, which also
//! tracks which keys are currently held.

mod keyboard;
mod sink;
mod translate;

pub use self::keyboard::{Key, Keyboard, KeyboardState, SystemKey};
pub use self::sink::{InputQueue, InputSink};
pub use self::translate::{InputTranslator, TimestampUnit};

use bitflags::bitflags;

/// A mouse button, in canonical order from first to last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// The primary button.
    Left,
    /// The secondary button.
    Right,
    /// The wheel button.
    Middle,
    /// The first side button (usually "back").
    Extended1,
    /// The second side button (usually "forward").
    Extended2,
}

impl MouseButton {
    /// Every button, first to last.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Extended1,
        MouseButton::Extended2,
    ];

    /// The single-bit set holding this button.
    pub const fn as_set(self) -> MouseButtonSet {
        match self {
            MouseButton::Left => MouseButtonSet::LEFT,
            MouseButton::Right => MouseButtonSet::RIGHT,
            MouseButton::Middle => MouseButtonSet::MIDDLE,
            MouseButton::Extended1 => MouseButtonSet::EXTENDED1,
            MouseButton::Extended2 => MouseButtonSet::EXTENDED2,
        }
    }
}

bitflags! {
    /// The set of mouse buttons currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtonSet: u8 {
        /// [`MouseButton::Left`].
        const LEFT = 1 << 0;
        /// [`MouseButton::Right`].
        const RIGHT = 1 << 1;
        /// [`MouseButton::Middle`].
        const MIDDLE = 1 << 2;
        /// [`MouseButton::Extended1`].
        const EXTENDED1 = 1 << 3;
        /// [`MouseButton::Extended2`].
        const EXTENDED2 = 1 << 4;
    }
}

impl MouseButtonSet {
    /// Marks `button` as held or released.
    pub fn set_pressed(&mut self, button: MouseButton, pressed: bool) {
        self.set(button.as_set(), pressed);
    }

    /// Returns `true` if `button` is held.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.contains(button.as_set())
    }

    /// Iterates over held buttons in canonical order.
    pub fn pressed_buttons(self) -> impl Iterator<Item = MouseButton> {
        MouseButton::ALL
            .into_iter()
            .filter(move |button| self.contains(button.as_set()))
    }
}

bitflags! {
    /// Keyboard modifiers active when an event was produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Either shift key.
        const SHIFT = 1 << 0;
        /// Either control key.
        const CONTROL = 1 << 1;
        /// Either alt / option key.
        const ALT = 1 << 2;
        /// Either command / windows / super key.
        const META = 1 << 3;
    }
}

/// Identifies one contact on a touch surface for the duration of the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u32);

/// A point in window (physical) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The phase of an input occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A button or contact went down.
    Began,
    /// The pointer moved with nothing held.
    Moved,
    /// The pointer or contact moved while held.
    Dragged,
    /// A button or contact was released.
    Ended,
    /// The scroll wheel turned.
    Wheel,
    /// A trackpad gesture progressed.
    Gesture,
    /// A key went down.
    KeyDown,
    /// A held key auto-repeated.
    KeyDownRepeat,
    /// A key was released.
    KeyUp,
    /// A character was typed.
    Char,
    /// A character auto-repeated.
    CharRepeat,
}

/// The device an input occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    /// A mouse or other pointing device.
    Mouse,
    /// A touch screen.
    Touch,
    /// A keyboard.
    Keyboard,
    /// A trackpad producing gestures.
    TouchPad,
}

/// Trackpad gesture deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gesture {
    /// Pinch magnification delta.
    pub magnification: f32,
    /// Rotation delta, in degrees.
    pub rotation: f32,
    /// Horizontal swipe delta.
    pub dx: f32,
    /// Vertical swipe delta.
    pub dy: f32,
}

/// Device-specific data carried by an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputPayload {
    /// No extra data (plain pointer moves).
    None,
    /// The mouse button that began, ended or is being dragged.
    MouseButton(MouseButton),
    /// The touch contact.
    Touch(TouchId),
    /// The canonical key code.
    Key(Key),
    /// The typed character.
    Char(char),
    /// Scroll wheel deltas.
    Wheel {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Trackpad gesture deltas.
    Gesture(Gesture),
}

/// An engine-internal, platform-independent input occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// What happened.
    pub phase: Phase,
    /// Where it came from.
    pub device: InputDevice,
    /// Pointer position, or the movement delta when `is_relative` is set.
    pub position: Position,
    /// Whether `position` is a delta from a pinned cursor.
    pub is_relative: bool,
    /// Modifiers active at the time.
    pub modifiers: KeyModifiers,
    /// Event time in seconds.
    pub timestamp: f64,
    /// Device-specific data.
    pub payload: InputPayload,
}

impl InputEvent {
    /// The mouse button this event refers to, if any.
    pub fn mouse_button(&self) -> Option<MouseButton> {
        match self.payload {
            InputPayload::MouseButton(button) => Some(button),
            _ => None,
        }
    }

    /// The canonical key this event refers to, if any.
    pub fn key(&self) -> Option<Key> {
        match self.payload {
            InputPayload::Key(key) => Some(key),
            _ => None,
        }
    }
}

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

//! Keyboard state and key code translation.

use std::collections::HashSet;

/// A platform key code, expressed as a USB HID keyboard usage id (page 0x07).
///
/// Platform adapters convert their native scan codes to this numbering so the
/// core can translate keys without knowing which backend produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemKey(pub u32);

/// A canonical key code.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Grave,
    Comma,
    Period,
    Slash,
    CapsLock,
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Right,
    Left,
    Down,
    Up,
    NumLock,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftMeta,
    RightCtrl,
    RightShift,
    RightAlt,
    RightMeta,
    /// A key with no canonical mapping.
    Unknown,
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I, Key::J, Key::K, Key::L,
    Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U, Key::V, Key::W, Key::X,
    Key::Y, Key::Z,
];

// HID orders digits 1..9 then 0.
const DIGITS: [Key; 10] = [
    Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5, Key::Num6, Key::Num7, Key::Num8,
    Key::Num9, Key::Num0,
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9, Key::F10,
    Key::F11, Key::F12,
];

impl Key {
    /// Maps a USB HID keyboard usage id to a canonical key.
    pub fn from_hid_usage(usage: u32) -> Key {
        match usage {
            0x04..=0x1D => LETTERS[(usage - 0x04) as usize],
            0x1E..=0x27 => DIGITS[(usage - 0x1E) as usize],
            0x28 => Key::Enter,
            0x29 => Key::Escape,
            0x2A => Key::Backspace,
            0x2B => Key::Tab,
            0x2C => Key::Space,
            0x2D => Key::Minus,
            0x2E => Key::Equals,
            0x2F => Key::LeftBracket,
            0x30 => Key::RightBracket,
            0x31 => Key::Backslash,
            0x33 => Key::Semicolon,
            0x34 => Key::Apostrophe,
            0x35 => Key::Grave,
            0x36 => Key::Comma,
            0x37 => Key::Period,
            0x38 => Key::Slash,
            0x39 => Key::CapsLock,
            0x3A..=0x45 => FUNCTION_KEYS[(usage - 0x3A) as usize],
            0x46 => Key::PrintScreen,
            0x47 => Key::ScrollLock,
            0x48 => Key::Pause,
            0x49 => Key::Insert,
            0x4A => Key::Home,
            0x4B => Key::PageUp,
            0x4C => Key::Delete,
            0x4D => Key::End,
            0x4E => Key::PageDown,
            0x4F => Key::Right,
            0x50 => Key::Left,
            0x51 => Key::Down,
            0x52 => Key::Up,
            0x53 => Key::NumLock,
            0xE0 => Key::LeftCtrl,
            0xE1 => Key::LeftShift,
            0xE2 => Key::LeftAlt,
            0xE3 => Key::LeftMeta,
            0xE4 => Key::RightCtrl,
            0xE5 => Key::RightShift,
            0xE6 => Key::RightAlt,
            0xE7 => Key::RightMeta,
            _ => Key::Unknown,
        }
    }
}

/// The keyboard collaborator a window reports key transitions to.
pub trait KeyboardState {
    /// Translates a platform key code to its canonical key.
    fn key_for_system_key(&self, system_key: SystemKey) -> Key;

    /// Records that `key` went down.
    fn on_key_pressed(&mut self, key: Key);

    /// Records that `key` was released.
    fn on_key_unpressed(&mut self, key: Key);

    /// Forgets every held key.
    fn clear_all_keys(&mut self);

    /// Returns `true` if `key` is currently held.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Number of keys currently held.
    fn pressed_count(&self) -> usize;
}

/// The default [`KeyboardState`], translating HID usage ids.
#[derive(Debug, Default)]
pub struct Keyboard {
    pressed: HashSet<Key>,
}

impl Keyboard {
    /// Creates a keyboard with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the keys currently held, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &Key> {
        self.pressed.iter()
    }
}

impl KeyboardState for Keyboard {
    fn key_for_system_key(&self, system_key: SystemKey) -> Key {
        Key::from_hid_usage(system_key.0)
    }

    fn on_key_pressed(&mut self, key: Key) {
        if key != Key::Unknown {
            self.pressed.insert(key);
        }
    }

    fn on_key_unpressed(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    fn clear_all_keys(&mut self) {
        if !self.pressed.is_empty() {
            log::trace!("Releasing {} held key(s).", self.pressed.len());
        }
        self.pressed.clear();
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn pressed_count(&self) -> usize {
        self.pressed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hid_letters_digits_and_function_keys() {
        assert_eq!(Key::from_hid_usage(0x04), Key::A);
        assert_eq!(Key::from_hid_usage(0x1D), Key::Z);
        assert_eq!(Key::from_hid_usage(0x1E), Key::Num1);
        assert_eq!(Key::from_hid_usage(0x27), Key::Num0);
        assert_eq!(Key::from_hid_usage(0x3A), Key::F1);
        assert_eq!(Key::from_hid_usage(0x45), Key::F12);
    }

    #[test]
    fn hid_navigation_and_modifiers() {
        assert_eq!(Key::from_hid_usage(0x29), Key::Escape);
        assert_eq!(Key::from_hid_usage(0x52), Key::Up);
        assert_eq!(Key::from_hid_usage(0xE1), Key::LeftShift);
        assert_eq!(Key::from_hid_usage(0xE7), Key::RightMeta);
    }

    #[test]
    fn unmapped_usage_is_unknown() {
        assert_eq!(Key::from_hid_usage(0x00), Key::Unknown);
        assert_eq!(Key::from_hid_usage(0x32), Key::Unknown);
        assert_eq!(Key::from_hid_usage(0xFFFF), Key::Unknown);
    }

    #[test]
    fn press_release_and_clear() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_pressed(Key::A);
        keyboard.on_key_pressed(Key::B);
        assert!(keyboard.is_key_pressed(Key::A));
        assert_eq!(keyboard.pressed_count(), 2);

        keyboard.on_key_unpressed(Key::A);
        assert!(!keyboard.is_key_pressed(Key::A));
        assert_eq!(keyboard.pressed_count(), 1);

        keyboard.clear_all_keys();
        assert_eq!(keyboard.pressed_count(), 0);
    }

    #[test]
    fn unknown_keys_are_not_tracked() {
        let mut keyboard = Keyboard::new();
        keyboard.on_key_pressed(Key::Unknown);
        assert_eq!(keyboard.pressed_count(), 0);
    }
}

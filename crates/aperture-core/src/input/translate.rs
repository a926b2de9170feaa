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

//! Translation of raw platform input into canonical [`InputEvent`]s.
//!
//! This is the only place that knows how a raw payload maps to a [`Phase`]. Focus
//! and activation gating happen before translation, in the window.

use super::{
    Gesture, InputDevice, InputEvent, InputPayload, KeyModifiers, KeyboardState, MouseButtonSet,
    Phase, Position,
};
use crate::dispatch::{PlatformEvent, PlatformEventKind};
use serde::{Deserialize, Serialize};

/// The unit of raw platform timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampUnit {
    /// Raw timestamps count milliseconds.
    #[default]
    Milliseconds,
    /// Raw timestamps count microseconds.
    Microseconds,
}

impl TimestampUnit {
    /// Number of raw ticks in one second.
    pub const fn ticks_per_second(self) -> f64 {
        match self {
            TimestampUnit::Milliseconds => 1_000.0,
            TimestampUnit::Microseconds => 1_000_000.0,
        }
    }
}

/// Converts raw platform input into canonical events for one window.
///
/// The translator owns the mouse-button pressed set, which decides whether a
/// pointer move is a plain move or a drag, and the last delivered timestamp,
/// which keeps canonical timestamps non-decreasing.
#[derive(Debug)]
pub struct InputTranslator {
    unit: TimestampUnit,
    held_buttons: MouseButtonSet,
    last_timestamp: f64,
}

impl InputTranslator {
    /// Creates a translator for a platform whose timestamps use `unit`.
    pub fn new(unit: TimestampUnit) -> Self {
        Self {
            unit,
            held_buttons: MouseButtonSet::empty(),
            last_timestamp: 0.0,
        }
    }

    /// The buttons currently considered held.
    pub fn held_buttons(&self) -> MouseButtonSet {
        self.held_buttons
    }

    /// Updates the pressed set from a button press or release.
    ///
    /// The window calls this for every button event, before any focus or
    /// activation gating, so that a swallowed press and its swallowed release
    /// still balance out. Other event kinds are ignored.
    pub fn track_mouse_buttons(&mut self, kind: &PlatformEventKind) {
        match kind {
            PlatformEventKind::MouseButtonDown(e) => self.held_buttons.set_pressed(e.button, true),
            PlatformEventKind::MouseButtonUp(e) => self.held_buttons.set_pressed(e.button, false),
            _ => {}
        }
    }

    /// Converts a raw timestamp to seconds.
    ///
    /// A raw timestamp older than the last one delivered is clamped to it.
    pub fn normalize_timestamp(&mut self, raw: u64) -> f64 {
        let seconds = raw as f64 / self.unit.ticks_per_second();
        if seconds < self.last_timestamp {
            log::trace!(
                "Raw timestamp {raw} went backwards, clamping to {:.6}s.",
                self.last_timestamp
            );
            return self.last_timestamp;
        }
        self.last_timestamp = seconds;
        seconds
    }

    /// Translates one raw event into zero or more canonical events.
    ///
    /// Non-input kinds produce nothing. A pointer move while buttons are held
    /// produces one [`Phase::Dragged`] event per held button.
    pub fn translate(
        &mut self,
        event: &PlatformEvent,
        keyboard: &dyn KeyboardState,
    ) -> Vec<InputEvent> {
        if !event.kind.is_input() {
            return Vec::new();
        }
        let timestamp = self.normalize_timestamp(event.timestamp);

        match event.kind {
            PlatformEventKind::MouseButtonDown(e) | PlatformEventKind::MouseButtonUp(e) => {
                let phase = if matches!(event.kind, PlatformEventKind::MouseButtonDown(_)) {
                    Phase::Began
                } else {
                    Phase::Ended
                };
                let position = if e.is_relative {
                    Position::default()
                } else {
                    Position::new(e.x, e.y)
                };
                vec![InputEvent {
                    phase,
                    device: InputDevice::Mouse,
                    position,
                    is_relative: e.is_relative,
                    modifiers: e.modifiers,
                    timestamp,
                    payload: InputPayload::MouseButton(e.button),
                }]
            }
            PlatformEventKind::MouseMove(e) => {
                let base = InputEvent {
                    phase: Phase::Moved,
                    device: InputDevice::Mouse,
                    position: Position::new(e.x, e.y),
                    is_relative: e.is_relative,
                    modifiers: e.modifiers,
                    timestamp,
                    payload: InputPayload::None,
                };
                if self.held_buttons.is_empty() {
                    vec![base]
                } else {
                    self.held_buttons
                        .pressed_buttons()
                        .map(|button| InputEvent {
                            phase: Phase::Dragged,
                            payload: InputPayload::MouseButton(button),
                            ..base
                        })
                        .collect()
                }
            }
            PlatformEventKind::MouseWheel(e) => vec![InputEvent {
                phase: Phase::Wheel,
                device: InputDevice::Mouse,
                position: Position::new(e.x, e.y),
                is_relative: e.is_relative,
                modifiers: e.modifiers,
                timestamp,
                payload: InputPayload::Wheel {
                    dx: e.delta_x,
                    dy: e.delta_y,
                },
            }],
            PlatformEventKind::TouchDown(e)
            | PlatformEventKind::TouchUp(e)
            | PlatformEventKind::TouchMove(e) => {
                let phase = match event.kind {
                    PlatformEventKind::TouchDown(_) => Phase::Began,
                    PlatformEventKind::TouchUp(_) => Phase::Ended,
                    _ => Phase::Dragged,
                };
                vec![InputEvent {
                    phase,
                    device: InputDevice::Touch,
                    position: Position::new(e.x, e.y),
                    is_relative: false,
                    modifiers: e.modifiers,
                    timestamp,
                    payload: InputPayload::Touch(e.touch_id),
                }]
            }
            PlatformEventKind::KeyDown(e) | PlatformEventKind::KeyUp(e) => {
                let phase = match event.kind {
                    PlatformEventKind::KeyDown(_) if e.is_repeated => Phase::KeyDownRepeat,
                    PlatformEventKind::KeyDown(_) => Phase::KeyDown,
                    _ => Phase::KeyUp,
                };
                vec![InputEvent {
                    phase,
                    device: InputDevice::Keyboard,
                    position: Position::default(),
                    is_relative: false,
                    modifiers: e.modifiers,
                    timestamp,
                    payload: InputPayload::Key(keyboard.key_for_system_key(e.key)),
                }]
            }
            PlatformEventKind::KeyChar(e) => {
                let Some(ch) = char::from_u32(e.code_point) else {
                    log::warn!(
                        "Dropping character event with invalid code point {:#x}.",
                        e.code_point
                    );
                    return Vec::new();
                };
                vec![InputEvent {
                    phase: if e.is_repeated {
                        Phase::CharRepeat
                    } else {
                        Phase::Char
                    },
                    device: InputDevice::Keyboard,
                    position: Position::default(),
                    is_relative: false,
                    modifiers: e.modifiers,
                    timestamp,
                    payload: InputPayload::Char(ch),
                }]
            }
            PlatformEventKind::TrackpadGesture(e) => vec![InputEvent {
                phase: Phase::Gesture,
                device: InputDevice::TouchPad,
                position: Position::default(),
                is_relative: false,
                modifiers: e.modifiers,
                timestamp,
                payload: InputPayload::Gesture(Gesture {
                    magnification: e.magnification,
                    rotation: e.rotation,
                    dx: e.delta_x,
                    dy: e.delta_y,
                }),
            }],
            PlatformEventKind::WindowCreated(_)
            | PlatformEventKind::WindowDestroyed
            | PlatformEventKind::WindowSizeChanged(_)
            | PlatformEventKind::WindowDpiChanged { .. }
            | PlatformEventKind::WindowFocusChanged(_)
            | PlatformEventKind::WindowVisibilityChanged(_)
            | PlatformEventKind::WindowCaptureLost => Vec::new(),
        }
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(TimestampUnit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{
        CharEvent, GestureEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent,
        TouchEvent,
    };
    use crate::input::{Key, Keyboard, MouseButton, SystemKey, TouchId};
    use crate::window::WindowId;
    use approx::assert_relative_eq;

    const WINDOW: WindowId = WindowId(1);

    fn button(kind_down: bool, button: MouseButton, at: u64) -> PlatformEvent {
        let payload = MouseButtonEvent {
            button,
            x: 10.0,
            y: 20.0,
            is_relative: false,
            modifiers: KeyModifiers::empty(),
        };
        let kind = if kind_down {
            PlatformEventKind::MouseButtonDown(payload)
        } else {
            PlatformEventKind::MouseButtonUp(payload)
        };
        PlatformEvent::new(WINDOW, at, kind)
    }

    fn mouse_move(x: f32, y: f32, at: u64) -> PlatformEvent {
        PlatformEvent::new(
            WINDOW,
            at,
            PlatformEventKind::MouseMove(MouseMoveEvent {
                x,
                y,
                is_relative: false,
                modifiers: KeyModifiers::empty(),
            }),
        )
    }

    fn feed(translator: &mut InputTranslator, event: &PlatformEvent) -> Vec<InputEvent> {
        translator.track_mouse_buttons(&event.kind);
        translator.translate(event, &Keyboard::new())
    }

    #[test]
    fn button_press_and_release_map_to_began_and_ended() {
        let mut translator = InputTranslator::default();

        let down = feed(&mut translator, &button(true, MouseButton::Left, 100));
        assert_eq!(down.len(), 1);
        assert_eq!(down[0].phase, Phase::Began);
        assert_eq!(down[0].mouse_button(), Some(MouseButton::Left));
        assert_eq!(down[0].position, Position::new(10.0, 20.0));

        let up = feed(&mut translator, &button(false, MouseButton::Left, 150));
        assert_eq!(up[0].phase, Phase::Ended);
        assert!(translator.held_buttons().is_empty());
    }

    #[test]
    fn move_without_buttons_is_a_single_move() {
        let mut translator = InputTranslator::default();
        let events = feed(&mut translator, &mouse_move(3.0, 4.0, 10));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, Phase::Moved);
        assert_eq!(events[0].payload, InputPayload::None);
    }

    #[test]
    fn move_with_buttons_fans_out_one_drag_per_button() {
        let mut translator = InputTranslator::default();
        feed(&mut translator, &button(true, MouseButton::Right, 1));
        feed(&mut translator, &button(true, MouseButton::Left, 2));

        let events = feed(&mut translator, &mouse_move(5.0, 6.0, 3));

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.phase == Phase::Dragged));
        assert_eq!(events[0].mouse_button(), Some(MouseButton::Left));
        assert_eq!(events[1].mouse_button(), Some(MouseButton::Right));
        assert_eq!(events[0].position, events[1].position);
        assert_eq!(events[0].timestamp, events[1].timestamp);
    }

    #[test]
    fn relative_button_events_report_origin() {
        let mut translator = InputTranslator::default();
        let event = PlatformEvent::new(
            WINDOW,
            0,
            PlatformEventKind::MouseButtonDown(MouseButtonEvent {
                button: MouseButton::Middle,
                x: 50.0,
                y: 60.0,
                is_relative: true,
                modifiers: KeyModifiers::empty(),
            }),
        );
        let events = feed(&mut translator, &event);
        assert_eq!(events[0].position, Position::default());
        assert!(events[0].is_relative);
    }

    #[test]
    fn wheel_carries_deltas() {
        let mut translator = InputTranslator::default();
        let event = PlatformEvent::new(
            WINDOW,
            0,
            PlatformEventKind::MouseWheel(MouseWheelEvent {
                x: 1.0,
                y: 1.0,
                delta_x: -1.0,
                delta_y: 2.5,
                is_relative: false,
                modifiers: KeyModifiers::CONTROL,
            }),
        );
        let events = feed(&mut translator, &event);
        assert_eq!(events[0].phase, Phase::Wheel);
        assert_eq!(events[0].payload, InputPayload::Wheel { dx: -1.0, dy: 2.5 });
        assert_eq!(events[0].modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn touch_phases_and_ids() {
        let mut translator = InputTranslator::default();
        let touch = TouchEvent {
            touch_id: TouchId(7),
            x: 1.0,
            y: 2.0,
            modifiers: KeyModifiers::empty(),
        };

        let began = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 0, PlatformEventKind::TouchDown(touch)),
        );
        let moved = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 1, PlatformEventKind::TouchMove(touch)),
        );
        let ended = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 2, PlatformEventKind::TouchUp(touch)),
        );

        assert_eq!(began[0].phase, Phase::Began);
        assert_eq!(moved[0].phase, Phase::Dragged);
        assert_eq!(ended[0].phase, Phase::Ended);
        assert_eq!(moved[0].device, InputDevice::Touch);
        assert_eq!(moved[0].payload, InputPayload::Touch(TouchId(7)));
    }

    #[test]
    fn key_events_translate_code_and_repeat() {
        let mut translator = InputTranslator::default();
        let key = |is_repeated| KeyEvent {
            key: SystemKey(0x04),
            is_repeated,
            modifiers: KeyModifiers::SHIFT,
        };

        let down = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 0, PlatformEventKind::KeyDown(key(false))),
        );
        let repeat = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 1, PlatformEventKind::KeyDown(key(true))),
        );
        let up = feed(
            &mut translator,
            &PlatformEvent::new(WINDOW, 2, PlatformEventKind::KeyUp(key(false))),
        );

        assert_eq!(down[0].phase, Phase::KeyDown);
        assert_eq!(down[0].key(), Some(Key::A));
        assert_eq!(repeat[0].phase, Phase::KeyDownRepeat);
        assert_eq!(up[0].phase, Phase::KeyUp);
    }

    #[test]
    fn char_events_decode_code_points() {
        let mut translator = InputTranslator::default();
        let chr = |code_point, is_repeated| {
            PlatformEvent::new(
                WINDOW,
                0,
                PlatformEventKind::KeyChar(CharEvent {
                    code_point,
                    is_repeated,
                    modifiers: KeyModifiers::empty(),
                }),
            )
        };

        let typed = feed(&mut translator, &chr('é' as u32, false));
        assert_eq!(typed[0].phase, Phase::Char);
        assert_eq!(typed[0].payload, InputPayload::Char('é'));

        let repeated = feed(&mut translator, &chr('x' as u32, true));
        assert_eq!(repeated[0].phase, Phase::CharRepeat);

        assert!(feed(&mut translator, &chr(0xD800, false)).is_empty());
    }

    #[test]
    fn gesture_is_a_single_touchpad_event() {
        let mut translator = InputTranslator::default();
        let event = PlatformEvent::new(
            WINDOW,
            0,
            PlatformEventKind::TrackpadGesture(GestureEvent {
                magnification: 0.25,
                rotation: 15.0,
                delta_x: 1.0,
                delta_y: -1.0,
                modifiers: KeyModifiers::empty(),
            }),
        );
        let events = feed(&mut translator, &event);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].device, InputDevice::TouchPad);
        assert_eq!(
            events[0].payload,
            InputPayload::Gesture(Gesture {
                magnification: 0.25,
                rotation: 15.0,
                dx: 1.0,
                dy: -1.0
            })
        );
    }

    #[test]
    fn non_input_kinds_produce_nothing() {
        let mut translator = InputTranslator::default();
        let event = PlatformEvent::new(WINDOW, 0, PlatformEventKind::WindowFocusChanged(true));
        assert!(feed(&mut translator, &event).is_empty());
    }

    #[test]
    fn timestamps_follow_the_configured_unit() {
        let mut millis = InputTranslator::new(TimestampUnit::Milliseconds);
        assert_relative_eq!(millis.normalize_timestamp(1_500), 1.5);

        let mut micros = InputTranslator::new(TimestampUnit::Microseconds);
        assert_relative_eq!(micros.normalize_timestamp(1_500), 0.0015);
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut translator = InputTranslator::default();
        let mut last = 0.0;
        for raw in [10, 20, 15, 40, 39, 41] {
            let t = translator.normalize_timestamp(raw);
            assert!(t >= last, "{t} < {last}");
            last = t;
        }
        assert_relative_eq!(last, 0.041);
    }
}

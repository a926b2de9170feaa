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

//! # Aperture Infra
//!
//! The `winit` platform layer: converts native window events into
//! [`PlatformEventKind`](aperture_core::PlatformEventKind)s, stamps them with a
//! monotonic clock and drives native windows through the
//! [`WindowBackend`](aperture_core::WindowBackend) seam.

#![warn(missing_docs)]

pub mod platform;

pub use platform::clock::PlatformClock;
pub use platform::input::{translate_mouse_motion, translate_winit_event, WinitEventState};
pub use platform::keymap::hid_usage_for_keycode;
pub use platform::scale::SurfaceScale;
pub use platform::window::{window_id_for, WinitWindowBackend, WinitWindowBuilder};

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

//! # Aperture Core
//!
//! Backend-agnostic window event pipeline. Platform layers post raw events into a
//! [`MainDispatcher`](dispatch::MainDispatcher); once per frame the dispatcher drains
//! them into their [`Window`](window::Window), which coalesces resizes, gates input
//! around cursor-capture loss and translates the rest into canonical
//! [`InputEvent`](input::InputEvent)s.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod input;
pub mod window;

pub use config::{ApertureConfig, DispatcherConfig, WindowConfig};
pub use context::WindowContext;
pub use dispatch::{
    MainDispatcher, PendingEvents, PlatformEvent, PlatformEventKind, PlatformEventSender, SizeEvent,
};
pub use error::{ConfigError, WindowError};
pub use input::{InputEvent, InputQueue, InputSink, Keyboard, KeyboardState};
pub use window::{
    CursorCapture, FullscreenMode, NullRenderHost, RenderHost, Window, WindowBackend, WindowId,
    WindowRegistry, WindowSignal,
};

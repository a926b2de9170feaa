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

//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use aperture_core::dispatch::{KeyEvent, MouseButtonEvent, MouseMoveEvent};
use aperture_core::input::{KeyModifiers, MouseButton, SystemKey};
use aperture_core::window::WindowSizeState;
use aperture_core::{
    CursorCapture, FullscreenMode, InputQueue, Keyboard, MainDispatcher, PlatformEvent,
    PlatformEventKind, RenderHost, SizeEvent, Window, WindowBackend, WindowConfig, WindowContext,
    WindowId, WindowRegistry, WindowSignal,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A call a [`RecordingBackend`] received.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Resize(f32, f32),
    Close,
    SetTitle(String),
    SetFullscreen(FullscreenMode),
    SetCursorCapture(CursorCapture),
    SetCursorVisibility(bool),
    SetSurfaceScale(f32),
    TriggerPlatformEvents,
}

/// A backend that records every request.
pub struct RecordingBackend {
    pub calls: Rc<RefCell<Vec<BackendCall>>>,
    pub ready: Rc<Cell<bool>>,
}

impl WindowBackend for RecordingBackend {
    fn resize(&mut self, width: f32, height: f32) {
        self.calls.borrow_mut().push(BackendCall::Resize(width, height));
    }

    fn close(&mut self) {
        self.calls.borrow_mut().push(BackendCall::Close);
    }

    fn set_title(&mut self, title: &str) {
        self.calls
            .borrow_mut()
            .push(BackendCall::SetTitle(title.to_string()));
    }

    fn set_fullscreen(&mut self, mode: FullscreenMode) {
        self.calls.borrow_mut().push(BackendCall::SetFullscreen(mode));
    }

    fn set_cursor_capture(&mut self, mode: CursorCapture) {
        self.calls
            .borrow_mut()
            .push(BackendCall::SetCursorCapture(mode));
    }

    fn set_cursor_visibility(&mut self, visible: bool) {
        self.calls
            .borrow_mut()
            .push(BackendCall::SetCursorVisibility(visible));
    }

    fn set_surface_scale(&mut self, scale: f32) {
        self.calls
            .borrow_mut()
            .push(BackendCall::SetSurfaceScale(scale));
    }

    fn is_ready_for_render(&self) -> bool {
        self.ready.get()
    }

    fn trigger_platform_events(&mut self) {
        self.calls.borrow_mut().push(BackendCall::TriggerPlatformEvents);
    }
}

/// A call a [`RecordingRenderHost`] received.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Init(WindowId, WindowSizeState),
    Reset(WindowId, WindowSizeState, bool),
    Deinit(WindowId),
}

#[derive(Debug, Default)]
pub struct RecordingRenderHost {
    pub calls: Vec<RenderCall>,
}

impl RenderHost for RecordingRenderHost {
    fn init_renderer(&mut self, window: WindowId, size: &WindowSizeState) {
        self.calls.push(RenderCall::Init(window, *size));
    }

    fn reset_renderer(&mut self, window: WindowId, size: &WindowSizeState, full_reinit: bool) {
        self.calls.push(RenderCall::Reset(window, *size, full_reinit));
    }

    fn deinit_renderer(&mut self, window: WindowId) {
        self.calls.push(RenderCall::Deinit(window));
    }
}

/// One window wired to a dispatcher and recording collaborators.
pub struct Harness {
    pub dispatcher: MainDispatcher,
    pub windows: WindowRegistry,
    pub input: InputQueue,
    pub keyboard: Keyboard,
    pub renderer: RecordingRenderHost,
    pub backend_calls: Rc<RefCell<Vec<BackendCall>>>,
    pub ready: Rc<Cell<bool>>,
    pub id: WindowId,
    clock: u64,
}

impl Harness {
    pub fn new(config: WindowConfig) -> Self {
        let backend_calls = Rc::new(RefCell::new(Vec::new()));
        let ready = Rc::new(Cell::new(true));
        let mut windows = WindowRegistry::new();
        let id = windows.create_window(
            &config,
            Box::new(RecordingBackend {
                calls: Rc::clone(&backend_calls),
                ready: Rc::clone(&ready),
            }),
        );

        Self {
            dispatcher: MainDispatcher::default(),
            windows,
            input: InputQueue::new(),
            keyboard: Keyboard::new(),
            renderer: RecordingRenderHost::default(),
            backend_calls,
            ready,
            id,
            clock: 0,
        }
    }

    /// A harness whose window has been created and focused, with every
    /// recording cleared.
    pub fn created_and_focused(config: WindowConfig) -> Self {
        let mut harness = Self::new(config);
        harness.post(PlatformEventKind::WindowCreated(size_event(800.0, 600.0)));
        harness.post(PlatformEventKind::WindowFocusChanged(true));
        harness.frame();
        harness.reset_recordings();
        harness
    }

    /// Posts an event for the harness window, advancing the clock by 10 ms.
    pub fn post(&mut self, kind: PlatformEventKind) {
        self.clock += 10;
        self.post_at(self.clock, kind);
    }

    pub fn post_at(&mut self, timestamp: u64, kind: PlatformEventKind) {
        self.dispatcher
            .post(PlatformEvent::new(self.id, timestamp, kind));
    }

    /// Runs one dispatch frame.
    pub fn frame(&mut self) -> usize {
        let mut ctx = WindowContext::new(&mut self.input, &mut self.keyboard, &mut self.renderer);
        self.dispatcher.dispatch_frame(&mut self.windows, &mut ctx)
    }

    pub fn window(&self) -> &Window {
        self.windows.get(self.id).expect("harness window is registered")
    }

    pub fn window_mut(&mut self) -> &mut Window {
        self.windows
            .get_mut(self.id)
            .expect("harness window is registered")
    }

    pub fn signals(&self) -> Vec<WindowSignal> {
        self.windows.signals().drain()
    }

    /// Backend calls, excluding the per-frame trigger.
    pub fn requests(&self) -> Vec<BackendCall> {
        self.backend_calls
            .borrow()
            .iter()
            .filter(|c| **c != BackendCall::TriggerPlatformEvents)
            .cloned()
            .collect()
    }

    pub fn reset_recordings(&mut self) {
        self.backend_calls.borrow_mut().clear();
        self.renderer.calls.clear();
        self.input.drain();
        self.windows.signals().drain();
    }
}

pub fn size_event(width: f32, height: f32) -> SizeEvent {
    SizeEvent {
        width,
        height,
        surface_width: width * 2.0,
        surface_height: height * 2.0,
        surface_scale: 1.0,
        dpi: 192.0,
        fullscreen: FullscreenMode::Windowed,
    }
}

pub fn button_down(button: MouseButton) -> PlatformEventKind {
    PlatformEventKind::MouseButtonDown(button_event(button))
}

pub fn button_up(button: MouseButton) -> PlatformEventKind {
    PlatformEventKind::MouseButtonUp(button_event(button))
}

fn button_event(button: MouseButton) -> MouseButtonEvent {
    MouseButtonEvent {
        button,
        x: 10.0,
        y: 20.0,
        is_relative: false,
        modifiers: KeyModifiers::empty(),
    }
}

pub fn mouse_move(x: f32, y: f32) -> PlatformEventKind {
    PlatformEventKind::MouseMove(MouseMoveEvent {
        x,
        y,
        is_relative: false,
        modifiers: KeyModifiers::empty(),
    })
}

pub fn key_down(usage: u32) -> PlatformEventKind {
    PlatformEventKind::KeyDown(KeyEvent {
        key: SystemKey(usage),
        is_repeated: false,
        modifiers: KeyModifiers::empty(),
    })
}

pub fn key_up(usage: u32) -> PlatformEventKind {
    PlatformEventKind::KeyUp(KeyEvent {
        key: SystemKey(usage),
        is_repeated: false,
        modifiers: KeyModifiers::empty(),
    })
}

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

use aperture_core::input::{InputDevice, Phase};
use aperture_core::{
    CursorCapture, FullscreenMode, InputQueue, Keyboard, MainDispatcher, NullRenderHost,
    PlatformEvent, PlatformEventKind, PlatformEventSender, Window, WindowBackend, WindowConfig,
    WindowContext, WindowId, WindowRegistry,
};
use aperture_infra::{translate_winit_event, PlatformClock, SurfaceScale, WinitEventState};
use approx::assert_relative_eq;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceId, ElementState, MouseButton, WindowEvent};

struct HeadlessBackend;

impl WindowBackend for HeadlessBackend {
    fn resize(&mut self, _: f32, _: f32) {}
    fn close(&mut self) {}
    fn set_title(&mut self, _: &str) {}
    fn set_fullscreen(&mut self, _: FullscreenMode) {}
    fn set_cursor_capture(&mut self, _: CursorCapture) {}
    fn set_cursor_visibility(&mut self, _: bool) {}
    fn set_surface_scale(&mut self, _: f32) {}
    fn is_ready_for_render(&self) -> bool {
        true
    }
}

/// Posts a size change on scale requests, the way the winit backend does.
struct ScalingBackend {
    id: WindowId,
    scale: SurfaceScale,
    geometry: WinitEventState,
    events: PlatformEventSender,
    clock: PlatformClock,
}

impl WindowBackend for ScalingBackend {
    fn resize(&mut self, _: f32, _: f32) {}
    fn close(&mut self) {}
    fn set_title(&mut self, _: &str) {}
    fn set_fullscreen(&mut self, _: FullscreenMode) {}
    fn set_cursor_capture(&mut self, _: CursorCapture) {}
    fn set_cursor_visibility(&mut self, _: bool) {}
    fn set_surface_scale(&mut self, scale: f32) {
        self.scale.set(scale);
        let size = self.geometry.size_event(PhysicalSize::new(800, 600));
        self.events.post(PlatformEvent::new(
            self.id,
            self.clock.now(),
            PlatformEventKind::WindowSizeChanged(size),
        ));
    }
    fn is_ready_for_render(&self) -> bool {
        true
    }
}

fn run_frame(dispatcher: &mut MainDispatcher, windows: &mut WindowRegistry) {
    let mut input = InputQueue::new();
    let mut keyboard = Keyboard::new();
    let mut renderer = NullRenderHost;
    let mut ctx = WindowContext::new(&mut input, &mut keyboard, &mut renderer);
    dispatcher.dispatch_frame(windows, &mut ctx);
}

#[test]
fn test_surface_scale_survives_native_resize_in_same_frame() {
    // --- 1. ARRANGE ---
    let id = WindowId(3);
    let clock = PlatformClock::default();
    let mut dispatcher = MainDispatcher::default();
    let scale = SurfaceScale::default();
    let mut state = WinitEventState::new(1.0).with_surface_scale(scale.clone());

    let mut windows = WindowRegistry::new();
    let sender = windows.signals().sender();
    let backend = ScalingBackend {
        id,
        scale: scale.clone(),
        geometry: state.clone(),
        events: dispatcher.sender(),
        clock: PlatformClock::default(),
    };
    windows.insert(Window::new(
        id,
        &WindowConfig::default(),
        Box::new(backend),
        sender,
    ));
    dispatcher.post(PlatformEvent::new(
        id,
        clock.now(),
        PlatformEventKind::WindowCreated(state.size_event(PhysicalSize::new(800, 600))),
    ));
    run_frame(&mut dispatcher, &mut windows);

    // --- 2. ACT ---
    let window = windows.get_mut(id).expect("window is registered");
    assert!(window.set_surface_scale(0.5).is_ok());
    let resized = WindowEvent::Resized(PhysicalSize::new(800, 600));
    for kind in translate_winit_event(&resized, &mut state) {
        dispatcher.post(PlatformEvent::new(id, clock.now(), kind));
    }
    run_frame(&mut dispatcher, &mut windows);

    // --- 3. ASSERT ---
    let window = windows.get(id).expect("window is registered");
    assert_relative_eq!(window.surface_scale(), 0.5);
    assert_relative_eq!(window.surface_size().width, 400.0);
}

#[test]
fn test_native_drag_reaches_input_queue() {
    // --- 1. ARRANGE ---
    let id = WindowId(7);
    let mut windows = WindowRegistry::new();
    let sender = windows.signals().sender();
    windows.insert(Window::new(
        id,
        &WindowConfig::default(),
        Box::new(HeadlessBackend),
        sender,
    ));

    let mut dispatcher = MainDispatcher::default();
    let clock = PlatformClock::default();
    let mut state = WinitEventState::new(1.0);

    let native = [
        WindowEvent::Resized(PhysicalSize::new(640, 480)),
        WindowEvent::Focused(true),
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(10.0, 10.0),
        },
        WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        },
        WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(30.0, 40.0),
        },
    ];

    dispatcher.post(PlatformEvent::new(
        id,
        clock.now(),
        PlatformEventKind::WindowCreated(state.size_event(PhysicalSize::new(640, 480))),
    ));
    for event in &native {
        for kind in translate_winit_event(event, &mut state) {
            dispatcher.post(PlatformEvent::new(id, clock.now(), kind));
        }
    }

    // --- 2. ACT ---
    let mut input = InputQueue::new();
    let mut keyboard = Keyboard::new();
    let mut renderer = NullRenderHost;
    let mut ctx = WindowContext::new(&mut input, &mut keyboard, &mut renderer);
    dispatcher.dispatch_frame(&mut windows, &mut ctx);

    // --- 3. ASSERT ---
    let phases: Vec<Phase> = input.events().iter().map(|e| e.phase).collect();
    assert_eq!(phases, vec![Phase::Moved, Phase::Began, Phase::Dragged]);
    assert!(input
        .events()
        .iter()
        .all(|e| e.device == InputDevice::Mouse));
    let last = input.events()[2];
    assert_eq!((last.position.x, last.position.y), (30.0, 40.0));
}

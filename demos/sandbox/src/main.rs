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

// Aperture Sandbox
// Opens one window and logs what the event pipeline delivers.
// Escape toggles cursor pinning, F11 toggles fullscreen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use aperture_core::input::{Key, Phase};
use aperture_core::{
    ApertureConfig, CursorCapture, FullscreenMode, InputQueue, Keyboard, MainDispatcher,
    NullRenderHost, PlatformEvent, PlatformEventKind, Window, WindowContext, WindowId,
    WindowRegistry, WindowSignal,
};
use aperture_infra::{
    translate_mouse_motion, translate_winit_event, PlatformClock, WinitEventState,
    WinitWindowBuilder,
};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};

const CONFIG_PATH: &str = "aperture.ron";

/// The native side of the sandbox window.
struct NativeWindow {
    id: WindowId,
    handle: Arc<winit::window::Window>,
    state: WinitEventState,
    close_requested: Arc<AtomicBool>,
}

/// Application requests collected from one frame of input.
#[derive(Default)]
struct Toggles {
    cursor_pinning: bool,
    fullscreen: bool,
}

struct SandboxState {
    config: ApertureConfig,
    clock: PlatformClock,
    dispatcher: MainDispatcher,
    windows: WindowRegistry,
    input: InputQueue,
    keyboard: Keyboard,
    renderer: NullRenderHost,
    native: Option<NativeWindow>,
}

impl SandboxState {
    fn new(config: ApertureConfig) -> Self {
        Self {
            clock: PlatformClock::new(config.window.timestamp_unit),
            dispatcher: MainDispatcher::new(&config.dispatcher),
            windows: WindowRegistry::new(),
            input: InputQueue::new(),
            keyboard: Keyboard::new(),
            renderer: NullRenderHost,
            native: None,
            config,
        }
    }

    fn post(&self, id: WindowId, kinds: impl IntoIterator<Item = PlatformEventKind>) {
        for kind in kinds {
            self.dispatcher
                .post(PlatformEvent::new(id, self.clock.now(), kind));
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let mut ctx = WindowContext::new(&mut self.input, &mut self.keyboard, &mut self.renderer);
        self.dispatcher.dispatch_frame(&mut self.windows, &mut ctx);

        for signal in self.windows.signals().drain() {
            log::info!("{signal:?}");
            if let WindowSignal::Destroyed { .. } = signal {
                event_loop.exit();
            }
        }

        let mut toggles = Toggles::default();
        for event in self.input.drain() {
            log::debug!(
                "{:?} {:?} at ({:.1}, {:.1}) t={:.3}s {:?}",
                event.device,
                event.phase,
                event.position.x,
                event.position.y,
                event.timestamp,
                event.payload
            );
            match (event.phase, event.key()) {
                (Phase::KeyDown, Some(Key::Escape)) => toggles.cursor_pinning = true,
                (Phase::KeyDown, Some(Key::F11)) => toggles.fullscreen = true,
                _ => {}
            }
        }

        let Some(native) = self.native.as_mut() else {
            return;
        };
        let Some(window) = self.windows.get_mut(native.id) else {
            return;
        };
        apply_toggles(window, &toggles);
        native.state.sync_with(window);
    }
}

fn apply_toggles(window: &mut Window, toggles: &Toggles) {
    if toggles.cursor_pinning {
        let pinned = window.cursor_capture() == CursorCapture::Pinning;
        let (capture, visible) = if pinned {
            (CursorCapture::Off, true)
        } else {
            (CursorCapture::Pinning, false)
        };
        window.set_cursor_capture(capture);
        window.set_cursor_visibility(visible);
    }
    if toggles.fullscreen {
        window.set_fullscreen(match window.fullscreen() {
            FullscreenMode::Windowed => FullscreenMode::Fullscreen,
            FullscreenMode::Fullscreen => FullscreenMode::Windowed,
        });
    }
}

impl ApplicationHandler for SandboxState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.native.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Creating the sandbox window...");
        let backend = match WinitWindowBuilder::from_config(&self.config.window).build(
            event_loop,
            self.dispatcher.sender(),
            self.clock,
        ) {
            Ok(backend) => backend,
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let id = backend.window_id();
        let handle = backend.handle();
        let close_requested = backend.close_flag();
        let mut state = WinitEventState::new(handle.scale_factor())
            .with_surface_scale(backend.surface_scale());
        state.refresh_from_window(&handle);

        self.dispatcher.post(backend.creation_event());
        let window = Window::new(
            id,
            &self.config.window,
            Box::new(backend),
            self.windows.signals().sender(),
        );
        state.sync_with(&window);
        self.windows.insert(window);

        self.native = Some(NativeWindow {
            id,
            handle,
            state,
            close_requested,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(native) = self.native.as_mut() else {
            return;
        };
        if native.handle.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.run_frame(event_loop),
            event => {
                native.state.refresh_from_window(&native.handle);
                let kinds = translate_winit_event(&event, &mut native.state);
                let id = native.id;
                self.post(id, kinds);
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        let Some(native) = self.native.as_ref() else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(kind) = translate_mouse_motion(delta, &native.state) {
                self.post(native.id, Some(kind));
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let close = self
            .native
            .as_ref()
            .is_some_and(|n| n.close_requested.load(Ordering::Acquire));
        if close {
            log::info!("Window closed by the application, exiting event loop...");
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ApertureConfig::load_or_default(CONFIG_PATH)?;
    let event_loop = EventLoop::new()?;
    let mut state = SandboxState::new(config);
    event_loop.run_app(&mut state)?;
    Ok(())
}
